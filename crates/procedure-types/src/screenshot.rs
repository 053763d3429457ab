//! Screenshot analysis and procedure step types consumed by the matcher

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedInputError;

/// Normalized section identifier (trimmed, lowercase)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SectionTag(String);

impl SectionTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SectionTag {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SectionTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<SectionTag> for String {
    fn from(value: SectionTag) -> Self {
        value.0
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of screen the vision step classified the screenshot as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScreenType {
    Form,
    Dialog,
    List,
    Search,
    Menu,
    Dashboard,
    Confirmation,
    Login,
    #[default]
    Unknown,
}

impl ScreenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenType::Form => "form",
            ScreenType::Dialog => "dialog",
            ScreenType::List => "list",
            ScreenType::Search => "search",
            ScreenType::Menu => "menu",
            ScreenType::Dashboard => "dashboard",
            ScreenType::Confirmation => "confirmation",
            ScreenType::Login => "login",
            ScreenType::Unknown => "unknown",
        }
    }
}

impl From<String> for ScreenType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "form" => ScreenType::Form,
            "dialog" | "modal" => ScreenType::Dialog,
            "list" | "table" => ScreenType::List,
            "search" => ScreenType::Search,
            "menu" | "navigation" => ScreenType::Menu,
            "dashboard" => ScreenType::Dashboard,
            "confirmation" => ScreenType::Confirmation,
            "login" => ScreenType::Login,
            _ => ScreenType::Unknown,
        }
    }
}

impl From<ScreenType> for String {
    fn from(value: ScreenType) -> Self {
        value.as_str().to_string()
    }
}

/// Position as percentages of the image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A UI element detected on the screenshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl UiElement {
    pub fn new(element_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            label: label.into(),
            position: None,
        }
    }
}

/// Output of the external vision/OCR step for one screenshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotAnalysis {
    pub ocr_text: String,
    #[serde(default)]
    pub screen_type: ScreenType,
    #[serde(default)]
    pub ui_elements: Vec<UiElement>,
    pub suggested_section: SectionTag,
}

impl ScreenshotAnalysis {
    pub fn new(ocr_text: impl Into<String>, suggested_section: impl Into<SectionTag>) -> Self {
        Self {
            ocr_text: ocr_text.into(),
            screen_type: ScreenType::Unknown,
            ui_elements: Vec::new(),
            suggested_section: suggested_section.into(),
        }
    }

    pub fn with_screen_type(mut self, screen_type: ScreenType) -> Self {
        self.screen_type = screen_type;
        self
    }

    pub fn with_element(mut self, element: UiElement) -> Self {
        self.ui_elements.push(element);
        self
    }

    /// Parse the vision service's JSON output
    pub fn from_json(json: &str) -> Result<Self, MalformedInputError> {
        let analysis: ScreenshotAnalysis = serde_json::from_str(json)?;
        if analysis.suggested_section.as_str().is_empty() {
            return Err(MalformedInputError::Shape(
                "suggested_section must not be empty".to_string(),
            ));
        }
        Ok(analysis)
    }
}

/// A procedure step a screenshot may illustrate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureStep {
    pub id: String,
    pub text: String,
    pub section: SectionTag,
    /// Sequence index of the step within the procedure
    pub order: u32,
    /// Figure already assigned to this step, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure: Option<u32>,
}

impl ProcedureStep {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        section: impl Into<SectionTag>,
        order: u32,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            section: section.into(),
            order,
            figure: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_tag_normalizes() {
        assert_eq!(SectionTag::new("  Card-Selection "), SectionTag::new("card-selection"));
    }

    #[test]
    fn test_analysis_from_json() {
        let json = r#"{
            "ocr_text": "Account Number: ____",
            "screen_type": "form",
            "ui_elements": [{"type": "field", "label": "Account Number"}],
            "suggested_section": "Card-Selection"
        }"#;
        let analysis = ScreenshotAnalysis::from_json(json).unwrap();
        assert_eq!(analysis.screen_type, ScreenType::Form);
        assert_eq!(analysis.suggested_section.as_str(), "card-selection");
        assert_eq!(analysis.ui_elements[0].element_type, "field");
    }

    #[test]
    fn test_unknown_screen_type_is_tolerated() {
        let json = r#"{"ocr_text": "", "screen_type": "hologram", "suggested_section": "intro"}"#;
        let analysis = ScreenshotAnalysis::from_json(json).unwrap();
        assert_eq!(analysis.screen_type, ScreenType::Unknown);
    }

    #[test]
    fn test_missing_mandatory_field_is_malformed() {
        let json = r#"{"screen_type": "form", "suggested_section": "intro"}"#;
        let err = ScreenshotAnalysis::from_json(json).unwrap_err();
        assert!(matches!(err, MalformedInputError::Json(_)));
    }

    #[test]
    fn test_blank_section_is_malformed() {
        let json = r#"{"ocr_text": "x", "suggested_section": "   "}"#;
        let err = ScreenshotAnalysis::from_json(json).unwrap_err();
        assert!(matches!(err, MalformedInputError::Shape(_)));
    }
}
