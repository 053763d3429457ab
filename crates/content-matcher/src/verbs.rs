//! Leading step verbs and the kind of UI element each one acts on

use serde::{Deserialize, Serialize};

/// UI element a step's action is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiTarget {
    Button,
    Dropdown,
    TextField,
    Area,
    Menu,
    Checkbox,
}

impl UiTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiTarget::Button => "button",
            UiTarget::Dropdown => "dropdown",
            UiTarget::TextField => "text_field",
            UiTarget::Area => "area",
            UiTarget::Menu => "menu",
            UiTarget::Checkbox => "checkbox",
        }
    }
}

/// Verbs that open a procedure step and map to a UI target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepVerb {
    Click,
    Select,
    Enter,
    Verify,
    Navigate,
    Check,
}

impl StepVerb {
    pub const ALL: [StepVerb; 6] = [
        StepVerb::Click,
        StepVerb::Select,
        StepVerb::Enter,
        StepVerb::Verify,
        StepVerb::Navigate,
        StepVerb::Check,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepVerb::Click => "click",
            StepVerb::Select => "select",
            StepVerb::Enter => "enter",
            StepVerb::Verify => "verify",
            StepVerb::Navigate => "navigate",
            StepVerb::Check => "check",
        }
    }

    pub fn parse(word: &str) -> Option<Self> {
        let word = word.trim().to_lowercase();
        Self::ALL.into_iter().find(|v| v.as_str() == word)
    }

    pub fn target(&self) -> UiTarget {
        match self {
            StepVerb::Click => UiTarget::Button,
            StepVerb::Select => UiTarget::Dropdown,
            StepVerb::Enter => UiTarget::TextField,
            StepVerb::Verify => UiTarget::Area,
            StepVerb::Navigate => UiTarget::Menu,
            StepVerb::Check => UiTarget::Checkbox,
        }
    }

    /// Split step text into its leading verb and the rest of the sentence
    pub fn split_step(text: &str) -> Option<(Self, &str)> {
        let trimmed = text.trim_start();
        let end = trimmed
            .find(|c: char| !c.is_alphanumeric())
            .unwrap_or(trimmed.len());
        let verb = Self::parse(&trimmed[..end])?;
        let rest = trimmed[end..].trim_start_matches(|c: char| !c.is_alphanumeric());
        Some((verb, rest.trim_end()))
    }
}
