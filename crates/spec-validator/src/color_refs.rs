//! Consistency between color references in procedure text and the
//! colors actually drawn on annotated figures
//!
//! Procedure text refers to annotations inline, e.g. "Click Save (red
//! callout 2)". The figure registry records the color each annotation
//! was rendered in. Mismatches are reported as warnings.

use std::collections::BTreeMap;

use procedure_types::{MalformedInputError, Severity, ValidationFinding};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::patterns::{COLOR_REFERENCE, FIGURE_REFERENCE};

pub const COLOR_CONSISTENCY_RULE: &str = "color-consistency";
pub const COLOR_REFERENCES_RULE: &str = "color-references";

/// Annotation palette, by color name
const PALETTE: &[(&str, &str)] = &[
    ("red", "#C00000"),
    ("critical", "#C00000"),
    ("blue", "#2E74B5"),
    ("info", "#2E74B5"),
    ("gold", "#FFC000"),
    ("warning", "#FFC000"),
    ("yellow", "#FFC000"),
    ("green", "#548235"),
    ("success", "#548235"),
    ("teal", "#154747"),
    ("primary", "#154747"),
    ("purple", "#7030A0"),
    ("orange", "#ED7D31"),
];

/// Names that refer to the same annotation color
const EQUIVALENT_COLORS: &[&[&str]] = &[
    &["red", "critical"],
    &["blue", "info"],
    &["gold", "warning", "yellow"],
    &["green", "success"],
    &["teal", "primary"],
    &["purple"],
    &["orange"],
];

/// Hex value of a palette color name
pub fn palette_hex(name: &str) -> Option<&'static str> {
    let name = name.trim().to_lowercase();
    PALETTE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hex)| *hex)
}

/// True when both names denote the same palette color
pub fn colors_equivalent(expected: &str, actual: &str) -> bool {
    let expected = expected.trim().to_lowercase();
    let actual = actual.trim().to_lowercase();
    if expected == actual {
        return true;
    }
    EQUIVALENT_COLORS
        .iter()
        .any(|group| group.contains(&expected.as_str()) && group.contains(&actual.as_str()))
}

/// Color an annotation was rendered with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedColor {
    pub color_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

/// Figure registry written by the annotation step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureRegistry {
    /// figure number -> annotation number -> rendered color
    #[serde(default)]
    pub color_map: BTreeMap<u32, BTreeMap<u32, RenderedColor>>,
}

impl FigureRegistry {
    pub fn from_json(json: &str) -> Result<Self, MalformedInputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn color_of(&self, figure: u32, annotation: u32) -> Option<&RenderedColor> {
        self.color_map.get(&figure)?.get(&annotation)
    }
}

/// A "(red callout 1)" reference found under a figure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorReference {
    pub figure: u32,
    pub annotation: u32,
    pub color: String,
}

/// Collect color references, attributing each to the most recent figure
/// mentioned on or before its line. References before any figure are
/// dropped; a later reference to the same annotation wins.
pub fn parse_color_references(text: &str) -> Vec<ColorReference> {
    let mut found: BTreeMap<(u32, u32), String> = BTreeMap::new();
    let mut current_figure: Option<u32> = None;

    for line in text.lines() {
        if let Some(figure) = FIGURE_REFERENCE
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            current_figure = Some(figure);
        }

        let Some(figure) = current_figure else {
            continue;
        };

        for caps in COLOR_REFERENCE.captures_iter(line) {
            let color = caps[1].to_lowercase();
            let annotation = caps
                .get(3)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(1);
            found.insert((figure, annotation), color);
        }
    }

    found
        .into_iter()
        .map(|((figure, annotation), color)| ColorReference {
            figure,
            annotation,
            color,
        })
        .collect()
}

/// Counts from a color consistency pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCheckSummary {
    pub total_checked: usize,
    pub matches: usize,
    pub mismatches: usize,
    /// References to annotations absent from the registry
    pub missing: usize,
}

impl ColorCheckSummary {
    pub fn is_consistent(&self) -> bool {
        self.mismatches == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCheck {
    pub findings: Vec<ValidationFinding>,
    pub summary: ColorCheckSummary,
}

/// Compare text color references with the registry's rendered colors
pub fn check_color_consistency(text: &str, registry: &FigureRegistry) -> ColorCheck {
    let mut findings = Vec::new();
    let mut summary = ColorCheckSummary::default();

    if registry.color_map.is_empty() {
        debug!("Registry has no color map, skipping color consistency");
        return ColorCheck { findings, summary };
    }

    let references = parse_color_references(text);
    if references.is_empty() {
        findings.push(ValidationFinding::new(
            COLOR_REFERENCES_RULE,
            Severity::Warning,
            "document",
            "inline color references",
            "none",
            "No color references found in document text",
        ));
        return ColorCheck { findings, summary };
    }

    for reference in &references {
        let location = format!("figure{}.annotation{}", reference.figure, reference.annotation);

        let Some(rendered) = registry.color_of(reference.figure, reference.annotation) else {
            summary.missing += 1;
            findings.push(ValidationFinding::new(
                COLOR_CONSISTENCY_RULE,
                Severity::Warning,
                location,
                &reference.color,
                "missing",
                format!(
                    "Figure {} annotation {}: text expects {}, but the annotation is not in the registry",
                    reference.figure, reference.annotation, reference.color
                ),
            ));
            continue;
        };

        summary.total_checked += 1;
        if colors_equivalent(&reference.color, &rendered.color_name) {
            summary.matches += 1;
            continue;
        }

        summary.mismatches += 1;
        let expected_hex = palette_hex(&reference.color).unwrap_or("?");
        let actual_hex = rendered.hex.as_deref().unwrap_or("?");
        findings.push(ValidationFinding::new(
            COLOR_CONSISTENCY_RULE,
            Severity::Warning,
            location,
            format!("{} ({})", reference.color, expected_hex),
            format!("{} ({})", rendered.color_name.to_lowercase(), actual_hex),
            format!(
                "Figure {} annotation {}: text says '{}' but image has '{}'",
                reference.figure, reference.annotation, reference.color, rendered.color_name
            ),
        ));
    }

    info!(
        checked = summary.total_checked,
        matches = summary.matches,
        mismatches = summary.mismatches,
        missing = summary.missing,
        "Color consistency checked"
    );

    ColorCheck { findings, summary }
}
