//! Pre-flight checks on screenshot annotation sets before rendering
//!
//! Annotation positions are percentages of the image size. Callouts,
//! circles and labels are placed at `position`; highlights cover `bbox`;
//! arrows run from `position` to `end`.

use std::collections::BTreeMap;

use procedure_types::{MalformedInputError, Severity, ValidationFinding};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Top-level keys that document the file rather than an image
const META_KEYS: &[&str] = &["_comment", "_schema", "_instructions", "_example_minimal"];

/// Markers closer than this (in percent) may overlap
const MIN_MARKER_DISTANCE: f64 = 10.0;

/// Margin (in percent) within which markers may be clipped
const EDGE_MARGIN: f64 = 5.0;

fn centre() -> f64 {
    50.0
}

fn bbox_origin() -> f64 {
    40.0
}

fn bbox_extent() -> f64 {
    20.0
}

fn unknown_kind() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default = "centre")]
    pub x: f64,
    #[serde(default = "centre")]
    pub y: f64,
}

impl Default for Point {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default = "bbox_origin")]
    pub x: f64,
    #[serde(default = "bbox_origin")]
    pub y: f64,
    #[serde(default = "bbox_extent")]
    pub w: f64,
    #[serde(default = "bbox_extent")]
    pub h: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            x: 40.0,
            y: 40.0,
            w: 20.0,
            h: 20.0,
        }
    }
}

/// One annotation to draw on a screenshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type", default = "unknown_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figure_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Annotation {
    fn is_marker(&self) -> bool {
        matches!(self.kind.as_str(), "callout" | "circle" | "label")
    }

    fn has_figure_metadata(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.figure_title) || filled(&self.section)
    }
}

/// Annotations keyed by image stem
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationSet {
    pub images: BTreeMap<String, Vec<Annotation>>,
    /// Image keys whose value was not a list
    pub malformed: Vec<String>,
}

impl AnnotationSet {
    pub fn from_json(json: &str) -> Result<Self, MalformedInputError> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut set = AnnotationSet::default();

        for (image, value) in raw {
            if META_KEYS.contains(&image.as_str()) {
                continue;
            }
            if !value.is_array() {
                warn!(image = %image, "Annotation entry is not a list");
                set.malformed.push(image);
                continue;
            }
            let annotations: Vec<Annotation> = serde_json::from_value(value)?;
            set.images.insert(image, annotations);
        }

        Ok(set)
    }

    pub fn image_count(&self) -> usize {
        self.images.len() + self.malformed.len()
    }
}

fn in_bounds(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

fn finding(
    rule_id: &str,
    severity: Severity,
    location: String,
    expected: &str,
    actual: impl Into<String>,
    message: String,
) -> ValidationFinding {
    ValidationFinding::new(rule_id, severity, location, expected, actual, message)
}

/// Validate every image's annotations
pub fn check_annotations(set: &AnnotationSet) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    for image in &set.malformed {
        findings.push(finding(
            "annotation-list",
            Severity::Warning,
            image.clone(),
            "list of annotations",
            "other value",
            format!("{}: expected a list of annotations", image),
        ));
    }

    for (image, annotations) in &set.images {
        check_image(image, annotations, &mut findings);
    }

    let with_metadata = set
        .images
        .values()
        .filter(|anns| anns.first().is_some_and(Annotation::has_figure_metadata))
        .count();
    let total = set.image_count();
    if with_metadata < total {
        findings.push(finding(
            "figure-metadata",
            Severity::Warning,
            "annotations".to_string(),
            "figure_title or section on every image",
            format!("{}/{}", with_metadata, total),
            format!(
                "Only {}/{} images have figure_title or section metadata",
                with_metadata, total
            ),
        ));
    }

    debug!(images = total, findings = findings.len(), "Annotations checked");
    findings
}

fn check_image(image: &str, annotations: &[Annotation], findings: &mut Vec<ValidationFinding>) {
    let mut markers: Vec<(u32, Point)> = Vec::new();

    for (i, ann) in annotations.iter().enumerate() {
        let number = ann.number.unwrap_or(i as u32 + 1);
        let location = format!("{}.annotation{}", image, number);

        if !ann
            .description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
        {
            findings.push(finding(
                "annotation-description",
                Severity::Error,
                location.clone(),
                "description",
                "missing".to_string(),
                format!("{}: annotation #{} ({}) has no description", image, number, ann.kind),
            ));
        }

        if ann.is_marker() {
            let pos = ann.position.unwrap_or_default();
            for (axis, value) in [("x", pos.x), ("y", pos.y)] {
                if !in_bounds(value) {
                    findings.push(finding(
                        "annotation-position",
                        Severity::Error,
                        location.clone(),
                        "0-100",
                        format!("{}={}", axis, value),
                        format!("{}: annotation #{} has invalid {} position", image, number, axis),
                    ));
                }
                if value < EDGE_MARGIN || value > 100.0 - EDGE_MARGIN {
                    findings.push(finding(
                        "annotation-near-edge",
                        Severity::Warning,
                        location.clone(),
                        "5-95",
                        format!("{}={}", axis, value),
                        format!(
                            "{}: annotation #{} is near the edge and may be clipped",
                            image, number
                        ),
                    ));
                }
            }
            markers.push((number, pos));
        } else if ann.kind == "highlight" {
            let bbox = ann.bbox.unwrap_or_default();
            if !in_bounds(bbox.x) || !in_bounds(bbox.y) {
                findings.push(finding(
                    "highlight-position",
                    Severity::Error,
                    location.clone(),
                    "0-100",
                    format!("x={}, y={}", bbox.x, bbox.y),
                    format!("{}: highlight has an invalid position", image),
                ));
            }
            if bbox.x + bbox.w > 100.0 || bbox.y + bbox.h > 100.0 {
                findings.push(finding(
                    "highlight-overflow",
                    Severity::Warning,
                    location.clone(),
                    "within image",
                    format!("right={}, bottom={}", bbox.x + bbox.w, bbox.y + bbox.h),
                    format!("{}: highlight may extend beyond the image", image),
                ));
            }
        } else if ann.kind == "arrow" {
            let ends = [
                ("start", ann.position.unwrap_or_default()),
                ("end", ann.end.unwrap_or_default()),
            ];
            for (name, point) in ends {
                if !in_bounds(point.x) || !in_bounds(point.y) {
                    findings.push(finding(
                        "arrow-position",
                        Severity::Error,
                        location.clone(),
                        "0-100",
                        format!("x={}, y={}", point.x, point.y),
                        format!("{}: arrow {} position is invalid", image, name),
                    ));
                }
            }
        }
    }

    for (i, (first, a)) in markers.iter().enumerate() {
        for (second, b) in &markers[i + 1..] {
            let distance = (b.x - a.x).hypot(b.y - a.y);
            if distance < MIN_MARKER_DISTANCE {
                findings.push(finding(
                    "annotation-overlap",
                    Severity::Warning,
                    format!("{}.annotation{}", image, first),
                    "at least 10% apart",
                    format!("{:.1}%", distance),
                    format!(
                        "{}: annotations #{} and #{} may overlap",
                        image, first, second
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_ids(findings: &[ValidationFinding]) -> Vec<&str> {
        findings.iter().map(|f| f.rule_id.as_str()).collect()
    }

    #[test]
    fn test_clean_annotation_set() {
        let json = r#"{
            "_comment": "Annotations for the card replacement procedure",
            "search_screen": [
                {"type": "callout", "number": 1, "description": "Search box",
                 "position": {"x": 20, "y": 30}, "figure_title": "Member search",
                 "section": "procedure"},
                {"type": "callout", "number": 2, "description": "Go button",
                 "position": {"x": 60, "y": 30}},
                {"type": "highlight", "description": "Results", "bbox": {"x": 10, "y": 50, "w": 80, "h": 30}}
            ]
        }"#;
        let set = AnnotationSet::from_json(json).unwrap();
        assert!(check_annotations(&set).is_empty());
    }

    #[test]
    fn test_missing_description_is_an_error() {
        let json = r#"{"screen": [{"type": "arrow", "figure_title": "x"}]}"#;
        let findings = check_annotations(&AnnotationSet::from_json(json).unwrap());
        assert_eq!(rule_ids(&findings), vec!["annotation-description"]);
        assert_eq!(findings[0].location, "screen.annotation1");
        assert!(findings[0].is_error());
    }

    #[test]
    fn test_positions_out_of_range_and_near_edge() {
        let json = r#"{"screen": [
            {"type": "circle", "description": "a", "section": "s", "position": {"x": 120, "y": 3}}
        ]}"#;
        let findings = check_annotations(&AnnotationSet::from_json(json).unwrap());
        assert_eq!(
            rule_ids(&findings),
            vec!["annotation-position", "annotation-near-edge", "annotation-near-edge"]
        );
    }

    #[test]
    fn test_highlight_overflow_is_a_warning() {
        let json = r#"{"screen": [
            {"type": "highlight", "description": "a", "section": "s", "bbox": {"x": 70, "y": 10, "w": 40}}
        ]}"#;
        let findings = check_annotations(&AnnotationSet::from_json(json).unwrap());
        assert_eq!(rule_ids(&findings), vec!["highlight-overflow"]);
        assert!(!findings[0].is_error());
    }

    #[test]
    fn test_arrow_end_out_of_bounds() {
        let json = r#"{"screen": [
            {"type": "arrow", "description": "a", "section": "s",
             "position": {"x": 10, "y": 10}, "end": {"x": 50, "y": -4}}
        ]}"#;
        let findings = check_annotations(&AnnotationSet::from_json(json).unwrap());
        assert_eq!(rule_ids(&findings), vec!["arrow-position"]);
        assert!(findings[0].message.contains("arrow end"));
    }

    #[test]
    fn test_close_markers_warn() {
        let json = r#"{"screen": [
            {"type": "callout", "number": 1, "description": "a", "section": "s", "position": {"x": 40, "y": 40}},
            {"type": "label", "number": 2, "description": "b", "position": {"x": 44, "y": 43}}
        ]}"#;
        let findings = check_annotations(&AnnotationSet::from_json(json).unwrap());
        assert_eq!(rule_ids(&findings), vec!["annotation-overlap"]);
        assert_eq!(findings[0].actual, "5.0%");
    }

    #[test]
    fn test_images_without_metadata_warn_once() {
        let json = r#"{
            "a": [{"type": "callout", "description": "x", "figure_title": "A"}],
            "b": [{"type": "callout", "description": "y"}],
            "c": {"not": "a list"}
        }"#;
        let set = AnnotationSet::from_json(json).unwrap();
        assert_eq!(set.malformed, vec!["c".to_string()]);
        let findings = check_annotations(&set);
        assert_eq!(rule_ids(&findings), vec!["annotation-list", "figure-metadata"]);
        assert_eq!(findings[1].actual, "1/3");
    }
}
