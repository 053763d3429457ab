//! Cross-checks between the figure index and the procedure text

use std::collections::BTreeSet;

use procedure_types::{MalformedInputError, Severity, ValidationFinding};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::patterns::FIGURE_REFERENCE;

const INDEX_LOCATION: &str = "figure-index";

/// One annotated figure as listed in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureEntry {
    pub number: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub annotations_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub total: u32,
    pub annotated: u32,
    pub coverage_pct: f64,
}

/// Figure index produced after screenshots are annotated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureIndex {
    #[serde(default)]
    pub figures: Vec<FigureEntry>,
    #[serde(default)]
    pub total_figures: u32,
    #[serde(default)]
    pub total_annotations: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_stats: Option<CoverageStats>,
}

impl FigureIndex {
    pub fn from_json(json: &str) -> Result<Self, MalformedInputError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Coverage as recorded, or derived from per-figure annotation counts
    pub fn coverage(&self) -> CoverageStats {
        if let Some(stats) = &self.coverage_stats {
            return stats.clone();
        }
        let total = self.figures.len() as u32;
        let annotated = self
            .figures
            .iter()
            .filter(|f| f.annotations_count > 0)
            .count() as u32;
        let coverage_pct = if total > 0 {
            f64::from(annotated) / f64::from(total) * 100.0
        } else {
            0.0
        };
        CoverageStats {
            total,
            annotated,
            coverage_pct,
        }
    }
}

/// Figure numbers mentioned as "Figure N" or "Fig. N"
pub fn referenced_figures(text: &str) -> BTreeSet<u32> {
    FIGURE_REFERENCE
        .captures_iter(text)
        .filter_map(|c| c.get(1).and_then(|m| m.as_str().parse().ok()))
        .collect()
}

/// Check that every indexed figure is referenced and annotated
pub fn check_figure_index(text: &str, index: &FigureIndex) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();
    let referenced = referenced_figures(text);

    for figure in &index.figures {
        if referenced.contains(&figure.number) {
            continue;
        }
        let source = figure
            .source_file
            .as_deref()
            .or(Some(figure.title.as_str()).filter(|t| !t.is_empty()))
            .unwrap_or("untitled");
        findings.push(ValidationFinding::new(
            "figure-referenced",
            Severity::Warning,
            format!("figure{}", figure.number),
            "referenced in text",
            "unreferenced",
            format!(
                "Figure {} ({}) is not referenced in the document text",
                figure.number, source
            ),
        ));
    }

    let coverage = index.coverage();
    if index.total_figures == 0 {
        findings.push(ValidationFinding::new(
            "figures-present",
            Severity::Error,
            INDEX_LOCATION,
            "at least one figure",
            "0",
            "No figures found; run the annotation pipeline",
        ));
    } else if index.total_annotations == 0 {
        findings.push(ValidationFinding::new(
            "annotations-present",
            Severity::Error,
            INDEX_LOCATION,
            "at least one annotation",
            "0",
            "No annotations applied; every figure needs annotations",
        ));
    } else if coverage.coverage_pct < 100.0 {
        findings.push(ValidationFinding::new(
            "annotation-coverage",
            Severity::Warning,
            INDEX_LOCATION,
            "100%",
            format!("{}%", (coverage.coverage_pct * 10.0).round() / 10.0),
            format!(
                "Low annotation coverage: {}/{} figures annotated",
                coverage.annotated, coverage.total
            ),
        ));
    }

    info!(
        figures = index.total_figures,
        annotations = index.total_annotations,
        referenced = referenced.len(),
        findings = findings.len(),
        "Figure index checked"
    );

    findings
}
