pub mod annotations;
pub mod checks;
pub mod clock;
pub mod color_refs;
pub mod error;
pub mod extractors;
pub mod figures;
pub mod patterns;
pub mod rules;
pub mod selector;

use std::sync::Arc;

use procedure_types::{DocumentTree, MalformedInputError, ValidationFinding, ValidationReport};
use tracing::{debug, info, warn};

pub use checks::RuleResult;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::RuleTableError;
pub use rules::{Predicate, RuleTable, SpecRule, Target};

/// Checks generated procedure documents against a formatting rule table
#[derive(Clone)]
pub struct SpecValidator {
    rules: Arc<RuleTable>,
    clock: Arc<dyn Clock>,
}

impl SpecValidator {
    pub fn new(rules: Arc<RuleTable>, clock: Arc<dyn Clock>) -> Self {
        Self { rules, clock }
    }

    /// Built-in rule table, dated by the system clock
    pub fn standard() -> Self {
        Self::new(Arc::new(RuleTable::standard()), Arc::new(SystemClock))
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Validate a document tree. Findings come out in rule-table order,
    /// then document order within a rule.
    pub fn validate(&self, document: &DocumentTree) -> ValidationReport {
        let today = self.clock.today();
        let mut findings = Vec::new();

        for rule in self.rules.iter() {
            let targets = selector::resolve(document, &rule.target);

            if targets.is_empty() {
                debug!(
                    rule = %rule.id,
                    target = %rule.target.describe(),
                    required = rule.required,
                    "No matching element"
                );
                if rule.required {
                    findings.push(ValidationFinding::new(
                        &rule.id,
                        rule.severity,
                        rule.target.describe(),
                        rule.predicate.describe_expected(),
                        "missing",
                        format!("{}: required element not found", rule.description),
                    ));
                }
                continue;
            }

            for located in &targets {
                if let RuleResult::Fail {
                    expected,
                    actual,
                    reason,
                } = checks::evaluate(rule, located, today)
                {
                    debug!(rule = %rule.id, location = %located.path, %actual, "Rule failed");
                    findings.push(ValidationFinding::new(
                        &rule.id,
                        rule.severity,
                        &located.path,
                        expected,
                        actual,
                        format!("{}: {}", rule.description, reason),
                    ));
                }
            }
        }

        let report = ValidationReport::from_findings(
            document.title.clone(),
            self.rules.version.clone(),
            self.rules.len(),
            findings,
        );

        info!(
            document = report.document.as_deref().unwrap_or("(untitled)"),
            rules = report.summary.rules_checked,
            errors = report.summary.errors,
            warnings = report.summary.warnings,
            compliant = report.summary.compliant,
            "Validation complete"
        );

        report
    }

    /// Parse a JSON document tree and validate it
    pub fn validate_json(&self, json: &str) -> Result<ValidationReport, MalformedInputError> {
        let document = DocumentTree::from_json(json).map_err(|e| {
            warn!(error = %e, "Rejected malformed document");
            e
        })?;
        Ok(self.validate(&document))
    }
}

impl Default for SpecValidator {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for SpecValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecValidator")
            .field("rule_table", &self.rules.version)
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use procedure_types::{DocNode, NodeKind, Severity};

    fn header_rule_table() -> RuleTable {
        let json = r##"{"version": "t", "rules": [{
            "id": "header-bg", "path": "header.row1.cell1", "property": "fill",
            "expected": "#154747", "predicate": "equals",
            "severity": "error", "required": true
        }]}"##;
        RuleTable::from_json(json).unwrap()
    }

    fn validator(table: RuleTable) -> SpecValidator {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        SpecValidator::new(Arc::new(table), Arc::new(FixedClock(today)))
    }

    fn document_with_header_fill(fill: &str) -> DocumentTree {
        let header = DocNode::new(NodeKind::Table).with_role("header").with_child(
            DocNode::new(NodeKind::Row).with_child(
                DocNode::new(NodeKind::Cell)
                    .with_text("Card Replacement")
                    .with_prop("fill", fill),
            ),
        );
        DocumentTree::new(DocNode::new(NodeKind::Document).with_child(header)).unwrap()
    }

    #[test]
    fn test_wrong_header_fill_is_one_error() {
        let report = validator(header_rule_table()).validate(&document_with_header_fill("#000000"));

        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.rule_id, "header-bg");
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.expected, "#154747");
        assert_eq!(finding.actual, "#000000");
        assert_eq!(finding.location, "header.row1.cell1");
        assert!(!report.summary.compliant);
    }

    #[test]
    fn test_correct_header_fill_is_compliant() {
        let report = validator(header_rule_table()).validate(&document_with_header_fill("#154747"));
        assert!(report.findings.is_empty());
        assert!(report.is_compliant());
        assert_eq!(report.summary.rules_checked, 1);
    }

    #[test]
    fn test_missing_required_target() {
        let empty = DocumentTree::new(DocNode::new(NodeKind::Document)).unwrap();
        let report = validator(header_rule_table()).validate(&empty);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].actual, "missing");
        assert_eq!(report.findings[0].location, "header.row1.cell1");
    }

    #[test]
    fn test_optional_target_skipped_silently() {
        let rule = SpecRule::new(
            "toc",
            "toc",
            Target::role("toc-entry"),
            Predicate::range(10.0, 11.0),
        )
        .on("size")
        .optional();
        let table = RuleTable::new("t", vec![rule]).unwrap();
        let empty = DocumentTree::new(DocNode::new(NodeKind::Document)).unwrap();
        assert!(validator(table).validate(&empty).findings.is_empty());
    }

    #[test]
    fn test_validate_json_rejects_malformed_input() {
        let result = validator(header_rule_table()).validate_json("[1, 2, 3]");
        assert!(matches!(result, Err(MalformedInputError::Json(_))));
    }

    #[test]
    fn test_report_carries_table_version_and_title() {
        let doc = document_with_header_fill("#154747").with_title("Card Replacement");
        let report = validator(header_rule_table()).validate(&doc);
        assert_eq!(report.rule_table_version, "t");
        assert_eq!(report.document.as_deref(), Some("Card Replacement"));
    }
}
