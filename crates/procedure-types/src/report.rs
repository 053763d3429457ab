use serde::{Deserialize, Serialize};

/// Severity of a finding. Only errors block compliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single rule violation found during a validation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub rule_id: String,
    pub severity: Severity,
    /// Dotted location of the offending element (e.g. "header.row1.cell1")
    pub location: String,
    pub expected: String,
    pub actual: String,
    pub message: String,
}

impl ValidationFinding {
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        location: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            location: location.into(),
            expected: expected.into(),
            actual: actual.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Counts by severity plus the overall verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of rules evaluated
    pub rules_checked: usize,
    pub errors: usize,
    pub warnings: usize,
    /// True iff there are zero error findings
    pub compliant: bool,
}

/// Result of one validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    pub rule_table_version: String,
    pub findings: Vec<ValidationFinding>,
    pub summary: ReportSummary,
}

impl ValidationReport {
    /// Build a report, deriving the summary from the findings
    pub fn from_findings(
        document: Option<String>,
        rule_table_version: impl Into<String>,
        rules_checked: usize,
        findings: Vec<ValidationFinding>,
    ) -> Self {
        let errors = findings.iter().filter(|f| f.is_error()).count();
        let warnings = findings.len() - errors;

        Self {
            document,
            rule_table_version: rule_table_version.into(),
            findings,
            summary: ReportSummary {
                rules_checked,
                errors,
                warnings,
                compliant: errors == 0,
            },
        }
    }

    pub fn is_compliant(&self) -> bool {
        self.summary.compliant
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings.iter().filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    pub fn findings_for<'a>(
        &'a self,
        rule_id: &'a str,
    ) -> impl Iterator<Item = &'a ValidationFinding> + 'a {
        self.findings.iter().filter(move |f| f.rule_id == rule_id)
    }

    /// Render the report as a reviewer checklist
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Procedure Style Report: {}\n",
            self.document.as_deref().unwrap_or("(untitled)")
        ));
        output.push_str(&"=".repeat(60));
        output.push_str("\n\n");

        let status = if self.summary.compliant {
            "COMPLIANT"
        } else {
            "NON-COMPLIANT"
        };
        output.push_str(&format!("Status: {}\n", status));
        output.push_str(&format!("Rule table: {}\n", self.rule_table_version));
        output.push_str(&format!(
            "Rules: {} checked, {} errors, {} warnings\n\n",
            self.summary.rules_checked, self.summary.errors, self.summary.warnings
        ));

        if self.findings.is_empty() {
            output.push_str("All checks passed\n");
            return output;
        }

        output.push_str("Findings:\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');

        for finding in &self.findings {
            let marker = match finding.severity {
                Severity::Error => "✗ ERROR",
                Severity::Warning => "⚠ WARN",
            };
            output.push_str(&format!(
                "{} [{}] {}\n",
                marker, finding.rule_id, finding.location
            ));
            output.push_str(&format!(
                "    Expected: {}  Actual: {}\n",
                finding.expected, finding.actual
            ));
            output.push_str(&format!("    {}\n", finding.message));
        }

        output
    }
}
