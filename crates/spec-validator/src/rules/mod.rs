//! Formatting rules for generated procedure documents
//!
//! Each rule targets a document region by structural path or semantic role
//! and compares one resolved style property against an expected value.
//! The standard table is grouped by region:
//!
//! - page setup (size, orientation, margins)
//! - header table (brand fill, title text, widths, metadata fields)
//! - typography (section header bars, body text)
//! - required and optional sections
//! - callout boxes
//! - data and revision history tables
//! - figures and footer

pub mod callouts;
pub mod figures;
pub mod header;
pub mod page;
pub mod sections;
pub mod tables;
pub mod typography;

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use procedure_types::{Severity, StyleValue};
use serde::{Deserialize, Serialize};

use crate::error::RuleTableError;

/// Version tag of the built-in rule table
pub const STANDARD_TABLE_VERSION: &str = "tfcu-procedure-4.4";

/// How a rule locates the element(s) it applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Dotted structural path, e.g. "header.row1.cell1"
    Path(String),
    /// Every node carrying the role; a trailing `*` matches a role prefix
    Role(String),
}

impl Target {
    pub fn path(path: impl Into<String>) -> Self {
        Target::Path(path.into())
    }

    pub fn role(role: impl Into<String>) -> Self {
        Target::Role(role.into())
    }

    /// Location used in findings when nothing matched
    pub fn describe(&self) -> String {
        match self {
            Target::Path(path) => path.clone(),
            Target::Role(role) => format!("role:{}", role),
        }
    }
}

/// Comparison applied to the targeted property
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Element (and property, if named) must exist
    Present,
    Equals(StyleValue),
    OneOf(Vec<StyleValue>),
    /// Inclusive numeric bounds
    Range { min: f64, max: f64 },
    /// Percentage column widths must sum to `total` within `tolerance`
    PercentTotal { total: f64, tolerance: f64 },
    /// Historical tables must not consist of a lone placeholder row
    NoPlaceholderRows,
    /// Date property must not be older than this many days
    MaxAgeDays(u32),
}

impl Predicate {
    pub fn equals(value: impl Into<StyleValue>) -> Self {
        Predicate::Equals(value.into())
    }

    pub fn one_of<V: Into<StyleValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Predicate::OneOf(values.into_iter().map(Into::into).collect())
    }

    pub fn range(min: f64, max: f64) -> Self {
        Predicate::Range { min, max }
    }

    /// Widths summing to 100 with ±1 rounding slack
    pub fn percent_total() -> Self {
        Predicate::PercentTotal {
            total: 100.0,
            tolerance: 1.0,
        }
    }

    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::Present => PredicateKind::Present,
            Predicate::Equals(_) => PredicateKind::Equals,
            Predicate::OneOf(_) => PredicateKind::OneOf,
            Predicate::Range { .. } => PredicateKind::Range,
            Predicate::PercentTotal { .. } => PredicateKind::PercentTotal,
            Predicate::NoPlaceholderRows => PredicateKind::NoPlaceholderRows,
            Predicate::MaxAgeDays(_) => PredicateKind::MaxAgeDays,
        }
    }

    /// Human-readable expectation for findings
    pub fn describe_expected(&self) -> String {
        match self {
            Predicate::Present => "present".to_string(),
            Predicate::Equals(value) => value.to_string(),
            Predicate::OneOf(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                format!("one of [{}]", parts.join(", "))
            }
            Predicate::Range { min, max } => {
                format!("between {} and {}", StyleValue::Number(*min), StyleValue::Number(*max))
            }
            Predicate::PercentTotal { total, tolerance } => format!(
                "{} (±{})",
                StyleValue::Number(*total),
                StyleValue::Number(*tolerance)
            ),
            Predicate::NoPlaceholderRows => "at least one real entry".to_string(),
            Predicate::MaxAgeDays(days) => format!("within {} days", days),
        }
    }
}

/// Predicate names as they appear in rule table files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    Present,
    Equals,
    OneOf,
    Range,
    PercentTotal,
    NoPlaceholderRows,
    MaxAgeDays,
}

/// A named formatting requirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord", into = "RuleRecord")]
pub struct SpecRule {
    pub id: String,
    pub description: String,
    pub target: Target,
    /// Style property compared on each targeted node
    pub property: Option<String>,
    pub predicate: Predicate,
    pub severity: Severity,
    /// Missing targets are reported when set, skipped otherwise
    pub required: bool,
}

impl SpecRule {
    /// A required, error-severity rule
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        target: Target,
        predicate: Predicate,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            target,
            property: None,
            predicate,
            severity: Severity::Error,
            required: true,
        }
    }

    pub fn on(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

impl fmt::Display for SpecRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.description)
    }
}

fn default_required() -> bool {
    true
}

/// Flat wire form of a rule: `{id, path|role, property, predicate,
/// expected, severity, required}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleRecord {
    id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    property: Option<String>,
    predicate: PredicateKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tolerance: Option<f64>,
    severity: Severity,
    #[serde(default = "default_required")]
    required: bool,
}

#[derive(Deserialize)]
struct Bounds {
    min: f64,
    max: f64,
}

fn style_to_json(value: &StyleValue) -> serde_json::Value {
    match value {
        StyleValue::Bool(b) => serde_json::Value::Bool(*b),
        StyleValue::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        StyleValue::Numbers(list) => serde_json::Value::Array(
            list.iter()
                .map(|n| style_to_json(&StyleValue::Number(*n)))
                .collect(),
        ),
        StyleValue::Text(s) => serde_json::Value::String(s.clone()),
    }
}

impl TryFrom<RuleRecord> for SpecRule {
    type Error = String;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        let id = record.id;

        let target = match (record.path, record.role) {
            (Some(path), None) => Target::Path(path),
            (None, Some(role)) => Target::Role(role),
            (Some(_), Some(_)) => {
                return Err(format!("rule {}: specify either path or role, not both", id))
            }
            (None, None) => return Err(format!("rule {}: missing path or role", id)),
        };

        let expected = record.expected;
        let require_expected = |what: &str| {
            expected
                .clone()
                .ok_or_else(|| format!("rule {}: {} predicate needs an expected value", id, what))
        };

        let predicate = match record.predicate {
            PredicateKind::Present => Predicate::Present,
            PredicateKind::NoPlaceholderRows => Predicate::NoPlaceholderRows,
            PredicateKind::Equals => {
                let value = serde_json::from_value::<StyleValue>(require_expected("equals")?)
                    .map_err(|e| format!("rule {}: {}", id, e))?;
                Predicate::Equals(value)
            }
            PredicateKind::OneOf => {
                let values = serde_json::from_value::<Vec<StyleValue>>(require_expected("one_of")?)
                    .map_err(|e| format!("rule {}: {}", id, e))?;
                if values.is_empty() {
                    return Err(format!("rule {}: one_of needs at least one value", id));
                }
                Predicate::OneOf(values)
            }
            PredicateKind::Range => {
                let raw = require_expected("range")?;
                let (min, max) = match serde_json::from_value::<Bounds>(raw.clone()) {
                    Ok(bounds) => (bounds.min, bounds.max),
                    Err(_) => {
                        let pair = serde_json::from_value::<[f64; 2]>(raw).map_err(|_| {
                            format!("rule {}: range expects {{min, max}} or [min, max]", id)
                        })?;
                        (pair[0], pair[1])
                    }
                };
                if min > max {
                    return Err(format!("rule {}: range min {} exceeds max {}", id, min, max));
                }
                Predicate::Range { min, max }
            }
            PredicateKind::PercentTotal => {
                let total = match &expected {
                    Some(value) => value
                        .as_f64()
                        .ok_or_else(|| format!("rule {}: percent_total expects a number", id))?,
                    None => 100.0,
                };
                Predicate::PercentTotal {
                    total,
                    tolerance: record.tolerance.unwrap_or(1.0),
                }
            }
            PredicateKind::MaxAgeDays => {
                let days = require_expected("max_age_days")?
                    .as_u64()
                    .and_then(|d| u32::try_from(d).ok())
                    .ok_or_else(|| format!("rule {}: max_age_days expects a day count", id))?;
                Predicate::MaxAgeDays(days)
            }
        };

        Ok(SpecRule {
            id,
            description: record.description,
            target,
            property: record.property,
            predicate,
            severity: record.severity,
            required: record.required,
        })
    }
}

impl From<SpecRule> for RuleRecord {
    fn from(rule: SpecRule) -> Self {
        let (path, role) = match rule.target {
            Target::Path(path) => (Some(path), None),
            Target::Role(role) => (None, Some(role)),
        };

        let kind = rule.predicate.kind();
        let (expected, tolerance) = match rule.predicate {
            Predicate::Present | Predicate::NoPlaceholderRows => (None, None),
            Predicate::Equals(value) => (Some(style_to_json(&value)), None),
            Predicate::OneOf(values) => (
                Some(serde_json::Value::Array(
                    values.iter().map(style_to_json).collect(),
                )),
                None,
            ),
            Predicate::Range { min, max } => {
                (Some(serde_json::json!({ "min": min, "max": max })), None)
            }
            Predicate::PercentTotal { total, tolerance } => {
                (Some(serde_json::json!(total)), Some(tolerance))
            }
            Predicate::MaxAgeDays(days) => (Some(serde_json::json!(days)), None),
        };

        RuleRecord {
            id: rule.id,
            description: rule.description,
            path,
            role,
            property: rule.property,
            predicate: kind,
            expected,
            tolerance,
            severity: rule.severity,
            required: rule.required,
        }
    }
}

/// Immutable, versioned set of rules shared read-only across validations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub version: String,
    pub rules: Vec<SpecRule>,
}

impl RuleTable {
    /// Build a table, rejecting empty tables and duplicate rule ids
    pub fn new(version: impl Into<String>, rules: Vec<SpecRule>) -> Result<Self, RuleTableError> {
        if rules.is_empty() {
            return Err(RuleTableError::Empty);
        }

        let mut seen = BTreeSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleTableError::DuplicateRule(rule.id.clone()));
            }
        }

        Ok(Self {
            version: version.into(),
            rules,
        })
    }

    /// The built-in procedure style table
    pub fn standard() -> Self {
        let mut rules = Vec::new();
        rules.extend(page::rules());
        rules.extend(header::rules());
        rules.extend(typography::rules());
        rules.extend(sections::rules());
        rules.extend(callouts::rules());
        rules.extend(tables::rules());
        rules.extend(figures::rules());

        Self {
            version: STANDARD_TABLE_VERSION.to_string(),
            rules,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, RuleTableError> {
        let table: RuleTable = serde_json::from_str(json)?;
        Self::new(table.version, table.rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleTableError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, RuleTableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, id: &str) -> Option<&SpecRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecRule> {
        self.rules.iter()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}
