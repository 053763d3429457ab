//! Predicate evaluation against a single located node

use chrono::NaiveDate;
use procedure_types::{DocNode, LocatedNode, NodeKind, StyleValue};
use serde::{Deserialize, Serialize};

use crate::clock::days_since;
use crate::extractors::values::{normalize_hex_color, numeric_value, parse_document_date};
use crate::patterns::{is_historical_role, is_placeholder};
use crate::rules::{Predicate, SpecRule};

const EPSILON: f64 = 1e-6;

/// Outcome of checking one rule against one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleResult {
    Pass,

    Fail {
        expected: String,
        actual: String,
        /// Explanation of why it failed
        reason: String,
    },

    /// Rule does not apply to this node
    NotApplicable,
}

impl RuleResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, RuleResult::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, RuleResult::Fail { .. })
    }

    fn fail(
        expected: impl Into<String>,
        actual: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        RuleResult::Fail {
            expected: expected.into(),
            actual: actual.into(),
            reason: reason.into(),
        }
    }
}

/// Check a rule's predicate on one node it targets
pub fn evaluate(rule: &SpecRule, located: &LocatedNode<'_>, today: NaiveDate) -> RuleResult {
    let node = located.node;
    let expected = rule.predicate.describe_expected();
    let property = rule.property.as_deref().unwrap_or("text");

    match rule.predicate {
        Predicate::NoPlaceholderRows => return check_placeholder_rows(node, expected),
        Predicate::PercentTotal { .. } if !has_percentage_widths(node) => {
            return RuleResult::NotApplicable;
        }
        _ => {}
    }

    let value = match &rule.property {
        Some(name) => node.prop(name).cloned(),
        None => node.text.clone().map(StyleValue::Text),
    };

    let value = match (&rule.predicate, value) {
        // The node itself exists; nothing else to check
        (Predicate::Present, _) if rule.property.is_none() => return RuleResult::Pass,
        // Freshness can only be judged once a date is filled in
        (Predicate::MaxAgeDays(_), None) => return RuleResult::NotApplicable,
        (_, None) => {
            return RuleResult::fail(expected, "unset", format!("{} is not set", property))
        }
        (_, Some(value)) => value,
    };

    match &rule.predicate {
        Predicate::Present => match value.as_text() {
            Some(text) if text.trim().is_empty() => {
                RuleResult::fail(expected, "empty", format!("{} is empty", property))
            }
            _ => RuleResult::Pass,
        },
        Predicate::Equals(want) => {
            if values_match(want, &value) {
                RuleResult::Pass
            } else {
                RuleResult::fail(
                    expected,
                    value.to_string(),
                    format!("{} is {}, expected {}", property, value, want),
                )
            }
        }
        Predicate::OneOf(options) => {
            if options.iter().any(|want| values_match(want, &value)) {
                RuleResult::Pass
            } else {
                RuleResult::fail(
                    expected,
                    value.to_string(),
                    format!("{} is {}, not an allowed value", property, value),
                )
            }
        }
        Predicate::Range { min, max } => match numeric_value(&value) {
            Some(n) if n >= min - EPSILON && n <= max + EPSILON => RuleResult::Pass,
            Some(_) => RuleResult::fail(
                expected,
                value.to_string(),
                format!("{} is {}, outside the allowed range", property, value),
            ),
            None => RuleResult::fail(
                expected,
                value.to_string(),
                format!("{} is not a number", property),
            ),
        },
        Predicate::PercentTotal { total, tolerance } => {
            check_percent_total(node, property, &value, *total, *tolerance, expected)
        }
        Predicate::MaxAgeDays(days) => check_age(property, &value, *days, today, expected),
        Predicate::NoPlaceholderRows => RuleResult::NotApplicable,
    }
}

/// Loose equality: numbers within epsilon, hex colors by value, text
/// trimmed and case-insensitive
fn values_match(expected: &StyleValue, actual: &StyleValue) -> bool {
    match (expected, actual) {
        (StyleValue::Number(want), _) => {
            numeric_value(actual).is_some_and(|got| (got - want).abs() <= EPSILON)
        }
        (StyleValue::Bool(want), StyleValue::Bool(got)) => want == got,
        (StyleValue::Bool(want), StyleValue::Text(got)) => {
            got.trim().eq_ignore_ascii_case(if *want { "true" } else { "false" })
        }
        (StyleValue::Numbers(want), StyleValue::Numbers(got)) => {
            want.len() == got.len()
                && want
                    .iter()
                    .zip(got.iter())
                    .all(|(w, g)| (w - g).abs() <= EPSILON)
        }
        (StyleValue::Text(want), StyleValue::Text(got)) => {
            match (normalize_hex_color(want), normalize_hex_color(got)) {
                (Some(w), Some(g)) => w == g,
                _ => want.trim().eq_ignore_ascii_case(got.trim()),
            }
        }
        _ => false,
    }
}

fn has_percentage_widths(node: &DocNode) -> bool {
    node.prop("width_type")
        .and_then(StyleValue::as_text)
        .is_some_and(|t| t.trim().eq_ignore_ascii_case("pct"))
}

fn check_percent_total(
    node: &DocNode,
    property: &str,
    value: &StyleValue,
    total: f64,
    tolerance: f64,
    expected: String,
) -> RuleResult {
    if !has_percentage_widths(node) {
        return RuleResult::NotApplicable;
    }

    let Some(widths) = value.as_numbers() else {
        return RuleResult::fail(
            expected,
            value.to_string(),
            format!("{} is not a list of widths", property),
        );
    };

    let sum: f64 = widths.iter().sum();
    if (sum - total).abs() <= tolerance + EPSILON {
        RuleResult::Pass
    } else {
        RuleResult::fail(
            expected,
            StyleValue::Number(sum).to_string(),
            format!("{} add up to {}", property, StyleValue::Number(sum)),
        )
    }
}

fn check_age(
    property: &str,
    value: &StyleValue,
    max_days: u32,
    today: NaiveDate,
    expected: String,
) -> RuleResult {
    let raw = value.to_string();
    let Some(date) = parse_document_date(&raw) else {
        return RuleResult::fail(
            expected,
            raw,
            format!("{} is not a recognizable date", property),
        );
    };

    let age = days_since(date, today);
    if age < 0 {
        RuleResult::fail(expected, raw, format!("{} is in the future", property))
    } else if age > i64::from(max_days) {
        RuleResult::fail(
            expected,
            format!("{} ({} days old)", raw, age),
            format!("{} is older than {} days", property, max_days),
        )
    } else {
        RuleResult::Pass
    }
}

fn check_placeholder_rows(node: &DocNode, expected: String) -> RuleResult {
    let historical = node.prop("historical").and_then(StyleValue::as_bool) == Some(true)
        || node.role.as_deref().is_some_and(is_historical_role);
    if node.kind != NodeKind::Table || !historical {
        return RuleResult::NotApplicable;
    }

    let rows: Vec<&DocNode> = node
        .children
        .iter()
        .filter(|c| c.kind == NodeKind::Row)
        .collect();
    let flagged = rows
        .iter()
        .any(|r| r.prop("header").and_then(StyleValue::as_bool) == Some(true));

    let body: Vec<&DocNode> = if flagged {
        rows.into_iter()
            .filter(|r| r.prop("header").and_then(StyleValue::as_bool) != Some(true))
            .collect()
    } else if rows.len() > 1 {
        rows.into_iter().skip(1).collect()
    } else {
        rows
    };

    match body.as_slice() {
        [only] if only.children.iter().all(|cell| is_placeholder(&cell.full_text())) => {
            RuleResult::fail(
                expected,
                "placeholder row",
                "table holds a single row of template placeholder text",
            )
        }
        _ => RuleResult::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Target;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn check(rule: &SpecRule, node: &DocNode) -> RuleResult {
        let located = LocatedNode {
            path: "test".to_string(),
            node,
        };
        evaluate(rule, &located, today())
    }

    fn fill_rule() -> SpecRule {
        SpecRule::new("fill", "fill", Target::path("x"), Predicate::equals("#154747")).on("fill")
    }

    #[test]
    fn test_hex_colors_compare_normalized() {
        let node = DocNode::new(NodeKind::Cell).with_prop("fill", "154747");
        assert!(check(&fill_rule(), &node).is_pass());
    }

    #[test]
    fn test_wrong_fill_reports_expected_and_actual() {
        let node = DocNode::new(NodeKind::Cell).with_prop("fill", "#000000");
        match check(&fill_rule(), &node) {
            RuleResult::Fail {
                expected, actual, ..
            } => {
                assert_eq!(expected, "#154747");
                assert_eq!(actual, "#000000");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_property_is_unset() {
        let node = DocNode::new(NodeKind::Cell);
        assert!(matches!(
            check(&fill_rule(), &node),
            RuleResult::Fail { actual, .. } if actual == "unset"
        ));
    }

    #[test]
    fn test_text_compares_case_insensitively() {
        let rule = SpecRule::new("font", "font", Target::path("x"), Predicate::equals("Calibri"))
            .on("font");
        let node = DocNode::new(NodeKind::Run).with_prop("font", " calibri ");
        assert!(check(&rule, &node).is_pass());
    }

    #[test]
    fn test_numeric_tolerance_and_units() {
        let rule = SpecRule::new("size", "size", Target::path("x"), Predicate::range(10.0, 11.0))
            .on("size");
        assert!(check(&rule, &DocNode::new(NodeKind::Run).with_prop("size", 11.0000001)).is_pass());
        assert!(check(&rule, &DocNode::new(NodeKind::Run).with_prop("size", "10.5pt")).is_pass());
        assert!(check(&rule, &DocNode::new(NodeKind::Run).with_prop("size", 12.0)).is_fail());
        assert!(check(&rule, &DocNode::new(NodeKind::Run).with_prop("size", "large")).is_fail());
    }

    #[test]
    fn test_present_rejects_blank_text() {
        let rule = SpecRule::new("dept", "dept", Target::path("header"), Predicate::Present)
            .on("department");
        let blank = DocNode::new(NodeKind::Table).with_prop("department", "  ");
        assert!(matches!(
            check(&rule, &blank),
            RuleResult::Fail { actual, .. } if actual == "empty"
        ));
        let filled = DocNode::new(NodeKind::Table).with_prop("department", "Card Services");
        assert!(check(&rule, &filled).is_pass());
    }

    fn widths_rule() -> SpecRule {
        SpecRule::new("widths", "widths", Target::path("x"), Predicate::percent_total())
            .on("column_widths")
    }

    fn pct_table(widths: Vec<f64>) -> DocNode {
        DocNode::new(NodeKind::Table)
            .with_prop("width_type", "pct")
            .with_prop("column_widths", widths)
    }

    #[test]
    fn test_percent_total_tolerance() {
        assert!(check(&widths_rule(), &pct_table(vec![30.0, 69.0])).is_pass());
        assert!(check(&widths_rule(), &pct_table(vec![30.0, 71.0])).is_pass());
        assert!(check(&widths_rule(), &pct_table(vec![30.0, 67.0])).is_fail());
    }

    #[test]
    fn test_percent_total_skips_fixed_widths() {
        let node = DocNode::new(NodeKind::Table)
            .with_prop("width_type", "dxa")
            .with_prop("column_widths", vec![2000.0, 7000.0]);
        assert_eq!(check(&widths_rule(), &node), RuleResult::NotApplicable);
    }

    #[test]
    fn test_percent_total_skips_fixed_widths_without_list() {
        let node = DocNode::new(NodeKind::Table).with_prop("width_type", "dxa");
        assert_eq!(check(&widths_rule(), &node), RuleResult::NotApplicable);

        let no_type = DocNode::new(NodeKind::Table);
        assert_eq!(check(&widths_rule(), &no_type), RuleResult::NotApplicable);
    }

    fn age_rule() -> SpecRule {
        SpecRule::new("age", "age", Target::path("header"), Predicate::MaxAgeDays(365))
            .on("date_updated")
    }

    #[test]
    fn test_max_age() {
        let header = |date: &str| DocNode::new(NodeKind::Table).with_prop("date_updated", date);
        assert!(check(&age_rule(), &header("2026-01-15")).is_pass());
        assert!(check(&age_rule(), &header("05/31/2025")).is_fail());
        assert!(check(&age_rule(), &header("2027-01-01")).is_fail());
        assert!(check(&age_rule(), &header("MM/DD/YYYY")).is_fail());
        assert_eq!(
            check(&age_rule(), &DocNode::new(NodeKind::Table)),
            RuleResult::NotApplicable
        );
    }

    fn row(cells: &[&str]) -> DocNode {
        DocNode::new(NodeKind::Row)
            .with_children(cells.iter().map(|t| DocNode::new(NodeKind::Cell).with_text(*t)))
    }

    fn placeholder_rule() -> SpecRule {
        SpecRule::new(
            "rows",
            "rows",
            Target::role("revision-table"),
            Predicate::NoPlaceholderRows,
        )
    }

    #[test]
    fn test_lone_placeholder_row_in_history_table_fails() {
        let table = DocNode::new(NodeKind::Table)
            .with_role("revision-table")
            .with_children(vec![row(&["Date", "Change"]), row(&["[Enter date]", "TBD"])]);
        assert!(check(&placeholder_rule(), &table).is_fail());
    }

    #[test]
    fn test_real_history_entry_passes() {
        let table = DocNode::new(NodeKind::Table)
            .with_role("revision-table")
            .with_children(vec![row(&["Date", "Change"]), row(&["2026-03-01", "Initial release"])]);
        assert!(check(&placeholder_rule(), &table).is_pass());
    }

    #[test]
    fn test_placeholder_row_in_data_table_is_not_applicable() {
        let table = DocNode::new(NodeKind::Table)
            .with_role("data-table")
            .with_children(vec![row(&["Field", "Value"]), row(&["", ""])]);
        assert_eq!(check(&placeholder_rule(), &table), RuleResult::NotApplicable);
    }

    #[test]
    fn test_flagged_header_rows() {
        let header = row(&["Date", "Change"]).with_prop("header", true);
        let table = DocNode::new(NodeKind::Table)
            .with_prop("historical", true)
            .with_children(vec![header, row(&["---", "n/a"]), row(&["2026-03-01", "Fix"])]);
        assert!(check(&placeholder_rule(), &table).is_pass());
    }
}
