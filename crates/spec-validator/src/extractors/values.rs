// Value extraction utilities for style comparison
use chrono::NaiveDate;
use lazy_static::lazy_static;
use procedure_types::StyleValue;
use regex::Regex;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#?([0-9A-Fa-f]{6})$").unwrap();
    static ref MEASURE: Regex =
        Regex::new(r#"^\s*(-?\d+(?:\.\d+)?)\s*(?:pt|in|%|"|x)?\s*$"#).unwrap();
}

/// Formats accepted for dates typed into the header table
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// Normalizes "#154747", "154747" or "#15a7c4" to uppercase "#RRGGBB"
pub fn normalize_hex_color(text: &str) -> Option<String> {
    HEX_COLOR
        .captures(text.trim())
        .and_then(|c| c.get(1))
        .map(|m| format!("#{}", m.as_str().to_uppercase()))
}

/// Parses a number with an optional unit suffix ("11pt", "0.75in", "30%")
pub fn parse_measure(text: &str) -> Option<f64> {
    MEASURE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Numeric reading of a style value, accepting unit-suffixed text
pub fn numeric_value(value: &StyleValue) -> Option<f64> {
    match value {
        StyleValue::Number(n) => Some(*n),
        StyleValue::Text(s) => parse_measure(s),
        _ => None,
    }
}

/// Parses a header date in any of the accepted formats
pub fn parse_document_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
