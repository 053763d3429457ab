//! Regex patterns and keyword tables shared by the checks

use lazy_static::lazy_static;
use regex::Regex;

/// Roles that mark a table as a record of past events
pub const HISTORICAL_ROLES: &[&str] = &["revision-table", "revision-history", "change-log"];

/// Palette color names accepted in inline figure references
pub const COLOR_NAMES: &[&str] = &[
    "red", "critical", "blue", "info", "gold", "warning", "yellow", "green", "success", "teal",
    "primary", "purple", "orange",
];

/// Annotation kinds accepted in inline figure references
pub const ANNOTATION_KINDS: &[&str] = &[
    "callout",
    "arrow",
    "highlight",
    "circle",
    "box",
    "label",
    "marker",
    "number",
];

lazy_static! {
    /// Template text left behind by the document generator
    static ref PLACEHOLDER_PATTERNS: Vec<Regex> = vec![
        // [Enter date], [Author name]
        Regex::new(r"^\[.*\]$").unwrap(),
        // <name>
        Regex::new(r"^<.*>$").unwrap(),
        Regex::new(r"(?i)^(tbd|tba|n/?a|none|pending|placeholder|lorem ipsum.*)$").unwrap(),
        // XX/XX/XXXX, MM/DD/YYYY
        Regex::new(r"(?i)^(xx|mm)/(xx|dd)/(xxxx|yyyy|xx|yy)$").unwrap(),
        // ---, ___, ..., …
        Regex::new(r"^[-_.…—–\s]+$").unwrap(),
    ];

    /// "(red callout 1)" style references in procedure text
    pub static ref COLOR_REFERENCE: Regex = Regex::new(&format!(
        r"(?i)\(({})\s+({})(?:\s+(\d+))?\)",
        COLOR_NAMES.join("|"),
        ANNOTATION_KINDS.join("|")
    ))
    .unwrap();

    /// "Figure 3" or "Fig. 3"
    pub static ref FIGURE_REFERENCE: Regex =
        Regex::new(r"(?i)\bfig(?:ure|\.)\s*(\d+)").unwrap();
}

/// True for empty cells and generator placeholder text
pub fn is_placeholder(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || PLACEHOLDER_PATTERNS.iter().any(|p| p.is_match(trimmed))
}

/// Check if a role marks a historical-records table
pub fn is_historical_role(role: &str) -> bool {
    HISTORICAL_ROLES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(role))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_text() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
        assert!(is_placeholder("[Enter date]"));
        assert!(is_placeholder("TBD"));
        assert!(is_placeholder("n/a"));
        assert!(is_placeholder("MM/DD/YYYY"));
        assert!(is_placeholder("XX/XX/XXXX"));
        assert!(is_placeholder("---"));
        assert!(is_placeholder("…"));
    }

    #[test]
    fn test_real_entries_are_not_placeholders() {
        assert!(!is_placeholder("2026-03-14"));
        assert!(!is_placeholder("J. Alvarez"));
        assert!(!is_placeholder("Initial release"));
        assert!(!is_placeholder("Updated [see note]"));
    }

    #[test]
    fn test_color_reference_pattern() {
        let caps = COLOR_REFERENCE.captures("Click Save (Red Callout 2).").unwrap();
        assert_eq!(&caps[1], "Red");
        assert_eq!(&caps[2], "Callout");
        assert_eq!(&caps[3], "2");

        let caps = COLOR_REFERENCE.captures("see the (gold highlight)").unwrap();
        assert!(caps.get(3).is_none());
    }

    #[test]
    fn test_figure_reference_pattern() {
        let found: Vec<&str> = FIGURE_REFERENCE
            .captures_iter("See Figure 2 and fig. 10; not configure 3")
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        assert_eq!(found, vec!["2", "10"]);
    }

    #[test]
    fn test_historical_roles() {
        assert!(is_historical_role("Revision-Table"));
        assert!(!is_historical_role("data-table"));
    }
}
