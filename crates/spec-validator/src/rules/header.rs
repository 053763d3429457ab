//! Header table: teal title bar with white bold text, plus the
//! department and review-date metadata fields.

use super::{Predicate, SpecRule, Target};

/// TFCU primary teal
pub const BRAND_TEAL: &str = "#154747";

/// Procedures are reviewed at least yearly
pub const REVIEW_INTERVAL_DAYS: u32 = 365;

const TITLE_CELL: &str = "header.row1.cell1";

pub fn rules() -> Vec<SpecRule> {
    vec![
        SpecRule::new(
            "header-present",
            "Document opens with a header table",
            Target::role("header"),
            Predicate::Present,
        ),
        SpecRule::new(
            "header-bg",
            "Header title cell uses the brand teal fill",
            Target::path(TITLE_CELL),
            Predicate::equals(BRAND_TEAL),
        )
        .on("fill"),
        SpecRule::new(
            "header-title-color",
            "Header title text is white",
            Target::path(TITLE_CELL),
            Predicate::equals("#FFFFFF"),
        )
        .on("color"),
        SpecRule::new(
            "header-title-font",
            "Header title uses Calibri",
            Target::path(TITLE_CELL),
            Predicate::equals("Calibri"),
        )
        .on("font"),
        SpecRule::new(
            "header-title-size",
            "Header title is 14-16pt",
            Target::path(TITLE_CELL),
            Predicate::range(14.0, 16.0),
        )
        .on("size"),
        SpecRule::new(
            "header-title-bold",
            "Header title is bold",
            Target::path(TITLE_CELL),
            Predicate::equals(true),
        )
        .on("bold"),
        SpecRule::new(
            "header-width-type",
            "Header table uses percentage widths",
            Target::path("header"),
            Predicate::equals("pct"),
        )
        .on("width_type"),
        SpecRule::new(
            "header-column-widths",
            "Header column widths add up to 100%",
            Target::path("header"),
            Predicate::percent_total(),
        )
        .on("column_widths"),
        SpecRule::new(
            "header-department",
            "Header names the owning department",
            Target::path("header"),
            Predicate::Present,
        )
        .on("department")
        .warning(),
        SpecRule::new(
            "header-date-updated",
            "Header carries a Date Updated field",
            Target::path("header"),
            Predicate::Present,
        )
        .on("date_updated")
        .warning(),
        SpecRule::new(
            "header-review-age",
            "Procedure was updated within the review interval",
            Target::path("header"),
            Predicate::MaxAgeDays(REVIEW_INTERVAL_DAYS),
        )
        .on("date_updated")
        .warning(),
    ]
}
