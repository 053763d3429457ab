use super::header::BRAND_TEAL;
use super::{Predicate, SpecRule, Target};

/// Light teal used behind data table header rows
pub const LIGHT_TEAL: &str = "#E8F4F4";

pub fn rules() -> Vec<SpecRule> {
    vec![
        // Data tables are optional
        SpecRule::new(
            "data-table-header-fill",
            "Data table header rows use light teal",
            Target::path("data-table.row1"),
            Predicate::equals(LIGHT_TEAL),
        )
        .on("fill")
        .optional(),
        SpecRule::new(
            "data-table-border-color",
            "Data table borders are light gray",
            Target::role("data-table"),
            Predicate::equals("#CCCCCC"),
        )
        .on("border_color")
        .optional(),
        SpecRule::new(
            "data-table-column-widths",
            "Data table column widths add up to 100%",
            Target::role("data-table"),
            Predicate::percent_total(),
        )
        .on("column_widths")
        .optional(),
        // Revision history table
        SpecRule::new(
            "revision-table-present",
            "Revision history is recorded in a table",
            Target::role("revision-table"),
            Predicate::Present,
        ),
        SpecRule::new(
            "revision-table-header-fill",
            "Revision table header row uses the brand teal",
            Target::path("revision-table.row1"),
            Predicate::equals(BRAND_TEAL),
        )
        .on("fill"),
        SpecRule::new(
            "revision-table-column-widths",
            "Revision table column widths add up to 100%",
            Target::role("revision-table"),
            Predicate::percent_total(),
        )
        .on("column_widths"),
        SpecRule::new(
            "revision-table-no-placeholder-rows",
            "Revision history lists real entries, not a placeholder row",
            Target::role("revision-table"),
            Predicate::NoPlaceholderRows,
        ),
    ]
}
