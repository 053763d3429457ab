use super::{Predicate, SpecRule, Target};

/// Sections every procedure must contain, as (role, title)
pub const REQUIRED_SECTIONS: [(&str, &str); 4] = [
    ("overview", "Overview"),
    ("related", "Related"),
    ("procedure", "Procedure"),
    ("revision-history", "Revision History"),
];

pub fn rules() -> Vec<SpecRule> {
    let mut rules: Vec<SpecRule> = REQUIRED_SECTIONS
        .iter()
        .map(|(role, title)| {
            SpecRule::new(
                format!("section-{}", role),
                format!("{} section is present", title),
                Target::role(*role),
                Predicate::Present,
            )
        })
        .collect();

    // Table of contents is optional; when present its entries match body size
    rules.push(
        SpecRule::new(
            "toc-entry-size",
            "Table of contents entries are 10-11pt",
            Target::role("toc-entry"),
            Predicate::range(10.0, 11.0),
        )
        .on("size")
        .warning()
        .optional(),
    );

    rules
}
