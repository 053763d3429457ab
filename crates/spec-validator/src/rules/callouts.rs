//! Callout boxes: colored left border with a tinted fill per callout type

use super::{Predicate, SpecRule, Target};

/// (type, border color, fill color)
pub const CALLOUT_PALETTE: [(&str, &str, &str); 4] = [
    ("critical", "#C00000", "#F8D7DA"),
    ("warning", "#FFC000", "#FFF2CC"),
    ("info", "#2E74B5", "#DEEAF6"),
    ("tip", "#548235", "#E2F0D9"),
];

/// Border width in eighths of a point (1.5pt)
pub const CALLOUT_BORDER_WIDTH: f64 = 12.0;

pub fn rules() -> Vec<SpecRule> {
    let mut rules = Vec::with_capacity(CALLOUT_PALETTE.len() * 2 + 1);

    for (kind, border, fill) in CALLOUT_PALETTE {
        let role = format!("callout-{}", kind);
        rules.push(
            SpecRule::new(
                format!("callout-{}-border", kind),
                format!("{} callouts use a {} border", kind, border),
                Target::role(role.clone()),
                Predicate::equals(border),
            )
            .on("border_color")
            .optional(),
        );
        rules.push(
            SpecRule::new(
                format!("callout-{}-fill", kind),
                format!("{} callouts use a {} fill", kind, fill),
                Target::role(role),
                Predicate::equals(fill),
            )
            .on("fill")
            .optional(),
        );
    }

    rules.push(
        SpecRule::new(
            "callout-border-width",
            "Callout borders are 1.5pt",
            Target::role("callout-*"),
            Predicate::equals(CALLOUT_BORDER_WIDTH),
        )
        .on("border_width")
        .optional(),
    );

    rules
}
