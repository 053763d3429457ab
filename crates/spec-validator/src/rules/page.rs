//! Page setup: US Letter, portrait, half-inch to one-inch margins

use super::{Predicate, SpecRule, Target};

pub fn rules() -> Vec<SpecRule> {
    let mut rules = vec![
        SpecRule::new(
            "page-size",
            "Pages use US Letter paper",
            Target::path("document"),
            Predicate::equals("letter"),
        )
        .on("page_size"),
        SpecRule::new(
            "page-orientation",
            "Pages are portrait",
            Target::path("document"),
            Predicate::equals("portrait"),
        )
        .on("orientation"),
    ];

    for side in ["top", "bottom", "left", "right"] {
        rules.push(
            SpecRule::new(
                format!("page-margin-{}", side),
                format!("{} margin is between 0.5 and 1 inch", side),
                Target::path("document"),
                Predicate::range(0.5, 1.0),
            )
            .on(format!("margin_{}", side)),
        );
    }

    rules
}
