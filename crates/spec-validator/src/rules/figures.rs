use super::{Predicate, SpecRule, Target};

/// Printable width of a Letter page with half-inch margins
pub const MAX_FIGURE_WIDTH_IN: f64 = 7.5;

pub fn rules() -> Vec<SpecRule> {
    vec![
        SpecRule::new(
            "figure-caption-size",
            "Figure captions are 9-10pt",
            Target::role("figure-caption"),
            Predicate::range(9.0, 10.0),
        )
        .on("size")
        .optional(),
        SpecRule::new(
            "figure-caption-color",
            "Figure captions are gray",
            Target::role("figure-caption"),
            Predicate::equals("#666666"),
        )
        .on("color")
        .optional(),
        SpecRule::new(
            "figure-image-width",
            "Figures fit within the printable width",
            Target::role("figure"),
            Predicate::range(1.0, MAX_FIGURE_WIDTH_IN),
        )
        .on("width_in")
        .optional(),
        SpecRule::new(
            "footer-size",
            "Footer text is 8pt",
            Target::role("footer"),
            Predicate::equals(8.0),
        )
        .on("size"),
        SpecRule::new(
            "footer-color",
            "Footer text is mid gray",
            Target::role("footer"),
            Predicate::equals("#888888"),
        )
        .on("color"),
    ]
}
