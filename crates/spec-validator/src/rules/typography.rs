use super::header::BRAND_TEAL;
use super::{Predicate, SpecRule, Target};

const SECTION_HEADER: &str = "section-header";
const BODY: &str = "body";

pub fn rules() -> Vec<SpecRule> {
    vec![
        // Section header bars
        SpecRule::new(
            "section-header-fill",
            "Section headers sit on a teal bar",
            Target::role(SECTION_HEADER),
            Predicate::equals(BRAND_TEAL),
        )
        .on("fill"),
        SpecRule::new(
            "section-header-color",
            "Section header text is white",
            Target::role(SECTION_HEADER),
            Predicate::equals("#FFFFFF"),
        )
        .on("color"),
        SpecRule::new(
            "section-header-font",
            "Section headers use Calibri",
            Target::role(SECTION_HEADER),
            Predicate::equals("Calibri"),
        )
        .on("font"),
        SpecRule::new(
            "section-header-size",
            "Section headers are 12-14pt",
            Target::role(SECTION_HEADER),
            Predicate::range(12.0, 14.0),
        )
        .on("size"),
        SpecRule::new(
            "section-header-bold",
            "Section headers are bold",
            Target::role(SECTION_HEADER),
            Predicate::equals(true),
        )
        .on("bold"),
        SpecRule::new(
            "section-header-spacing-before",
            "Section headers have 12pt spacing before",
            Target::role(SECTION_HEADER),
            Predicate::equals(12.0),
        )
        .on("spacing_before"),
        SpecRule::new(
            "section-header-spacing-after",
            "Section headers have 6pt spacing after",
            Target::role(SECTION_HEADER),
            Predicate::equals(6.0),
        )
        .on("spacing_after"),
        // Body text
        SpecRule::new(
            "body-font",
            "Body text uses Calibri",
            Target::role(BODY),
            Predicate::equals("Calibri"),
        )
        .on("font"),
        SpecRule::new(
            "body-size",
            "Body text is 10-11pt",
            Target::role(BODY),
            Predicate::range(10.0, 11.0),
        )
        .on("size"),
        SpecRule::new(
            "body-color",
            "Body text is black or near-black",
            Target::role(BODY),
            Predicate::one_of(["#000000", "#333333"]),
        )
        .on("color"),
        SpecRule::new(
            "body-line-spacing",
            "Body line spacing is single to 1.15",
            Target::role(BODY),
            Predicate::range(1.0, 1.15),
        )
        .on("line_spacing"),
    ]
}
