//! A procedure document that satisfies the standard rule table

#![allow(dead_code)]

use procedure_types::{DocNode, DocumentTree, NodeKind};

pub const TODAY: (i32, u32, u32) = (2026, 10, 1);

fn cell(text: &str) -> DocNode {
    DocNode::new(NodeKind::Cell).with_text(text)
}

fn row(cells: &[&str]) -> DocNode {
    DocNode::new(NodeKind::Row).with_children(cells.iter().map(|t| cell(t)))
}

pub fn section_header(title: &str) -> DocNode {
    DocNode::new(NodeKind::Paragraph)
        .with_role("section-header")
        .with_text(title)
        .with_prop("fill", "#154747")
        .with_prop("color", "#FFFFFF")
        .with_prop("font", "Calibri")
        .with_prop("size", 13.0)
        .with_prop("bold", true)
        .with_prop("spacing_before", 12.0)
        .with_prop("spacing_after", 6.0)
}

pub fn body(text: &str) -> DocNode {
    DocNode::new(NodeKind::Paragraph)
        .with_role("body")
        .with_text(text)
        .with_prop("font", "Calibri")
        .with_prop("size", 11.0)
        .with_prop("color", "#000000")
        .with_prop("line_spacing", 1.15)
}

pub fn header_table() -> DocNode {
    let title = DocNode::new(NodeKind::Cell)
        .with_text("Debit Card Replacement")
        .with_prop("fill", "#154747")
        .with_prop("color", "#FFFFFF")
        .with_prop("font", "Calibri")
        .with_prop("size", 15.0)
        .with_prop("bold", true);
    let meta = cell("Card Services");

    DocNode::new(NodeKind::Table)
        .with_role("header")
        .with_prop("width_type", "pct")
        .with_prop("column_widths", vec![70.0, 30.0])
        .with_prop("department", "Card Services")
        .with_prop("date_updated", "2026-09-01")
        .with_child(DocNode::new(NodeKind::Row).with_children(vec![title, meta]))
}

pub fn revision_table(entries: Vec<[&str; 3]>) -> DocNode {
    let header = row(&["Date", "Author", "Change"]).with_prop("fill", "#154747");
    DocNode::new(NodeKind::Table)
        .with_role("revision-table")
        .with_prop("width_type", "pct")
        .with_prop("column_widths", vec![20.0, 20.0, 60.0])
        .with_child(header)
        .with_children(entries.iter().map(|e| row(e)))
}

fn section(role: &str, title: &str, content: Vec<DocNode>) -> DocNode {
    DocNode::new(NodeKind::Section)
        .with_role(role)
        .with_child(section_header(title))
        .with_children(content)
}

fn data_table() -> DocNode {
    DocNode::new(NodeKind::Table)
        .with_role("data-table")
        .with_prop("border_color", "#CCCCCC")
        .with_prop("width_type", "pct")
        .with_prop("column_widths", vec![40.0, 60.0])
        .with_child(row(&["Field", "Value"]).with_prop("fill", "#E8F4F4"))
        .with_child(row(&["Card type", "Debit"]))
}

fn warning_callout() -> DocNode {
    DocNode::new(NodeKind::Paragraph)
        .with_role("callout-warning")
        .with_text("Verify member identity before ordering a card.")
        .with_prop("border_color", "#FFC000")
        .with_prop("fill", "#FFF2CC")
        .with_prop("border_width", 12.0)
}

fn figure() -> Vec<DocNode> {
    vec![
        DocNode::new(NodeKind::Image)
            .with_role("figure")
            .with_prop("width_in", 6.5),
        DocNode::new(NodeKind::Paragraph)
            .with_role("figure-caption")
            .with_text("Figure 1: Card order screen")
            .with_prop("size", 9.0)
            .with_prop("color", "#666666"),
    ]
}

/// Root node of the compliant document, for tests that mutate it
pub fn compliant_root() -> DocNode {
    let mut procedure = vec![
        body("Open the member profile and select Card Services."),
        warning_callout(),
        data_table(),
    ];
    procedure.extend(figure());

    DocNode::new(NodeKind::Document)
        .with_prop("page_size", "letter")
        .with_prop("orientation", "portrait")
        .with_prop("margin_top", 0.75)
        .with_prop("margin_bottom", 0.75)
        .with_prop("margin_left", 0.5)
        .with_prop("margin_right", 1.0)
        .with_children(vec![
            header_table(),
            section(
                "overview",
                "OVERVIEW",
                vec![body("Replace a lost, stolen or damaged debit card.")],
            ),
            section("related", "RELATED", vec![body("Card Activation")]),
            section("procedure", "PROCEDURE", procedure),
            section(
                "revision-history",
                "Revision History",
                vec![revision_table(vec![[
                    "2026-09-01",
                    "J. Alvarez",
                    "Initial release",
                ]])],
            ),
            DocNode::new(NodeKind::Footer)
                .with_role("footer")
                .with_text("Page 1 of 2")
                .with_prop("size", 8.0)
                .with_prop("color", "#888888"),
        ])
}

pub fn compliant_document() -> DocumentTree {
    DocumentTree::new(compliant_root())
        .expect("fixture has a valid shape")
        .with_title("Debit Card Replacement")
}
