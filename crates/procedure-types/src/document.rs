//! Structural/style representation of a generated procedure document
//!
//! The document generator hands over a tree of nodes. Every styled node
//! carries its resolved properties (fill, font, size, spacing, border,
//! width type) so the validator never has to resolve style inheritance.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MalformedInputError;

/// Kind of a node in the document tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Section,
    Paragraph,
    Run,
    Table,
    Row,
    Cell,
    Image,
    Header,
    Footer,
}

impl NodeKind {
    pub const ALL: [NodeKind; 10] = [
        NodeKind::Document,
        NodeKind::Section,
        NodeKind::Paragraph,
        NodeKind::Run,
        NodeKind::Table,
        NodeKind::Row,
        NodeKind::Cell,
        NodeKind::Image,
        NodeKind::Header,
        NodeKind::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Section => "section",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Run => "run",
            NodeKind::Table => "table",
            NodeKind::Row => "row",
            NodeKind::Cell => "cell",
            NodeKind::Image => "image",
            NodeKind::Header => "header",
            NodeKind::Footer => "footer",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved style attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Numbers(Vec<f64>),
    Text(String),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            StyleValue::Numbers(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

fn fmt_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Bool(b) => write!(f, "{}", b),
            StyleValue::Number(n) => f.write_str(&fmt_number(*n)),
            StyleValue::Numbers(list) => {
                let parts: Vec<String> = list.iter().map(|n| fmt_number(*n)).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<Vec<f64>> for StyleValue {
    fn from(value: Vec<f64>) -> Self {
        StyleValue::Numbers(value)
    }
}

/// One node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocNode {
    pub kind: NodeKind,

    /// Semantic role tag (e.g. "header", "section-header", "callout-warning")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Resolved style properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, StyleValue>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DocNode>,
}

impl DocNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            role: None,
            text: None,
            props: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: DocNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = DocNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn prop(&self, name: &str) -> Option<&StyleValue> {
        self.props.get(name)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case(role))
    }

    /// Concatenated text of this node and all descendants
    pub fn full_text(&self) -> String {
        let mut parts = Vec::new();
        collect_text(self, &mut parts);
        parts.join(" ")
    }

    /// Location segments for each child, in child order.
    ///
    /// A child with a role unique among its siblings is named by the role,
    /// a repeated role becomes `role[n]`, and an untagged child becomes
    /// `<kind><n>` where `n` counts every sibling of the same kind.
    pub fn child_segments(&self) -> Vec<String> {
        // Roles compare case-insensitively, as in `has_role`
        let mut role_totals: BTreeMap<String, usize> = BTreeMap::new();
        for child in &self.children {
            if let Some(role) = child.role.as_deref() {
                *role_totals.entry(role.to_ascii_lowercase()).or_default() += 1;
            }
        }

        let mut kind_seen: BTreeMap<NodeKind, usize> = BTreeMap::new();
        let mut role_seen: BTreeMap<String, usize> = BTreeMap::new();
        let mut segments = Vec::with_capacity(self.children.len());

        for child in &self.children {
            let kind_index = {
                let n = kind_seen.entry(child.kind).or_default();
                *n += 1;
                *n
            };

            let segment = match child.role.as_deref() {
                Some(role) if role_totals.get(&role.to_ascii_lowercase()) == Some(&1) => {
                    role.to_string()
                }
                Some(role) => {
                    let n = role_seen.entry(role.to_ascii_lowercase()).or_default();
                    *n += 1;
                    format!("{}[{}]", role, n)
                }
                None => format!("{}{}", child.kind.as_str(), kind_index),
            };
            segments.push(segment);
        }

        segments
    }
}

fn collect_text<'a>(node: &'a DocNode, parts: &mut Vec<&'a str>) {
    if let Some(text) = node.text.as_deref() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }
    for child in &node.children {
        collect_text(child, parts);
    }
}

/// A node together with its stable dotted location
#[derive(Debug, Clone)]
pub struct LocatedNode<'a> {
    pub path: String,
    pub node: &'a DocNode,
}

/// Root of a generated document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    /// Document name used in reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub root: DocNode,
}

/// Location of the root node
pub const ROOT_PATH: &str = "document";

impl DocumentTree {
    /// Wrap a root node, checking the minimal shape
    pub fn new(root: DocNode) -> Result<Self, MalformedInputError> {
        let tree = Self { title: None, root };
        tree.check_shape()?;
        Ok(tree)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Parse a document tree from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, MalformedInputError> {
        let tree: DocumentTree = serde_json::from_str(json)?;
        tree.check_shape()?;
        Ok(tree)
    }

    /// Check the minimal structure every consumer relies on: a single
    /// document root, rows only inside tables, cells only inside rows.
    pub fn check_shape(&self) -> Result<(), MalformedInputError> {
        if self.root.kind != NodeKind::Document {
            return Err(MalformedInputError::Shape(format!(
                "root node must be a document, found {}",
                self.root.kind
            )));
        }
        check_children(&self.root, ROOT_PATH)
    }

    /// All nodes in document (pre-)order with their locations
    pub fn walk(&self) -> Vec<LocatedNode<'_>> {
        let mut out = vec![LocatedNode {
            path: ROOT_PATH.to_string(),
            node: &self.root,
        }];
        collect_located(&self.root, "", &mut out);
        out
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

fn collect_located<'a>(node: &'a DocNode, prefix: &str, out: &mut Vec<LocatedNode<'a>>) {
    for (child, segment) in node.children.iter().zip(node.child_segments()) {
        let path = join_path(prefix, &segment);
        out.push(LocatedNode {
            path: path.clone(),
            node: child,
        });
        collect_located(child, &path, out);
    }
}

fn check_children(node: &DocNode, path: &str) -> Result<(), MalformedInputError> {
    for (child, segment) in node.children.iter().zip(node.child_segments()) {
        let child_path = join_path(if path == ROOT_PATH { "" } else { path }, &segment);
        let problem = match (node.kind, child.kind) {
            (_, NodeKind::Document) => Some("nested document node"),
            (NodeKind::Table, kind) if kind != NodeKind::Row => {
                Some("tables may only contain rows")
            }
            (parent, NodeKind::Row) if parent != NodeKind::Table => {
                Some("rows must be direct children of a table")
            }
            (NodeKind::Row, kind) if kind != NodeKind::Cell => Some("rows may only contain cells"),
            (parent, NodeKind::Cell) if parent != NodeKind::Row => {
                Some("cells must be direct children of a row")
            }
            _ => None,
        };

        if let Some(problem) = problem {
            return Err(MalformedInputError::Shape(format!(
                "{} at {}",
                problem, child_path
            )));
        }

        check_children(child, &child_path)?;
    }
    Ok(())
}
