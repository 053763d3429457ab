//! Resolves rule targets to located document nodes
//!
//! Path targets are dotted segments. The first segment is searched for
//! anywhere in the tree; every following segment selects among the direct
//! children of the previous matches. A segment is tried, in order, as:
//!
//! - `role[n]`: the n-th child carrying the role
//! - `role`: every child carrying the role
//! - `<kind><n>`: the n-th child of that kind (`<kind>` alone means the first)
//!
//! The segment `document` names the root.

use std::collections::HashMap;

use procedure_types::{DocumentTree, LocatedNode, NodeKind, ROOT_PATH};

use crate::rules::Target;

/// All nodes the target applies to, in document order
pub fn resolve<'a>(tree: &'a DocumentTree, target: &Target) -> Vec<LocatedNode<'a>> {
    match target {
        Target::Role(role) => resolve_role(tree, role),
        Target::Path(path) => resolve_path(tree, path),
    }
}

fn resolve_role<'a>(tree: &'a DocumentTree, role: &str) -> Vec<LocatedNode<'a>> {
    let prefix = role.strip_suffix('*').map(str::to_lowercase);

    tree.walk()
        .into_iter()
        .filter(|located| match (&prefix, located.node.role.as_deref()) {
            (Some(prefix), Some(node_role)) => node_role.to_lowercase().starts_with(prefix),
            (None, Some(_)) => located.node.has_role(role),
            (_, None) => false,
        })
        .collect()
}

fn resolve_path<'a>(tree: &'a DocumentTree, path: &str) -> Vec<LocatedNode<'a>> {
    let mut segments = path.split('.').map(str::trim).filter(|s| !s.is_empty());
    let Some(first) = segments.next() else {
        return Vec::new();
    };

    let walk = tree.walk();
    let mut current: Vec<LocatedNode<'a>> = if first == ROOT_PATH {
        vec![walk[0].clone()]
    } else if walk.iter().any(|located| located.node.has_role(first)) {
        // A role anywhere in the tree takes precedence over a kind reading
        walk.iter()
            .filter(|located| located.node.has_role(first))
            .cloned()
            .collect()
    } else {
        let order: HashMap<&str, usize> = walk
            .iter()
            .enumerate()
            .map(|(i, located)| (located.path.as_str(), i))
            .collect();

        let mut found: Vec<LocatedNode<'a>> = walk
            .iter()
            .flat_map(|parent| select(children_of(parent), first))
            .collect();
        found.sort_by_key(|located| order.get(located.path.as_str()).copied());
        found
    };

    for segment in segments {
        current = current
            .iter()
            .flat_map(|parent| select(children_of(parent), segment))
            .collect();
        if current.is_empty() {
            break;
        }
    }

    current
}

fn children_of<'a>(parent: &LocatedNode<'a>) -> Vec<LocatedNode<'a>> {
    let node = parent.node;
    let prefix = if parent.path == ROOT_PATH {
        ""
    } else {
        parent.path.as_str()
    };

    node.children
        .iter()
        .zip(node.child_segments())
        .map(|(child, segment)| LocatedNode {
            path: if prefix.is_empty() {
                segment
            } else {
                format!("{}.{}", prefix, segment)
            },
            node: child,
        })
        .collect()
}

/// Pick the children a single path segment names
fn select<'a>(children: Vec<LocatedNode<'a>>, segment: &str) -> Vec<LocatedNode<'a>> {
    if let Some((role, index)) = split_indexed(segment) {
        return children
            .into_iter()
            .filter(|c| c.node.has_role(role))
            .nth(index.saturating_sub(1))
            .filter(|_| index > 0)
            .into_iter()
            .collect();
    }

    if children.iter().any(|c| c.node.has_role(segment)) {
        return children
            .into_iter()
            .filter(|c| c.node.has_role(segment))
            .collect();
    }

    match split_kind(segment) {
        Some((kind, index)) if index > 0 => children
            .into_iter()
            .filter(|c| c.node.kind == kind)
            .nth(index - 1)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// "callout-warning[2]" -> ("callout-warning", 2)
fn split_indexed(segment: &str) -> Option<(&str, usize)> {
    let open = segment.rfind('[')?;
    let inner = segment[open + 1..].strip_suffix(']')?;
    let index = inner.parse().ok()?;
    Some((&segment[..open], index))
}

/// "row2" -> (Row, 2), "cell" -> (Cell, 1)
fn split_kind(segment: &str) -> Option<(NodeKind, usize)> {
    let digits_at = segment
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(segment.len());
    let kind = NodeKind::parse(&segment[..digits_at])?;
    let index = if digits_at == segment.len() {
        1
    } else {
        segment[digits_at..].parse().ok()?
    };
    Some((kind, index))
}
