//! Snapshot helpers.
//!
//! [`dom_outline`] turns a subtree into an indented text outline, one node
//! per line, suitable for `insta` snapshots and plain assertions.

use std::fmt::Write;

use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

/// Outline of the subtree at `start`.
///
/// Each line is `tag#id.class…`, followed by the quoted text, the field
/// value, and `hidden` / `disabled` markers where they apply. Children are
/// indented by two spaces. A missing node yields an empty string.
pub fn dom_outline(dom: &Dom, start: NodeId) -> String {
    let mut lines = Vec::new();
    outline_into(dom, start, 0, &mut lines);
    lines.join("\n")
}

/// Outline of the first node matching `selector`, if any.
pub fn outline_of(dom: &Dom, selector: &str) -> Option<String> {
    dom.query_selector(selector).map(|node| dom_outline(dom, node))
}

fn outline_into(dom: &Dom, node: NodeId, depth: usize, lines: &mut Vec<String>) {
    let Some(data) = dom.get(node) else {
        return;
    };
    lines.push(format!("{}{}", "  ".repeat(depth), describe(data)));
    for &child in dom.children(node) {
        outline_into(dom, child, depth + 1, lines);
    }
}

/// One-line description of a node.
pub fn describe(data: &NodeData) -> String {
    let mut line = data.tag.clone();
    if let Some(id) = &data.id {
        let _ = write!(line, "#{id}");
    }
    for class in &data.classes {
        let _ = write!(line, ".{class}");
    }
    if let Some(text) = &data.text {
        let _ = write!(line, " {text:?}");
    }
    if let Some(value) = &data.value {
        let _ = write!(line, " [value={value:?}]");
    }
    if data.style.hidden {
        line.push_str(" hidden");
    }
    if data.disabled {
        line.push_str(" disabled");
    }
    line
}
