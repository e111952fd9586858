//! Canonical fold-marker text rendering
//!
//! Heading lines are indented two spaces per level and end in a `<<<depth`
//! suffix for the editor's folding feature. Each label renders as a
//! `>`-prefixed key line and a `:`-prefixed value line one level deeper.

use crate::models::{OutlineNode, QueryResult};

/// Render a query result under the text output contract: empty string for
/// no matches, the bare key for a collapsed unique match, otherwise the
/// full outline.
pub fn render_result(result: &QueryResult) -> String {
    if let Some(key) = &result.unique {
        return key.clone();
    }
    render_outline(&result.outline)
}

/// Render an outline tree as fold-marker text
pub fn render_outline(nodes: &[OutlineNode]) -> String {
    let mut out = String::new();
    render_nodes(nodes, &mut out);
    out
}

fn render_nodes(nodes: &[OutlineNode], out: &mut String) {
    for node in nodes {
        match node {
            OutlineNode::Section {
                depth,
                number,
                title,
                children,
                ..
            } => {
                out.push_str(&"  ".repeat(depth - 1));
                if !number.is_empty() {
                    out.push_str(number);
                    out.push(' ');
                }
                out.push_str(title);
                out.push_str(&format!("<<<{depth}\n"));
                render_nodes(children, out);
            }
            OutlineNode::Label { key, value, depth } => {
                let indent = " ".repeat(2 * depth - 2);
                out.push('>');
                out.push_str(&indent);
                out.push_str(key);
                out.push('\n');
                out.push(':');
                out.push_str(&indent);
                out.push_str("  ");
                out.push_str(value);
                out.push('\n');
            }
        }
    }
}
