//! Tree builder module.
//!
//! Consumes the token stream and produces a [`DomTree`], keeping a cursor on
//! the element that new content is inserted into.

/// Attribute scanning and `id`/`class` derivation.
pub mod attributes;
/// The builder and its per-token rules.
pub mod construction;

pub use construction::{BuildIssue, IssueKind, TreeBuilder, parse};

use sift_dom::{DomTree, NodeId};

/// Print the element tree rooted at `id`, one element per line.
///
/// Each line shows the element label and, when present, its attributes and
/// inner text:
///
/// ```text
/// document
///   div#main.card [data-x="1"]
///     p "Hello world"
/// ```
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    let Some(element) = tree.get(id) else {
        return;
    };

    let mut line = format!("{prefix}{}", element.label());
    let extra: Vec<String> = element
        .attributes
        .iter()
        .filter(|a| !a.name.eq_ignore_ascii_case("id") && !a.name.eq_ignore_ascii_case("class"))
        .map(|a| {
            if a.value.is_empty() {
                a.name.clone()
            } else {
                format!("{}=\"{}\"", a.name, a.value)
            }
        })
        .collect();
    if !extra.is_empty() {
        line.push_str(&format!(" [{}]", extra.join(" ")));
    }
    if !element.inner_text.is_empty() {
        line.push_str(&format!(" {:?}", element.inner_text));
    }
    println!("{line}");

    for &child_id in tree.children(id) {
        print_tree(tree, child_id, indent + 1);
    }
}
