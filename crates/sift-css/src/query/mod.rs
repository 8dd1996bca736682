//! Evaluating a selector chain against an element tree.
//!
//! Evaluation runs outermost level first:
//!
//! 1. Level 0 scans the whole subtree under the query root, root included,
//!    breadth-first, and keeps every element the first node matches.
//! 2. Each further level scans the descendants of every element kept so far
//!    (the element itself excluded) and keeps the ones the next node matches.
//! 3. Whatever survives the last level is the result.
//!
//! Candidates are kept in an ordered set keyed by [`NodeId`], so an element
//! reachable from several matched ancestors is only reported once.

use std::collections::BTreeSet;

use sift_dom::{DomTree, NodeId};
use thiserror::Error;

use crate::selector::{SelectorChain, SelectorNode, parse_selector};

/// Caller-contract violations when running a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query root does not address an element of the tree.
    #[error("invalid query root {0}: not an element of this tree")]
    InvalidRoot(NodeId),
}

/// Does `node` match the element at `id`? Missing elements never match.
fn node_matches(tree: &DomTree, id: NodeId, node: &SelectorNode) -> bool {
    tree.get(id).is_some_and(|element| node.matches(element))
}

/// Evaluate `chain` over the subtree rooted at `root`.
///
/// Returns every matching element exactly once, in ascending [`NodeId`]
/// order (which is document order for a built tree). An empty chain, or a
/// level that matches nothing, gives an empty result.
///
/// # Errors
///
/// Returns [`QueryError::InvalidRoot`] if `root` is not an element of `tree`.
pub fn query(
    tree: &DomTree,
    root: NodeId,
    chain: &SelectorChain,
) -> Result<Vec<NodeId>, QueryError> {
    if !tree.contains(root) {
        return Err(QueryError::InvalidRoot(root));
    }

    let mut levels = chain.levels();
    let Some(first) = levels.next() else {
        return Ok(Vec::new());
    };

    let mut candidates: BTreeSet<NodeId> = tree
        .descendants(root)
        .filter(|&id| node_matches(tree, id, first))
        .collect();

    for node in levels {
        if candidates.is_empty() {
            break;
        }
        candidates = candidates
            .iter()
            .flat_map(|&matched| tree.descendants(matched).skip(1))
            .filter(|&id| node_matches(tree, id, node))
            .collect();
    }

    Ok(candidates.into_iter().collect())
}

/// Compile `selector` and evaluate it from the document root.
#[must_use]
pub fn select(tree: &DomTree, selector: &str) -> Vec<NodeId> {
    query(tree, tree.root(), &parse_selector(selector)).unwrap_or_default()
}

/// Every element under the document root that `node` matches, in document order.
fn matching(tree: &DomTree, node: &SelectorNode) -> Vec<NodeId> {
    let mut found: Vec<NodeId> = tree
        .descendants(tree.root())
        .filter(|&id| node_matches(tree, id, node))
        .collect();
    found.sort_unstable();
    found
}

/// First element, in document order, whose id is exactly `id`.
#[must_use]
pub fn element_by_id(tree: &DomTree, id: &str) -> Option<NodeId> {
    if id.is_empty() {
        return None;
    }
    let node = SelectorNode {
        id: Some(id.to_string()),
        ..SelectorNode::default()
    };
    matching(tree, &node).first().copied()
}

/// All elements with the given tag name (ASCII case-insensitive), in document order.
#[must_use]
pub fn elements_by_tag_name(tree: &DomTree, tag_name: &str) -> Vec<NodeId> {
    if tag_name.is_empty() {
        return Vec::new();
    }
    let node = SelectorNode {
        tag_name: Some(tag_name.to_string()),
        ..SelectorNode::default()
    };
    matching(tree, &node)
}

/// All elements carrying every class in the whitespace-separated `class_names`,
/// in document order.
#[must_use]
pub fn elements_by_class_name(tree: &DomTree, class_names: &str) -> Vec<NodeId> {
    let classes: Vec<String> = class_names.split_whitespace().map(str::to_string).collect();
    if classes.is_empty() {
        return Vec::new();
    }
    let node = SelectorNode {
        classes,
        ..SelectorNode::default()
    };
    matching(tree, &node)
}
