//! Selector parsing and query evaluation for sift.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selectors** - compiling `tag#id.class` segments separated by whitespace
//!   ([§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators))
//!   into a linked chain of [`SelectorNode`]s
//! - **Queries** - evaluating a chain level by level over a [`sift_dom::DomTree`]
//!   and returning each matching element once
//!
//! # Not Implemented
//!
//! - Child, next-sibling and subsequent-sibling combinators
//! - Attribute selectors, pseudo-classes and pseudo-elements
//! - Selector lists (`a, b`)

/// Query evaluation over an element tree.
pub mod query;
/// Selector parsing.
pub mod selector;

pub use query::{
    QueryError, element_by_id, elements_by_class_name, elements_by_tag_name, query, select,
};
pub use selector::{Levels, SelectorChain, SelectorNode, parse_selector};
