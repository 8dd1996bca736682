//! Markup tokenizer and tree builder for sift.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer** - a zero-copy, restartable iterator that splits markup into
//!   tag tokens and text tokens without dropping a single byte
//! - **Tag Registry** - the known-element / void-element lookup consumed by the
//!   builder, injected rather than global
//! - **Tree Builder** - turns the token stream into a [`sift_dom::DomTree`],
//!   recovering from unbalanced markup by closing up to the nearest matching
//!   open element
//!
//! # Not Implemented
//!
//! - The WHATWG insertion modes (implied tables, foster parenting, adoption agency)
//! - Character reference decoding
//! - Encoding sniffing

/// Tree construction from a token stream.
pub mod builder;
/// Known-tag and void-tag lookup.
pub mod registry;
/// Splitting markup into tag and text tokens.
pub mod tokenizer;

pub use builder::{BuildIssue, IssueKind, TreeBuilder, parse, print_tree};
pub use registry::{StaticTagRegistry, TagRegistry};
pub use tokenizer::{TagForm, Token, TokenKind, Tokenizer, tokenize};
