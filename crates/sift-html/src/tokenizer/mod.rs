//! Markup tokenizer module.
//!
//! The tokenizer only finds token boundaries. It never interprets tag
//! contents; that is left to the tree builder.

/// Tokenizer iterator implementation.
pub mod scanner;
/// Token types produced by the tokenizer.
pub mod token;

pub use scanner::{Tokenizer, tokenize};
pub use token::{TagForm, Token, TokenKind};
