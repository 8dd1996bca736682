use core::fmt;
use core::ops::Range;

use strum_macros::{Display, EnumIter};

/// The two kinds of raw lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TokenKind {
    /// Everything from a `<` up to and including the matching `>`.
    #[strum(serialize = "tag")]
    Tag,
    /// A maximal run of characters containing no `<`.
    #[strum(serialize = "text")]
    Text,
}

/// How the tree builder should treat a tag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TagForm {
    /// `<!-- ... -->`
    Comment,
    /// `<!DOCTYPE html>` and any other `<!...>`.
    Declaration,
    /// `</name>`
    EndTag,
    /// `<name ...>` or `<name ... />`
    StartTag,
}

/// A slice of the input tagged with its kind and byte offset.
///
/// Tokens borrow from the input; concatenating the text of every token
/// reproduces the input exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    kind: TokenKind,
    text: &'a str,
    offset: usize,
}

impl<'a> Token<'a> {
    /// Create a token covering `text`, which starts at byte `offset` of the input.
    #[must_use]
    pub const fn new(kind: TokenKind, text: &'a str, offset: usize) -> Self {
        Self { kind, text, offset }
    }

    /// Tag or text.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The raw text of the token, exactly as it appears in the input.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Byte range of the token within the input.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    /// True for tag tokens.
    #[must_use]
    pub fn is_tag(&self) -> bool {
        self.kind == TokenKind::Tag
    }

    /// Classify a tag token. Returns `None` for text tokens.
    #[must_use]
    pub fn tag_form(&self) -> Option<TagForm> {
        if !self.is_tag() {
            return None;
        }
        let form = if self.text.starts_with("<!--") {
            TagForm::Comment
        } else if self.text.starts_with("<!") {
            TagForm::Declaration
        } else if self.text.starts_with("</") {
            TagForm::EndTag
        } else {
            TagForm::StartTag
        };
        Some(form)
    }

    /// False for a tag token that ran into the end of input before its `>`
    /// (or `-->` for comments). Text tokens are always terminated.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        match self.tag_form() {
            None => true,
            Some(TagForm::Comment) => self.text.len() >= 5 && self.text.ends_with("-->"),
            Some(_) => self.text.ends_with('>'),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}..{} {:?}", self.kind, self.span().start, self.span().end, self.text)
    }
}
