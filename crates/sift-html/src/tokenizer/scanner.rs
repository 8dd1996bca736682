use core::iter::FusedIterator;

use super::token::{Token, TokenKind};

/// Lazy tokenizer over a borrowed markup string.
///
/// Each call to [`Iterator::next`] scans exactly one token:
///
/// - At a `<`, a tag token runs through the next `>`. A tag starting with
///   `<!--` instead runs through the next `-->`, so a `>` inside a comment
///   does not end it.
/// - A tag token with no terminator runs to the end of the input.
/// - Anywhere else, a text token runs up to (not including) the next `<`.
///
/// No byte is ever skipped. The tokenizer is `Clone`, so a copy taken before
/// iterating restarts the sequence from the same position.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// The full input being tokenized.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset of the next token.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// Tokenize `input`. Shorthand for [`Tokenizer::new`].
#[must_use]
pub const fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer::new(input)
}

/// Length in bytes of the tag token at the start of `rest`.
fn tag_len(rest: &str) -> usize {
    if rest.starts_with("<!--") {
        // Search from the second byte after `<!` so that `<!-->` closes itself.
        return rest[2..].find("-->").map_or(rest.len(), |i| i + 2 + 3);
    }
    rest.find('>').map_or(rest.len(), |i| i + 1)
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.input[self.position..];
        if rest.is_empty() {
            return None;
        }

        let (kind, len) = if rest.starts_with('<') {
            (TokenKind::Tag, tag_len(rest))
        } else {
            (TokenKind::Text, rest.find('<').unwrap_or(rest.len()))
        };

        let token = Token::new(kind, &rest[..len], self.position);
        self.position += len;
        Some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_len_plain_tag() {
        assert_eq!(tag_len("<div>rest"), 5);
        assert_eq!(tag_len("<div"), 4);
    }

    #[test]
    fn test_tag_len_comment_with_gt() {
        let input = "<!-- a > b -->x";
        assert_eq!(tag_len(input), input.len() - 1);
    }

    #[test]
    fn test_tag_len_minimal_comment() {
        assert_eq!(tag_len("<!-->after"), 5);
    }
}
