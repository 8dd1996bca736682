//! Integration tests for the markup tokenizer.

use quickcheck_macros::quickcheck;
use sift_html::{TagForm, Token, TokenKind, tokenize};
use strum::IntoEnumIterator;

/// Helper to collect `(kind, text)` pairs.
fn kinds_and_text(input: &str) -> Vec<(TokenKind, &str)> {
    tokenize(input).map(|t| (t.kind(), t.text())).collect()
}

#[test]
fn test_empty_input() {
    assert_eq!(tokenize("").count(), 0);
}

#[test]
fn test_plain_text() {
    assert_eq!(kinds_and_text("Hello"), vec![(TokenKind::Text, "Hello")]);
}

#[test]
fn test_tags_and_text_alternate() {
    assert_eq!(
        kinds_and_text("<p class=\"a\">Hi <b>there</b></p>"),
        vec![
            (TokenKind::Tag, "<p class=\"a\">"),
            (TokenKind::Text, "Hi "),
            (TokenKind::Tag, "<b>"),
            (TokenKind::Text, "there"),
            (TokenKind::Tag, "</b>"),
            (TokenKind::Tag, "</p>"),
        ]
    );
}

#[test]
fn test_whitespace_between_tags_is_a_text_token() {
    assert_eq!(
        kinds_and_text("<ul>\n  <li>"),
        vec![
            (TokenKind::Tag, "<ul>"),
            (TokenKind::Text, "\n  "),
            (TokenKind::Tag, "<li>"),
        ]
    );
}

#[test]
fn test_unterminated_tag_runs_to_end_of_input() {
    let tokens: Vec<Token<'_>> = tokenize("text<div class=\"x\"").collect();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind(), TokenKind::Tag);
    assert_eq!(tokens[1].text(), "<div class=\"x\"");
    assert!(!tokens[1].is_terminated());
    assert!(tokens[0].is_terminated());
}

#[test]
fn test_stray_less_than_starts_a_tag() {
    // The tag started by the stray `<` swallows everything up to the next `>`.
    assert_eq!(
        kinds_and_text("a < b <c>d"),
        vec![
            (TokenKind::Text, "a "),
            (TokenKind::Tag, "< b <c>"),
            (TokenKind::Text, "d"),
        ]
    );
}

#[test]
fn test_comment_may_contain_greater_than() {
    let tokens: Vec<Token<'_>> = tokenize("<!-- a > b -->x").collect();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].text(), "<!-- a > b -->");
    assert_eq!(tokens[0].tag_form(), Some(TagForm::Comment));
    assert!(tokens[0].is_terminated());
}

#[test]
fn test_unterminated_comment() {
    let tokens: Vec<Token<'_>> = tokenize("<!-- never closed > <p>").collect();
    assert_eq!(tokens.len(), 1);
    assert!(!tokens[0].is_terminated());
}

#[test]
fn test_tag_forms() {
    let forms: Vec<Option<TagForm>> = tokenize("<!DOCTYPE html><!--c--></p><br/>t")
        .map(|t| t.tag_form())
        .collect();
    assert_eq!(
        forms,
        vec![
            Some(TagForm::Declaration),
            Some(TagForm::Comment),
            Some(TagForm::EndTag),
            Some(TagForm::StartTag),
            None,
        ]
    );
}

#[test]
fn test_spans_are_contiguous() {
    let input = "<a href='x'>link</a> tail";
    let mut expected_start = 0;
    for token in tokenize(input) {
        let span = token.span();
        assert_eq!(span.start, expected_start);
        assert_eq!(&input[span.clone()], token.text());
        expected_start = span.end;
    }
    assert_eq!(expected_start, input.len());
}

#[test]
fn test_multibyte_text() {
    assert_eq!(
        kinds_and_text("<p>héllo → wörld</p>"),
        vec![
            (TokenKind::Tag, "<p>"),
            (TokenKind::Text, "héllo → wörld"),
            (TokenKind::Tag, "</p>"),
        ]
    );
}

#[test]
fn test_tokenizer_is_restartable() {
    let tokenizer = tokenize("<p>one</p><p>two</p>");
    let first: Vec<Token<'_>> = tokenizer.clone().collect();
    let second: Vec<Token<'_>> = tokenizer.collect();
    assert_eq!(first, second);
}

#[test]
fn test_partially_consumed_clone_resumes() {
    let mut tokenizer = tokenize("<p>one</p>");
    assert_eq!(tokenizer.next().map(|t| t.text()), Some("<p>"));
    assert_eq!(tokenizer.position(), 3);
    let rest: Vec<&str> = tokenizer.clone().map(|t| t.text()).collect();
    assert_eq!(rest, vec!["one", "</p>"]);
}

#[test]
fn test_token_kind_display() {
    let names: Vec<String> = TokenKind::iter().map(|k| k.to_string()).collect();
    assert_eq!(names, vec!["tag".to_string(), "text".to_string()]);
}

#[quickcheck]
fn prop_concatenated_tokens_reproduce_input(input: String) -> bool {
    let rebuilt: String = tokenize(&input).map(|t| t.text()).collect();
    rebuilt == input
}

#[quickcheck]
fn prop_text_tokens_never_contain_less_than(input: String) -> bool {
    tokenize(&input)
        .filter(|t| t.kind() == TokenKind::Text)
        .all(|t| !t.text().is_empty() && !t.text().contains('<'))
}
