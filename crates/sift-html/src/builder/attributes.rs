//! Attribute scanning for start tags.
//!
//! Scans the attribute region of a start tag (everything after the tag name)
//! for `name`, `name=value`, `name="value"` and `name='value'` pairs.
//! Characters that cannot begin an attribute name are skipped, so malformed
//! regions still yield every attribute that can be recognised.

use sift_dom::{Attribute, Element};

/// Characters that end an attribute name.
fn is_name_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '=' | '/' | '>' | '"' | '\'')
}

/// Characters that end an unquoted attribute value.
fn is_bare_value_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '>')
}

/// Try to read `= value` starting at `rest`.
///
/// Returns the value and the number of bytes consumed, or `None` if `rest`
/// does not hold a complete assignment (no `=`, an unclosed quote, or no value).
fn scan_value(rest: &str) -> Option<(&str, usize)> {
    let after_ws = rest.trim_start();
    let after_eq = after_ws.strip_prefix('=')?;
    let value_start = after_eq.trim_start();
    let skipped = rest.len() - value_start.len();

    let mut chars = value_start.chars();
    match chars.next()? {
        quote @ ('"' | '\'') => {
            let body = &value_start[1..];
            let end = body.find(quote)?;
            Some((&body[..end], skipped + 1 + end + 1))
        }
        _ => {
            let end = value_start
                .find(is_bare_value_terminator)
                .unwrap_or(value_start.len());
            if end == 0 {
                return None;
            }
            Some((&value_start[..end], skipped + end))
        }
    }
}

/// Parse every attribute in `region`, in source order.
#[must_use]
pub fn parse_attributes(region: &str) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    let mut rest = region;

    while let Some(start) = rest.find(|c: char| !is_name_terminator(c)) {
        rest = &rest[start..];
        let name_len = rest.find(is_name_terminator).unwrap_or(rest.len());
        let name = &rest[..name_len];
        rest = &rest[name_len..];

        match scan_value(rest) {
            Some((value, consumed)) => {
                attributes.push(Attribute::new(name, value));
                rest = &rest[consumed..];
            }
            None => attributes.push(Attribute::new(name, "")),
        }
    }

    attributes
}

/// Copy attributes onto `element` and derive its `id` and `classes`.
///
/// `id` and `class` are recognised ignoring ASCII case. A later occurrence
/// replaces whatever an earlier one set.
pub fn apply_attributes(element: &mut Element, attributes: Vec<Attribute>) {
    for attribute in &attributes {
        if attribute.name.eq_ignore_ascii_case("id") {
            element.id = Some(attribute.value.clone());
        } else if attribute.name.eq_ignore_ascii_case("class") {
            element.classes = attribute
                .value
                .split_whitespace()
                .map(str::to_string)
                .collect();
        }
    }
    element.attributes.extend(attributes);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(region: &str) -> Vec<(String, String)> {
        parse_attributes(region)
            .into_iter()
            .map(|a| (a.name, a.value))
            .collect()
    }

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_quoted_and_bare_values() {
        assert_eq!(
            pairs(r#" href="/a b" title='x "y"' width=100"#),
            vec![
                pair("href", "/a b"),
                pair("title", "x \"y\""),
                pair("width", "100"),
            ]
        );
    }

    #[test]
    fn test_boolean_attribute_and_spaces_around_equals() {
        assert_eq!(
            pairs(" disabled  id = \"main\" hidden"),
            vec![pair("disabled", ""), pair("id", "main"), pair("hidden", "")]
        );
    }

    #[test]
    fn test_name_case_preserved() {
        assert_eq!(pairs(" ID=top"), vec![pair("ID", "top")]);
    }

    #[test]
    fn test_unclosed_quote_is_skipped() {
        // The value never closes, so `a` is bare and the quote is noise.
        assert_eq!(
            pairs(r#" a="open b=c"#),
            vec![pair("a", ""), pair("open", ""), pair("b", "c")]
        );
    }

    #[test]
    fn test_stray_characters_are_skipped() {
        assert_eq!(pairs(r#" / " = x"#), vec![pair("x", "")]);
    }

    #[test]
    fn test_empty_region() {
        assert!(parse_attributes("").is_empty());
        assert!(parse_attributes("   ").is_empty());
    }

    #[test]
    fn test_apply_last_id_and_class_win() {
        let mut element = Element::new("div");
        let attributes = parse_attributes(r#" id="a" class="x y" ID="b" class="  z  z ""#);
        apply_attributes(&mut element, attributes);

        assert_eq!(element.id.as_deref(), Some("b"));
        assert_eq!(element.classes, vec!["z".to_string(), "z".to_string()]);
        assert_eq!(element.attributes.len(), 4);
    }
}
