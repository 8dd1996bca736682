//! Descendant selector parsing and per-element matching.
//!
//! A selector string is split on whitespace into segments. Each segment
//! becomes one [`SelectorNode`]; consecutive nodes are related by the
//! [§ 16.1 descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators):
//! "A selector of the form 'A B' represents an element B that is an arbitrary
//! descendant of some ancestor element A."

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use sift_dom::Element;

/// One level of a compiled selector chain: the conditions a single element
/// must meet.
///
/// Corresponds to a [§ 4.2 compound selector](https://www.w3.org/TR/selectors-4/#compound)
/// restricted to type, ID and class selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorNode {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors).
    /// `None` (or empty) matches any tag.
    pub tag_name: Option<String>,

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors).
    /// `None` (or empty) places no constraint on the id.
    pub id: Option<String>,

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html).
    /// Every listed class must be present on the element.
    pub classes: Vec<String>,

    /// The node one descendant level down, if any.
    pub next: Option<Box<SelectorNode>>,
}

impl SelectorNode {
    /// True if the node has no tag, id or class constraint and so matches
    /// every element.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.tag_name.as_deref().is_none_or(str::is_empty)
            && self.id.as_deref().is_none_or(str::is_empty)
            && self.classes.is_empty()
    }

    /// Match this node (ignoring `next`) against a single element.
    ///
    /// - the tag must equal the element name, ignoring ASCII case
    /// - the id must equal the element id exactly
    /// - every class must appear among the element's classes; extra classes
    ///   on the element are fine
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        let tag_ok = self
            .tag_name
            .as_deref()
            .is_none_or(|tag| tag.is_empty() || element.has_name(tag));
        let id_ok = self
            .id
            .as_deref()
            .is_none_or(|id| id.is_empty() || element.id.as_deref() == Some(id));
        tag_ok && id_ok && self.classes.iter().all(|class| element.has_class(class))
    }
}

impl fmt::Display for SelectorNode {
    /// Renders the compound part only, e.g. `div#main.item`. An unconstrained
    /// node renders as `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unconstrained() {
            return f.write_str("*");
        }
        if let Some(tag) = &self.tag_name {
            f.write_str(tag)?;
        }
        if let Some(id) = self.id.as_deref().filter(|id| !id.is_empty()) {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}

/// A compiled descendant selector: zero or more [`SelectorNode`]s linked
/// through `next`, outermost level first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorChain {
    head: Option<SelectorNode>,
}

impl SelectorChain {
    /// Compile `text`. Equivalent to [`parse_selector`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        parse_selector(text)
    }

    /// Link `nodes` into a chain, in order. Any existing `next` links on the
    /// nodes are replaced.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = SelectorNode>,
    {
        let nodes: Vec<SelectorNode> = nodes.into_iter().collect();
        let mut head: Option<SelectorNode> = None;
        for mut node in nodes.into_iter().rev() {
            node.next = head.map(Box::new);
            head = Some(node);
        }
        Self { head }
    }

    /// The outermost level, if any.
    #[must_use]
    pub const fn first(&self) -> Option<&SelectorNode> {
        self.head.as_ref()
    }

    /// True for a chain compiled from empty or all-whitespace text.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of levels in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels().count()
    }

    /// Walk the levels from outermost to innermost by following `next`.
    ///
    /// Every call starts a new walk from the head of the chain.
    #[must_use]
    pub fn levels(&self) -> Levels<'_> {
        Levels {
            current: self.head.as_ref(),
        }
    }
}

impl FromStr for SelectorChain {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_selector(s))
    }
}

impl fmt::Display for SelectorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.levels().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Iterator over the levels of a [`SelectorChain`].
#[derive(Debug, Clone)]
pub struct Levels<'a> {
    current: Option<&'a SelectorNode>,
}

impl<'a> Iterator for Levels<'a> {
    type Item = &'a SelectorNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current?;
        self.current = node.next.as_deref();
        Some(node)
    }
}

/// Characters allowed in a leading tag name after its first letter.
fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':')
}

/// Characters allowed in an `#id` or `.class` fragment.
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-') || !c.is_ascii()
}

/// Parse one whitespace-free segment such as `div#main.item`.
///
/// The segment may open with a tag name (a letter followed by word
/// characters, `-` or `:`). After that, every `#ident` sets the id, so the
/// last one wins, and every `.ident` adds a class. Anything else is skipped.
fn parse_segment(segment: &str) -> SelectorNode {
    let mut node = SelectorNode::default();
    let mut rest = segment;

    if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        let len = rest.find(|c: char| !is_tag_char(c)).unwrap_or(rest.len());
        node.tag_name = Some(rest[..len].to_string());
        rest = &rest[len..];
    }

    while let Some(pos) = rest.find(['#', '.']) {
        let marker = &rest[pos..=pos];
        let after = &rest[pos + 1..];
        let len = after.find(|c: char| !is_ident_char(c)).unwrap_or(after.len());
        if len > 0 {
            let ident = after[..len].to_string();
            if marker == "#" {
                node.id = Some(ident);
            } else {
                node.classes.push(ident);
            }
        }
        rest = &after[len..];
    }

    node
}

/// Compile a selector string into a [`SelectorChain`].
///
/// Segments are separated by one or more whitespace characters and each
/// becomes one level. Empty or all-whitespace input yields an empty chain.
///
/// # Example
/// ```
/// use sift_css::parse_selector;
///
/// let chain = parse_selector("div#container  .item");
/// assert_eq!(chain.len(), 2);
/// assert_eq!(chain.to_string(), "div#container .item");
/// ```
#[must_use]
pub fn parse_selector(text: &str) -> SelectorChain {
    SelectorChain::from_nodes(text.split_whitespace().map(parse_segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segment_tag_then_fragments() {
        let node = parse_segment("div.a#x.b");
        assert_eq!(node.tag_name.as_deref(), Some("div"));
        assert_eq!(node.id.as_deref(), Some("x"));
        assert_eq!(node.classes, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parse_segment_tag_must_start_with_letter() {
        let node = parse_segment("1div.a");
        assert_eq!(node.tag_name, None);
        assert_eq!(node.classes, vec!["a".to_string()]);
    }

    #[test]
    fn test_parse_segment_skips_noise() {
        let node = parse_segment("*[x]#.c!");
        assert_eq!(node.tag_name, None);
        assert_eq!(node.id, None);
        assert_eq!(node.classes, vec!["c".to_string()]);
    }

    #[test]
    fn test_parse_segment_namespaced_tag() {
        let node = parse_segment("svg:rect.shape");
        assert_eq!(node.tag_name.as_deref(), Some("svg:rect"));
        assert_eq!(node.classes, vec!["shape".to_string()]);
    }
}
