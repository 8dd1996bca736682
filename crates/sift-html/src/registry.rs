//! Known-element and void-element lookup.
//!
//! The tree builder asks a [`TagRegistry`] two questions about each start tag:
//! whether the name is a known element (used only for diagnostics) and whether
//! it is a void element (which decides if the builder descends into it).
//!
//! The registry is passed to the builder explicitly. Callers that cannot
//! supply tag data get [`StaticTagRegistry::fallback`], which still knows the
//! common void elements so self-closing detection keeps working.

use std::collections::HashSet;

/// Lookup capability consumed by the tree builder.
///
/// Both questions are answered ignoring ASCII case.
pub trait TagRegistry: Send + Sync {
    /// Is `name` a recognised element name?
    fn is_known_tag(&self, name: &str) -> bool;

    /// Is `name` a void element that never has children?
    fn is_void_tag(&self, name: &str) -> bool;
}

/// Void elements assumed when no registry data is available.
pub const FALLBACK_VOID_TAGS: [&str; 6] = ["br", "img", "meta", "input", "link", "hr"];

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
pub const HTML_VOID_TAGS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Element names defined by the HTML Living Standard, plus the root `svg` and
/// `math` elements.
pub const HTML_KNOWN_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col",
    "colgroup", "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt",
    "em", "embed", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4",
    "h5", "h6", "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins",
    "kbd", "label", "legend", "li", "link", "main", "map", "mark", "math", "menu", "meta",
    "meter", "nav", "noscript", "object", "ol", "optgroup", "option", "output", "p", "picture",
    "pre", "progress", "q", "rp", "rt", "ruby", "s", "samp", "script", "search", "section",
    "select", "slot", "small", "source", "span", "strong", "style", "sub", "summary", "sup",
    "svg", "table", "tbody", "td", "template", "textarea", "tfoot", "th", "thead", "time",
    "title", "tr", "track", "u", "ul", "var", "video", "wbr",
];

/// Set-backed [`TagRegistry`].
///
/// An empty known-name set means "no data": every name is then treated as
/// known, so the builder reports no unknown-element issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTagRegistry {
    known: HashSet<String>,
    void: HashSet<String>,
}

impl StaticTagRegistry {
    /// Build a registry from explicit name lists.
    ///
    /// Names are lowercased. An empty `void` list is replaced by
    /// [`FALLBACK_VOID_TAGS`].
    pub fn new<K, V>(known: K, void: V) -> Self
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
        V: IntoIterator,
        V::Item: AsRef<str>,
    {
        let known: HashSet<String> = known
            .into_iter()
            .map(|name| name.as_ref().trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        let mut void: HashSet<String> = void
            .into_iter()
            .map(|name| name.as_ref().trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        if void.is_empty() {
            void = FALLBACK_VOID_TAGS.iter().map(|&name| name.to_string()).collect();
        }
        Self { known, void }
    }

    /// Build a registry from whitespace-separated name lists, such as the
    /// contents of two reference files with one name per line.
    #[must_use]
    pub fn from_lists(known: &str, void: &str) -> Self {
        Self::new(known.split_whitespace(), void.split_whitespace())
    }

    /// Minimal registry used when no tag data was supplied.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(std::iter::empty::<&str>(), FALLBACK_VOID_TAGS)
    }

    /// Registry with the full HTML element and void-element lists.
    #[must_use]
    pub fn html() -> Self {
        Self::new(HTML_KNOWN_TAGS.iter(), HTML_VOID_TAGS)
    }

    /// True if the registry carries known-name data.
    #[must_use]
    pub fn has_known_tags(&self) -> bool {
        !self.known.is_empty()
    }
}

impl Default for StaticTagRegistry {
    fn default() -> Self {
        Self::fallback()
    }
}

impl TagRegistry for StaticTagRegistry {
    fn is_known_tag(&self, name: &str) -> bool {
        self.known.is_empty() || self.known.contains(&name.to_ascii_lowercase())
    }

    fn is_void_tag(&self, name: &str) -> bool {
        self.void.contains(&name.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_void_tags() {
        let registry = StaticTagRegistry::fallback();
        for name in FALLBACK_VOID_TAGS {
            assert!(registry.is_void_tag(name), "{name} should be void");
        }
        assert!(registry.is_void_tag("BR"));
        assert!(!registry.is_void_tag("div"));
        assert!(!registry.is_void_tag("wbr"));
    }

    #[test]
    fn test_fallback_treats_every_name_as_known() {
        let registry = StaticTagRegistry::fallback();
        assert!(!registry.has_known_tags());
        assert!(registry.is_known_tag("made-up-element"));
    }

    #[test]
    fn test_html_registry() {
        let registry = StaticTagRegistry::html();
        assert!(registry.is_known_tag("DIV"));
        assert!(!registry.is_known_tag("blink"));
        assert!(registry.is_void_tag("wbr"));
        assert!(registry.is_void_tag("source"));
        assert!(!registry.is_void_tag("p"));
    }

    #[test]
    fn test_from_lists_with_empty_void_list_falls_back() {
        let registry = StaticTagRegistry::from_lists("div\nspan\n", "  \n");
        assert!(registry.is_known_tag("span"));
        assert!(!registry.is_known_tag("p"));
        assert!(registry.is_void_tag("img"));
    }

    #[test]
    fn test_from_lists_custom_void_tags() {
        let registry = StaticTagRegistry::from_lists("", "frame\nbr");
        assert!(registry.is_void_tag("FRAME"));
        assert!(!registry.is_void_tag("img"));
    }
}
