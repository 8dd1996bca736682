use std::sync::Arc;

use sift_dom::{DomTree, Element, NodeId};
use strum_macros::Display;

use super::attributes::{apply_attributes, parse_attributes};
use crate::registry::{StaticTagRegistry, TagRegistry};
use crate::tokenizer::{TagForm, Token, TokenKind, tokenize};

/// What kind of recoverable problem the builder ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum IssueKind {
    /// An end tag with no open element of that name; it was ignored.
    #[strum(serialize = "unmatched end tag")]
    UnmatchedEndTag,
    /// A start tag whose name the registry does not know.
    #[strum(serialize = "unknown element")]
    UnknownElement,
    /// A tag token cut off by the end of input.
    #[strum(serialize = "unterminated tag")]
    UnterminatedTag,
    /// A tag token with no name, such as `<>` or `< p>`; it was ignored.
    #[strum(serialize = "empty tag name")]
    EmptyTagName,
}

/// A recoverable problem found while building the tree.
///
/// Issues are informational: the tree is built the same way whether or not
/// anybody looks at them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildIssue {
    /// Category of the problem.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Index into the token stream where the problem was encountered.
    pub token_index: usize,
}

/// Builds a [`DomTree`] from markup.
///
/// The builder itself only holds configuration (the tag registry), so one
/// builder can be reused for any number of documents.
///
/// # Recovery
///
/// Start tags open a new element under the current one unless they are
/// self-closing (`<br/>`) or void per the registry. An end tag closes the
/// nearest open element with the same name together with everything opened
/// inside it. An end tag that matches nothing is dropped.
#[derive(Clone)]
pub struct TreeBuilder {
    registry: Arc<dyn TagRegistry>,
}

impl TreeBuilder {
    /// Create a builder that consults `registry` for void and known tags.
    #[must_use]
    pub fn new(registry: Arc<dyn TagRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this builder consults.
    #[must_use]
    pub fn registry(&self) -> &dyn TagRegistry {
        self.registry.as_ref()
    }

    /// Tokenize and build `markup`, discarding issues.
    #[must_use]
    pub fn build(&self, markup: &str) -> DomTree {
        self.build_with_issues(markup).0
    }

    /// Tokenize and build `markup`, returning the tree and every issue found.
    #[must_use]
    pub fn build_with_issues(&self, markup: &str) -> (DomTree, Vec<BuildIssue>) {
        self.build_from_tokens(tokenize(markup))
    }

    /// Build from an already tokenized stream.
    pub fn build_from_tokens<'a, I>(&self, tokens: I) -> (DomTree, Vec<BuildIssue>)
    where
        I: IntoIterator<Item = Token<'a>>,
    {
        let mut construction = Construction::new(self.registry.as_ref());
        for (index, token) in tokens.into_iter().enumerate() {
            construction.token_index = index;
            construction.process_token(token);
        }
        (construction.tree, construction.issues)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(Arc::new(StaticTagRegistry::fallback()))
    }
}

impl std::fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder").finish_non_exhaustive()
    }
}

/// Parse `markup` with the fallback registry.
#[must_use]
pub fn parse(markup: &str) -> DomTree {
    TreeBuilder::default().build(markup)
}

/// State for one build: the tree so far and the insertion cursor.
struct Construction<'r> {
    registry: &'r dyn TagRegistry,
    tree: DomTree,
    /// The element new content is inserted into.
    current_node: NodeId,
    issues: Vec<BuildIssue>,
    token_index: usize,
}

impl<'r> Construction<'r> {
    fn new(registry: &'r dyn TagRegistry) -> Self {
        Self {
            registry,
            tree: DomTree::new(),
            current_node: NodeId::ROOT,
            issues: Vec::new(),
            token_index: 0,
        }
    }

    fn issue(&mut self, kind: IssueKind, message: String) {
        self.issues.push(BuildIssue {
            kind,
            message,
            token_index: self.token_index,
        });
    }

    fn process_token(&mut self, token: Token<'_>) {
        match token.kind() {
            TokenKind::Text => self.insert_text(token.text()),
            TokenKind::Tag => {
                if !token.is_terminated() {
                    self.issue(
                        IssueKind::UnterminatedTag,
                        format!("tag at byte {} runs to end of input", token.span().start),
                    );
                }
                match token.tag_form() {
                    Some(TagForm::StartTag) => self.insert_element(token.text()),
                    Some(TagForm::EndTag) => self.close_element(token.text()),
                    // Comments and declarations never reach the tree.
                    Some(TagForm::Comment | TagForm::Declaration) | None => {}
                }
            }
        }
    }

    /// Trim the text, drop line breaks, and append it to the current element.
    fn insert_text(&mut self, text: &str) {
        let cleaned: String = text
            .trim()
            .chars()
            .filter(|&c| c != '\r' && c != '\n')
            .collect();
        if cleaned.is_empty() {
            return;
        }
        if let Some(element) = self.tree.get_mut(self.current_node) {
            element.push_text(&cleaned);
        }
    }

    fn insert_element(&mut self, raw: &str) {
        let self_closing = raw.ends_with("/>");
        let inner = raw.strip_prefix('<').unwrap_or(raw);
        let inner = inner.strip_suffix('>').unwrap_or(inner);
        let inner = inner.strip_suffix('/').unwrap_or(inner);

        let name_len = inner.find(char::is_whitespace).unwrap_or(inner.len());
        let (name, region) = inner.split_at(name_len);
        if name.is_empty() {
            self.issue(IssueKind::EmptyTagName, format!("ignored nameless tag {raw:?}"));
            return;
        }
        if !self.registry.is_known_tag(name) {
            self.issue(
                IssueKind::UnknownElement,
                format!("unknown element <{}>", name.to_ascii_lowercase()),
            );
        }

        let mut element = Element::new(name);
        apply_attributes(&mut element, parse_attributes(region));
        let id = self.tree.append_element(self.current_node, element);

        if !(self_closing || self.registry.is_void_tag(name)) {
            self.current_node = id;
        }
    }

    /// Close the nearest open element named like the end tag.
    ///
    /// The search starts at the current element and walks towards the root;
    /// the root itself is never closed.
    fn close_element(&mut self, raw: &str) {
        let inner = raw.strip_prefix("</").unwrap_or(raw);
        let inner = inner.strip_suffix('>').unwrap_or(inner);
        let name = inner.split_whitespace().next().unwrap_or("");
        if name.is_empty() {
            self.issue(IssueKind::EmptyTagName, format!("ignored nameless end tag {raw:?}"));
            return;
        }

        let tree = &self.tree;
        let matched = std::iter::once(self.current_node)
            .chain(tree.ancestors(self.current_node))
            .take_while(|&id| id != NodeId::ROOT)
            .find(|&id| tree.get(id).is_some_and(|e| e.has_name(name)));

        match matched {
            Some(id) => self.current_node = self.tree.parent(id).unwrap_or(NodeId::ROOT),
            None => self.issue(
                IssueKind::UnmatchedEndTag,
                format!("unmatched end tag </{}> ignored", name.to_ascii_lowercase()),
            ),
        }
    }
}
