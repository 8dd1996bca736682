//! Element tree for the sift query engine.
//!
//! This crate provides an arena-based tree of markup elements. It is the data
//! model shared by the tree builder (`sift-html`) and the query engine
//! (`sift-css`).
//!
//! # Design
//!
//! The tree stores every [`Element`] in one vector and uses [`NodeId`] indices
//! for all relationships. Parents own their children through the arena; the
//! `parent` link is a plain index, so there are no ownership cycles and upward
//! traversal stays O(1).
//!
//! A [`NodeId`] is assigned once, when the element is allocated, and never
//! reused. Two elements with identical fields are still distinct nodes, which
//! is what query deduplication relies on.

use std::collections::VecDeque;
use std::fmt;

/// Name of the synthetic element at the root of every tree.
pub const DOCUMENT_NAME: &str = "document";

/// A type-safe index into the element arena.
///
/// Doubles as the element's identity: query results are deduplicated by
/// `NodeId`, never by comparing element contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic document root is always at index 0.
    pub const ROOT: Self = Self(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A raw attribute as it appeared in the start tag.
///
/// Names keep their original case; duplicates are kept in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, case preserved.
    pub name: String,
    /// Attribute value with surrounding quotes removed. Empty for bare attributes.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One markup element.
///
/// `id` and `classes` are derived from the `id` and `class` attributes while
/// the start tag is processed; `attributes` keeps the raw list untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name, stored ASCII-lowercased.
    pub name: String,
    /// Value of the last `id` attribute, if any.
    pub id: Option<String>,
    /// Class tokens from the last `class` attribute, in source order.
    pub classes: Vec<String>,
    /// Every attribute of the start tag, in source order.
    pub attributes: Vec<Attribute>,
    /// Trimmed text that appeared directly inside this element.
    ///
    /// Separate text runs are joined with a single space. Text of child
    /// elements is not included.
    pub inner_text: String,
    /// Parent element. `None` only for the document root.
    pub parent: Option<NodeId>,
    /// Child elements in document order.
    pub children: Vec<NodeId>,
}

impl Element {
    /// Create a detached element with the given tag name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            inner_text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns true if the element's tag name equals `name`, ignoring ASCII case.
    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns true if `class` is one of the element's class tokens.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Look up a raw attribute value by name, ignoring ASCII case.
    ///
    /// When the attribute is repeated the last occurrence wins, matching how
    /// `id` and `classes` are derived.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .rev()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_str())
    }

    /// Append a run of text to `inner_text`, separated by a single space.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if !self.inner_text.is_empty() {
            self.inner_text.push(' ');
        }
        self.inner_text.push_str(text);
    }

    /// Short selector-like label, e.g. `div#main.item.active`.
    #[must_use]
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        if let Some(id) = &self.id {
            label.push('#');
            label.push_str(id);
        }
        for class in &self.classes {
            label.push('.');
            label.push_str(class);
        }
        label
    }
}

/// Arena-based element tree.
///
/// The synthetic `document` element is always at [`NodeId::ROOT`]. Elements
/// are only ever appended, so a `NodeId` handed out by [`DomTree::alloc`]
/// stays valid for the lifetime of the tree and ascending ids follow document
/// order.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All elements in the tree, indexed by `NodeId`.
    elements: Vec<Element>,
}

impl DomTree {
    /// Create a new tree holding only the document root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new(DOCUMENT_NAME)],
        }
    }

    /// Get the root document element ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get an element by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    /// Get a mutable reference to an element by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Returns true if `id` addresses an element of this tree.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.elements.len()
    }

    /// Number of elements in the tree, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false for a tree built with [`DomTree::new`]; the root is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Allocate a new element and return its ID.
    /// The element is not yet attached to the tree.
    pub fn alloc(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.elements.len());
        self.elements.push(element);
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// Does nothing if either ID is out of range, or if `child` already has a
    /// parent; an element is attached exactly once.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(parent) || !self.contains(child) || parent == child {
            return;
        }
        if self.elements[child.0].parent.is_some() || child == NodeId::ROOT {
            return;
        }
        self.elements[parent.0].children.push(child);
        self.elements[child.0].parent = Some(parent);
    }

    /// Allocate `element` and append it to `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.alloc(element);
        self.append_child(parent, id);
        id
    }

    /// Get the parent of an element.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|e| e.parent)
    }

    /// Get all children of an element.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |e| e.children.as_slice())
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Number of ancestors of `id`. The root has depth 0.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Iterate over all ancestors of an element, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and all of its descendants in breadth-first order.
    ///
    /// The element itself comes first, then its children in document order,
    /// then its grandchildren, and so on. Each call starts a fresh walk.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let mut queue = VecDeque::new();
        if self.contains(id) {
            queue.push_back(id);
        }
        DescendantIterator { tree: self, queue }
    }

    /// Iterate over every element ID in arena (document) order.
    pub fn iter_all(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.elements.len()).map(NodeId)
    }

    /// Labels from the root down to `id`, joined with ` > `.
    ///
    /// For example `document > body > div#main > p.intro`.
    #[must_use]
    pub fn element_path(&self, id: NodeId) -> String {
        let mut chain: Vec<NodeId> = self.ancestors(id).collect();
        chain.reverse();
        chain.push(id);
        chain
            .iter()
            .filter_map(|&node| self.get(node))
            .map(Element::label)
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of an element.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Queue-driven level-order walk over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    queue: VecDeque<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(id).iter().copied());
        Some(id)
    }
}
