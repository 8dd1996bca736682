//! Document loading and querying for sift.
//!
//! # Scope
//!
//! This crate ties the pipeline together:
//! - **Source Loading** - read markup from a file or fetch it from a URL
//! - **Tree Building** - tokenize and build with an injected tag registry
//! - **Querying** - compile selectors and evaluate them against the tree
//! - **Reporting** - forward build issues as warnings, summarize matches
//!
//! Loading is the only fallible step. A failed read or fetch is reported as a
//! [`LoadError`] and the builder never runs.

pub use sift_css as css;
pub use sift_dom as dom;
pub use sift_html as html;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use sift_common::net::{self, FetchError};
use sift_common::warning::{clear_warnings, warn_once};
use sift_css::{SelectorChain, parse_selector, query};
use sift_dom::{DomTree, Element, NodeId};
use sift_html::{BuildIssue, StaticTagRegistry, TagRegistry, TreeBuilder};
use thiserror::Error;

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read a local markup file.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Failed to fetch a remote document.
    #[error("failed to fetch '{url}': {source}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// Underlying fetch error.
        #[source]
        source: FetchError,
    },
    /// Failed to read a tag list file.
    #[error("failed to read tag list '{}': {source}", path.display())]
    Registry {
        /// The tag list file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// How documents are built and reported.
#[derive(Clone)]
pub struct SessionOptions {
    /// Registry consulted for void and known element names.
    pub registry: Arc<dyn TagRegistry>,
    /// Forward build issues to the warning system.
    pub report_issues: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            registry: Arc::new(StaticTagRegistry::fallback()),
            report_issues: false,
        }
    }
}

impl std::fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOptions")
            .field("report_issues", &self.report_issues)
            .finish_non_exhaustive()
    }
}

/// Read markup from a local path, or fetch it if `source` is an
/// `http://` / `https://` URL.
///
/// # Errors
///
/// Returns [`LoadError::Io`] for unreadable files and [`LoadError::Fetch`]
/// for failed requests.
pub fn load_source(source: &str) -> Result<String, LoadError> {
    if net::is_remote(source) {
        return net::fetch_text(source).map_err(|e| LoadError::Fetch {
            url: source.to_string(),
            source: e,
        });
    }
    fs::read_to_string(source).map_err(|e| LoadError::Io {
        path: PathBuf::from(source),
        source: e,
    })
}

fn read_tag_list(path: Option<&Path>) -> Result<String, LoadError> {
    path.map_or_else(
        || Ok(String::new()),
        |path| {
            fs::read_to_string(path).map_err(|e| LoadError::Registry {
                path: path.to_path_buf(),
                source: e,
            })
        },
    )
}

/// Build a registry from optional tag list files (whitespace-separated names).
///
/// A missing known-tag list means every element name is accepted; a missing
/// or empty void-tag list falls back to the minimal built-in set.
///
/// # Errors
///
/// Returns [`LoadError::Registry`] if a given file cannot be read.
pub fn load_registry(
    known_tags: Option<&Path>,
    void_tags: Option<&Path>,
) -> Result<StaticTagRegistry, LoadError> {
    let known = read_tag_list(known_tags)?;
    let void = read_tag_list(void_tags)?;
    Ok(StaticTagRegistry::from_lists(&known, &void))
}

/// A parsed document, ready to be queried.
///
/// The tree is never modified after building, so any number of queries can
/// run against it, including from several threads at once.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Original markup source
    pub markup: String,

    /// Source path or URL (empty for in-memory markup)
    pub source_path: String,

    /// Built element tree
    pub tree: DomTree,

    /// Recoverable problems found while building
    pub issues: Vec<BuildIssue>,
}

/// Load a document from a file path or URL and build its tree.
///
/// # Errors
///
/// Returns a [`LoadError`] if the source cannot be read or fetched.
pub fn load_document(source: &str, options: &SessionOptions) -> Result<LoadedDocument, LoadError> {
    let markup = load_source(source)?;
    let mut document = parse_markup(markup, options);
    document.source_path = source.to_string();
    Ok(document)
}

/// Build a document from markup already in memory.
#[must_use]
pub fn parse_markup(markup: impl Into<String>, options: &SessionOptions) -> LoadedDocument {
    let markup = markup.into();
    let builder = TreeBuilder::new(Arc::clone(&options.registry));
    let (tree, issues) = builder.build_with_issues(&markup);

    if options.report_issues {
        clear_warnings();
        for issue in &issues {
            warn_once("Tree Builder", &format!("{} (token {})", issue.message, issue.token_index));
        }
    }

    LoadedDocument {
        markup,
        source_path: String::new(),
        tree,
        issues,
    }
}

impl LoadedDocument {
    /// Compile `selector` and run it from the document root.
    #[must_use]
    pub fn select(&self, selector: &str) -> Vec<NodeId> {
        self.query(&parse_selector(selector))
    }

    /// Run a compiled chain from the document root.
    #[must_use]
    pub fn query(&self, chain: &SelectorChain) -> Vec<NodeId> {
        query(&self.tree, self.tree.root(), chain).unwrap_or_default()
    }

    /// The element behind `id`.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.tree.get(id)
    }

    /// Summarize the element behind `id`.
    #[must_use]
    pub fn report(&self, id: NodeId) -> Option<MatchReport> {
        let element = self.tree.get(id)?;
        Some(MatchReport {
            node: id.0,
            name: element.name.clone(),
            id: element.id.clone(),
            classes: element.classes.clone(),
            attributes: element
                .attributes
                .iter()
                .map(|a| (a.name.clone(), a.value.clone()))
                .collect(),
            inner_text: element.inner_text.clone(),
            path: self.tree.element_path(id),
        })
    }
}

/// Serializable summary of one matched element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Arena index of the element.
    pub node: usize,
    /// Tag name.
    pub name: String,
    /// Element id, if any.
    pub id: Option<String>,
    /// Class tokens.
    pub classes: Vec<String>,
    /// Raw attributes as `(name, value)` pairs.
    pub attributes: Vec<(String, String)>,
    /// Direct inner text.
    pub inner_text: String,
    /// Labels from the root down to the element.
    pub path: String,
}
