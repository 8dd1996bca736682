//! sift CLI - build a markup tree and query it with descendant selectors.
//!
//! Usage:
//!   sift <file|url> -s <selector>      Print every element the selector matches
//!   sift <file|url> -s <sel> --json    Print matches as JSON
//!   sift <file|url> --tree             Print the element tree
//!   sift <file|url> --tokens           Count tag and text tokens
//!   sift --html '<markup>' -s <sel>    Query markup passed on the command line
//!
//! Examples:
//!   sift page.html -s 'div#container .item'
//!   sift https://example.com -s 'p a' --html-tags --verbose

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use sift_core::{LoadedDocument, SessionOptions, load_document, load_registry, parse_markup};
use sift_dom::NodeId;
use sift_html::{StaticTagRegistry, TagRegistry, TokenKind, print_tree, tokenize};
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(name = "sift", version, about = "Query markup with descendant selectors")]
struct Cli {
    /// Markup file path or http(s) URL
    source: Option<String>,

    /// Markup to parse instead of reading a source
    #[arg(long, value_name = "MARKUP", conflicts_with = "source")]
    html: Option<String>,

    /// Descendant selector, e.g. 'div#main .item'
    #[arg(short, long)]
    selector: Option<String>,

    /// Print the element tree
    #[arg(long)]
    tree: bool,

    /// Print token counts by kind
    #[arg(long)]
    tokens: bool,

    /// Print matches as JSON
    #[arg(long)]
    json: bool,

    /// File listing known element names, whitespace separated
    #[arg(long, value_name = "FILE")]
    known_tags: Option<PathBuf>,

    /// File listing void element names, whitespace separated
    #[arg(long, value_name = "FILE")]
    void_tags: Option<PathBuf>,

    /// Use the built-in HTML element lists
    #[arg(long, conflicts_with_all = ["known_tags", "void_tags"])]
    html_tags: bool,

    /// Report recoverable build issues as warnings
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let registry: Arc<dyn TagRegistry> = if cli.html_tags {
        Arc::new(StaticTagRegistry::html())
    } else {
        Arc::new(load_registry(
            cli.known_tags.as_deref(),
            cli.void_tags.as_deref(),
        )?)
    };
    let options = SessionOptions {
        registry,
        report_issues: cli.verbose,
    };

    let document = match (&cli.html, &cli.source) {
        (Some(markup), _) => parse_markup(markup.as_str(), &options),
        (None, Some(source)) => {
            load_document(source, &options).with_context(|| format!("could not load {source}"))?
        }
        (None, None) => bail!("no input: pass a file, a URL, or --html '<markup>'"),
    };

    if cli.tokens {
        print_token_counts(&document.markup);
    }

    if cli.tree {
        println!("{}", "=== Element Tree ===".bold());
        print_tree(&document.tree, NodeId::ROOT, 0);
        println!();
    }

    if let Some(selector) = &cli.selector {
        let matches = document.select(selector);
        if cli.json {
            print_json(&document, &matches)?;
        } else {
            print_matches(&document, selector, &matches);
        }
    }

    if cli.verbose {
        eprintln!(
            "{} elements, {} build issues",
            document.tree.len(),
            document.issues.len()
        );
    }

    Ok(())
}

fn print_token_counts(markup: &str) {
    let mut counts: HashMap<TokenKind, usize> = HashMap::new();
    for token in tokenize(markup) {
        *counts.entry(token.kind()).or_default() += 1;
    }
    println!("{}", "=== Tokens ===".bold());
    for kind in TokenKind::iter() {
        println!("  {kind:<5} {}", counts.get(&kind).copied().unwrap_or(0));
    }
    println!();
}

fn print_matches(document: &LoadedDocument, selector: &str, matches: &[NodeId]) {
    println!(
        "{} {} ({} matches)",
        "=== Query".bold(),
        selector.cyan(),
        matches.len()
    );
    for &id in matches {
        let Some(element) = document.element(id) else {
            continue;
        };
        let path = document.tree.element_path(id);
        if element.inner_text.is_empty() {
            println!("  {} {}", id.dimmed(), path.green());
        } else {
            println!(
                "  {} {} {:?}",
                id.dimmed(),
                path.green(),
                element.inner_text
            );
        }
    }
}

fn print_json(document: &LoadedDocument, matches: &[NodeId]) -> Result<()> {
    let reports: Vec<_> = matches
        .iter()
        .filter_map(|&id| document.report(id))
        .collect();
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
