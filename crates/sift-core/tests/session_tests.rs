//! Tests for document loading, registry loading and match reports.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sift_core::html::{IssueKind, StaticTagRegistry};
use sift_core::{LoadError, SessionOptions, load_document, load_registry, parse_markup};

/// Helper to write a scratch file unique to this test run.
fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sift-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("write scratch file");
    path
}

#[test]
fn test_load_document_from_file() {
    let path = scratch_file("page.html", "<ul><li class=a>1</li><li class=a>2</li></ul>");
    let source = path.to_string_lossy().into_owned();

    let document = load_document(&source, &SessionOptions::default()).unwrap();
    assert_eq!(document.source_path, source);
    assert_eq!(document.select("ul .a").len(), 2);
    assert!(document.markup.starts_with("<ul>"));

    fs::remove_file(path).unwrap();
}

#[test]
fn test_missing_file_is_io_error() {
    let result = load_document("/definitely/not/here.html", &SessionOptions::default());
    match result {
        Err(LoadError::Io { path, .. }) => {
            assert_eq!(path, Path::new("/definitely/not/here.html"));
        }
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn test_load_registry_from_files() {
    let known = scratch_file("known.txt", "div\nspan\nspacer\n");
    let void = scratch_file("void.txt", "spacer\n");
    let registry = load_registry(Some(&known), Some(&void)).unwrap();

    let options = SessionOptions {
        registry: Arc::new(registry),
        report_issues: false,
    };
    let document = parse_markup("<div><spacer><span>x</span><p></p></div>", &options);

    // `spacer` is void, so `span` is its sibling.
    assert_eq!(document.select("spacer span").len(), 0);
    assert_eq!(document.select("div span").len(), 1);
    // `p` is not in the known list.
    assert_eq!(document.issues.len(), 1);
    assert_eq!(document.issues[0].kind, IssueKind::UnknownElement);

    fs::remove_file(known).unwrap();
    fs::remove_file(void).unwrap();
}

#[test]
fn test_load_registry_without_files_is_fallback() {
    let registry = load_registry(None, None).unwrap();
    assert_eq!(registry, StaticTagRegistry::fallback());
}

#[test]
fn test_load_registry_missing_file_is_registry_error() {
    let result = load_registry(Some(Path::new("/no/such/tags.txt")), None);
    assert!(matches!(result, Err(LoadError::Registry { .. })));
}

#[test]
fn test_issues_collected_with_reporting_enabled() {
    let options = SessionOptions {
        report_issues: true,
        ..SessionOptions::default()
    };
    let document = parse_markup("<div></p></div>", &options);
    assert_eq!(document.issues.len(), 1);
    assert_eq!(document.issues[0].kind, IssueKind::UnmatchedEndTag);
}

#[test]
fn test_report_for_match() {
    let document = parse_markup(
        r#"<main id="m"><p class="intro lead" data-k=v>Hello <b>you</b> there</p></main>"#,
        &SessionOptions::default(),
    );
    let matches = document.select("#m p");
    assert_eq!(matches.len(), 1);

    let report = document.report(matches[0]).unwrap();
    assert_eq!(report.name, "p");
    assert_eq!(report.id, None);
    assert_eq!(report.classes, vec!["intro".to_string(), "lead".to_string()]);
    assert_eq!(report.inner_text, "Hello there");
    assert_eq!(report.path, "document > main#m > p.intro.lead");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["name"], "p");
    assert_eq!(json["attributes"][1][0], "data-k");
    assert_eq!(json["attributes"][1][1], "v");
}

#[test]
fn test_report_for_unknown_node_is_none() {
    let document = parse_markup("<p></p>", &SessionOptions::default());
    assert!(document.report(sift_core::dom::NodeId(99)).is_none());
    assert!(document.element(sift_core::dom::NodeId::ROOT).is_some());
}
