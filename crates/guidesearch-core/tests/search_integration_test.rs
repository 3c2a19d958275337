//! Integration tests for search over an on-disk corpus

use guidesearch_core::{
    available_filters, CachedLoader, CorpusLoader, DiagnosticKind, ManualClock, ScanOptions,
    SearchRequest, SearchService,
};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const TTL: Duration = Duration::from_secs(300);

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "developers/react-hooks.mdx",
        "---\ntitle: React Hooks in Practice\ndescription: State and effects with hooks\ncategory: developers\ndifficulty: intermediate\ntags: [react, hooks]\npublishedAt: 2024-01-15\n---\n# Hooks\n\nUse `useState` and **effects**. See [docs](https://react.dev).\n",
    );
    write(
        root,
        "developers/backend-development.mdx",
        "---\ntitle: Backend Development Guide\ndescription: Building scalable backend systems\ndifficulty: intermediate\ntags: [backend, api, scalability]\npublishedAt: 2024-01-10\n---\nServices, queues and testing strategies for APIs.\n",
    );
    write(
        root,
        "testers/testing-hooks.mdx",
        "---\ntitle: Testing Custom Hooks\ndescription: Render hooks in isolation\ndifficulty: beginner\ntags: [testing, react]\npublishedAt: 2024-02-01\nrelatedGuides: [react-hooks]\n---\n## Setup\n\nInstall the testing library.\n",
    );
    write(
        root,
        "architects/domain-driven-design.mdx",
        "---\ntitle: Domain-Driven Design\ndescription: Implementing DDD patterns\ndifficulty: advanced\ntags: [architecture, ddd]\npublishedAt: 2024-01-05\n---\nBounded contexts and aggregates.\n",
    );
    write(
        root,
        "architects/no-difficulty.mdx",
        "---\ntitle: Hooks Everywhere\ndescription: Missing difficulty\ntags: [orphan-tag]\n---\nhooks testing\n",
    );
    write(
        root,
        "architects/no-title.mdx",
        "---\ndescription: Missing title\ndifficulty: beginner\ntags: [another-orphan]\n---\nhooks\n",
    );
    write(root, "architects/readme.md", "not a guide");

    dir
}

fn service_for(root: &Path) -> SearchService<Arc<ManualClock>> {
    let loader = CorpusLoader::new(root, ScanOptions::default()).unwrap();
    SearchService::with_clock(loader, TTL, Arc::new(ManualClock::new()))
}

fn slugs(results: &[guidesearch_core::Document]) -> Vec<&str> {
    results.iter().map(|d| d.slug.as_str()).collect()
}

#[test]
fn test_invalid_documents_never_surface() {
    let corpus = setup_corpus();
    let svc = service_for(corpus.path());

    let snapshot = svc.snapshot();
    assert_eq!(snapshot.len(), 4);
    let parse_failures = snapshot
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::DocumentParse)
        .count();
    assert_eq!(parse_failures, 2);

    let response = svc.search(&SearchRequest::new().query("hooks"));
    assert!(!slugs(&response.results).contains(&"no-difficulty"));
    assert!(!slugs(&response.results).contains(&"no-title"));

    let filters = svc.available_filters();
    assert!(!filters.tags.contains(&"orphan-tag".to_string()));
    assert!(!filters.tags.contains(&"another-orphan".to_string()));
}

#[test]
fn test_available_filters() {
    let corpus = setup_corpus();
    let filters = service_for(corpus.path()).available_filters();

    assert_eq!(filters.categories, vec!["architects", "developers", "testers"]);
    assert_eq!(filters.difficulties, vec!["advanced", "beginner", "intermediate"]);
    assert_eq!(
        filters.tags,
        vec!["api", "architecture", "backend", "ddd", "hooks", "react", "scalability", "testing"]
    );
}

#[test]
fn test_free_text_and_ranking() {
    let corpus = setup_corpus();
    let svc = service_for(corpus.path());

    // "hooks testing": testing-hooks has both in its title, react-hooks lacks "testing"
    let response = svc.search(&SearchRequest::new().query("hooks testing"));
    assert_eq!(slugs(&response.results), vec!["testing-hooks"]);

    // Title matches outrank body-only matches
    let response = svc.search(&SearchRequest::new().query("testing"));
    assert_eq!(slugs(&response.results), vec!["testing-hooks", "backend-development"]);
}

#[test]
fn test_markup_is_not_searchable() {
    let corpus = setup_corpus();
    let svc = service_for(corpus.path());

    // inline code and link targets are stripped from the body
    assert_eq!(svc.search(&SearchRequest::new().query("usestate")).total, 0);
    assert_eq!(svc.search(&SearchRequest::new().query("react.dev")).total, 0);
    // visible link text stays
    assert_eq!(svc.search(&SearchRequest::new().query("docs")).total, 1);
}

#[test]
fn test_default_order_and_pagination() {
    let corpus = setup_corpus();
    let svc = service_for(corpus.path());

    let response = svc.search(&SearchRequest::new());
    assert_eq!(
        slugs(&response.results),
        vec!["testing-hooks", "react-hooks", "backend-development", "domain-driven-design"]
    );

    let response = svc.search(&SearchRequest::from_params(None, None, None, None, Some("2")));
    assert_eq!(response.total, 2);
    assert_eq!(slugs(&response.results), vec!["testing-hooks", "react-hooks"]);
}

#[test]
fn test_facet_filters_echoed() {
    let corpus = setup_corpus();
    let svc = service_for(corpus.path());

    let request = SearchRequest::from_params(None, Some("developers,testers"), None, Some("react"), None);
    let response = svc.search(&request);
    assert_eq!(slugs(&response.results), vec!["testing-hooks", "react-hooks"]);
    assert_eq!(response.filters.categories, vec!["developers", "testers"]);
    assert_eq!(response.filters.tags, vec!["react"]);
    assert!(response.filters.difficulties.is_empty());
    assert_eq!(response.query, None);
}

#[test]
fn test_related_guides_resolve_across_categories() {
    let corpus = setup_corpus();
    let svc = service_for(corpus.path());

    let related = svc.related("testers", "testing-hooks");
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].url_path(), "/developers/react-hooks");
}

#[test]
fn test_empty_corpus() {
    let dir = TempDir::new().unwrap();
    let svc = service_for(&dir.path().join("content"));

    let response = svc.search(&SearchRequest::new().query("anything"));
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);

    let filters = svc.available_filters();
    assert!(filters.categories.is_empty());
    assert!(filters.difficulties.is_empty());
    assert!(filters.tags.is_empty());

    let snapshot = svc.snapshot();
    assert_eq!(snapshot.diagnostics.len(), 1);
    assert_eq!(snapshot.diagnostics[0].kind, DiagnosticKind::CorpusRootMissing);
}

#[test]
fn test_scan_counter_follows_ttl_and_invalidate() {
    let corpus = setup_corpus();
    let scans = Arc::new(AtomicUsize::new(0));
    let clock = Arc::new(ManualClock::new());
    let loader = CorpusLoader::new(corpus.path(), ScanOptions::default()).unwrap();

    let counter = Arc::clone(&scans);
    let cache = CachedLoader::with_clock(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            loader.build()
        },
        TTL,
        Arc::clone(&clock),
    );

    let first = cache.get();
    let second = cache.get();
    assert_eq!(scans.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(available_filters(&first), available_filters(&second));

    clock.advance(TTL);
    cache.get();
    assert_eq!(scans.load(Ordering::SeqCst), 2);

    cache.invalidate();
    cache.get();
    cache.get();
    assert_eq!(scans.load(Ordering::SeqCst), 3);
}

#[test]
fn test_shared_service_across_threads() {
    let corpus = setup_corpus();
    let svc = Arc::new(service_for(corpus.path()));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let svc = Arc::clone(&svc);
            std::thread::spawn(move || svc.search(&SearchRequest::new().query("hooks")).total)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert_eq!(svc.cache_stats().loads, 1);
}
