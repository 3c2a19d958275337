//! Guidesearch Core Library
//!
//! In-memory faceted search over a corpus of categorized MDX guides.
//!
//! # Features
//! - Corpus scanning of `<root>/<category>/<slug>.mdx`
//! - YAML front matter validation and markup stripping
//! - TTL-cached snapshots with single-flight rebuilds
//! - Category, difficulty and tag facets with OR semantics
//! - Weighted substring ranking for free-text queries

pub mod cache;
pub mod config;
pub mod corpus;
pub mod document;
pub mod error;
pub mod index;
pub mod search;
pub mod service;

pub use cache::{CacheStats, CachedLoader, Clock, Loader, ManualClock, SystemClock};
pub use config::Config;
pub use corpus::{ContentCache, CorpusLoader, CorpusSnapshot, CorpusStats};
pub use document::{Difficulty, Document, TocEntry};
pub use error::{Diagnostic, DiagnosticKind, Error, GuideSearchError, ParseFailure, Result};
pub use index::{parse_document, scan_corpus, ScanOptions, Scanner};
pub use search::{
    available_filters, paginate, parse_inline_filters, parse_limit, FilterSet, ScoredDocument,
    SearchRequest, DEFAULT_LIMIT,
};
pub use service::{AppliedFilters, DocumentDetail, SearchResponse, SearchService};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "guidesearch";
