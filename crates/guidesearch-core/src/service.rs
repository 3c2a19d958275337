//! Query interface over a cached corpus
//!
//! A [`SearchService`] is built once by the host and shared by reference
//! (or `Arc`) with request handlers. Every call reads the current snapshot,
//! rebuilding it first when the TTL has passed.

use crate::cache::{CacheStats, CachedLoader, Clock, SystemClock};
use crate::config::Config;
use crate::corpus::{ContentCache, CorpusLoader, CorpusSnapshot, CorpusStats};
use crate::document::Document;
use crate::error::Result;
use crate::search::{self, paginate, FilterSet, SearchRequest, DEFAULT_LIMIT};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Facets echoed back with a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppliedFilters {
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
    pub tags: Vec<String>,
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<Document>,
    /// Number of results returned, after truncation
    pub total: usize,
    pub query: Option<String>,
    pub filters: AppliedFilters,
}

/// A document together with its resolved related guides
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetail {
    pub document: Document,
    pub related: Vec<Document>,
}

/// Search and facet discovery over a TTL-cached snapshot
pub struct SearchService<C: Clock = SystemClock> {
    cache: ContentCache<C>,
    default_limit: usize,
}

impl SearchService<SystemClock> {
    /// Build a service from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let loader = CorpusLoader::new(&config.content_root, config.scan_options())?;
        Ok(Self::new(loader, config.cache_ttl()).with_default_limit(config.default_limit))
    }

    pub fn new(loader: CorpusLoader, ttl: Duration) -> Self {
        Self {
            cache: CachedLoader::new(loader, ttl),
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl<C: Clock> SearchService<C> {
    pub fn with_clock(loader: CorpusLoader, ttl: Duration, clock: C) -> Self {
        Self {
            cache: CachedLoader::with_clock(loader, ttl, clock),
            default_limit: DEFAULT_LIMIT,
        }
    }

    /// Limit applied when a request gives none or an unusable one
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Build a request from raw HTTP-style parameters using this service's
    /// default limit
    pub fn request_from_params(
        &self,
        query: Option<&str>,
        categories: Option<&str>,
        difficulties: Option<&str>,
        tags: Option<&str>,
        limit: Option<&str>,
    ) -> SearchRequest {
        SearchRequest::from_params_or(query, categories, difficulties, tags, limit, self.default_limit)
    }

    /// Current snapshot, rebuilt if stale
    pub fn snapshot(&self) -> Arc<CorpusSnapshot> {
        self.cache.get()
    }

    /// Filter, rank and truncate
    pub fn search(&self, request: &SearchRequest) -> SearchResponse {
        let snapshot = self.snapshot();
        let ranked = search::search(&snapshot, request);
        let results: Vec<Document> = paginate(ranked, request.limit)
            .into_iter()
            .map(|scored| scored.document.clone())
            .collect();

        tracing::debug!(
            query = request.query.as_deref().unwrap_or(""),
            returned = results.len(),
            "search completed"
        );

        SearchResponse {
            total: results.len(),
            results,
            query: request.query.clone(),
            filters: AppliedFilters {
                categories: request.categories.clone(),
                difficulties: request.difficulties.clone(),
                tags: request.tags.clone(),
            },
        }
    }

    pub fn available_filters(&self) -> FilterSet {
        search::available_filters(&self.snapshot())
    }

    /// Force the next call to rebuild the snapshot
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    pub fn get(&self, category: &str, slug: &str) -> Option<Document> {
        self.snapshot().get(category, slug).cloned()
    }

    /// Look up a document and resolve its related guides
    pub fn detail(&self, category: &str, slug: &str) -> Option<DocumentDetail> {
        let snapshot = self.snapshot();
        let document = snapshot.get(category, slug)?;
        Some(DocumentDetail {
            related: snapshot.related(document).into_iter().cloned().collect(),
            document: document.clone(),
        })
    }

    pub fn related(&self, category: &str, slug: &str) -> Vec<Document> {
        self.detail(category, slug)
            .map(|detail| detail.related)
            .unwrap_or_default()
    }

    pub fn stats(&self) -> CorpusStats {
        self.snapshot().stats()
    }

    /// Link paths of every document
    pub fn urls(&self) -> Vec<String> {
        self.snapshot().url_paths()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
