//! Search engine module
//!
//! Provides:
//! - Facet filtering (category, difficulty, tag)
//! - Weighted substring ranking for free-text queries
//! - Facet discovery and result truncation

mod engine;
mod filters;
mod paginate;

pub use engine::*;
pub use filters::*;
pub use paginate::*;

use serde::{Deserialize, Serialize};

/// A search over one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query; blank means "no query"
    pub query: Option<String>,
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
    pub tags: Vec<String>,
    /// Maximum number of results
    pub limit: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: None,
            categories: Vec::new(),
            difficulties: Vec::new(),
            tags: Vec::new(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn difficulties<I, S>(mut self, difficulties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.difficulties = difficulties.into_iter().map(Into::into).collect();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Build a request from raw HTTP-style parameters.
    ///
    /// List parameters are comma separated with empty items dropped; an
    /// unusable `limit` falls back to [`DEFAULT_LIMIT`].
    pub fn from_params(
        query: Option<&str>,
        categories: Option<&str>,
        difficulties: Option<&str>,
        tags: Option<&str>,
        limit: Option<&str>,
    ) -> Self {
        Self::from_params_or(query, categories, difficulties, tags, limit, DEFAULT_LIMIT)
    }

    /// Like [`SearchRequest::from_params`] with a caller-chosen default limit
    pub fn from_params_or(
        query: Option<&str>,
        categories: Option<&str>,
        difficulties: Option<&str>,
        tags: Option<&str>,
        limit: Option<&str>,
        default_limit: usize,
    ) -> Self {
        Self {
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
            categories: split_list(categories),
            difficulties: split_list(difficulties),
            tags: split_list(tags),
            limit: parse_limit_or(limit, default_limit),
        }
    }

    /// Lowercased query tokens; empty when there is no usable query
    pub fn terms(&self) -> Vec<String> {
        self.query
            .as_deref()
            .map(|q| q.to_lowercase())
            .map(|q| q.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Whether a non-blank free-text query is present
    pub fn has_query(&self) -> bool {
        self.query.as_deref().is_some_and(|q| !q.trim().is_empty())
    }

    /// Move `category:x`, `difficulty:x` and `tag:x` terms out of the query
    /// into the matching facet lists. `keyword:` is accepted as `tag:`.
    pub fn with_inline_filters(mut self) -> Self {
        let Some(query) = self.query.take() else {
            return self;
        };

        let (clean, filters) = parse_inline_filters(&query);
        for (facet, value) in filters {
            let list = match facet {
                Facet::Category => &mut self.categories,
                Facet::Difficulty => &mut self.difficulties,
                Facet::Tag => &mut self.tags,
            };
            if !list.contains(&value) {
                list.push(value);
            }
        }

        self.query = (!clean.is_empty()).then_some(clean);
        self
    }
}

/// A filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Category,
    Difficulty,
    Tag,
}

/// Parse inline facet filters from a query string.
///
/// Supports syntax: "category:testers difficulty:beginner search terms".
/// Returns: (clean_query, filters)
pub fn parse_inline_filters(query: &str) -> (String, Vec<(Facet, String)>) {
    let mut filters = Vec::new();
    let mut remaining_terms = Vec::new();

    for term in query.split_whitespace() {
        if let Some((field, value)) = term.split_once(':') {
            let facet = match field.to_lowercase().as_str() {
                "category" => Some(Facet::Category),
                "difficulty" => Some(Facet::Difficulty),
                "tag" | "keyword" => Some(Facet::Tag),
                _ => None,
            };

            if let Some(facet) = facet.filter(|_| !value.is_empty()) {
                filters.push((facet, value.to_string()));
                continue;
            }
        }
        remaining_terms.push(term);
    }

    (remaining_terms.join(" "), filters)
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
