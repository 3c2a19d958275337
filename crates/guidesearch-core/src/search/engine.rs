//! Facet filtering and weighted substring ranking

use super::SearchRequest;
use crate::corpus::CorpusSnapshot;
use crate::document::Document;

/// Score added per token found in the title
pub const TITLE_WEIGHT: u32 = 10;
/// Score added per token found in the description
pub const DESCRIPTION_WEIGHT: u32 = 5;
/// Score added per token found in the joined tags
pub const TAGS_WEIGHT: u32 = 3;
/// Score added per token found in the normalized body
pub const BODY_WEIGHT: u32 = 1;

/// A matched document and its relevance score (0 when no query was given)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDocument<'a> {
    pub document: &'a Document,
    pub score: u32,
}

/// Lowercased searchable fields of one document
struct SearchFields {
    title: String,
    description: String,
    tags: String,
    body: String,
}

impl SearchFields {
    fn new(doc: &Document) -> Self {
        Self {
            title: doc.title.to_lowercase(),
            description: doc.description.to_lowercase(),
            tags: doc.joined_tags().to_lowercase(),
            body: doc.normalized_body.to_lowercase(),
        }
    }

    /// Every token occurs somewhere in title, description, body or tags
    fn contains_all(&self, terms: &[String]) -> bool {
        let combined = [
            self.title.as_str(),
            self.description.as_str(),
            self.body.as_str(),
            self.tags.as_str(),
        ]
        .join(" ");
        terms.iter().all(|term| combined.contains(term.as_str()))
    }

    fn relevance(&self, terms: &[String]) -> u32 {
        terms
            .iter()
            .map(|term| {
                let mut score = 0;
                if self.title.contains(term.as_str()) {
                    score += TITLE_WEIGHT;
                }
                if self.description.contains(term.as_str()) {
                    score += DESCRIPTION_WEIGHT;
                }
                if self.tags.contains(term.as_str()) {
                    score += TAGS_WEIGHT;
                }
                if self.body.contains(term.as_str()) {
                    score += BODY_WEIGHT;
                }
                score
            })
            .sum()
    }
}

/// Whether a document passes the category, difficulty and tag facets.
///
/// An empty facet list places no constraint; a non-empty one is OR-ed.
pub fn matches_facets(doc: &Document, request: &SearchRequest) -> bool {
    (request.categories.is_empty() || request.categories.contains(&doc.category))
        && (request.difficulties.is_empty()
            || request
                .difficulties
                .iter()
                .any(|d| d == doc.difficulty.as_str()))
        && (request.tags.is_empty() || doc.has_any_tag(&request.tags))
}

/// Filter and order the snapshot for a request. Not paginated.
///
/// With query terms, results are ranked by descending score; otherwise by
/// `published_at` newest first with undated documents last. Both sorts are
/// stable, so ties keep scan order.
pub fn search<'a>(snapshot: &'a CorpusSnapshot, request: &SearchRequest) -> Vec<ScoredDocument<'a>> {
    let candidates = snapshot
        .documents
        .iter()
        .filter(|doc| matches_facets(doc, request));

    let terms = request.terms();
    if terms.is_empty() {
        let mut dated: Vec<&Document> = candidates.collect();
        dated.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        return dated
            .into_iter()
            .map(|document| ScoredDocument { document, score: 0 })
            .collect();
    }

    let mut ranked: Vec<ScoredDocument<'a>> = candidates
        .filter_map(|document| {
            let fields = SearchFields::new(document);
            fields.contains_all(&terms).then(|| ScoredDocument {
                document,
                score: fields.relevance(&terms),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
