//! Corpus snapshots and the loader that builds them

use crate::cache::{CachedLoader, Loader, SystemClock};
use crate::document::{Difficulty, Document};
use crate::error::{Diagnostic, DiagnosticKind, ParseFailure, Result};
use crate::index::{parse_file, ScanEntry, ScanOptions, Scanner};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Point-in-time view of the parsed corpus
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSnapshot {
    /// Documents in scan order
    pub documents: Vec<Document>,
    pub built_at: DateTime<Utc>,
    /// Everything skipped while building
    pub diagnostics: Vec<Diagnostic>,
}

impl CorpusSnapshot {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            built_at: Utc::now(),
            diagnostics: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by its link coordinates
    pub fn get(&self, category: &str, slug: &str) -> Option<&Document> {
        self.documents
            .iter()
            .find(|d| d.category == category && d.slug == slug)
    }

    /// Resolve a document's `related_slugs`.
    ///
    /// `category/slug` entries match exactly. A bare slug prefers the same
    /// category, then the first match in scan order. Unknown entries and
    /// self references are skipped.
    pub fn related(&self, doc: &Document) -> Vec<&Document> {
        let mut related: Vec<&Document> = Vec::new();

        for reference in &doc.related_slugs {
            let reference = reference.trim().trim_matches('/');
            let found = match reference.split_once('/') {
                Some((category, slug)) => self.get(category, slug),
                None => self
                    .get(&doc.category, reference)
                    .or_else(|| self.documents.iter().find(|d| d.slug == reference)),
            };

            if let Some(found) = found {
                let is_self = found.category == doc.category && found.slug == doc.slug;
                let seen = related
                    .iter()
                    .any(|r| r.category == found.category && r.slug == found.slug);
                if !is_self && !seen {
                    related.push(found);
                }
            }
        }

        related
    }

    /// `/{category}/{slug}` for every document, in scan order
    pub fn url_paths(&self) -> Vec<String> {
        self.documents.iter().map(Document::url_path).collect()
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats::from_documents(&self.documents)
    }
}

/// Aggregate numbers about a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub total_guides: usize,
    pub total_words: usize,
    pub category_counts: BTreeMap<String, usize>,
    pub difficulty_distribution: BTreeMap<Difficulty, usize>,
    pub average_reading_minutes: u32,
    pub last_updated: Option<DateTime<Utc>>,
}

impl CorpusStats {
    pub fn from_documents(documents: &[Document]) -> Self {
        let mut stats = CorpusStats {
            total_guides: documents.len(),
            ..Default::default()
        };

        let mut reading_total: u64 = 0;
        for doc in documents {
            stats.total_words += doc.word_count;
            reading_total += u64::from(doc.reading_minutes);
            *stats.category_counts.entry(doc.category.clone()).or_default() += 1;
            *stats.difficulty_distribution.entry(doc.difficulty).or_default() += 1;
            stats.last_updated = stats.last_updated.max(doc.published_at);
        }

        if !documents.is_empty() {
            let average = (reading_total as f64 / documents.len() as f64).round();
            stats.average_reading_minutes = average as u32;
        }

        stats
    }
}

/// Scans and parses the whole corpus on every load
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    root: PathBuf,
    scanner: Scanner,
}

impl CorpusLoader {
    pub fn new(root: impl Into<PathBuf>, options: ScanOptions) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            scanner: Scanner::new(options)?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build a new snapshot. Failures become diagnostics; this never fails.
    pub fn build(&self) -> CorpusSnapshot {
        let started = Instant::now();
        let report = self.scanner.scan(&self.root);
        let mut diagnostics = report.diagnostics;
        let mut documents = Vec::with_capacity(report.entries.len());

        for entry in &report.entries {
            match parse_isolated(entry) {
                Ok(doc) => documents.push(doc),
                Err(failure) => diagnostics.push(Diagnostic::new(
                    DiagnosticKind::DocumentParse,
                    &entry.path,
                    format!("skipping document: {failure}"),
                )),
            }
        }

        for diagnostic in &diagnostics {
            diagnostic.log();
        }

        tracing::info!(
            root = %self.root.display(),
            documents = documents.len(),
            skipped = diagnostics.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "corpus snapshot built"
        );

        CorpusSnapshot {
            documents,
            built_at: Utc::now(),
            diagnostics,
        }
    }
}

impl Loader<CorpusSnapshot> for CorpusLoader {
    fn load(&self) -> CorpusSnapshot {
        self.build()
    }
}

/// Parse one entry, turning a panic into a failure for that document only
fn parse_isolated(entry: &ScanEntry) -> std::result::Result<Document, ParseFailure> {
    panic::catch_unwind(AssertUnwindSafe(|| parse_file(entry))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(ParseFailure::Internal(message))
    })
}

/// Process-lifetime cache of corpus snapshots
pub type ContentCache<C = SystemClock> = CachedLoader<CorpusSnapshot, CorpusLoader, C>;
