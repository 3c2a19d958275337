//! Facet discovery

use crate::corpus::CorpusSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct, sorted facet values present in a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
    pub tags: Vec<String>,
}

/// Compute the available filters. Always recomputed from the snapshot.
pub fn available_filters(snapshot: &CorpusSnapshot) -> FilterSet {
    let mut categories = BTreeSet::new();
    let mut difficulties = BTreeSet::new();
    let mut tags = BTreeSet::new();

    for doc in &snapshot.documents {
        categories.insert(doc.category.as_str());
        difficulties.insert(doc.difficulty.as_str());
        tags.extend(doc.tags.iter().map(String::as_str));
    }

    FilterSet {
        categories: categories.into_iter().map(str::to_string).collect(),
        difficulties: difficulties.into_iter().map(str::to_string).collect(),
        tags: tags.into_iter().map(str::to_string).collect(),
    }
}
