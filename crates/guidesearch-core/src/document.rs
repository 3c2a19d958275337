//! Parsed guide documents

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty level of a guide
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            other => Err(other.to_string()),
        }
    }
}

/// One heading in a guide's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

/// A parsed and validated guide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    pub published_at: Option<DateTime<Utc>>,
    pub slug: String,
    /// Markup-stripped body, used for matching only
    pub normalized_body: String,
    pub related_slugs: Vec<String>,
    pub word_count: usize,
    pub reading_minutes: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub table_of_contents: Vec<TocEntry>,
}

impl Document {
    /// Link path used by the site: `/{category}/{slug}`
    pub fn url_path(&self) -> String {
        format!("/{}/{}", self.category, self.slug)
    }

    /// `category/slug`, the key used by `related_slugs` entries
    pub fn key(&self) -> String {
        format!("{}/{}", self.category, self.slug)
    }

    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        self.tags.iter().any(|t| wanted.contains(t))
    }

    /// Tags joined by a single space
    pub fn joined_tags(&self) -> String {
        self.tags.join(" ")
    }

    /// Human readable reading time, e.g. "7 min read"
    pub fn reading_time(&self) -> String {
        format!("{} min read", self.reading_minutes)
    }
}
