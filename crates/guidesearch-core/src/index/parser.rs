//! Front matter parsing and document validation

use super::normalize::{normalize_body, reading_minutes, table_of_contents, word_count};
use super::scanner::ScanEntry;
use crate::document::{Difficulty, Document};
use crate::error::ParseFailure;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

const FENCE: &str = "---";

/// Naive date-time layouts accepted for `publishedAt`, read as UTC
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts beyond RFC 3339
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Typed front matter header. Every field is optional here; required
/// fields are checked by [`FrontMatter::validate`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub difficulty: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub related_guides: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub related_slugs: Vec<String>,
}

/// Front matter fields that passed validation
#[derive(Debug)]
pub struct ValidatedHeader {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
}

impl FrontMatter {
    /// Parse the YAML between the fences. An empty header yields all-`None`.
    pub fn from_yaml(header: &str) -> Result<Self, ParseFailure> {
        let value: Value = serde_yaml::from_str(header)?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
            _ => Err(ParseFailure::MalformedHeader(
                "front matter is not a key/value mapping".to_string(),
            )),
        }
    }

    pub fn validate(&self) -> Result<ValidatedHeader, ParseFailure> {
        let title = required(&self.title, "title")?;
        let description = required(&self.description, "description")?;
        let difficulty = required(&self.difficulty, "difficulty")?
            .parse::<Difficulty>()
            .map_err(ParseFailure::InvalidDifficulty)?;

        Ok(ValidatedHeader {
            title,
            description,
            difficulty,
        })
    }
}

fn required(field: &Option<String>, name: &'static str) -> Result<String, ParseFailure> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value.clone()),
        _ => Err(ParseFailure::MissingField(name)),
    }
}

/// Split a file into its front matter block and body.
///
/// Returns `None` for the header when the file does not open with a fence.
pub fn split_front_matter(raw: &str) -> Result<(Option<&str>, &str), ParseFailure> {
    let text = raw.trim_start_matches('\u{feff}').trim_start();

    let mut lines = text.split_inclusive('\n');
    let first = match lines.next() {
        Some(line) if line.trim_end() == FENCE => line,
        _ => return Ok((None, text)),
    };

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == FENCE {
            let header = &text[header_start..offset];
            let body = &text[offset + line.len()..];
            return Ok((Some(header), body));
        }
        offset += line.len();
    }

    Err(ParseFailure::MalformedHeader(
        "front matter block is never closed".to_string(),
    ))
}

/// Parse `publishedAt`: RFC 3339, a naive date-time (`T` or space separated,
/// optional fractional seconds, optional seconds), or a plain date
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Parse raw file contents into a document.
///
/// `category_dir` is used when the header carries no category.
pub fn parse_document(raw: &str, category_dir: &str, slug: &str) -> Result<Document, ParseFailure> {
    let (header, body) = split_front_matter(raw)?;
    let front = match header {
        Some(yaml) => FrontMatter::from_yaml(yaml)?,
        None => FrontMatter::default(),
    };
    let valid = front.validate()?;

    let category = front
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| category_dir.to_string());

    let published_at = front.published_at.as_deref().and_then(|raw_date| {
        let parsed = parse_published_at(raw_date);
        if parsed.is_none() {
            tracing::debug!(slug, value = raw_date, "unparseable publishedAt, treating as undated");
        }
        parsed
    });

    let words = word_count(body);
    let mut related = front.related_guides;
    related.extend(front.related_slugs);

    Ok(Document {
        title: valid.title,
        description: valid.description,
        category,
        tags: dedup(front.tags),
        difficulty: valid.difficulty,
        published_at,
        slug: slug.to_string(),
        normalized_body: normalize_body(body),
        related_slugs: dedup(related),
        word_count: words,
        reading_minutes: reading_minutes(words),
        table_of_contents: table_of_contents(body),
    })
}

/// Read and parse one scanned file. Invalid UTF-8 is replaced, not rejected.
pub fn parse_file(entry: &ScanEntry) -> Result<Document, ParseFailure> {
    let bytes = std::fs::read(&entry.path)?;
    let raw = String::from_utf8_lossy(&bytes);
    parse_document(&raw, &entry.category, &entry.slug)
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(tagged.value),
        _ => None,
    }
}

/// Accept any scalar as text; anything else counts as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Accept a sequence of scalars; anything else becomes an empty list
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Sequence(items) => Ok(items.into_iter().filter_map(scalar_text).collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const VALID: &str = "---\ntitle: React Hooks\ndescription: Hooks in depth\ncategory: developers\ndifficulty: intermediate\ntags: [react, hooks, hooks]\npublishedAt: 2024-01-15\nrelatedGuides:\n  - testing-hooks\n---\n# Intro\n\nUse **hooks** wisely.\n";

    #[test]
    fn test_parse_valid_document() {
        let doc = parse_document(VALID, "devs", "react-hooks").unwrap();
        assert_eq!(doc.title, "React Hooks");
        assert_eq!(doc.description, "Hooks in depth");
        assert_eq!(doc.category, "developers");
        assert_eq!(doc.tags, vec!["react", "hooks"]);
        assert_eq!(doc.difficulty, Difficulty::Intermediate);
        assert_eq!(doc.published_at.unwrap().year(), 2024);
        assert_eq!(doc.slug, "react-hooks");
        assert_eq!(doc.normalized_body, "Intro Use hooks wisely.");
        assert_eq!(doc.related_slugs, vec!["testing-hooks"]);
        assert_eq!(doc.table_of_contents.len(), 1);
        assert_eq!(doc.word_count, 5);
        assert_eq!(doc.reading_minutes, 1);
    }

    #[test]
    fn test_category_falls_back_to_directory() {
        let raw = "---\ntitle: T\ndescription: D\ndifficulty: beginner\n---\nbody";
        let doc = parse_document(raw, "testers", "t").unwrap();
        assert_eq!(doc.category, "testers");
        assert!(doc.tags.is_empty());
        assert!(doc.related_slugs.is_empty());
        assert!(doc.published_at.is_none());
    }

    #[test]
    fn test_missing_required_fields() {
        let no_title = "---\ndescription: D\ndifficulty: beginner\n---\n";
        assert!(matches!(
            parse_document(no_title, "c", "s"),
            Err(ParseFailure::MissingField("title"))
        ));

        let empty_description = "---\ntitle: T\ndescription: ''\ndifficulty: beginner\n---\n";
        assert!(matches!(
            parse_document(empty_description, "c", "s"),
            Err(ParseFailure::MissingField("description"))
        ));

        let no_difficulty = "---\ntitle: T\ndescription: D\n---\n";
        assert!(matches!(
            parse_document(no_difficulty, "c", "s"),
            Err(ParseFailure::MissingField("difficulty"))
        ));
    }

    #[test]
    fn test_invalid_difficulty() {
        let raw = "---\ntitle: T\ndescription: D\ndifficulty: expert\n---\n";
        match parse_document(raw, "c", "s") {
            Err(ParseFailure::InvalidDifficulty(value)) => assert_eq!(value, "expert"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_no_front_matter_is_missing_fields() {
        assert!(matches!(
            parse_document("# Just markdown", "c", "s"),
            Err(ParseFailure::MissingField("title"))
        ));
    }

    #[test]
    fn test_unclosed_front_matter() {
        let raw = "---\ntitle: T\ndescription: D\n";
        assert!(matches!(
            parse_document(raw, "c", "s"),
            Err(ParseFailure::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_non_mapping_front_matter() {
        let raw = "---\n- a\n- b\n---\nbody";
        assert!(matches!(
            parse_document(raw, "c", "s"),
            Err(ParseFailure::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_non_list_tags_default_to_empty() {
        let raw = "---\ntitle: T\ndescription: D\ndifficulty: advanced\ntags: rust\n---\n";
        let doc = parse_document(raw, "c", "s").unwrap();
        assert!(doc.tags.is_empty());
    }

    #[test]
    fn test_related_slugs_alias() {
        let raw = "---\ntitle: T\ndescription: D\ndifficulty: advanced\nrelatedSlugs: [a, b]\n---\n";
        let doc = parse_document(raw, "c", "s").unwrap();
        assert_eq!(doc.related_slugs, vec!["a", "b"]);
    }

    #[test]
    fn test_related_guides_and_slugs_together() {
        let raw = "---\ntitle: T\ndescription: D\ndifficulty: advanced\nrelatedGuides: [a, b]\nrelatedSlugs: [b, c]\n---\n";
        let doc = parse_document(raw, "c", "s").unwrap();
        assert_eq!(doc.related_slugs, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_file_replaces_invalid_utf8() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("caf.mdx");
        let mut bytes = b"---\ntitle: Caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b" guide\ndescription: D\ndifficulty: beginner\n---\nbody\n");
        std::fs::write(&path, bytes).unwrap();

        let entry = ScanEntry {
            category: "developers".to_string(),
            path,
            slug: "caf".to_string(),
        };
        let doc = parse_file(&entry).unwrap();
        assert_eq!(doc.title, "Caf\u{fffd} guide");
        assert_eq!(doc.category, "developers");
    }

    #[test]
    fn test_split_front_matter_crlf_and_bom() {
        let raw = "\u{feff}---\r\ntitle: T\r\n---\r\nbody\r\n";
        let (header, body) = split_front_matter(raw).unwrap();
        assert_eq!(header, Some("title: T\r\n"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_parse_published_at_formats() {
        assert!(parse_published_at("2024-01-15").is_some());
        assert!(parse_published_at("2024-01-15T10:30:00Z").is_some());
        assert!(parse_published_at("2024-01-15T10:30:00+02:00").is_some());
        assert!(parse_published_at("2024-01-15T10:30:00").is_some());
        assert!(parse_published_at("last tuesday").is_none());
    }

    #[test]
    fn test_parse_published_at_space_separator() {
        let dt = parse_published_at("2024-01-15 10:30:00").unwrap();
        assert_eq!((dt.day(), dt.hour(), dt.minute()), (15, 10, 30));
    }

    #[test]
    fn test_parse_published_at_fractional_seconds() {
        let dt = parse_published_at("2024-01-15T10:30:00.000").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (10, 30, 0));
        assert!(parse_published_at("2024-01-15 10:30:00.250").is_some());
    }

    #[test]
    fn test_parse_published_at_minutes_precision() {
        let dt = parse_published_at("2024-01-15T10:30").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (10, 30));
        assert!(parse_published_at("2024-01-15 10:30").is_some());
    }

    #[test]
    fn test_parse_published_at_slash_date() {
        let dt = parse_published_at("2024/01/15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 15));
    }

    #[test]
    fn test_parse_published_at_space_with_offset() {
        let dt = parse_published_at("2024-01-15 10:30:00+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_numeric_title_is_text() {
        let raw = "---\ntitle: 2024\ndescription: D\ndifficulty: beginner\n---\n";
        let doc = parse_document(raw, "c", "s").unwrap();
        assert_eq!(doc.title, "2024");
    }
}
