//! Markup stripping and body-derived metadata

use crate::document::TocEntry;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FENCED_CODE_RE: Regex = Regex::new(r"(?s)```.*?```").unwrap();
    static ref INLINE_CODE_RE: Regex = Regex::new(r"`[^`]*`").unwrap();
    static ref HEADING_MARKER_RE: Regex = Regex::new(r"#{1,6}\s+").unwrap();
    static ref BOLD_RE: Regex = Regex::new(r"\*\*([^*]*)\*\*").unwrap();
    static ref ITALIC_RE: Regex = Regex::new(r"\*([^*]*)\*").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref TOC_HEADING_RE: Regex = Regex::new(r"(?m)^(#{1,6})[ \t]+(.+)$").unwrap();
    static ref SLUG_STRIP_RE: Regex = Regex::new(r"[^\w\s-]").unwrap();
}

/// Words per minute used for reading time estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Strip markup from a body, producing plain text for matching.
///
/// Passes run in a fixed order: fenced code, inline code, heading markers,
/// bold, italic, links (keeping the visible text), then whitespace collapse.
pub fn normalize_body(body: &str) -> String {
    let text = FENCED_CODE_RE.replace_all(body, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = HEADING_MARKER_RE.replace_all(&text, "");
    let text = BOLD_RE.replace_all(&text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

pub fn word_count(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Whole minutes to read `words`, never less than one
pub fn reading_minutes(words: usize) -> u32 {
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Anchor id for a heading title
pub fn heading_id(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = SLUG_STRIP_RE.replace_all(&lowered, "");
    WHITESPACE_RE.replace_all(stripped.trim(), "-").to_string()
}

/// Build a nested table of contents from ATX headings outside code fences
pub fn table_of_contents(body: &str) -> Vec<TocEntry> {
    let without_code = FENCED_CODE_RE.replace_all(body, "");

    let flat = TOC_HEADING_RE.captures_iter(&without_code).filter_map(|caps| {
        let level = caps.get(1)?.as_str().len() as u8;
        let title = caps.get(2)?.as_str().trim().trim_end_matches('#').trim();
        if title.is_empty() {
            return None;
        }
        Some(TocEntry {
            id: heading_id(title),
            title: title.to_string(),
            level,
            children: Vec::new(),
        })
    });

    nest_headings(flat)
}

fn nest_headings(flat: impl IntoIterator<Item = TocEntry>) -> Vec<TocEntry> {
    let mut roots = Vec::new();
    let mut open: Vec<TocEntry> = Vec::new();

    for entry in flat {
        while open.last().is_some_and(|top| top.level >= entry.level) {
            close_heading(&mut open, &mut roots);
        }
        open.push(entry);
    }
    while !open.is_empty() {
        close_heading(&mut open, &mut roots);
    }

    roots
}

fn close_heading(open: &mut Vec<TocEntry>, roots: &mut Vec<TocEntry>) {
    if let Some(done) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}
