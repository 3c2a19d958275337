//! Corpus scanning: `<root>/<category>/<slug>.<ext>`

use crate::error::{Diagnostic, DiagnosticKind, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Default pattern for guide files
pub const DEFAULT_PATTERN: &str = "*.mdx";

/// One file to parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub category: String,
    pub path: PathBuf,
    pub slug: String,
}

/// Scan result: files in scan order plus anything that was skipped
#[derive(Debug, Default)]
pub struct ScanReport {
    pub entries: Vec<ScanEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan options
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Glob matched against file names inside a category directory
    pub pattern: String,
    pub follow_symlinks: bool,
    pub exclude_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            follow_symlinks: true,
            exclude_hidden: true,
        }
    }
}

/// Scanner with a compiled file pattern
#[derive(Debug, Clone)]
pub struct Scanner {
    pattern: Pattern,
    options: ScanOptions,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Result<Self> {
        let pattern = Pattern::new(&options.pattern)?;
        Ok(Self { pattern, options })
    }

    /// Enumerate categories then files, both sorted by name.
    ///
    /// A missing root or an unreadable category is recorded in the report's
    /// diagnostics and never fails the scan.
    pub fn scan(&self, root: &Path) -> ScanReport {
        let mut report = ScanReport::default();

        if !root.is_dir() {
            report.diagnostics.push(Diagnostic::new(
                DiagnosticKind::CorpusRootMissing,
                root,
                "content directory does not exist",
            ));
            return report;
        }

        for category in self.categories(root, &mut report.diagnostics) {
            self.scan_category(&category, &mut report);
        }

        report
    }

    fn categories(&self, root: &Path, diagnostics: &mut Vec<Diagnostic>) -> Vec<DirEntry> {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.options.follow_symlinks)
            .sort_by_file_name();

        let mut categories = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_dir() && !self.is_hidden(&entry) => {
                    categories.push(entry);
                }
                Ok(_) => {}
                Err(err) => diagnostics.push(walk_diagnostic(root, err)),
            }
        }
        categories
    }

    fn scan_category(&self, category: &DirEntry, report: &mut ScanReport) {
        let name = category.file_name().to_string_lossy().to_string();
        let walker = WalkDir::new(category.path())
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.options.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    report.diagnostics.push(walk_diagnostic(category.path(), err));
                    continue;
                }
            };

            if !entry.file_type().is_file() || self.is_hidden(&entry) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if !self.pattern.matches(&file_name) {
                continue;
            }

            let slug = entry
                .path()
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| file_name.to_string());

            report.entries.push(ScanEntry {
                category: name.clone(),
                path: entry.path().to_path_buf(),
                slug,
            });
        }
    }

    /// Dot-prefixed categories and files are skipped unless `exclude_hidden` is off
    fn is_hidden(&self, entry: &DirEntry) -> bool {
        self.options.exclude_hidden && entry.file_name().to_string_lossy().starts_with('.')
    }
}

fn walk_diagnostic(fallback: &Path, err: walkdir::Error) -> Diagnostic {
    let path = err.path().unwrap_or(fallback).to_path_buf();
    Diagnostic::new(
        DiagnosticKind::CategoryRead,
        path,
        format!("cannot read category directory: {err}"),
    )
}

/// Scan `root` with the given options
pub fn scan_corpus(root: &Path, options: &ScanOptions) -> Result<ScanReport> {
    Ok(Scanner::new(options.clone())?.scan(root))
}
