//! Error types for guidesearch

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GuideSearchError
pub type Result<T> = std::result::Result<T, GuideSearchError>;

/// Error type alias for convenience
pub type Error = GuideSearchError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for guidesearch
#[derive(Debug, Error)]
pub enum GuideSearchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl GuideSearchError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DocumentNotFound(_) => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) | Self::Glob(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

/// Why a single document was left out of the corpus
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("missing required front matter field `{0}`")]
    MissingField(&'static str),

    #[error("unknown difficulty `{0}` (expected beginner, intermediate or advanced)")]
    InvalidDifficulty(String),

    #[error("malformed front matter: {0}")]
    MalformedHeader(String),

    #[error("unreadable file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("internal error while parsing: {0}")]
    Internal(String),
}

impl From<serde_yaml::Error> for ParseFailure {
    fn from(err: serde_yaml::Error) -> Self {
        Self::MalformedHeader(err.to_string())
    }
}

/// Kind of non-fatal problem recorded while building a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    CorpusRootMissing,
    CategoryRead,
    DocumentParse,
}

/// A recorded scan or parse failure. Never surfaced to query callers.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub path: PathBuf,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Emit this diagnostic as a warning
    pub fn log(&self) {
        tracing::warn!(
            kind = ?self.kind,
            path = %self.path.display(),
            "{}",
            self.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            GuideSearchError::DocumentNotFound("x/y".into()).exit_code(),
            exit_codes::NOT_FOUND
        );
        assert_eq!(
            GuideSearchError::Config("bad".into()).exit_code(),
            exit_codes::INVALID_INPUT
        );
        assert_eq!(
            GuideSearchError::Other(anyhow::anyhow!("boom")).exit_code(),
            exit_codes::GENERAL_ERROR
        );
    }

    #[test]
    fn test_yaml_and_io_errors_are_general() {
        let yaml = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        assert_eq!(GuideSearchError::from(yaml).exit_code(), exit_codes::GENERAL_ERROR);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(GuideSearchError::from(io).exit_code(), exit_codes::GENERAL_ERROR);
    }

    #[test]
    fn test_parse_failure_messages() {
        let err = ParseFailure::MissingField("title");
        assert_eq!(err.to_string(), "missing required front matter field `title`");

        let err = ParseFailure::InvalidDifficulty("expert".into());
        assert!(err.to_string().contains("expert"));
    }
}
