//! Configuration management

use crate::cache::DEFAULT_TTL;
use crate::error::{GuideSearchError, Result};
use crate::index::{ScanOptions, DEFAULT_PATTERN};
use crate::search::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "GUIDESEARCH_CONFIG";

/// Environment variable overriding the content root
pub const CONTENT_ROOT_ENV: &str = "GUIDESEARCH_CONTENT_ROOT";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one subdirectory per category
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,

    /// Glob for guide files inside a category directory
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Snapshot time-to-live in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Result limit when the caller gives none
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    #[serde(default = "default_true")]
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_root: default_content_root(),
            pattern: default_pattern(),
            cache_ttl_secs: default_cache_ttl_secs(),
            default_limit: default_limit(),
            follow_symlinks: true,
        }
    }
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from `GUIDESEARCH_CONFIG` or the default path, then apply
    /// environment overrides. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file, defaulting when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            if content.trim().is_empty() {
                return Ok(Config::default());
            }
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    fn apply_env(&mut self) {
        if let Some(root) = std::env::var_os(CONTENT_ROOT_ENV).filter(|v| !v.is_empty()) {
            self.content_root = PathBuf::from(root);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl_secs == 0 {
            return Err(GuideSearchError::Config(
                "cache_ttl_secs must be greater than zero".to_string(),
            ));
        }
        glob::Pattern::new(&self.pattern)?;
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            pattern: self.pattern.clone(),
            follow_symlinks: self.follow_symlinks,
            ..ScanOptions::default()
        }
    }
}
