//! Configuration file parser for ~/.config/broadsheet/config.toml.
//!
//! The config file is optional; a missing file yields `Config::default()`.
//! Unknown keys are accepted by serde but logged as a warning since they are
//! usually typos.
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::feed::DEFAULT_ARTICLE_LIMIT;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Top-level application configuration.
///
/// Every field is defaulted so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Articles endpoint. `?limit=` is appended on each load.
    pub api_url: String,

    /// Number of articles requested per load.
    pub article_limit: usize,

    /// Client-wide request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Public URL of the edition, included in shared links.
    pub edition_url: String,

    /// Where exported editions are written. Current directory when unset.
    pub export_dir: Option<PathBuf>,

    /// Keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api/articles".to_string(),
            article_limit: DEFAULT_ARTICLE_LIMIT,
            request_timeout_secs: 30,
            edition_url: "http://localhost:8000/".to_string(),
            export_dir: None,
            keybindings: HashMap::new(),
        }
    }
}

impl Config {
    /// Maximum config file size (1 MiB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "api_url",
        "article_limit",
        "request_timeout_secs",
        "edition_url",
        "export_dir",
        "keybindings",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty or whitespace-only file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line info
    /// - Larger than 1 MiB → `Err(ConfigError::TooLarge)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(
            path = %path.display(),
            api_url = %config.api_url,
            limit = config.article_limit,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Article limit with `0` treated as the default.
    pub fn effective_limit(&self) -> usize {
        if self.article_limit == 0 {
            DEFAULT_ARTICLE_LIMIT
        } else {
            self.article_limit
        }
    }

    /// Request timeout, never shorter than one second.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Directory exports are written into.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("broadsheet_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000/api/articles");
        assert_eq!(config.article_limit, 30);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.edition_url, "http://localhost:8000/");
        assert!(config.export_dir.is_none());
        assert!(config.keybindings.is_empty());
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/broadsheet_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.article_limit, 30);
    }

    #[test]
    fn test_empty_and_whitespace_file_returns_default() {
        for (name, content) in [("empty", ""), ("whitespace", "   \n  \n  ")] {
            let (dir, path) = write_config(name, content);
            let config = Config::load(&path).unwrap();
            assert_eq!(config.api_url, "http://localhost:8000/api/articles");
            std::fs::remove_dir_all(&dir).ok();
        }
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let (dir, path) = write_config("partial", "article_limit = 12\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.article_limit, 12);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.edition_url, "http://localhost:8000/");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let content = r#"
api_url = "https://news.example.com/api/articles"
article_limit = 60
request_timeout_secs = 5
edition_url = "https://news.example.com/"
export_dir = "/tmp/editions"

[keybindings]
share = "S"
refresh = "F5"
"#;
        let (dir, path) = write_config("full", content);

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_url, "https://news.example.com/api/articles");
        assert_eq!(config.article_limit, 60);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.edition_url, "https://news.example.com/");
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/editions"));
        assert_eq!(config.keybindings.get("share").map(String::as_str), Some("S"));
        assert_eq!(config.keybindings.get("refresh").map(String::as_str), Some("F5"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let (dir, path) = write_config("invalid", "this is not [valid toml");

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let (dir, path) = write_config("unknown", "article_limit = 8\ntheme = \"dark\"\n");

        let config = Config::load(&path).unwrap();
        assert_eq!(config.article_limit, 8);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let (dir, path) = write_config("wrongtype", "article_limit = \"many\"\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let (dir, path) = write_config("too_large", &"a".repeat(1_048_577));

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_zero_values_clamped() {
        let config = Config {
            article_limit: 0,
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.effective_limit(), DEFAULT_ARTICLE_LIMIT);
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
