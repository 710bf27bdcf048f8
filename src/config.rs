//! Configuration for the YouTube Data API client.
//!
//! Loads an optional JSONC file and applies the `YOUTUBE_API_KEY`
//! environment override.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api_key`.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API v3 key
    pub api_key: String,
    /// Alternative API root; the public endpoint is used when unset
    pub base_url: Option<String>,
    /// Request timeout in seconds; no timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// If no config file exists, returns default configuration. `//` line
    /// comments are stripped before parsing.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Override the key from `YOUTUBE_API_KEY` when it is set and non-empty.
    pub fn apply_env(&mut self) {
        self.apply_key_override(std::env::var(API_KEY_ENV).ok());
    }

    fn apply_key_override(&mut self, key: Option<String>) {
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
    }

    /// `$XDG_CONFIG_HOME/yt-data/config.jsonc` or `~/.config/yt-data/config.jsonc`.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join("yt-data").join("config.jsonc"))
    }
}

/// Remove `//` comments that are not inside a string literal.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut in_string = false;
            let mut escaped = false;
            let bytes = line.as_bytes();
            for (i, &b) in bytes.iter().enumerate() {
                match b {
                    _ if escaped => escaped = false,
                    b'\\' if in_string => escaped = true,
                    b'"' => in_string = !in_string,
                    b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => {
                        return line[..i].trim_end();
                    }
                    _ => {}
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
