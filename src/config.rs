//! Configuration Management
//!
//! Handles persistent configuration storage for hreflink.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// API base used when neither the CLI nor the config file names one
pub const DEFAULT_BASE_URI: &str = "http://localhost:8080/api/v1";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// API base URI that request paths are resolved against
    #[serde(default)]
    pub base_uri: Option<String>,
    /// Pretty-print annotated output
    #[serde(default)]
    pub pretty: bool,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hreflink").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config {:?}", path))?;

        Ok(())
    }

    /// Get effective base URI (CLI > config > default)
    pub fn effective_base_uri(&self, cli: Option<&str>) -> Result<Url> {
        let raw = cli
            .or(self.base_uri.as_deref())
            .unwrap_or(DEFAULT_BASE_URI);
        parse_base_uri(raw)
    }

    /// Set base URI and save
    pub fn set_base_uri(&mut self, uri: &str) -> Result<()> {
        parse_base_uri(uri)?;
        self.base_uri = Some(uri.to_string());
        self.save()
    }

    /// Set pretty printing and save
    pub fn set_pretty(&mut self, pretty: bool) -> Result<()> {
        self.pretty = pretty;
        self.save()
    }
}

fn parse_base_uri(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid base URI '{}'", raw))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("Base URI '{}' cannot have paths resolved against it", raw);
    }
    Ok(url)
}
