//! Configuration for the `cru` CLI, read from an optional TOML file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use cru_engine::source::DEFAULT_FILE_NAME;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "CRU_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory whose subdirectories each hold one CRU document.
    pub data_dir: PathBuf,
    /// Document name inside each subdirectory.
    pub file_name: String,
    /// Domain used in calendar event UIDs.
    pub uid_domain: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_name: DEFAULT_FILE_NAME.to_string(),
            uid_domain: "edt.example.fr".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration: explicit path, then `$CRU_CONFIG`, then
    /// `./cru.toml`, then the user config directory, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(path);
        }

        let candidates = [
            Some(PathBuf::from("cru.toml")),
            dirs::config_dir().map(|p| p.join("cru/config.toml")),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::debug!("Loading config from: {}", path.display());
                return Self::from_file(&path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            anyhow::bail!("file_name must not be empty");
        }
        Ok(())
    }
}
