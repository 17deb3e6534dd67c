//! Project configuration file support.
//!
//! Loads configuration from `reflections.toml` in the working
//! directory: where the dataset lives, an optional default-language
//! override, and the site base URL used for shareable links.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The config file name
pub const CONFIG_FILE_NAME: &str = "reflections.toml";

/// Configuration loaded from `reflections.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Default language override (canonical or legacy code)
    pub language: Option<String>,
    /// Dataset location
    #[serde(default)]
    pub data: DataConfig,
    /// Shareable-link settings
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Path to the SQLite database
    pub db: Option<PathBuf>,
    /// Directory of per-language JSON documents; wins over `db` when
    /// both are set
    pub json_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Base URL (origin + path) for canonical shareable links
    pub base_url: Option<String>,
}

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }
}
