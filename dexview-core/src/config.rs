//! Viewer configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. Command-line flags (applied by the CLI)
//! 2. `DEXVIEW_API_BASE_URL` environment variable
//! 3. `--config <path>`, or `config.yaml` in the platform config directory
//! 4. Built-in defaults
//!
//! ```yaml
//! api_base_url: https://pokeapi.co/api/v2
//! collection_limit: 151
//! page_size: 20
//! featured_count: 4
//! concurrency: 1
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::DEFAULT_API_BASE_URL;
use crate::view::PLACEHOLDER_IMAGE;

/// Environment variable overriding the API base URL
pub const API_BASE_URL_ENV: &str = "DEXVIEW_API_BASE_URL";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// API root, e.g. `https://pokeapi.co/api/v2`
    pub api_base_url: String,

    /// Number of entries in the collection (first N of the dataset)
    pub collection_limit: usize,

    /// Cards per list page
    pub page_size: usize,

    /// Cards shown by `featured`
    pub featured_count: usize,

    /// Detail requests in flight while resolving a page (1 = sequential)
    pub concurrency: usize,

    /// Image used when a record has no artwork
    pub placeholder_image: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            collection_limit: crate::catalog::DEFAULT_COLLECTION_LIMIT,
            page_size: crate::catalog::DEFAULT_PAGE_SIZE,
            featured_count: crate::catalog::DEFAULT_FEATURED_COUNT,
            concurrency: 1,
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::default_config_path()?;
        let mut config = Self::load_from_path(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, then apply environment overrides
    pub fn load_with_override(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let mut config = Self::load_from_path(path)?;
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            None => Self::load(),
        }
    }

    /// Load from a specific path; a missing file yields defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Write this configuration as YAML
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = serde_yaml_ng::to_string(self).context("Failed to serialize config")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// `config.yaml` inside the platform config directory
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = directories::ProjectDirs::from("io", "dexview", "dexview")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .or_else(|| dirs::config_dir().map(|d| d.join("dexview")))
            .context("Could not determine config directory")?;

        Ok(config_dir.join(CONFIG_FILE_NAME))
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Using API base URL from {}", API_BASE_URL_ENV);
                self.api_base_url = url.trim().to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            anyhow::bail!("api_base_url must start with http:// or https://");
        }
        if self.collection_limit == 0 {
            anyhow::bail!("collection_limit must be greater than 0");
        }
        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than 0");
        }
        if self.featured_count == 0 {
            anyhow::bail!("featured_count must be greater than 0");
        }
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be greater than 0");
        }
        Ok(())
    }
}
