//! Application configuration with layered loading.
//!
//! Loading precedence (highest wins):
//!
//! 1. Environment variables (SCHEMDEX_*)
//! 2. TOML config file (if SCHEMDEX_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The catalog core treats these values as read-only getters; persistence is
//! the host application's concern.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::query::{DEFAULT_PAGE_SIZE, FacetField, SortMode};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL of the remote index document.
    ///
    /// Set via SCHEMDEX_INDEX_URL environment variable.
    #[serde(default = "default_index_url")]
    pub index_url: String,

    /// Base URL under which the archived files and previews are hosted.
    /// Derived download/preview URLs append an encoded file name to this.
    ///
    /// Set via SCHEMDEX_FILES_BASE_URL environment variable.
    #[serde(default = "default_files_base_url")]
    pub files_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via SCHEMDEX_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via SCHEMDEX_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum index document size in bytes.
    ///
    /// Set via SCHEMDEX_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Records per result page.
    ///
    /// Set via SCHEMDEX_PAGE_SIZE environment variable.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Default sort order for search results.
    ///
    /// Set via SCHEMDEX_SORT environment variable (e.g. "newest-first").
    #[serde(default)]
    pub sort: SortMode,

    /// Facet dimension used for counts and filtering.
    ///
    /// Set via SCHEMDEX_FACET_FIELD environment variable.
    #[serde(default)]
    pub facet_field: FacetField,
}

fn default_index_url() -> String {
    "https://archive.schemdex.dev/schematics/index.json".into()
}

fn default_files_base_url() -> String {
    "https://archive.schemdex.dev/schematics".into()
}

fn default_user_agent() -> String {
    "schemdex/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    16_777_216 // 16MB
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
            files_base_url: default_files_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            page_size: default_page_size(),
            sort: SortMode::default(),
            facet_field: FacetField::default(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a configuration source cannot be read or
    /// validation fails after loading.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SCHEMDEX_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SCHEMDEX_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.index_url, "https://archive.schemdex.dev/schematics/index.json");
        assert_eq!(config.files_base_url, "https://archive.schemdex.dev/schematics");
        assert_eq!(config.user_agent, "schemdex/0.1");
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.max_bytes, 16_777_216);
        assert_eq!(config.page_size, 20);
        assert_eq!(config.sort, SortMode::NewestFirst);
        assert_eq!(config.facet_field, FacetField::Author);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }
}
