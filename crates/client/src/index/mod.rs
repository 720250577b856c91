//! Archive index client.
//!
//! Fetches the remote index document over HTTP and normalizes it into
//! catalog records. One fixed URL, one GET per load; the single-flight
//! policy that decides *when* to load lives in `schemdex-core`.

pub mod document;
pub mod error;
pub mod names;
pub mod urls;

pub use document::parse_document;
pub use error::IndexError;
pub use names::{LITEMATIC_EXT, display_name};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use schemdex_core::{AppConfig, Error, IndexSource, Record};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default maximum index document size.
const DEFAULT_MAX_BYTES: usize = 16 * 1024 * 1024;

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "schemdex/0.1";

/// Index client configuration.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// URL of the remote index document.
    pub index_url: String,
    /// Base URL the derived download/preview URLs are built under.
    pub files_base_url: String,
    /// User-agent string (default: schemdex/0.x).
    pub user_agent: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// Maximum index document size in bytes (default: 16MB).
    pub max_bytes: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        let app = AppConfig::default();
        Self {
            index_url: app.index_url,
            files_base_url: app.files_base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl IndexConfig {
    /// Build an index config from the loaded application configuration.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            index_url: config.index_url.clone(),
            files_base_url: config.files_base_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            max_bytes: config.max_bytes,
        }
    }
}

/// HTTP client for the archive index.
#[derive(Debug, Clone)]
pub struct IndexClient {
    http: Client,
    config: IndexConfig,
}

impl IndexClient {
    /// Create a new index client with the given configuration.
    pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
        url::Url::parse(&config.index_url).map_err(|e| IndexError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| IndexError::Network(std::sync::Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Fetch the raw index document.
    ///
    /// Any non-success status is a fetch failure; the body size is checked
    /// against `max_bytes` both up front (Content-Length) and after reading.
    async fn fetch_index_bytes(&self) -> Result<Bytes, IndexError> {
        let start = Instant::now();

        let response = self
            .http
            .get(&self.config.index_url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::HttpStatus(status.as_u16()));
        }

        if let Some(len) = response.content_length()
            && len as usize > self.config.max_bytes
        {
            return Err(IndexError::TooLarge { got: len as usize, limit: self.config.max_bytes });
        }

        let bytes = response.bytes().await?;
        if bytes.len() > self.config.max_bytes {
            return Err(IndexError::TooLarge { got: bytes.len(), limit: self.config.max_bytes });
        }

        tracing::debug!(
            "fetched index {} in {:?} ({} bytes)",
            self.config.index_url,
            start.elapsed(),
            bytes.len()
        );

        Ok(bytes)
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }
}

#[async_trait]
impl IndexSource for IndexClient {
    async fn load_index(&self) -> Result<Vec<Record>, Error> {
        let bytes = self.fetch_index_bytes().await.map_err(Error::from)?;
        Ok(parse_document(&bytes, &self.config.files_base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_config_default() {
        let config = IndexConfig::default();
        assert_eq!(config.user_agent, "schemdex/0.1");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.max_bytes, 16 * 1024 * 1024);
        assert!(config.index_url.starts_with("https://"));
    }

    #[test]
    fn test_index_config_from_app_config() {
        let app = AppConfig {
            index_url: "https://example.test/index.json".into(),
            files_base_url: "https://example.test/files".into(),
            timeout_ms: 5_000,
            ..Default::default()
        };
        let config = IndexConfig::from_app_config(&app);
        assert_eq!(config.index_url, "https://example.test/index.json");
        assert_eq!(config.files_base_url, "https://example.test/files");
        assert_eq!(config.timeout, Duration::from_millis(5_000));
    }

    #[tokio::test]
    async fn test_index_client_new() {
        let client = IndexClient::new(IndexConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_index_client_rejects_bad_url() {
        let config = IndexConfig { index_url: "not a url".into(), ..Default::default() };
        let result = IndexClient::new(config);
        assert!(matches!(result, Err(IndexError::InvalidUrl(_))));
    }
}
