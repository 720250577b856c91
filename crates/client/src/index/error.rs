//! Index client error types.

use std::sync::Arc;

/// Errors from the archive index client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IndexError {
    /// Invalid index URL.
    #[error("invalid index URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Index document exceeded the configured size limit.
    #[error("index too large: {got} bytes exceeds {limit}")]
    TooLarge { got: usize, limit: usize },
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { IndexError::Timeout } else { IndexError::Network(Arc::new(err)) }
    }
}

impl From<IndexError> for schemdex_core::Error {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::InvalidUrl(msg) => schemdex_core::Error::InvalidUrl(msg),
            IndexError::HttpStatus(status) => schemdex_core::Error::HttpStatus(status),
            IndexError::Timeout => schemdex_core::Error::Timeout,
            IndexError::Network(e) => schemdex_core::Error::Network(e.to_string()),
            IndexError::TooLarge { got, limit } => schemdex_core::Error::TooLarge { got, limit },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IndexError::HttpStatus(404);
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_maps_into_core_error() {
        let err: schemdex_core::Error = IndexError::HttpStatus(503).into();
        assert_eq!(err, schemdex_core::Error::HttpStatus(503));

        let err: schemdex_core::Error = IndexError::Timeout.into();
        assert_eq!(err, schemdex_core::Error::Timeout);
    }
}
