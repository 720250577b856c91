//! Unified error types for schemdex.

/// Unified error type for catalog loading.
///
/// The cache hands one load outcome to every caller joined on an in-flight
/// fetch, so this type must be `Clone`; transport details are carried as
/// owned strings rather than source errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Invalid or unparsable URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP response with a non-success status.
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),

    /// Request timed out.
    #[error("request timeout")]
    Timeout,

    /// Network-level failure (DNS, connect, TLS, read).
    #[error("network error: {0}")]
    Network(String),

    /// Response body exceeded the configured size limit.
    #[error("response too large: {got} bytes exceeds {limit}")]
    TooLarge { got: usize, limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HttpStatus(503);
        assert!(err.to_string().contains("503"));

        let err = Error::TooLarge { got: 100, limit: 50 };
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_error_clone_preserves_outcome() {
        let err = Error::Network("connection reset".into());
        assert_eq!(err.clone(), err);
    }
}
