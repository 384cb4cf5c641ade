//! Error types for the paper harvester.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by Semantic Scholar API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Response body was not valid JSON
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// HTTP status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) => None,
        }
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from writing harvested titles.
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    /// Output file could not be opened or written
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Output file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed
    #[error("Client setup failed: {0}")]
    Setup(String),
}

impl SinkError {
    /// Create an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_status() {
        assert_eq!(ClientError::rate_limited(60).status(), Some(429));
        assert_eq!(ClientError::not_found("search").status(), Some(404));
        assert_eq!(ClientError::bad_request("bad limit").status(), Some(400));
        assert_eq!(ClientError::server(503, "unavailable").status(), Some(503));
    }

    #[test]
    fn test_client_error_retry_after() {
        let err = ClientError::rate_limited(60);
        assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));

        let err = ClientError::not_found("paper");
        assert_eq!(err.retry_after(), None);
    }

    #[test]
    fn test_sink_error_mentions_path() {
        let err = SinkError::io(
            "/nowhere/titles.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/nowhere/titles.txt"));
        assert!(msg.contains("missing"));
    }
}
