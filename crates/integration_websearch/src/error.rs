//! Web search error types
//!
//! Every variant except [`WebSearchError::InvalidQuery`] and
//! [`WebSearchError::ConfigurationError`] describes a single failed provider
//! attempt. The orchestrator absorbs those and moves on; they never reach
//! the caller.

use thiserror::Error;

/// Errors that can occur during web search operations
#[derive(Debug, Error)]
pub enum WebSearchError {
    /// Connection to the search service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to search service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from search service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Search query is invalid or empty
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// API key was rejected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Provider answered but nothing survived normalization
    #[error("No results from {provider}")]
    EmptyResults {
        /// Provider that returned nothing usable
        provider: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_ms} ms")]
    Timeout {
        /// The timeout duration in milliseconds
        timeout_ms: u64,
    },
}

impl WebSearchError {
    /// True if this error is a per-provider failure the chain should absorb
    #[must_use]
    pub const fn is_provider_failure(&self) -> bool {
        !matches!(self, Self::InvalidQuery(_) | Self::ConfigurationError(_))
    }

    /// Map a transport-level reqwest error
    pub(crate) fn from_transport(error: &reqwest::Error, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            Self::Timeout { timeout_ms }
        } else if error.is_connect() {
            Self::ConnectionFailed(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

impl From<domain::DomainError> for WebSearchError {
    fn from(error: domain::DomainError) -> Self {
        match error {
            domain::DomainError::InvalidQuery(msg) => Self::InvalidQuery(msg),
            other => Self::ConfigurationError(other.to_string()),
        }
    }
}
