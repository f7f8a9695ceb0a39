//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Search query missing or blank after trimming
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// An identity provider profile lacks a field the mapping requires
    #[error("Malformed {provider} profile: {reason}")]
    MalformedProviderProfile { provider: String, reason: String },

    /// The persisted client identity could not be decoded
    #[error("Persisted state corrupt: {0}")]
    PersistedStateCorrupt(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a malformed profile error
    pub fn malformed_profile(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedProviderProfile {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}
