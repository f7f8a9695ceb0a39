//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// No authenticated session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Local storage failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// True for errors the caller caused (bad input), as opposed to faults
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(
                DomainError::InvalidQuery(_)
                    | DomainError::InvalidEmailAddress(_)
                    | DomainError::ValidationError(_)
            ) | Self::NotAuthenticated
        )
    }

    /// True if an identity provider sent a profile we cannot use
    pub const fn is_malformed_profile(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::MalformedProviderProfile { .. })
        )
    }
}
