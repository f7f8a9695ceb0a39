//! Identity integration error types

use thiserror::Error;

use domain::DomainError;

/// Errors that can occur while turning a provider profile into an identity
#[derive(Debug, Error)]
pub enum IdentityError {
    /// A field the mapping requires is missing or unusable
    #[error("Malformed {provider} profile: {reason}")]
    MalformedProfile {
        /// Provider that sent the profile
        provider: &'static str,
        /// What was wrong
        reason: String,
    },

    /// The provider is not one we can sign in with
    #[error("Unsupported identity provider: {0}")]
    UnsupportedProvider(String),
}

impl IdentityError {
    pub(crate) fn malformed(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedProfile {
            provider,
            reason: reason.into(),
        }
    }
}

impl From<IdentityError> for DomainError {
    fn from(error: IdentityError) -> Self {
        match error {
            IdentityError::MalformedProfile { provider, reason } => {
                Self::malformed_profile(provider, reason)
            },
            IdentityError::UnsupportedProvider(name) => Self::ValidationError(format!(
                "Unsupported identity provider: {name}"
            )),
        }
    }
}
