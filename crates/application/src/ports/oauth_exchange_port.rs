//! OAuth protocol port
//!
//! The authorization-code exchange is delegated to an adapter; the
//! application only sees the normalized identity or a failure.

use async_trait::async_trait;
use domain::{IdentityProvider, UserIdentity};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the OAuth round trip with an identity provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OAuthExchangePort: Send + Sync {
    /// URL the browser is sent to for consent
    fn authorization_url(
        &self,
        provider: IdentityProvider,
        state: &str,
    ) -> Result<String, ApplicationError>;

    /// Exchange an authorization code for the provider profile and normalize
    /// it
    ///
    /// # Errors
    ///
    /// A profile missing required fields surfaces as
    /// [`domain::DomainError::MalformedProviderProfile`].
    async fn exchange(
        &self,
        provider: IdentityProvider,
        code: &str,
    ) -> Result<UserIdentity, ApplicationError>;
}
