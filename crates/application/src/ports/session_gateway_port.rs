//! Server session port, as seen from the client

use async_trait::async_trait;
use domain::UserIdentity;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the server's identity boundary
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionGatewayPort: Send + Sync {
    /// The user of the current server session
    ///
    /// `Ok(None)` when the server reports no session.
    async fn current_user(&self) -> Result<Option<UserIdentity>, ApplicationError>;

    /// Destroy the server session
    async fn logout(&self) -> Result<(), ApplicationError>;
}
