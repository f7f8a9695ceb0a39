//! Server-side session storage port

use async_trait::async_trait;
use domain::UserIdentity;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for storing authenticated sessions
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Create a session for `user`, returning its opaque id
    async fn create(&self, user: &UserIdentity) -> Result<String, ApplicationError>;

    /// Look up a live session
    async fn get(&self, session_id: &str) -> Result<Option<UserIdentity>, ApplicationError>;

    /// Destroy a session; unknown ids are not an error
    async fn destroy(&self, session_id: &str) -> Result<(), ApplicationError>;
}
