//! Persisted client identity port
//!
//! A single entry holding the JSON form of the signed-in user. No expiry;
//! the entry lives until logout or until it turns out to be corrupt.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Fixed key of the persisted identity entry
pub const IDENTITY_CACHE_KEY: &str = "user";

/// Port for the client-side identity cache
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityCachePort: Send + Sync {
    /// Raw JSON of the cached identity, if any
    async fn load(&self) -> Result<Option<String>, ApplicationError>;

    /// Replace the cached identity
    async fn store(&self, json: &str) -> Result<(), ApplicationError>;

    /// Remove the cached identity
    async fn clear(&self) -> Result<(), ApplicationError>;
}
