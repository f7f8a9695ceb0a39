//! Search port
//!
//! The one interface the query state machine searches through. On the server
//! it is backed by the provider orchestrator; on the client by the HTTP
//! search boundary.

use async_trait::async_trait;
use domain::{SearchQuery, SearchResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for executing a search
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Resolve `query` into at most the configured number of results
    ///
    /// Implementations backed by the orchestrator never fail for "no
    /// results"; an error means the search could not be performed at all.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ApplicationError>;
}
