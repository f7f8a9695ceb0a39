//! Web search adapter - Implements SearchPort using integration_websearch

use std::sync::Arc;

use application::{error::ApplicationError, ports::SearchPort};
use async_trait::async_trait;
use domain::{SearchQuery, SearchResult};
use integration_websearch::{SearchOrchestrator, WebSearchConfig, WebSearchResponse};
use tracing::{debug, instrument};

/// Adapter running searches through the provider chain
pub struct WebSearchAdapter {
    orchestrator: Arc<SearchOrchestrator>,
}

impl std::fmt::Debug for WebSearchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchAdapter")
            .field("providers", &self.orchestrator.provider_names())
            .field("max_results", &self.orchestrator.max_results())
            .finish()
    }
}

impl WebSearchAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn new(config: WebSearchConfig) -> Result<Self, ApplicationError> {
        let orchestrator = SearchOrchestrator::new_shared(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_orchestrator(orchestrator))
    }

    /// Wrap an existing orchestrator
    #[must_use]
    pub const fn with_orchestrator(orchestrator: Arc<SearchOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Full response, including which provider answered
    pub async fn search_response(&self, query: &SearchQuery) -> WebSearchResponse {
        self.orchestrator.search(query).await
    }

    /// True when at least one real provider can be attempted
    pub fn has_usable_provider(&self) -> bool {
        self.orchestrator.has_usable_provider()
    }
}

#[async_trait]
impl SearchPort for WebSearchAdapter {
    #[instrument(skip(self, query), fields(query_len = query.as_str().len()))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ApplicationError> {
        let response = self.search_response(query).await;
        debug!(
            provider = %response.provider,
            degraded = response.degraded,
            count = response.results.len(),
            "Search resolved"
        );
        Ok(response.into_results())
    }
}
