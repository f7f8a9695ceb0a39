#![forbid(unsafe_code)]
//! Resilient multi-provider web search for LeetSniff
//!
//! Resolves a query against an ordered chain of unreliable, differently
//! shaped upstream providers and always returns a renderable result list.
//!
//! # Architecture
//!
//! The [`ProviderCatalog`] describes every upstream as data. Each descriptor
//! is wrapped in an [`HttpSearchProvider`] implementing the common
//! [`SearchProvider`] trait, and the [`SearchOrchestrator`] walks them in
//! order: first non-empty normalized answer wins, failures are logged and
//! absorbed, and exhaustion falls back to [`degraded_results`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::SearchQuery;
//! use integration_websearch::{SearchOrchestrator, WebSearchConfig};
//!
//! let orchestrator = SearchOrchestrator::new(WebSearchConfig::default())?;
//! let query = SearchQuery::parse("Rust programming language")?;
//!
//! let response = orchestrator.search(&query).await;
//! for result in response.results {
//!     println!("{} - {}", result.title, result.link);
//! }
//! ```

mod catalog;
mod config;
mod degraded;
mod error;
mod models;
mod normalizer;
mod provider;
mod urlencoding;

pub use catalog::{Credential, ParamMapping, ProviderCatalog, ProviderDescriptor, ResponseShape};
pub use config::WebSearchConfig;
pub use degraded::{DEGRADED_PROVIDER, DEGRADED_RESULT_COUNT, degraded_results};
pub use error::WebSearchError;
pub use models::WebSearchResponse;
pub use normalizer::normalize;
pub use provider::{HttpSearchProvider, SearchProvider};
pub use urlencoding::{encode as url_encode, slugify};

use std::{sync::Arc, time::Instant};

use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use domain::{MAX_RESULTS_CEILING, SearchQuery};

/// Ordered provider chain with degraded-mode fallback
///
/// Attempts are sequential, one per configured provider, each bounded by its
/// own timeout. There are no retries and no merging across providers.
pub struct SearchOrchestrator {
    providers: Vec<Arc<dyn SearchProvider>>,
    max_results: usize,
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("providers", &self.provider_names())
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl SearchOrchestrator {
    /// Build the orchestrator from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: WebSearchConfig) -> Result<Self, WebSearchError> {
        config
            .validate()
            .map_err(WebSearchError::ConfigurationError)?;

        let client = Client::builder()
            .user_agent(concat!("LeetSniff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WebSearchError::ConfigurationError(e.to_string()))?;

        let catalog = ProviderCatalog::from_config(&config);
        let providers = catalog
            .descriptors()
            .iter()
            .cloned()
            .map(|descriptor| {
                Arc::new(HttpSearchProvider::new(client.clone(), descriptor))
                    as Arc<dyn SearchProvider>
            })
            .collect();

        if catalog.usable().next().is_none() {
            warn!("No search provider credentials configured, every search will be degraded");
        }

        Ok(Self {
            providers,
            max_results: config.max_results,
        })
    }

    /// Create a shareable orchestrator wrapped in Arc
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new_shared(config: WebSearchConfig) -> Result<Arc<Self>, WebSearchError> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Build an orchestrator over an explicit provider chain
    #[must_use]
    pub fn with_providers(providers: Vec<Arc<dyn SearchProvider>>, max_results: usize) -> Self {
        Self {
            providers,
            max_results: max_results.clamp(1, MAX_RESULTS_CEILING),
        }
    }

    /// Provider names in attempt order
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.provider_name()).collect()
    }

    /// True if at least one provider may be contacted
    pub fn has_usable_provider(&self) -> bool {
        self.providers.iter().any(|p| p.is_configured())
    }

    /// Configured result ceiling
    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Search with the configured result ceiling
    pub async fn search(&self, query: &SearchQuery) -> WebSearchResponse {
        self.search_with_limit(query, self.max_results).await
    }

    /// Search, returning at most `limit` results (capped by the configured
    /// ceiling)
    ///
    /// Never fails: provider failures are absorbed and exhaustion yields the
    /// degraded set.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_with_limit(&self, query: &SearchQuery, limit: usize) -> WebSearchResponse {
        let limit = limit.clamp(1, self.max_results);
        let start = Instant::now();

        let mut attempted = 0usize;
        for provider in self.providers.iter().filter(|p| p.is_configured()) {
            attempted += 1;
            let name = provider.provider_name();

            match provider.search(query, limit).await {
                Ok(mut results) if !results.is_empty() => {
                    results.truncate(limit);
                    info!(
                        provider = name,
                        results = results.len(),
                        "Search provider answered"
                    );
                    return WebSearchResponse::new(query.to_string(), results, name)
                        .with_search_time(elapsed_ms(start));
                },
                Ok(_) => {
                    info!(provider = name, "Search provider returned no results, trying next");
                },
                Err(e) => {
                    warn!(provider = name, error = %e, "Search provider failed, trying next");
                },
            }
        }

        if attempted == 0 {
            debug!("No usable search provider, skipping network");
        } else {
            warn!(attempted, "All search providers exhausted, returning degraded results");
        }

        let mut results = degraded_results(query);
        results.truncate(limit);
        WebSearchResponse::degraded(query.to_string(), results).with_search_time(elapsed_ms(start))
    }

    /// Parse `raw` and search
    ///
    /// # Errors
    ///
    /// Returns [`WebSearchError::InvalidQuery`] if `raw` is blank.
    pub async fn search_text(&self, raw: &str) -> Result<WebSearchResponse, WebSearchError> {
        let query = SearchQuery::parse(raw)?;
        Ok(self.search(&query).await)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use domain::SearchResult;

    use super::*;
    use crate::provider::tests::MockSearchProvider;

    fn result(title: &str) -> SearchResult {
        SearchResult::normalized(
            Some(title),
            Some(&format!("https://example.com/{title}")),
            Some("snippet"),
        )
    }

    fn query() -> SearchQuery {
        SearchQuery::parse("rust").unwrap()
    }

    #[test]
    fn test_new_without_credentials() {
        let orchestrator = SearchOrchestrator::new(WebSearchConfig::for_testing()).unwrap();
        assert_eq!(orchestrator.provider_names(), vec!["rapidapi-google", "brave"]);
        assert!(!orchestrator.has_usable_provider());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = WebSearchConfig {
            max_results: 0,
            ..WebSearchConfig::for_testing()
        };
        assert!(matches!(
            SearchOrchestrator::new(config),
            Err(WebSearchError::ConfigurationError(_))
        ));
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let first = Arc::new(MockSearchProvider::new("a").with_results(vec![result("a1")]));
        let second = Arc::new(MockSearchProvider::new("b").with_results(vec![result("b1")]));
        let chain: Vec<Arc<dyn SearchProvider>> = vec![first, second.clone()];
        let orchestrator = SearchOrchestrator::with_providers(chain, 5);

        let response = orchestrator.search(&query()).await;
        assert_eq!(response.provider, "a");
        assert_eq!(response.results, vec![result("a1")]);
        assert_eq!(second.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_falls_through_without_merging() {
        let first = Arc::new(MockSearchProvider::new("a").failing());
        let second = Arc::new(MockSearchProvider::new("b").with_results(vec![
            result("b1"),
            result("b2"),
            result("b3"),
        ]));
        let third = Arc::new(MockSearchProvider::new("c").with_results(vec![result("c1")]));
        let chain: Vec<Arc<dyn SearchProvider>> = vec![first.clone(), second, third.clone()];
        let orchestrator = SearchOrchestrator::with_providers(chain, 5);

        let response = orchestrator.search(&query()).await;
        let titles: Vec<_> = response.results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b1", "b2", "b3"]);
        assert_eq!(first.call_count(), 1);
        assert_eq!(third.call_count(), 0);
        assert!(!response.degraded);
    }

    #[tokio::test]
    async fn test_empty_answer_falls_through() {
        let empty = Arc::new(MockSearchProvider::new("a"));
        let good = Arc::new(MockSearchProvider::new("b").with_results(vec![result("b1")]));
        let chain: Vec<Arc<dyn SearchProvider>> = vec![empty, good];
        let orchestrator = SearchOrchestrator::with_providers(chain, 5);

        assert_eq!(orchestrator.search(&query()).await.provider, "b");
    }

    #[tokio::test]
    async fn test_exhaustion_returns_degraded_set() {
        let chain: Vec<Arc<dyn SearchProvider>> = vec![
            Arc::new(MockSearchProvider::new("a").failing()),
            Arc::new(MockSearchProvider::new("b")),
        ];
        let orchestrator = SearchOrchestrator::with_providers(chain, 5);

        let response = orchestrator.search(&query()).await;
        assert!(response.degraded);
        assert_eq!(response.provider, DEGRADED_PROVIDER);
        assert_eq!(response.results, degraded_results(&query()));
    }

    #[tokio::test]
    async fn test_unconfigured_providers_are_never_called() {
        let skipped = Arc::new(
            MockSearchProvider::new("a")
                .with_results(vec![result("a1")])
                .unconfigured(),
        );
        let chain: Vec<Arc<dyn SearchProvider>> = vec![skipped.clone()];
        let orchestrator = SearchOrchestrator::with_providers(chain, 5);

        let response = orchestrator.search(&query()).await;
        assert!(response.degraded);
        assert_eq!(skipped.call_count(), 0);
    }

    #[tokio::test]
    async fn test_results_are_truncated() {
        let many: Vec<_> = (0..12).map(|i| result(&format!("r{i}"))).collect();
        let chain: Vec<Arc<dyn SearchProvider>> =
            vec![Arc::new(MockSearchProvider::new("a").with_results(many))];
        let orchestrator = SearchOrchestrator::with_providers(chain, 5);

        let response = orchestrator.search(&query()).await;
        assert_eq!(response.results.len(), 5);
        assert_eq!(response.results[0].title, "r0");

        let response = orchestrator.search_with_limit(&query(), 3).await;
        assert_eq!(response.results.len(), 3);

        let response = orchestrator.search_with_limit(&query(), 50).await;
        assert_eq!(response.results.len(), 5);
    }

    #[tokio::test]
    async fn test_degraded_set_respects_limit() {
        let orchestrator = SearchOrchestrator::with_providers(vec![], 3);
        let response = orchestrator.search(&query()).await;
        assert_eq!(response.results.len(), 3);
    }

    #[test]
    fn test_with_providers_clamps_ceiling() {
        let orchestrator = SearchOrchestrator::with_providers(vec![], 50);
        assert_eq!(orchestrator.max_results(), MAX_RESULTS_CEILING);
    }

    #[tokio::test]
    async fn test_search_text_rejects_blank() {
        let orchestrator = SearchOrchestrator::with_providers(vec![], 5);
        assert!(matches!(
            orchestrator.search_text("   ").await,
            Err(WebSearchError::InvalidQuery(_))
        ));
    }
}
