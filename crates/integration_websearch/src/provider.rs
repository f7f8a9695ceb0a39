//! Search provider trait and the descriptor-driven HTTP implementation

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use domain::{SearchQuery, SearchResult};

use crate::{
    catalog::{Credential, ProviderDescriptor},
    error::WebSearchError,
    normalizer::normalize,
};

/// Trait for web search providers
///
/// One implementation per upstream attempt. The orchestrator owns fallback;
/// a provider only ever reports its own outcome.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a single search attempt
    ///
    /// # Arguments
    ///
    /// * `query` - The normalized search query
    /// * `max_results` - Result count hint passed upstream where supported
    ///
    /// # Errors
    ///
    /// Returns an error if the attempt fails for any reason. An empty list is
    /// a successful answer with nothing in it.
    async fn search(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, WebSearchError>;

    /// Get the provider name (e.g., "brave", "duckduckgo")
    fn provider_name(&self) -> &'static str;

    /// True if the provider may be contacted at all
    fn is_configured(&self) -> bool {
        true
    }
}

/// HTTP provider driven entirely by its [`ProviderDescriptor`]
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    client: Client,
    descriptor: ProviderDescriptor,
}

impl HttpSearchProvider {
    /// Create a provider sharing `client`
    #[must_use]
    pub const fn new(client: Client, descriptor: ProviderDescriptor) -> Self {
        Self { client, descriptor }
    }
}

#[async_trait]
impl SearchProvider for HttpSearchProvider {
    #[instrument(skip(self, query), fields(provider = self.descriptor.name))]
    async fn search(
        &self,
        query: &SearchQuery,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, WebSearchError> {
        let descriptor = &self.descriptor;
        let timeout_ms = descriptor.timeout_ms();

        let mut request = self
            .client
            .get(&descriptor.endpoint)
            .query(&descriptor.params.to_params(query, max_results))
            .timeout(descriptor.timeout);

        for (name, value) in &descriptor.headers {
            request = request.header(*name, value);
        }

        match &descriptor.credential {
            Credential::None => {},
            Credential::Header {
                name,
                value: Some(value),
            } => request = request.header(*name, value),
            Credential::Header { value: None, .. } => {
                return Err(WebSearchError::ConfigurationError(format!(
                    "{} has no credential configured",
                    descriptor.name
                )));
            },
        }

        debug!(endpoint = %descriptor.endpoint, "Sending search request");

        let response = request
            .send()
            .await
            .map_err(|e| WebSearchError::from_transport(&e, timeout_ms))?;

        let status = response.status();
        debug!(status = %status, "Received search response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse().ok());

            return Err(WebSearchError::RateLimitExceeded {
                retry_after_secs: retry_after,
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(WebSearchError::AuthenticationFailed(format!(
                "{} rejected the credential",
                descriptor.name
            )));
        }

        if !status.is_success() {
            return Err(WebSearchError::RequestFailed(format!("HTTP {status}")));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                WebSearchError::ParseError(e.to_string())
            } else {
                WebSearchError::from_transport(&e, timeout_ms)
            }
        })?;

        normalize(descriptor.shape, &body, query)
    }

    fn provider_name(&self) -> &'static str {
        self.descriptor.name
    }

    fn is_configured(&self) -> bool {
        self.descriptor.is_usable()
    }
}
