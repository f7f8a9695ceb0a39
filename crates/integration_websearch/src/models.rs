//! Web search data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain::SearchResult;

use crate::degraded::DEGRADED_PROVIDER;

/// Response from one orchestrated search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResponse {
    /// Normalized search query
    pub query: String,

    /// Results, never more than the configured maximum
    pub results: Vec<SearchResult>,

    /// Timestamp of the search
    pub timestamp: DateTime<Utc>,

    /// Provider that answered (e.g. "brave"), or "degraded"
    pub provider: String,

    /// True if the results were synthesized locally
    #[serde(default)]
    pub degraded: bool,

    /// Time taken for the search in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_time_ms: Option<u64>,
}

impl WebSearchResponse {
    /// Create a response answered by `provider`
    #[must_use]
    pub fn new(query: String, results: Vec<SearchResult>, provider: &str) -> Self {
        Self {
            query,
            results,
            timestamp: Utc::now(),
            provider: provider.to_string(),
            degraded: false,
            search_time_ms: None,
        }
    }

    /// Create a response carrying the locally generated fallback set
    #[must_use]
    pub fn degraded(query: String, results: Vec<SearchResult>) -> Self {
        Self {
            degraded: true,
            ..Self::new(query, results, DEGRADED_PROVIDER)
        }
    }

    /// Attach the elapsed search time
    #[must_use]
    pub const fn with_search_time(mut self, millis: u64) -> Self {
        self.search_time_ms = Some(millis);
        self
    }

    /// Check if the response has any results
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Consume the response, keeping only the results
    #[must_use]
    pub fn into_results(self) -> Vec<SearchResult> {
        self.results
    }
}
