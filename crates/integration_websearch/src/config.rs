//! Web search configuration

use serde::{Deserialize, Serialize};

use domain::MAX_RESULTS_CEILING;

/// Configuration for the search provider chain
#[derive(Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    /// RapidAPI key (enables the RapidAPI Google Search provider)
    #[serde(default, skip_serializing)]
    pub rapidapi_key: Option<String>,

    /// RapidAPI Google Search base URL
    #[serde(default = "default_rapidapi_base_url")]
    pub rapidapi_base_url: String,

    /// Value of the `X-RapidAPI-Host` header
    #[serde(default = "default_rapidapi_host")]
    pub rapidapi_host: String,

    /// Brave Search API key (enables Brave as a provider)
    #[serde(default, skip_serializing)]
    pub brave_api_key: Option<String>,

    /// Brave Search API base URL
    #[serde(default = "default_brave_base_url")]
    pub brave_base_url: String,

    /// Enable the keyless DuckDuckGo Instant Answer provider as last resort
    #[serde(default)]
    pub duckduckgo_enabled: bool,

    /// DuckDuckGo API base URL
    #[serde(default = "default_duckduckgo_base_url")]
    pub duckduckgo_base_url: String,

    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Overrides `timeout_ms` for RapidAPI Google Search
    #[serde(default)]
    pub rapidapi_timeout_ms: Option<u64>,

    /// Overrides `timeout_ms` for Brave
    #[serde(default)]
    pub brave_timeout_ms: Option<u64>,

    /// Overrides `timeout_ms` for DuckDuckGo
    #[serde(default)]
    pub duckduckgo_timeout_ms: Option<u64>,

    /// Maximum number of results to return
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Safe search level for Brave: "off", "moderate", "strict"
    #[serde(default = "default_safe_search")]
    pub safe_search: String,

    /// Preferred result country for Brave (ISO 3166-1 alpha-2 code)
    #[serde(default = "default_result_country")]
    pub result_country: String,
}

impl std::fmt::Debug for WebSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchConfig")
            .field("rapidapi_key", &self.rapidapi_key.as_ref().map(|_| "[REDACTED]"))
            .field("rapidapi_base_url", &self.rapidapi_base_url)
            .field("brave_api_key", &self.brave_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("brave_base_url", &self.brave_base_url)
            .field("duckduckgo_enabled", &self.duckduckgo_enabled)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

fn default_rapidapi_base_url() -> String {
    "https://google-search74.p.rapidapi.com".to_string()
}

fn default_rapidapi_host() -> String {
    "google-search74.p.rapidapi.com".to_string()
}

fn default_brave_base_url() -> String {
    "https://api.search.brave.com/res/v1".to_string()
}

fn default_duckduckgo_base_url() -> String {
    "https://api.duckduckgo.com".to_string()
}

const fn default_timeout_ms() -> u64 {
    8_000
}

const fn default_max_results() -> usize {
    5
}

fn default_safe_search() -> String {
    "moderate".to_string()
}

fn default_result_country() -> String {
    "US".to_string()
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            rapidapi_key: None,
            rapidapi_base_url: default_rapidapi_base_url(),
            rapidapi_host: default_rapidapi_host(),
            brave_api_key: None,
            brave_base_url: default_brave_base_url(),
            duckduckgo_enabled: false,
            duckduckgo_base_url: default_duckduckgo_base_url(),
            timeout_ms: default_timeout_ms(),
            rapidapi_timeout_ms: None,
            brave_timeout_ms: None,
            duckduckgo_timeout_ms: None,
            max_results: default_max_results(),
            safe_search: default_safe_search(),
            result_country: default_result_country(),
        }
    }
}

impl WebSearchConfig {
    /// Create a configuration for testing (no credentials, short timeout)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_ms: 500,
            ..Default::default()
        }
    }

    /// RapidAPI key, ignoring a blank value
    #[must_use]
    pub fn rapidapi_credential(&self) -> Option<String> {
        non_blank(self.rapidapi_key.as_deref())
    }

    /// Brave key, ignoring a blank value
    #[must_use]
    pub fn brave_credential(&self) -> Option<String> {
        non_blank(self.brave_api_key.as_deref())
    }

    /// True if at least one credentialed provider has a non-blank key
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.rapidapi_credential().is_some() || self.brave_credential().is_some()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        if self.max_results > MAX_RESULTS_CEILING {
            return Err(format!(
                "max_results must be {MAX_RESULTS_CEILING} or less"
            ));
        }

        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".to_string());
        }

        for (name, value) in [
            ("rapidapi_timeout_ms", self.rapidapi_timeout_ms),
            ("brave_timeout_ms", self.brave_timeout_ms),
            ("duckduckgo_timeout_ms", self.duckduckgo_timeout_ms),
        ] {
            if value == Some(0) {
                return Err(format!("{name} must be greater than 0"));
            }
        }

        let valid_safe_search = ["off", "moderate", "strict"];
        if !valid_safe_search.contains(&self.safe_search.as_str()) {
            return Err(format!(
                "safe_search must be one of: {}",
                valid_safe_search.join(", ")
            ));
        }

        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
