//! Provider catalog
//!
//! Static, ordered list of search provider descriptors. Built once from
//! configuration at startup; adding or removing a provider is a deployment
//! change, never a runtime one.

use std::time::Duration;

use domain::SearchQuery;

use crate::config::WebSearchConfig;

/// Where in a provider response the result items live and how to read them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// A JSON array at `pointer` whose items carry `title`, `url`/`link`
    /// and `description`/`snippet`
    ResultList {
        /// JSON pointer to the array, e.g. `/web/results`
        pointer: &'static str,
    },
    /// DuckDuckGo Instant Answer document
    InstantAnswer,
}

/// Credential a provider needs before it may be contacted
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Keyless provider
    None,
    /// API key sent in a header; `value` is `None` when not configured
    Header {
        name: &'static str,
        value: Option<String>,
    },
}

impl Credential {
    /// True if the provider may be contacted
    #[must_use]
    pub const fn is_available(&self) -> bool {
        match self {
            Self::None => true,
            Self::Header { value, .. } => value.is_some(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Header { name, value } => f
                .debug_struct("Header")
                .field("name", name)
                .field("value", &value.as_ref().map(|_| "[REDACTED]"))
                .finish(),
        }
    }
}

/// How a query is mapped onto provider query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamMapping {
    /// Parameter carrying the query text
    pub query_key: &'static str,
    /// Parameter carrying the requested result count, if supported
    pub limit_key: Option<&'static str>,
    /// Constant parameters sent on every request
    pub fixed: Vec<(&'static str, String)>,
}

impl ParamMapping {
    /// Build the query parameters for one request
    #[must_use]
    pub fn to_params(&self, query: &SearchQuery, limit: usize) -> Vec<(&'static str, String)> {
        let mut params = vec![(self.query_key, query.as_str().to_string())];
        if let Some(limit_key) = self.limit_key {
            params.push((limit_key, limit.to_string()));
        }
        params.extend(self.fixed.iter().cloned());
        params
    }
}

/// Immutable description of one upstream search provider
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    /// Unique provider name
    pub name: &'static str,
    /// Request URL
    pub endpoint: String,
    /// Query parameter mapping
    pub params: ParamMapping,
    /// Non-secret headers (host identifiers, accept)
    pub headers: Vec<(&'static str, String)>,
    /// Credential requirement
    pub credential: Credential,
    /// Bound on a single attempt
    pub timeout: Duration,
    /// Response accessor
    pub shape: ResponseShape,
}

impl ProviderDescriptor {
    /// True if the credential requirement is met
    #[must_use]
    pub const fn is_usable(&self) -> bool {
        self.credential.is_available()
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

/// Ordered, non-empty list of provider descriptors
#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    descriptors: Vec<ProviderDescriptor>,
}

impl ProviderCatalog {
    /// Build the catalog in fallback order
    #[must_use]
    pub fn from_config(config: &WebSearchConfig) -> Self {
        let timeout =
            |own: Option<u64>| Duration::from_millis(own.unwrap_or(config.timeout_ms));

        let mut descriptors = vec![
            ProviderDescriptor {
                name: "rapidapi-google",
                endpoint: format!("{}/", config.rapidapi_base_url.trim_end_matches('/')),
                params: ParamMapping {
                    query_key: "query",
                    limit_key: Some("limit"),
                    fixed: vec![("related_keywords", "true".to_string())],
                },
                headers: vec![("X-RapidAPI-Host", config.rapidapi_host.clone())],
                credential: Credential::Header {
                    name: "X-RapidAPI-Key",
                    value: config.rapidapi_credential(),
                },
                timeout: timeout(config.rapidapi_timeout_ms),
                shape: ResponseShape::ResultList {
                    pointer: "/results",
                },
            },
            ProviderDescriptor {
                name: "brave",
                endpoint: format!("{}/web/search", config.brave_base_url.trim_end_matches('/')),
                params: ParamMapping {
                    query_key: "q",
                    limit_key: Some("count"),
                    fixed: vec![
                        ("safesearch", config.safe_search.clone()),
                        ("country", config.result_country.to_lowercase()),
                    ],
                },
                headers: vec![("Accept", "application/json".to_string())],
                credential: Credential::Header {
                    name: "X-Subscription-Token",
                    value: config.brave_credential(),
                },
                timeout: timeout(config.brave_timeout_ms),
                shape: ResponseShape::ResultList {
                    pointer: "/web/results",
                },
            },
        ];

        if config.duckduckgo_enabled {
            descriptors.push(ProviderDescriptor {
                name: "duckduckgo",
                endpoint: format!("{}/", config.duckduckgo_base_url.trim_end_matches('/')),
                params: ParamMapping {
                    query_key: "q",
                    limit_key: None,
                    fixed: vec![
                        ("format", "json".to_string()),
                        ("no_html", "1".to_string()),
                        ("skip_disambig", "0".to_string()),
                    ],
                },
                headers: Vec::new(),
                credential: Credential::None,
                timeout: timeout(config.duckduckgo_timeout_ms),
                shape: ResponseShape::InstantAnswer,
            });
        }

        Self { descriptors }
    }

    /// All descriptors, in order
    pub fn descriptors(&self) -> &[ProviderDescriptor] {
        &self.descriptors
    }

    /// Descriptors whose credential requirement is met, in order
    pub fn usable(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.descriptors.iter().filter(|d| d.is_usable())
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Always false; the catalog is non-empty by construction
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
