//! OAuth client configuration for the identity providers.
//!
//! Endpoint fields are optional overrides; unset ones resolve to the
//! provider's public endpoints (see [`crate::adapters::ProviderEndpoints`]).

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use domain::IdentityProvider;

/// Per-provider OAuth client configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct OAuthProviderConfig {
    /// OAuth client id
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth client secret (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub client_secret: Option<SecretString>,

    /// Callback URL registered with the provider
    #[serde(default)]
    pub callback_url: Option<String>,

    /// Consent page override
    #[serde(default)]
    pub authorize_url: Option<String>,

    /// Token endpoint override
    #[serde(default)]
    pub token_url: Option<String>,

    /// Profile endpoint override
    #[serde(default)]
    pub profile_url: Option<String>,

    /// Email listing endpoint override (GitHub only)
    #[serde(default)]
    pub emails_url: Option<String>,

    /// Requested scopes; empty means the provider defaults
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl std::fmt::Debug for OAuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthProviderConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("callback_url", &self.callback_url)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl OAuthProviderConfig {
    /// True when both client credentials are present
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some()
    }
}

/// OAuth configuration for all supported providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    #[serde(default)]
    pub github: OAuthProviderConfig,

    #[serde(default)]
    pub google: OAuthProviderConfig,

    /// Timeout for each call to a provider, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            github: OAuthProviderConfig::default(),
            google: OAuthProviderConfig::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl OAuthConfig {
    /// Configuration for `provider`
    #[must_use]
    pub const fn provider(&self, provider: IdentityProvider) -> &OAuthProviderConfig {
        match provider {
            IdentityProvider::Github => &self.github,
            IdentityProvider::Google => &self.google,
        }
    }

    /// Providers with client credentials
    #[must_use]
    pub fn configured_providers(&self) -> Vec<IdentityProvider> {
        [IdentityProvider::Github, IdentityProvider::Google]
            .into_iter()
            .filter(|p| self.provider(*p).is_configured())
            .collect()
    }
}
