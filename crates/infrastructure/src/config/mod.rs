//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `session`: Session cookie and store
//! - `oauth`: Identity provider clients
//! - `client`: The client driver (API location, identity cache)
//!
//! Search settings reuse [`integration_websearch::WebSearchConfig`] and
//! logging settings reuse [`crate::telemetry::TelemetryConfig`].

mod client;
mod oauth;
mod server;
mod session;

use std::path::Path;

use integration_websearch::WebSearchConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use client::ClientConfig;
pub use oauth::{OAuthConfig, OAuthProviderConfig};
pub use server::ServerConfig;
pub use session::SessionConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment overrides (e.g. `LEETSNIFF_SERVER__PORT`)
pub const ENV_PREFIX: &str = "LEETSNIFF";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Search provider chain
    #[serde(default)]
    pub search: WebSearchConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// OAuth providers
    #[serde(default)]
    pub oauth: OAuthConfig,

    /// Client driver
    #[serde(default)]
    pub client: ClientConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    /// Load configuration from the given file stem (if present) and
    /// environment
    ///
    /// Environment variables override file values, with `__` separating
    /// nested keys: `LEETSNIFF_SEARCH__RAPIDAPI_KEY` sets
    /// `search.rapidapi_key`.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("oauth.github.scopes")
                    .with_list_parse_key("oauth.google.scopes")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            providers = ?config.oauth.configured_providers(),
            search_credentials = config.search.has_credentials(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse a TOML document, applying defaults and validation
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.search
            .validate()
            .map_err(|e| config::ConfigError::Message(format!("search: {e}")))?;

        if self.server.port == 0 {
            return Err(config::ConfigError::Message(
                "server.port must be greater than 0".to_string(),
            ));
        }

        url::Url::parse(&self.server.frontend_url).map_err(|e| {
            config::ConfigError::Message(format!("server.frontend_url is not a URL: {e}"))
        })?;

        if self.server.allowed_origins.iter().any(|o| o.trim() == "*") {
            return Err(config::ConfigError::Message(
                "server.allowed_origins must list explicit origins, not \"*\"".to_string(),
            ));
        }

        if self.session.cookie_name.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "session.cookie_name must not be empty".to_string(),
            ));
        }

        if self.session.ttl_secs == 0 || self.session.max_sessions == 0 {
            return Err(config::ConfigError::Message(
                "session.ttl_secs and session.max_sessions must be greater than 0".to_string(),
            ));
        }

        if self.oauth.timeout_ms == 0 || self.client.timeout_ms == 0 {
            return Err(config::ConfigError::Message(
                "oauth.timeout_ms and client.timeout_ms must be greater than 0".to_string(),
            ));
        }

        for (key, value) in [
            ("client.api_base_url", &self.client.api_base_url),
            ("client.app_base_url", &self.client.app_base_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| config::ConfigError::Message(format!("{key} is not a URL: {e}")))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.frontend_url, "http://localhost:3000");
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.session.cookie_name, "leetsniff.sid");
        assert_eq!(config.client.cleanup_delay_ms, 100);
        assert!(config.oauth.configured_providers().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn app_config_deserialization() {
        let json = r#"{"server":{"port":8080}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn from_toml_applies_sections() {
        let config = AppConfig::from_toml_str(
            r#"
            [server]
            port = 8081
            allowed_origins = ["https://leetsniff.dev"]

            [search]
            rapidapi_key = "rk"
            max_results = 8
            duckduckgo_enabled = true

            [oauth.github]
            client_id = "gh-id"
            client_secret = "gh-secret"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.cors_origins(), vec!["https://leetsniff.dev"]);
        assert_eq!(config.search.rapidapi_key.as_deref(), Some("rk"));
        assert_eq!(config.search.max_results, 8);
        assert!(config.search.duckduckgo_enabled);
        assert_eq!(
            config
                .oauth
                .github
                .client_secret
                .as_ref()
                .map(|s| s.expose_secret().to_string()),
            Some("gh-secret".to_string())
        );
        assert_eq!(
            config.oauth.configured_providers(),
            vec![domain::IdentityProvider::Github]
        );
    }

    #[test]
    fn max_results_above_ceiling_is_rejected() {
        let err = AppConfig::from_toml_str("[search]\nmax_results = 11\n").unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn zero_session_ttl_is_rejected() {
        assert!(AppConfig::from_toml_str("[session]\nttl_secs = 0\n").is_err());
    }

    #[test]
    fn invalid_frontend_url_is_rejected() {
        assert!(AppConfig::from_toml_str("[server]\nfrontend_url = \"not a url\"\n").is_err());
    }

    #[test]
    fn wildcard_origin_is_rejected() {
        let err = AppConfig::from_toml_str("[server]\nallowed_origins = [\"https://a.dev\", \"*\"]\n")
            .unwrap_err();
        assert!(err.to_string().contains("allowed_origins"));
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[client]\napi_base_url = \"http://127.0.0.1:9999\"").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.client.api_base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn secrets_are_not_serialized_or_debugged() {
        let config = AppConfig::from_toml_str(
            "[oauth.google]\nclient_id = \"id\"\nclient_secret = \"top-secret\"\n[search]\nbrave_api_key = \"brave-key-xyz\"\n",
        )
        .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("top-secret"));
        assert!(!json.contains("brave-key-xyz"));

        let debug = format!("{config:?}");
        assert!(!debug.contains("top-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn cors_falls_back_to_frontend_origin() {
        let server = ServerConfig {
            frontend_url: "http://localhost:3000/".to_string(),
            ..Default::default()
        };
        assert_eq!(server.cors_origins(), vec!["http://localhost:3000"]);
    }
}
