//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the provider-backed
//! search adapter, the OAuth exchange, the session store, and the client's
//! identity cache and HTTP gateway. Also owns configuration loading and
//! logging setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod http;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use cache::MokaSessionStore;
pub use config::{
    AppConfig, ClientConfig, ENV_PREFIX, OAuthConfig, OAuthProviderConfig, ServerConfig,
    SessionConfig,
};
pub use http::{ApiClient, HealthStatus, X_REQUEST_ID};
pub use persistence::FileIdentityCache;
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
