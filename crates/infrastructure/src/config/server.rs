//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins (empty = allow the frontend origin only)
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Externally reachable base URL of this server (OAuth callbacks)
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// Where the browser is sent back to after a provider sign-in
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Maximum body size for requests in bytes (default: 64KB)
    #[serde(default = "default_max_body_size")]
    pub max_body_size_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    5000
}

fn default_public_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

const fn default_max_body_size() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: Vec::new(),
            public_url: default_public_url(),
            frontend_url: default_frontend_url(),
            shutdown_timeout_secs: Some(30),
            max_body_size_bytes: default_max_body_size(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Origins allowed by CORS, falling back to the frontend origin
    #[must_use]
    pub fn cors_origins(&self) -> Vec<String> {
        if self.allowed_origins.is_empty() {
            vec![self.frontend_url.trim_end_matches('/').to_string()]
        } else {
            self.allowed_origins.clone()
        }
    }
}
