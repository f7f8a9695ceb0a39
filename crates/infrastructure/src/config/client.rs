//! Client-side (CLI) configuration.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// Configuration for the client driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the LeetSniff server
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL the client treats as its own location
    #[serde(default = "default_app_base_url")]
    pub app_base_url: String,

    /// File holding the persisted identity entry
    #[serde(default = "default_identity_cache_path")]
    pub identity_cache_path: PathBuf,

    /// Delay before auth parameters are stripped from the location
    #[serde(default = "default_cleanup_delay_ms")]
    pub cleanup_delay_ms: u64,

    /// Request timeout for calls to the server, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_app_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_identity_cache_path() -> PathBuf {
    PathBuf::from(".leetsniff/identity.json")
}

const fn default_cleanup_delay_ms() -> u64 {
    100
}

const fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            app_base_url: default_app_base_url(),
            identity_cache_path: default_identity_cache_path(),
            cleanup_delay_ms: default_cleanup_delay_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub const fn cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.cleanup_delay_ms)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
