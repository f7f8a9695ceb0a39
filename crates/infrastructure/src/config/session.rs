//! Server-side session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Session cookie and store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Session lifetime in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Upper bound on live sessions held in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,

    /// Mark cookies `Secure` (set when served over HTTPS)
    #[serde(default)]
    pub secure_cookies: bool,
}

fn default_cookie_name() -> String {
    "leetsniff.sid".to_string()
}

const fn default_ttl_secs() -> u64 {
    24 * 60 * 60
}

const fn default_max_sessions() -> u64 {
    10_000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_secs: default_ttl_secs(),
            max_sessions: default_max_sessions(),
            secure_cookies: false,
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
