//! Application state shared across handlers

use std::sync::Arc;

use application::{AuthService, ports::SearchPort};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Search backed by the provider chain
    pub search: Arc<dyn SearchPort>,
    /// Sign-in and session lookups
    pub auth: Arc<AuthService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
