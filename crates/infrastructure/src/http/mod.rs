//! HTTP clients for the LeetSniff server boundary

mod api_client;

pub use api_client::{ApiClient, HealthStatus, X_REQUEST_ID};
