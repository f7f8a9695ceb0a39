//! HTTP request handlers

pub mod auth;
pub mod health;
pub mod search;

use crate::error::ApiError;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
