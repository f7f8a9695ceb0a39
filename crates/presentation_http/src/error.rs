//! API error handling
//!
//! Error responses carry a short message and a machine-readable code. Fault
//! details are logged, never returned.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Message returned for faults the client cannot act on
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type
///
/// The payload of every variant is the client-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The canonical 401 for requests without a live session
    pub fn not_authenticated() -> Self {
        Self::Unauthorized("Not authenticated".to_string())
    }

    const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::NotFound(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorResponse {
            error: self.message().to_string(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(DomainError::InvalidQuery(_)) => {
                Self::BadRequest("No query provided".to_string())
            },
            ApplicationError::Domain(
                DomainError::ValidationError(msg) | DomainError::InvalidEmailAddress(msg),
            ) => Self::BadRequest(msg),
            ApplicationError::NotAuthenticated => Self::not_authenticated(),
            other => {
                error!(error = %other, "Request failed");
                Self::Internal(INTERNAL_ERROR_MESSAGE.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_query_maps_to_bad_request() {
        let err: ApiError = ApplicationError::from(DomainError::InvalidQuery("blank".into())).into();
        assert_eq!(err.status_and_code().0, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "No query provided");
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let err: ApiError =
            ApplicationError::Storage("/var/lib/leetsniff: permission denied".into()).into();
        assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
        assert_eq!(err.status_and_code().1, "internal_error");
    }

    #[test]
    fn not_authenticated_maps_to_401() {
        let err: ApiError = ApplicationError::NotAuthenticated.into();
        assert_eq!(err.status_and_code().0, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Not authenticated");
    }

    #[test]
    fn response_has_error_and_code() {
        let response = ApiError::NotFound("Unknown route".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
