//! Request ID correlation
//!
//! Every request is traced in a span carrying the caller's `X-Request-Id`
//! (the CLI sends one), or a fresh UUIDv7 when the header is absent or not
//! a UUID.

use axum::{body::Body, extract::Request};
use tracing::Span;
use uuid::Uuid;

/// The header name for the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID of `request`
pub fn request_id(request: &Request<Body>) -> Uuid {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::now_v7)
}

/// Span factory for `TraceLayer::make_span_with`
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http_request",
        request_id = %request_id(request),
        method = %request.method(),
        uri = %request.uri().path(),
    )
}
