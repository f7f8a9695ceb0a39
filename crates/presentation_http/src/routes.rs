//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health::health_check))
        // Search
        .route("/search", get(handlers::search::search))
        // Auth
        .route("/auth/user", get(handlers::auth::current_user))
        .route("/auth/status", get(handlers::auth::status))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/{provider}", get(handlers::auth::login))
        .route("/auth/{provider}/callback", get(handlers::auth::callback))
        .fallback(handlers::not_found)
        .with_state(state)
}
