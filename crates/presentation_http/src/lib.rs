//! LeetSniff HTTP presentation layer
//!
//! Exposes search, the OAuth sign-in round trip, and session lookups.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
