//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod oauth_adapter;
mod websearch_adapter;

pub use oauth_adapter::{HttpOAuthAdapter, ProviderEndpoints};
pub use websearch_adapter::WebSearchAdapter;
