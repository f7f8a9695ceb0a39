//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod identity_cache_port;
mod oauth_exchange_port;
mod search_port;
mod session_gateway_port;
mod session_store_port;

#[cfg(test)]
pub use identity_cache_port::MockIdentityCachePort;
pub use identity_cache_port::{IDENTITY_CACHE_KEY, IdentityCachePort};
#[cfg(test)]
pub use oauth_exchange_port::MockOAuthExchangePort;
pub use oauth_exchange_port::OAuthExchangePort;
#[cfg(test)]
pub use search_port::MockSearchPort;
pub use search_port::SearchPort;
#[cfg(test)]
pub use session_gateway_port::MockSessionGatewayPort;
pub use session_gateway_port::SessionGatewayPort;
#[cfg(test)]
pub use session_store_port::MockSessionStorePort;
pub use session_store_port::SessionStorePort;
