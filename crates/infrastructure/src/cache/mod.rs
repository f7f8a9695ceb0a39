//! Cache implementations
//!
//! - `MokaSessionStore`: in-memory session store with TTL and capacity bound

mod session_store;

pub use session_store::MokaSessionStore;
