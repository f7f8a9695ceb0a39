//! Application layer - Use cases and orchestration
//!
//! Contains the port definitions and the services driving them: the
//! client-side session reconciler and query state machine, and the
//! server-side auth service.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
