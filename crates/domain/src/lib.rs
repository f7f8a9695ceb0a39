//! Domain layer for LeetSniff
//!
//! Contains the canonical records every provider shape is normalized into,
//! the client-side state records, value objects, and domain errors.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
