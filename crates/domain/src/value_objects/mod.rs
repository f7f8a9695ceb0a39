//! Value Objects - Immutable, identity-less domain primitives

mod email_address;
mod search_query;

pub use email_address::EmailAddress;
pub use search_query::SearchQuery;
