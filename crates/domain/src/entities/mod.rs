//! Domain entities - Canonical records and client-side state

mod query_execution;
mod search_result;
mod session_state;
mod user_identity;

pub use query_execution::{
    QueryExecutionState, QueryOutcome, QueryPhase, QueryTicket, SEARCH_FAILED_MESSAGE,
};
pub use search_result::{
    FALLBACK_DESCRIPTION, FALLBACK_LINK, FALLBACK_TITLE, MAX_RESULTS_CEILING, SearchResult,
};
pub use session_state::{AUTH_FAILED_MESSAGE, AuthStatus, SessionPhase, SessionState};
pub use user_identity::{
    GitHubExtensions, GoogleExtensions, IdentityProvider, ProviderExtensions, UserIdentity,
};
