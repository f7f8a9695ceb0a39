//! Application services - Use case implementations

mod auth_service;
mod client_shell;
mod query_navigation;
mod session_reconciler;

pub use auth_service::{AuthService, AuthenticatedSession, LoginRedirect};
pub use client_shell::{ClientShell, NavigationReport};
pub use query_navigation::{
    Dispatch, QueryNavigationService, QueryNavigator, Route, SEARCH_PATH, SubmitAction,
};
pub use session_reconciler::{
    DEFAULT_CLEANUP_DELAY, IdentitySource, ReconcileOutcome, SessionReconciler, UrlCleanup,
};
