//! Client-side session state
//!
//! Owned by exactly one reconciler. Everything that needs to know who is
//! signed in borrows it instead of consulting ambient globals.

use serde::{Deserialize, Serialize};

use super::UserIdentity;

/// Message shown once after a failed OAuth round trip
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please try again.";

/// Outcome of the most recent OAuth redirect, cleared once consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    Success,
    Error,
}

impl AuthStatus {
    /// User-visible text for this status, if any
    #[must_use]
    pub const fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::Success => None,
            Self::Error => Some(AUTH_FAILED_MESSAGE),
        }
    }
}

/// Lifecycle of the session record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No reconciliation pass has started
    #[default]
    Uninitialized,
    /// A pass is in progress
    Reconciling,
    /// The last pass completed
    Settled,
}

/// Who is signed in on this client, as far as the client knows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    current_user: Option<UserIdentity>,
    is_loaded: bool,
    auth_status: Option<AuthStatus>,
    phase: SessionPhase,
}

impl SessionState {
    /// Fresh, uninitialized state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn current_user(&self) -> Option<&UserIdentity> {
        self.current_user.as_ref()
    }

    /// True once the initial cache read has finished
    pub const fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub const fn auth_status(&self) -> Option<AuthStatus> {
        self.auth_status
    }

    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub const fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn begin_reconciling(&mut self) {
        self.phase = SessionPhase::Reconciling;
    }

    pub fn settle(&mut self) {
        self.phase = SessionPhase::Settled;
    }

    pub fn mark_loaded(&mut self) {
        self.is_loaded = true;
    }

    pub fn set_user(&mut self, user: UserIdentity) {
        self.current_user = Some(user);
    }

    pub fn clear_user(&mut self) {
        self.current_user = None;
    }

    pub fn set_auth_status(&mut self, status: AuthStatus) {
        self.auth_status = Some(status);
    }

    /// Read and clear the transient auth status
    pub fn take_auth_status(&mut self) -> Option<AuthStatus> {
        self.auth_status.take()
    }
}
