//! Session reconciler - who is signed in on this client
//!
//! Merges three identity sources on every navigation, in precedence order:
//! the post-authentication payload carried in the URL, the persisted cache,
//! and the server session. The server is asked at most once per reconciler.

use std::{fmt, sync::Arc, time::Duration};

use domain::{AuthStatus, SessionState, UserIdentity};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::ports::{IdentityCachePort, SessionGatewayPort};

/// Default delay before auth parameters are stripped from the URL
pub const DEFAULT_CLEANUP_DELAY: Duration = Duration::from_millis(100);

/// Instruction to strip auth parameters from the location
///
/// Must be applied as a history replace, never a push, so going back does
/// not replay the sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCleanup {
    pub replace_with: String,
    pub after: Duration,
}

/// Where the current user came from during one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    Url,
    Cache,
    Server,
}

/// Result of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Set when the location carried an auth payload
    pub cleanup: Option<UrlCleanup>,
    /// Set when this pass changed the current user
    pub source: Option<IdentitySource>,
}

/// Auth parameters read from a location
enum AuthParams {
    Success(Option<String>),
    Error,
}

/// Owns the client [`SessionState`] and keeps it consistent
pub struct SessionReconciler {
    cache: Arc<dyn IdentityCachePort>,
    gateway: Arc<dyn SessionGatewayPort>,
    state: SessionState,
    server_checked: bool,
    cleanup_delay: Duration,
}

impl fmt::Debug for SessionReconciler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionReconciler")
            .field("state", &self.state)
            .field("server_checked", &self.server_checked)
            .finish_non_exhaustive()
    }
}

impl SessionReconciler {
    pub fn new(cache: Arc<dyn IdentityCachePort>, gateway: Arc<dyn SessionGatewayPort>) -> Self {
        Self {
            cache,
            gateway,
            state: SessionState::new(),
            server_checked: false,
            cleanup_delay: DEFAULT_CLEANUP_DELAY,
        }
    }

    /// Override the URL cleanup delay
    #[must_use]
    pub const fn with_cleanup_delay(mut self, delay: Duration) -> Self {
        self.cleanup_delay = delay;
        self
    }

    /// Current session state
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Consume the transient auth status
    pub fn take_auth_status(&mut self) -> Option<AuthStatus> {
        self.state.take_auth_status()
    }

    /// Run one reconciliation pass for `location`
    #[instrument(skip(self, location), fields(path = location.path()))]
    pub async fn on_navigation(&mut self, location: &Url) -> ReconcileOutcome {
        self.state.begin_reconciling();
        let mut outcome = ReconcileOutcome::default();

        if !self.state.is_loaded() {
            if self.load_cached().await {
                outcome.source = Some(IdentitySource::Cache);
            }
            self.state.mark_loaded();
        }

        if let Some(params) = auth_params(location) {
            match params {
                AuthParams::Success(payload) => match decode_user(payload.as_deref()) {
                    Some(user) => {
                        info!(login = %user.login, provider = %user.provider(), "Signed in");
                        self.persist(&user).await;
                        self.state.set_user(user);
                        self.state.set_auth_status(AuthStatus::Success);
                        outcome.source = Some(IdentitySource::Url);
                    },
                    None => {
                        warn!("Sign-in redirect carried an unreadable user payload");
                        self.state.set_auth_status(AuthStatus::Error);
                    },
                },
                AuthParams::Error => {
                    info!("Sign-in failed at the provider");
                    self.state.set_auth_status(AuthStatus::Error);
                },
            }

            outcome.cleanup = Some(UrlCleanup {
                replace_with: "/".to_string(),
                after: self.cleanup_delay,
            });
        }

        if self.state.current_user().is_none() && !self.server_checked {
            self.server_checked = true;
            if self.load_from_server().await {
                outcome.source = Some(IdentitySource::Server);
            }
        }

        self.state.settle();
        outcome
    }

    /// Sign out locally and, best effort, on the server
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        if let Err(e) = self.gateway.logout().await {
            warn!(error = %e, "Server logout failed, clearing local session anyway");
        }

        self.state.clear_user();
        if let Err(e) = self.cache.clear().await {
            warn!(error = %e, "Failed to clear identity cache");
        }
        info!("Signed out");
    }

    async fn load_cached(&mut self) -> bool {
        let json = match self.cache.load().await {
            Ok(Some(json)) => json,
            Ok(None) => return false,
            Err(e) => {
                warn!(error = %e, "Failed to read identity cache");
                return false;
            },
        };

        match UserIdentity::from_json(&json) {
            Ok(user) => {
                debug!(login = %user.login, "Restored cached identity");
                self.state.set_user(user);
                true
            },
            Err(e) => {
                warn!(error = %e, "Discarding corrupt cached identity");
                if let Err(e) = self.cache.clear().await {
                    warn!(error = %e, "Failed to clear identity cache");
                }
                false
            },
        }
    }

    async fn load_from_server(&mut self) -> bool {
        match self.gateway.current_user().await {
            Ok(Some(user)) => {
                debug!(login = %user.login, "Restored identity from server session");
                self.persist(&user).await;
                self.state.set_user(user);
                true
            },
            Ok(None) => {
                debug!("No server session");
                false
            },
            Err(e) => {
                debug!(error = %e, "Server session lookup failed");
                false
            },
        }
    }

    async fn persist(&self, user: &UserIdentity) {
        let stored = match user.to_json() {
            Ok(json) => self.cache.store(&json).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = stored {
            warn!(error = %e, "Failed to persist identity");
        }
    }
}

fn auth_params(location: &Url) -> Option<AuthParams> {
    let mut auth = None;
    let mut user = None;
    for (key, value) in location.query_pairs() {
        match key.as_ref() {
            "auth" => auth = Some(value.into_owned()),
            "user" => user = Some(value.into_owned()),
            _ => {},
        }
    }

    match auth.as_deref() {
        Some("success") => Some(AuthParams::Success(user)),
        Some("error") => Some(AuthParams::Error),
        _ => None,
    }
}

fn decode_user(payload: Option<&str>) -> Option<UserIdentity> {
    UserIdentity::from_json(payload?).ok()
}
