//! Moka-backed server session store
//!
//! Sessions are opaque UUIDv4 ids mapped to the signed-in identity. Entries
//! expire after the configured TTL and the least recently used ones are
//! evicted once `max_sessions` is reached.

use std::time::Duration;

use application::{error::ApplicationError, ports::SessionStorePort};
use async_trait::async_trait;
use domain::UserIdentity;
use moka::future::Cache;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::SessionConfig;

/// In-memory session store
pub struct MokaSessionStore {
    sessions: Cache<String, UserIdentity>,
}

impl std::fmt::Debug for MokaSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaSessionStore")
            .field("entries", &self.sessions.entry_count())
            .finish()
    }
}

impl MokaSessionStore {
    #[must_use]
    pub fn new(ttl: Duration, max_sessions: u64) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_live(ttl)
                .build(),
        }
    }

    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.ttl(), config.max_sessions)
    }

    /// Approximate number of live sessions
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MokaSessionStore {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

#[async_trait]
impl SessionStorePort for MokaSessionStore {
    #[instrument(skip(self, user), fields(login = %user.login), level = "debug")]
    async fn create(&self, user: &UserIdentity) -> Result<String, ApplicationError> {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), user.clone()).await;
        debug!("Session stored");
        Ok(id)
    }

    #[instrument(skip(self, session_id), level = "debug")]
    async fn get(&self, session_id: &str) -> Result<Option<UserIdentity>, ApplicationError> {
        let user = self.sessions.get(session_id).await;
        debug!(hit = user.is_some(), "Session lookup");
        Ok(user)
    }

    #[instrument(skip(self, session_id), level = "debug")]
    async fn destroy(&self, session_id: &str) -> Result<(), ApplicationError> {
        self.sessions.invalidate(session_id).await;
        Ok(())
    }
}
