//! File-backed identity cache
//!
//! The client's persisted state is one JSON document holding a single
//! string entry under [`IDENTITY_CACHE_KEY`]:
//!
//! ```json
//! {"user": "{\"id\":\"583231\",\"login\":\"octocat\",...}"}
//! ```
//!
//! Writes go to a sibling temp file that is then renamed over the target.

use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use application::{
    error::ApplicationError,
    ports::{IDENTITY_CACHE_KEY, IdentityCachePort},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Identity cache stored in a JSON file
#[derive(Debug, Clone)]
pub struct FileIdentityCache {
    path: PathBuf,
}

impl FileIdentityCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Option<String>, ApplicationError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ApplicationError::Storage(e.to_string())),
        }
    }

    async fn write_document(&self, document: &BTreeMap<String, String>) -> Result<(), ApplicationError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ApplicationError::Storage(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| ApplicationError::Storage(e.to_string()))
    }
}

#[async_trait]
impl IdentityCachePort for FileIdentityCache {
    /// An unreadable document is returned verbatim as the entry, so the
    /// reconciler sees it as corrupt and clears it.
    #[instrument(skip(self), fields(path = %self.path.display()), level = "debug")]
    async fn load(&self) -> Result<Option<String>, ApplicationError> {
        let Some(raw) = self.read_document().await? else {
            return Ok(None);
        };

        match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
            Ok(mut document) => Ok(document.remove(IDENTITY_CACHE_KEY)),
            Err(e) => {
                warn!(error = %e, "Identity cache document is unreadable");
                Ok(Some(raw))
            },
        }
    }

    #[instrument(skip(self, json), fields(path = %self.path.display()), level = "debug")]
    async fn store(&self, json: &str) -> Result<(), ApplicationError> {
        let document = BTreeMap::from([(IDENTITY_CACHE_KEY.to_string(), json.to_string())]);
        self.write_document(&document).await?;
        debug!("Identity cached");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()), level = "debug")]
    async fn clear(&self) -> Result<(), ApplicationError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!("Identity cache cleared");
                Ok(())
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApplicationError::Storage(e.to_string())),
        }
    }
}
