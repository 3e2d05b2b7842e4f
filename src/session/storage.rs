//! Durable session persistence.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::error::{ApiError, ApiResult};

#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Previously saved session, or `None` when nothing usable is stored
    async fn load(&self) -> ApiResult<Option<Session>>;

    async fn save(&self, session: &Session) -> ApiResult<()>;

    /// Remove any stored session; clearing an empty store succeeds
    async fn clear(&self) -> ApiResult<()>;
}

/// Stores the session as a JSON file, replacing it atomically on save
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> ApiResult<Option<Session>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::Storage(format!("read {}: {e}", self.path.display()))),
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> ApiResult<()> {
        let bytes = serde_json::to_vec_pretty(session)
            .map_err(|e| ApiError::Storage(format!("encode session: {e}")))?;
        let staging = self.staging_path();

        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|e| ApiError::Storage(format!("write {}: {e}", staging.display())))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| ApiError::Storage(format!("replace {}: {e}", self.path.display())))?;

        debug!("Session persisted to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> ApiResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(format!("remove {}: {e}", self.path.display()))),
        }
    }
}

/// In-process storage for tests and short-lived contexts
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    pub fn stored(&self) -> Option<Session> {
        self.slot.lock().clone()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> ApiResult<Option<Session>> {
        Ok(self.slot.lock().clone())
    }

    async fn save(&self, session: &Session) -> ApiResult<()> {
        *self.slot.lock() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> ApiResult<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}
