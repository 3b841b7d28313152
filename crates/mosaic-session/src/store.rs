//! # Session Storage Port
//!
//! A generic string key/value substrate for durable local state. The
//! Session Manager persists the identity here; external collaborators (the
//! UI's theme preference, for one) share the same substrate, which is why
//! the port speaks plain namespaced keys rather than identity-shaped
//! records.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

/// Errors from the storage substrate.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem failure.
    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Durable local key/value storage.
///
/// Keys are namespaced strings (`mosaic:user`, `mosaic:theme`); values are
/// opaque serialized documents.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete the value under `key`. Deleting an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store for tests and ephemeral hosts.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON document per key under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path for `key`. Namespace separators are not valid in file
    /// names everywhere, so they map to dashes.
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key.replace(':', "-")))
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        tokio::fs::write(&path, value).await?;
        debug!(%key, path = %path.display(), "persisted local state");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
