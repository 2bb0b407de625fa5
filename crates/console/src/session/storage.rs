//! Persisted key/value storage behind the session store.
//!
//! Three backends share one trait:
//! - [`tower_sessions::Session`] - the browser's cookie-scoped session (web console)
//! - [`FileStorage`] - a JSON file on disk (CLI)
//! - [`MemoryStorage`] - an in-process map (tests)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying cookie session failed.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Reading or writing the state file failed.
    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),

    /// The state file is not a JSON object.
    #[error("state file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String key/value storage that survives between requests or invocations.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read a key.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a key, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Write several keys in order, stopping at the first failure.
    ///
    /// Backends that can write atomically override this.
    async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in pairs {
            self.set(key, value).await?;
        }
        Ok(())
    }

    /// Delete a key. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl SessionStorage for tower_sessions::Session {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(Self::get::<String>(self, key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.insert(key, value).await?)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::remove::<String>(self, key).await?;
        Ok(())
    }
}

/// In-memory storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `pairs`.
    #[must_use]
    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .write()
            .await
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut values = self.values.write().await;
        for (key, value) in pairs {
            values.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

/// Storage in a single JSON object file.
///
/// Every write rewrites the whole file; last write wins. A missing file reads
/// as empty. Non-string values read as their JSON text and `null` as absent,
/// so one bad key does not hide the others.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the state file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be removed.
    pub async fn discard(&self) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => return Ok(BTreeMap::new()),
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        let raw: BTreeMap<String, Value> = serde_json::from_slice(&bytes)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Null => None,
                other => {
                    tracing::warn!(key = %key, value = %other, "non-string value in state file");
                    Some((key, other.to_string()))
                }
            })
            .collect())
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(values)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut values = self.load().await?;
        values.insert(key.to_owned(), value.to_owned());
        self.save(&values).await
    }

    async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut values = self.load().await?;
        for (key, value) in pairs {
            values.insert((*key).to_owned(), (*value).to_owned());
        }
        self.save(&values).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.write().await;
        let mut values = self.load().await?;
        if values.remove(key).is_some() {
            self.save(&values).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::with_values([("theme", "dark")]);
        assert_eq!(storage.get("theme").await.unwrap().as_deref(), Some("dark"));

        storage.set("token", "abc").await.unwrap();
        storage.remove("theme").await.unwrap();
        storage.remove("never-set").await.unwrap();

        assert_eq!(storage.get("token").await.unwrap().as_deref(), Some("abc"));
        assert_eq!(storage.get("theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("token").await.unwrap(), None);
        storage.set("token", "demo-token-manager").await.unwrap();
        storage.set("role", "manager").await.unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get("token").await.unwrap().as_deref(),
            Some("demo-token-manager")
        );

        reopened.remove("token").await.unwrap();
        assert_eq!(storage.get("token").await.unwrap(), None);
        assert_eq!(storage.get("role").await.unwrap().as_deref(), Some("manager"));
    }

    #[tokio::test]
    async fn test_file_storage_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"[1, 2, 3]").await.unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get("token").await,
            Err(StorageError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn test_file_storage_reads_non_string_values_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, br#"{"token":"jwt","role":7,"theme":null}"#)
            .await
            .unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("token").await.unwrap().as_deref(), Some("jwt"));
        assert_eq!(storage.get("role").await.unwrap().as_deref(), Some("7"));
        assert_eq!(storage.get("theme").await.unwrap(), None);

        storage.remove("role").await.unwrap();
        assert_eq!(storage.get("role").await.unwrap(), None);
        assert_eq!(storage.get("token").await.unwrap().as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn test_file_storage_set_many() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let storage = FileStorage::new(&path);
        storage.set("theme", "dark").await.unwrap();

        storage
            .set_many(&[("role", "manager"), ("token", "demo-token-manager")])
            .await
            .unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("role").await.unwrap().as_deref(), Some("manager"));
        assert_eq!(
            reopened.get("token").await.unwrap().as_deref(),
            Some("demo-token-manager")
        );
        assert_eq!(reopened.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_file_storage_discard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"not json").await.unwrap();

        let storage = FileStorage::new(&path);
        storage.discard().await.unwrap();
        assert!(!path.exists());
        assert_eq!(storage.get("token").await.unwrap(), None);

        // already gone
        storage.discard().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_storage_empty_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"\n").await.unwrap();

        assert_eq!(FileStorage::new(&path).get("role").await.unwrap(), None);
    }
}
