//! JSON-file implementation of the `KeyValueStore` trait.
//!
//! The file holds one JSON object mapping keys to string values. It is read
//! once when the store opens and rewritten in full on every `set`, through a
//! temporary file that is renamed over the original.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use memory_lane_core::error::DomainError;
use memory_lane_core::store::KeyValueStore;
use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Failures while reading or writing the store file.
#[derive(Debug, Error)]
pub enum FileStoreError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON object of strings.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FileStoreError> for DomainError {
    fn from(err: FileStoreError) -> Self {
        Self::Infrastructure(err.to_string())
    }
}

/// File-backed key-value store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; it is overwritten on the next `set`.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path).await {
            Ok(entries) => entries,
            Err(FileStoreError::Io(err)) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "store file unreadable; starting empty");
                BTreeMap::new()
            }
        };
        info!(path = %path.display(), keys = entries.len(), "store opened");
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    async fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), FileStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

async fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, FileStoreError> {
    let bytes = fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_owned(), value.to_owned());
        self.flush(&entries).await?;
        Ok(())
    }
}
