//! Key-value persistence collaborators.
//!
//! The engine treats persistence as opaque blob storage: one stable key per
//! field group, bytes in, bytes out. `FileStore` is the production
//! implementation; `MemoryStore` backs tests and fakes.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not determine data directory")]
    NoDataDir,
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("serialization failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Opaque blob storage consumed by the progress store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// In-memory store. Cloning shares the underlying map, so a clone can be
/// handed to a `ProgressStore` while the original stays visible to a test.
#[derive(Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// One file per key under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store under the platform data directory for the app.
    pub fn new() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from("", "", "citykeys").ok_or(StorageError::NoDataDir)?;
        Self::at(dirs.data_dir().to_path_buf())
    }

    /// Store under an explicit directory, created if missing.
    pub fn at(dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "file store ready");
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        fs::write(self.path_for(key), bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(label: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!("citykeys-{label}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        FileStore::at(dir).expect("temp file store")
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("points").unwrap().is_none());

        store.set("points", b"42").unwrap();
        assert_eq!(store.get("points").unwrap().unwrap(), b"42");
    }

    #[test]
    fn test_memory_store_clone_shares_entries() {
        let store = MemoryStore::new();
        let clone = store.clone();

        clone.set("favorites", b"[]").unwrap();
        assert_eq!(store.get("favorites").unwrap().unwrap(), b"[]");
    }

    #[test]
    fn test_file_store_round_trip() {
        let store = temp_store("round-trip");
        assert!(store.get("points").unwrap().is_none());

        store.set("points", b"{\"total\":7}").unwrap();
        assert_eq!(store.get("points").unwrap().unwrap(), b"{\"total\":7}");

        // Overwrites replace, not append.
        store.set("points", b"{}").unwrap();
        assert_eq!(store.get("points").unwrap().unwrap(), b"{}");
    }

    #[test]
    fn test_file_store_uses_json_file_per_key() {
        let store = temp_store("layout");
        store.set("scholar_badges", b"[]").unwrap();
        assert!(store.dir.join("scholar_badges.json").exists());
    }
}
