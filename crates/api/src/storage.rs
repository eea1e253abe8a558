//! Key-value storage for client-side state.
//!
//! Two stores back a [`crate::Session`]: a persistent one (tokens, the
//! signed-in records, downloaded label ids) and a process-lifetime one for
//! scratch values. [`FileStore`] persists a flat JSON object on every
//! write; [`MemoryStore`] keeps everything in memory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

/// Errors from reading or writing persisted state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt state file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal could not be persisted.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;

    /// Remove every key; returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleared state could not be persisted.
    fn clear(&self) -> Result<usize, StorageError>;

    /// All stored keys, sorted.
    fn keys(&self) -> Vec<String>;
}

fn lock(entries: &Mutex<BTreeMap<String, String>>) -> MutexGuard<'_, BTreeMap<String, String>> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory store, dropped with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        Ok(lock(&self.entries).remove(key).is_some())
    }

    fn clear(&self) -> Result<usize, StorageError> {
        let mut entries = lock(&self.entries);
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.entries).keys().cloned().collect()
    }
}

/// Store persisted as a JSON object in a single file.
///
/// The whole map is rewritten on each mutation through a temporary file
/// and a rename, so a crash never leaves a half-written state file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, loading existing entries.
    ///
    /// A missing file is an empty store; it is created on first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened state file");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let bytes = serde_json::to_vec_pretty(entries).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = lock(&self.entries);
        let mut next = entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut entries = lock(&self.entries);
        if !entries.contains_key(key) {
            return Ok(false);
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(true)
    }

    fn clear(&self) -> Result<usize, StorageError> {
        let mut entries = lock(&self.entries);
        self.persist(&BTreeMap::new())?;
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    fn keys(&self) -> Vec<String> {
        lock(&self.entries).keys().cloned().collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_basics() {
        let store = MemoryStore::new();
        store.set("token", "abc").unwrap();
        assert_eq!(store.get("token").as_deref(), Some("abc"));
        assert!(store.remove("token").unwrap());
        assert!(!store.remove("token").unwrap());
        assert!(store.get("token").is_none());
    }

    #[test]
    fn test_clear_reports_removed_count() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("local-storage.json");

        let store = FileStore::open(&path).unwrap();
        store.set("adminToken", "secret").unwrap();
        store.set("downloadedLabels", "[\"o1\"]").unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("adminToken").as_deref(), Some("secret"));
        assert_eq!(reopened.keys(), vec!["adminToken", "downloadedLabels"]);

        reopened.clear().unwrap();
        let cleared = FileStore::open(&path).unwrap();
        assert!(cleared.keys().is_empty());
    }

    #[test]
    fn test_file_store_failed_write_leaves_entries_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = FileStore::open(&path).unwrap();
        store.set("token", "abc").unwrap();

        // A directory where the temp file goes makes every write fail.
        std::fs::create_dir(dir.path().join("state.json.tmp")).unwrap();

        assert!(store.set("token", "xyz").is_err());
        assert!(store.remove("token").is_err());
        assert!(store.clear().is_err());
        assert_eq!(store.get("token").as_deref(), Some("abc"));

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(StorageError::Corrupt { .. })
        ));
    }
}
