//! Durable key-value storage backing the session mirror.
//!
//! String keys, string values, surviving process restarts. The session store
//! only ever touches the two keys in [`keys`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

/// Durable keys used by the session mirror.
pub mod keys {
    /// Raw bearer credential.
    pub const TOKEN: &str = "token";

    /// Serialized [`crate::UserProfile`].
    pub const USER: &str = "user";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a valid key-value document: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed, string-valued store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process store.
///
/// Clones share the same map, so two session stores built from clones of one
/// `MemoryStore` see each other's writes the way two tabs share browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// JSON-file store: one flat object of string values.
///
/// Every read goes to disk so a second process sees the latest writes. Writes
/// replace the file through a sibling temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub const FILE_NAME: &'static str = "session.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `{dir}/session.json`, creating `dir` if needed.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(Self::new(dir.join(Self::FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        let payload = serde_json::to_string_pretty(entries).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_clones_share_entries() {
        let mut a = MemoryStore::new();
        let b = a.clone();
        a.set(keys::TOKEN, "t1").unwrap();
        assert_eq!(b.get(keys::TOKEN).unwrap().as_deref(), Some("t1"));
        a.remove(keys::TOKEN).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::in_dir(dir.path().join("nested")).unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap(), None);

        store.set(keys::TOKEN, "t1").unwrap();
        store.set(keys::USER, "{\"id\":1}").unwrap();

        let reopened = FileStore::in_dir(dir.path().join("nested")).unwrap();
        assert_eq!(reopened.get(keys::TOKEN).unwrap().as_deref(), Some("t1"));
        assert_eq!(reopened.get(keys::USER).unwrap().as_deref(), Some("{\"id\":1}"));
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::in_dir(dir.path()).unwrap();
        store.remove(keys::USER).unwrap();
        assert!(!store.path().exists());

        store.set(keys::USER, "u").unwrap();
        store.remove(keys::USER).unwrap();
        store.remove(keys::USER).unwrap();
        assert_eq!(store.get(keys::USER).unwrap(), None);
    }

    #[test]
    fn file_store_reports_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_dir(dir.path()).unwrap();
        fs::write(store.path(), "[1, 2").unwrap();
        assert!(matches!(store.get(keys::TOKEN), Err(StorageError::Corrupt { .. })));
    }
}
