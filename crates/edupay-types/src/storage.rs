//! Session-scoped key/value storage.
//!
//! The marketplace keeps the connected wallet for the lifetime of a browsing session.
//! [`SessionStorage`] abstracts where that lives: [`MemorySessionStorage`] for a single
//! process, [`FileSessionStorage`] when a restart should behave like a page reload.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Session storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Session storage file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// String key/value store with session lifetime.
pub trait SessionStorage: Send + Sync + Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: DashMap<String, String>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores all entries as one JSON object in a file.
///
/// A missing file is an empty session. A malformed file fails reads, and is replaced
/// by the next write.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn update<F>(&self, f: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(StorageError::Format(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding malformed session file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        f(&mut entries);
        self.write_entries(&entries)
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!(
            "edupay-session-{}.json",
            rand::random::<u64>()
        ))
    }

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemorySessionStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v".to_string()).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let path = temp_path();
        let storage = FileSessionStorage::new(&path);
        storage.set("connectedWallet", "{}".to_string()).unwrap();
        storage.set("other", "1".to_string()).unwrap();

        let reopened = FileSessionStorage::new(&path);
        assert_eq!(reopened.get("connectedWallet").unwrap().as_deref(), Some("{}"));
        reopened.remove("connectedWallet").unwrap();
        assert_eq!(storage.get("connectedWallet").unwrap(), None);
        assert_eq!(storage.get("other").unwrap().as_deref(), Some("1"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let storage = FileSessionStorage::new(temp_path());
        assert_eq!(storage.get("connectedWallet").unwrap(), None);
    }

    #[test]
    fn test_file_storage_malformed_file_is_replaced_on_write() {
        let path = temp_path();
        fs::write(&path, "not json").unwrap();
        let storage = FileSessionStorage::new(&path);
        assert!(matches!(storage.get("k"), Err(StorageError::Format(_))));
        storage.set("k", "v".to_string()).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        let _ = fs::remove_file(path);
    }
}
