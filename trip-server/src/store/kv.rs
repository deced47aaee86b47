//! Key-value storage backends for trip persistence.
//!
//! The trip store only needs string keys mapped to string payloads.
//! [`MemoryStore`] backs tests and ephemeral runs; [`JsonFileStore`]
//! mirrors every write into a single JSON file so a restarted server
//! still knows about saved trips.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::error::StoreError;

/// String key-value storage.
///
/// Writes are synchronous: once `set` returns, the value is as durable
/// as the backend can make it. Reads report a missing or unreadable
/// value as absent rather than as an error, so callers treat corruption
/// the same as "never saved".
pub trait KvStore: Send + Sync {
    /// Read a value. `None` if absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value could not be stored.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Disk-backed store that keeps all entries in one JSON file.
///
/// Every `set` rewrites the whole file. Trips are small, and the
/// write-through keeps the file an exact copy of memory at every return
/// from `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading whatever a previous run saved.
    ///
    /// A missing or unreadable file starts the store empty; the file is
    /// created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::read_entries(&path).unwrap_or_default();
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn read_entries(path: &Path) -> Option<HashMap<String, String>> {
        let contents = std::fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// The file this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        // Create parent directories if needed
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::backend("file store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }
}
