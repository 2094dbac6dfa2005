//! Durable key-value storage for GitHub Explorer.
//!
//! Mirrors the browser `localStorage` contract the dashboard was written
//! against: string keys, string values, whole-value overwrite on `set`.
//! Three back-ends implement [`LocalStorage`]: an in-memory map for tests,
//! a single JSON file, and a table in the SQLite database.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::database::Database;
use crate::types::errors::StorageError;

/// Key under which the bookmarked repositories are stored.
pub const REPOSITORIES_KEY: &str = "@github_explorer:repositories";

/// String key-value storage capability injected into the dashboard view.
pub trait LocalStorage {
    /// Returns the value stored under `key`, or `None` if nothing was written yet.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// The write is complete (or has failed) when this returns.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: LocalStorage + ?Sized> LocalStorage for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<T: LocalStorage + ?Sized> LocalStorage for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

// === MemoryStorage ===

/// Process-local storage. Values are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value` under `key`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut values) = storage.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        storage
    }

    /// Makes every subsequent `set` fail with [`StorageError::WriteRejected`].
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected(key.to_string()));
        }
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// === JsonFileStorage ===

/// Stores all keys in one JSON object file, rewritten in full on every `set`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole container. A file that exists but is not a JSON object
    /// of strings is an error naming the file; it is never overwritten.
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            StorageError::IoError(format!(
                "Failed to read storage file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StorageError::SerializationError(format!(
                "Storage file {} is corrupt: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_container(&self, all: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| {
            StorageError::IoError(format!("Failed to create storage directory: {}", e))
        })?;

        let json = serde_json::to_string_pretty(all).map_err(|e| {
            StorageError::SerializationError(format!("Failed to serialize storage: {}", e))
        })?;

        // Written beside the target and renamed over it, so readers see the old
        // file or the new one and never a partial write.
        let io_err = |e: std::io::Error| {
            StorageError::IoError(format!(
                "Failed to write storage file {}: {}",
                self.path.display(),
                e
            ))
        };
        let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl LocalStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_string());
        self.write_container(&all)?;

        debug!(key, path = %self.path.display(), "storage file written");
        Ok(())
    }
}

// === SqliteStorage ===

/// Stores keys as rows of the `local_storage` table.
pub struct SqliteStorage {
    db: Arc<Database>,
}

impl SqliteStorage {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }
}

impl LocalStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.connection().execute(
            "INSERT OR REPLACE INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Self::now()],
        )?;
        Ok(())
    }
}
