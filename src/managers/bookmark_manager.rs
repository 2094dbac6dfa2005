//! Bookmark Manager for GitHub Explorer.
//!
//! Keeps the bookmarked repository list in sync with a [`LocalStorage`]
//! value: a JSON array of repositories under [`REPOSITORIES_KEY`].

use tracing::{debug, error, warn};

use crate::services::local_storage::{LocalStorage, REPOSITORIES_KEY};
use crate::types::errors::StorageError;
use crate::types::repository::Repository;

/// Trait defining bookmark list persistence.
pub trait BookmarkManagerTrait {
    /// Reads the persisted list.
    ///
    /// A missing or malformed value yields an empty list. A failed read is
    /// returned as is.
    fn load(&self) -> Result<Vec<Repository>, StorageError>;
    /// Overwrites the persisted list with `repositories`.
    fn commit(&self, repositories: &[Repository]) -> Result<(), StorageError>;
}

/// Bookmark persistence over an injected storage capability.
pub struct BookmarkManager<S> {
    storage: S,
}

impl<S: LocalStorage> BookmarkManager<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: LocalStorage> BookmarkManagerTrait for BookmarkManager<S> {
    fn load(&self) -> Result<Vec<Repository>, StorageError> {
        let raw = match self.storage.get(REPOSITORIES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(e) => {
                error!(error = %e, "could not read bookmarks");
                return Err(e);
            }
        };

        match deserialize(&raw) {
            Ok(repositories) => {
                debug!(count = repositories.len(), "loaded bookmarks");
                Ok(repositories)
            }
            Err(e) => {
                warn!(error = %e, "ignoring malformed bookmark value");
                Ok(Vec::new())
            }
        }
    }

    fn commit(&self, repositories: &[Repository]) -> Result<(), StorageError> {
        let json = serialize(repositories)?;
        self.storage.set(REPOSITORIES_KEY, &json)?;
        debug!(count = repositories.len(), "bookmarks persisted");
        Ok(())
    }
}

/// Encodes the list as the JSON array stored under [`REPOSITORIES_KEY`].
pub fn serialize(repositories: &[Repository]) -> Result<String, StorageError> {
    serde_json::to_string(repositories).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Decodes a stored value, rejecting anything that is not an array of repositories.
pub fn deserialize(raw: &str) -> Result<Vec<Repository>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Drops every entry whose `full_name` equals `full_name`.
///
/// Returns the remaining entries in their original order and how many were removed.
pub fn remove_all(repositories: &[Repository], full_name: &str) -> (Vec<Repository>, usize) {
    let kept: Vec<Repository> = repositories
        .iter()
        .filter(|r| r.full_name != full_name)
        .cloned()
        .collect();
    let removed = repositories.len() - kept.len();
    (kept, removed)
}
