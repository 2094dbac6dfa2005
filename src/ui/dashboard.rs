//! The repository bookmark dashboard.
//!
//! [`RepositoryBookmarkView`] owns the search input, the inline error slot and
//! the bookmark list. Lookups go through a [`RepositoryApi`]; every change to
//! the list is written through a [`BookmarkManager`] before it becomes visible.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::managers::bookmark_manager::{self, BookmarkManager, BookmarkManagerTrait};
use crate::services::github_api::RepositoryApi;
use crate::services::local_storage::LocalStorage;
use crate::types::errors::{InputError, StorageError};
use crate::types::repository::Repository;
use crate::types::route::Route;

pub const TITLE: &str = "Explore repositories on Github.";
pub const INPUT_PLACEHOLDER: &str = "Type the repository name...";

/// One row of the rendered bookmark list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListEntry {
    pub full_name: String,
    pub description: String,
    pub avatar_url: String,
    pub avatar_alt: String,
    pub route: String,
}

/// Dashboard state plus its storage and API collaborators.
pub struct RepositoryBookmarkView<S, A> {
    bookmarks: BookmarkManager<S>,
    api: A,
    input: String,
    input_error: Option<InputError>,
    repositories: Vec<Repository>,
    // Set while the saved list could not be read; blocks every commit.
    load_failure: Option<String>,
}

impl<S: LocalStorage, A: RepositoryApi> RepositoryBookmarkView<S, A> {
    /// Creates the view, loading the persisted bookmarks from `storage`.
    ///
    /// Missing or malformed persisted data yields an empty list. When the
    /// storage cannot be read the view starts empty but locked: the failure is
    /// shown and every change is refused until [`reload`](Self::reload)
    /// succeeds.
    pub fn new(storage: S, api: A) -> Self {
        let mut view = Self {
            bookmarks: BookmarkManager::new(storage),
            api,
            input: String::new(),
            input_error: None,
            repositories: Vec::new(),
            load_failure: None,
        };
        if let Ok(count) = view.reload() {
            info!(count, "dashboard initialized");
        }
        view
    }

    /// Reads the saved list again, replacing the in-memory one.
    ///
    /// Returns the number of bookmarks loaded. On failure the view stays
    /// locked and keeps its current list.
    pub fn reload(&mut self) -> Result<usize, StorageError> {
        match self.bookmarks.load() {
            Ok(repositories) => {
                self.repositories = repositories;
                self.load_failure = None;
                Ok(self.repositories.len())
            }
            Err(e) => {
                warn!(error = %e, "saved bookmarks unavailable, changes disabled");
                self.load_failure = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Why the saved list could not be read, while changes are disabled.
    pub fn load_failure(&self) -> Option<&str> {
        self.load_failure.as_deref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input<T: Into<String>>(&mut self, text: T) {
        self.input = text.into();
    }

    pub fn input_error(&self) -> Option<InputError> {
        self.input_error
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Looks up the current input and appends the result to the bookmarks.
    ///
    /// Returns `Ok(Some(repo))` when a repository was added and `Ok(None)` when
    /// the attempt ended in an inline [`InputError`]. `Err` means the view is
    /// locked (no lookup is made) or persisting the new list failed; the list,
    /// input and error slot are then left as they were.
    pub async fn submit_search(&mut self) -> Result<Option<Repository>, StorageError> {
        let identifier = self.input.trim().to_string();
        if identifier.is_empty() {
            self.input_error = Some(InputError::IdentifierRequired);
            return Ok(None);
        }
        self.ensure_loaded()?;

        let repository = match self.api.fetch_repository(&identifier).await {
            Ok(repository) => repository,
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "repository lookup failed");
                self.input_error = Some(InputError::from(e));
                return Ok(None);
            }
        };

        let mut next = self.repositories.clone();
        next.push(repository.clone());
        self.commit(next)?;

        info!(full_name = %repository.full_name, "repository bookmarked");
        self.input.clear();
        self.input_error = None;
        Ok(Some(repository))
    }

    /// Sets the input to `identifier` and submits it.
    pub async fn search(&mut self, identifier: &str) -> Result<Option<Repository>, StorageError> {
        self.set_input(identifier);
        self.submit_search().await
    }

    /// Removes every bookmark sharing `repository`'s identifier.
    pub fn remove_repository(&mut self, repository: &Repository) -> Result<usize, StorageError> {
        self.remove_by_identifier(&repository.full_name)
    }

    /// Removes every bookmark whose identifier equals `full_name`.
    ///
    /// Returns how many entries were dropped. The list is committed even when
    /// nothing matched.
    pub fn remove_by_identifier(&mut self, full_name: &str) -> Result<usize, StorageError> {
        let (next, removed) = bookmark_manager::remove_all(&self.repositories, full_name);
        self.commit(next)?;
        debug!(full_name, removed, "bookmarks removed");
        Ok(removed)
    }

    /// Route of the detail view for `repository`.
    pub fn detail_route(repository: &Repository) -> Route {
        Route::Repository(repository.full_name.clone())
    }

    /// Rows of the bookmark list as they are displayed.
    pub fn entries(&self) -> Vec<ListEntry> {
        self.repositories
            .iter()
            .map(|r| ListEntry {
                full_name: r.full_name.clone(),
                description: r.description.clone(),
                avatar_url: r.owner.avatar_url.clone(),
                avatar_alt: r.owner.login.clone(),
                route: Self::detail_route(r).path(),
            })
            .collect()
    }

    /// Plain-text rendition of the dashboard.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(TITLE);
        out.push_str("\n\n");

        let shown = if self.input.is_empty() {
            INPUT_PLACEHOLDER
        } else {
            self.input.as_str()
        };
        out.push_str(&format!("[ {} ] [Search]\n", shown));

        if let Some(error) = self.input_error {
            out.push_str(&format!("! {}\n", error));
        }
        if let Some(failure) = &self.load_failure {
            out.push_str(&format!("! {}\n", StorageError::Unavailable(failure.clone())));
        }

        for entry in self.entries() {
            out.push('\n');
            out.push_str(&format!("  {} ({})\n", entry.avatar_url, entry.avatar_alt));
            out.push_str(&format!("  {}\n", entry.full_name));
            if !entry.description.is_empty() {
                out.push_str(&format!("  {}\n", entry.description));
            }
            out.push_str(&format!("  [Delete] [Access {}]\n", entry.route));
        }

        out
    }

    fn ensure_loaded(&self) -> Result<(), StorageError> {
        match &self.load_failure {
            Some(failure) => Err(StorageError::Unavailable(failure.clone())),
            None => Ok(()),
        }
    }

    // Persist first so a failed write never leaves memory ahead of storage.
    fn commit(&mut self, next: Vec<Repository>) -> Result<(), StorageError> {
        self.ensure_loaded()?;
        self.bookmarks.commit(&next)?;
        self.repositories = next;
        Ok(())
    }
}
