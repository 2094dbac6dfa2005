//! Tests for RepositoryBookmarkView: search, removal, persistence and rendering.
//!
//! The repository API is replaced by an in-process stub and storage by
//! `MemoryStorage`, shared through an `Arc` so the test can inspect what was
//! persisted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use github_explorer::managers::bookmark_manager::serialize;
use github_explorer::services::github_api::RepositoryApi;
use github_explorer::services::local_storage::{LocalStorage, MemoryStorage, REPOSITORIES_KEY};
use github_explorer::types::errors::{GitHubError, InputError, StorageError};
use github_explorer::types::repository::Repository;
use github_explorer::types::route::Route;
use github_explorer::ui::dashboard::RepositoryBookmarkView;

/// Resolves identifiers from a fixed table and counts calls.
#[derive(Default)]
struct StubApi {
    known: HashMap<String, Repository>,
    calls: AtomicUsize,
}

impl StubApi {
    fn with(repos: &[Repository]) -> Self {
        Self {
            known: repos.iter().map(|r| (r.full_name.clone(), r.clone())).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RepositoryApi for StubApi {
    async fn fetch_repository(&self, identifier: &str) -> Result<Repository, GitHubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known
            .get(identifier)
            .cloned()
            .ok_or_else(|| GitHubError::NotFound(identifier.to_string()))
    }
}

/// Memory storage whose first read fails, then behaves normally.
struct FirstReadFails {
    inner: MemoryStorage,
    failed: AtomicBool,
}

impl FirstReadFails {
    fn new(inner: MemoryStorage) -> Self {
        Self { inner, failed: AtomicBool::new(false) }
    }
}

impl LocalStorage for FirstReadFails {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            return Err(StorageError::IoError("disk unavailable".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }
}

type View = RepositoryBookmarkView<Arc<MemoryStorage>, StubApi>;

fn hello_world() -> Repository {
    Repository::new("octocat/Hello-World", "My first repo", "octocat", "https://x/a.png")
}

fn repo(full_name: &str) -> Repository {
    Repository::new(full_name, "", "owner", "https://x/o.png")
}

fn view_with(storage: MemoryStorage, known: &[Repository]) -> (View, Arc<MemoryStorage>) {
    let storage = Arc::new(storage);
    let view = RepositoryBookmarkView::new(storage.clone(), StubApi::with(known));
    (view, storage)
}

fn persisted(storage: &MemoryStorage) -> Option<String> {
    storage.get(REPOSITORIES_KEY).unwrap()
}

// ─── Initialize ───

#[test]
fn starts_empty_without_persisted_value() {
    let (view, _) = view_with(MemoryStorage::new(), &[]);
    assert!(view.repositories().is_empty());
    assert_eq!(view.input(), "");
    assert_eq!(view.input_error(), None);
}

#[test]
fn starts_from_persisted_value() {
    let list = vec![hello_world(), repo("c/d")];
    let stored = MemoryStorage::with_value(REPOSITORIES_KEY, &serialize(&list).unwrap());
    let (view, _) = view_with(stored, &[]);
    assert_eq!(view.repositories(), list.as_slice());
}

#[test]
fn malformed_persisted_value_starts_empty() {
    let stored = MemoryStorage::with_value(REPOSITORIES_KEY, "{\"oops\":");
    let (view, storage) = view_with(stored, &[]);
    assert!(view.repositories().is_empty());
    // Nothing is written until the first change.
    assert_eq!(persisted(&storage).as_deref(), Some("{\"oops\":"));
}

#[tokio::test]
async fn read_failure_locks_the_view_and_keeps_stored_bookmarks() {
    let list = vec![repo("a/b"), repo("c/d")];
    let stored_json = serialize(&list).unwrap();
    let storage = Arc::new(FirstReadFails::new(MemoryStorage::with_value(
        REPOSITORIES_KEY,
        &stored_json,
    )));
    let mut view = RepositoryBookmarkView::new(storage.clone(), StubApi::with(&[repo("e/f")]));

    assert!(view.repositories().is_empty());
    assert!(view.load_failure().unwrap().contains("disk unavailable"));
    assert!(view.render().contains("! Saved bookmarks could not be read"));

    let result = view.search("e/f").await;
    assert!(matches!(result, Err(StorageError::Unavailable(_))));
    assert_eq!(view.api().calls(), 0);
    assert!(matches!(
        view.remove_by_identifier("a/b"),
        Err(StorageError::Unavailable(_))
    ));
    assert_eq!(storage.inner.get(REPOSITORIES_KEY).unwrap(), Some(stored_json));

    // The store is readable again.
    assert_eq!(view.reload().unwrap(), 2);
    assert_eq!(view.load_failure(), None);
    assert_eq!(view.repositories(), list.as_slice());

    view.search("e/f").await.unwrap();
    assert_eq!(
        storage.inner.get(REPOSITORIES_KEY).unwrap(),
        Some(serialize(&[repo("a/b"), repo("c/d"), repo("e/f")]).unwrap())
    );
}

#[tokio::test]
async fn empty_input_is_still_validated_while_locked() {
    let storage = FirstReadFails::new(MemoryStorage::new());
    let mut view = RepositoryBookmarkView::new(storage, StubApi::default());
    assert!(view.load_failure().is_some());

    let added = view.search(" ").await;
    assert_eq!(added.unwrap(), None);
    assert_eq!(view.input_error(), Some(InputError::IdentifierRequired));
}

// ─── Submit search ───

#[tokio::test]
async fn empty_input_sets_validation_error_without_lookup() {
    let (mut view, storage) = view_with(MemoryStorage::new(), &[hello_world()]);

    let added = view.submit_search().await.unwrap();

    assert_eq!(added, None);
    assert_eq!(view.input_error(), Some(InputError::IdentifierRequired));
    assert_eq!(view.api().calls(), 0);
    assert!(view.repositories().is_empty());
    assert_eq!(persisted(&storage), None);
}

#[tokio::test]
async fn whitespace_input_counts_as_empty() {
    let (mut view, _) = view_with(MemoryStorage::new(), &[]);
    view.search("   ").await.unwrap();
    assert_eq!(view.input_error(), Some(InputError::IdentifierRequired));
    assert_eq!(view.api().calls(), 0);
}

#[tokio::test]
async fn resolved_identifier_is_appended_and_persisted() {
    let (mut view, storage) = view_with(MemoryStorage::new(), &[hello_world()]);

    view.set_input("octocat/Hello-World");
    let added = view.submit_search().await.unwrap();

    assert_eq!(added, Some(hello_world()));
    assert_eq!(view.repositories(), [hello_world()].as_slice());
    assert_eq!(view.input(), "");
    assert_eq!(view.input_error(), None);
    assert_eq!(view.api().calls(), 1);
    assert_eq!(persisted(&storage), Some(serialize(&[hello_world()]).unwrap()));
}

#[tokio::test]
async fn identifier_is_trimmed_before_lookup() {
    let (mut view, _) = view_with(MemoryStorage::new(), &[hello_world()]);
    let added = view.search("  octocat/Hello-World \n").await.unwrap();
    assert_eq!(added, Some(hello_world()));
}

#[tokio::test]
async fn success_clears_previous_error() {
    let (mut view, _) = view_with(MemoryStorage::new(), &[hello_world()]);

    view.search("").await.unwrap();
    assert_eq!(view.input_error(), Some(InputError::IdentifierRequired));

    view.search("octocat/Hello-World").await.unwrap();
    assert_eq!(view.input_error(), None);
}

#[tokio::test]
async fn unresolved_identifier_sets_lookup_error() {
    let list = vec![repo("a/b")];
    let stored = MemoryStorage::with_value(REPOSITORIES_KEY, &serialize(&list).unwrap());
    let (mut view, storage) = view_with(stored, &[]);

    let added = view.search("octocat/missing").await.unwrap();

    assert_eq!(added, None);
    assert_eq!(view.input_error(), Some(InputError::RepositoryNotFound));
    assert_eq!(view.repositories(), list.as_slice());
    assert_eq!(view.input(), "octocat/missing");
    assert_eq!(persisted(&storage), Some(serialize(&list).unwrap()));
}

#[tokio::test]
async fn errors_overwrite_each_other() {
    let (mut view, _) = view_with(MemoryStorage::new(), &[]);

    view.search("octocat/missing").await.unwrap();
    assert_eq!(view.input_error(), Some(InputError::RepositoryNotFound));

    view.search("").await.unwrap();
    assert_eq!(view.input_error(), Some(InputError::IdentifierRequired));
}

#[tokio::test]
async fn same_identifier_twice_is_bookmarked_twice() {
    let (mut view, _) = view_with(MemoryStorage::new(), &[hello_world()]);
    view.search("octocat/Hello-World").await.unwrap();
    view.search("octocat/Hello-World").await.unwrap();
    assert_eq!(view.repositories().len(), 2);
}

#[tokio::test]
async fn additions_preserve_insertion_order() {
    let known = [repo("a/1"), repo("a/2"), repo("a/3")];
    let (mut view, _) = view_with(MemoryStorage::new(), &known);
    for name in ["a/2", "a/1", "a/3"] {
        view.search(name).await.unwrap();
    }
    let names: Vec<&str> = view.repositories().iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, ["a/2", "a/1", "a/3"]);
}

#[tokio::test]
async fn failed_write_on_add_changes_nothing() {
    let (mut view, storage) = view_with(MemoryStorage::new(), &[hello_world()]);
    storage.reject_writes(true);

    view.set_input("octocat/Hello-World");
    let result = view.submit_search().await;

    assert!(matches!(result, Err(StorageError::WriteRejected(_))));
    assert!(view.repositories().is_empty());
    assert_eq!(view.input(), "octocat/Hello-World");
    assert_eq!(persisted(&storage), None);
}

// ─── Remove ───

#[tokio::test]
async fn remove_drops_all_matching_entries() {
    let list = vec![repo("a/b"), repo("a/b"), repo("c/d")];
    let stored = MemoryStorage::with_value(REPOSITORIES_KEY, &serialize(&list).unwrap());
    let (mut view, storage) = view_with(stored, &[]);

    let removed = view.remove_repository(&repo("a/b")).unwrap();

    assert_eq!(removed, 2);
    assert_eq!(view.repositories(), [repo("c/d")].as_slice());
    assert_eq!(persisted(&storage), Some(serialize(&[repo("c/d")]).unwrap()));
}

#[test]
fn remove_unknown_identifier_rewrites_same_list() {
    let list = vec![repo("a/b")];
    let stored = MemoryStorage::with_value(REPOSITORIES_KEY, &serialize(&list).unwrap());
    let (mut view, storage) = view_with(stored, &[]);

    assert_eq!(view.remove_by_identifier("x/y").unwrap(), 0);
    assert_eq!(view.repositories(), list.as_slice());
    assert_eq!(persisted(&storage), Some(serialize(&list).unwrap()));
}

#[test]
fn failed_write_on_remove_changes_nothing() {
    let list = vec![repo("a/b"), repo("c/d")];
    let stored_json = serialize(&list).unwrap();
    let (mut view, storage) = view_with(MemoryStorage::with_value(REPOSITORIES_KEY, &stored_json), &[]);
    storage.reject_writes(true);

    assert!(view.remove_by_identifier("a/b").is_err());
    assert_eq!(view.repositories(), list.as_slice());
    assert_eq!(persisted(&storage), Some(stored_json));
}

#[tokio::test]
async fn storage_matches_memory_after_every_change() {
    let known = [hello_world(), repo("c/d")];
    let (mut view, storage) = view_with(MemoryStorage::new(), &known);

    view.search("octocat/Hello-World").await.unwrap();
    assert_eq!(persisted(&storage), Some(serialize(view.repositories()).unwrap()));
    view.search("c/d").await.unwrap();
    assert_eq!(persisted(&storage), Some(serialize(view.repositories()).unwrap()));
    view.search("octocat/Hello-World").await.unwrap();
    assert_eq!(persisted(&storage), Some(serialize(view.repositories()).unwrap()));
    view.remove_by_identifier("octocat/Hello-World").unwrap();
    assert_eq!(persisted(&storage), Some(serialize(view.repositories()).unwrap()));
    assert_eq!(view.repositories(), [repo("c/d")].as_slice());
}

#[tokio::test]
async fn bookmarks_survive_a_new_view_on_the_same_storage() {
    let storage = Arc::new(MemoryStorage::new());
    {
        let mut view = RepositoryBookmarkView::new(storage.clone(), StubApi::with(&[hello_world()]));
        view.search("octocat/Hello-World").await.unwrap();
    }
    let view = RepositoryBookmarkView::new(storage, StubApi::default());
    assert_eq!(view.repositories(), [hello_world()].as_slice());
}

// ─── Navigate and render ───

#[test]
fn detail_route_uses_identifier() {
    assert_eq!(
        View::detail_route(&hello_world()),
        Route::Repository("octocat/Hello-World".to_string())
    );
    assert_eq!(
        View::detail_route(&hello_world()).path(),
        "/repositories/octocat/Hello-World"
    );
}

#[tokio::test]
async fn render_shows_form_error_and_entries() {
    let (mut view, _) = view_with(MemoryStorage::new(), &[hello_world()]);
    view.search("octocat/Hello-World").await.unwrap();
    view.search("nope/nope").await.unwrap();

    let text = view.render();
    assert!(text.contains("Explore repositories on Github."));
    assert!(text.contains("[ nope/nope ] [Search]"));
    assert!(text.contains("! Repository not found."));
    assert!(text.contains("https://x/a.png (octocat)"));
    assert!(text.contains("My first repo"));
    assert!(text.contains("[Access /repositories/octocat/Hello-World]"));
}

#[test]
fn render_empty_view_shows_placeholder() {
    let (view, _) = view_with(MemoryStorage::new(), &[]);
    let text = view.render();
    assert!(text.contains("[ Type the repository name... ] [Search]"));
    assert!(!text.contains('!'));
}

#[tokio::test]
async fn entries_mirror_repositories() {
    let (mut view, _) = view_with(MemoryStorage::new(), &[hello_world()]);
    view.search("octocat/Hello-World").await.unwrap();
    let entries = view.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].full_name, "octocat/Hello-World");
    assert_eq!(entries[0].avatar_alt, "octocat");
    assert_eq!(entries[0].route, "/repositories/octocat/Hello-World");
}
