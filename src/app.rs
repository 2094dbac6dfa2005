//! App Core for GitHub Explorer.
//!
//! Loads settings, opens the configured storage back-end and builds the
//! dashboard view on top of them.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::database::Database;
use crate::platform;
use crate::services::github_api::GitHubClient;
use crate::services::local_storage::{JsonFileStorage, LocalStorage, SqliteStorage};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::StorageError;
use crate::types::settings::{StorageBackend, StorageSettings};
use crate::ui::dashboard::RepositoryBookmarkView;

/// Dashboard over whichever storage back-end the settings select.
pub type Dashboard = RepositoryBookmarkView<Box<dyn LocalStorage>, GitHubClient>;

/// Start-up overrides, usually taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Settings file to use instead of the platform default.
    pub config_path: Option<String>,
    /// Directory for the storage file; takes precedence over `storage.path`.
    pub data_dir: Option<PathBuf>,
}

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub dashboard: Dashboard,
}

impl App {
    /// Loads settings, applies environment overrides and opens storage.
    ///
    /// A malformed settings file is an error rather than a silent reset. An
    /// unreadable bookmark store leaves the dashboard locked, see
    /// [`RepositoryBookmarkView::load_failure`].
    pub fn new(options: AppOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(options.config_path);
        settings_engine.load()?;

        let settings = settings_engine.effective_settings();
        let storage = open_storage(&settings.storage, options.data_dir)?;
        let client = GitHubClient::new(&settings.api)?;
        info!(api = %client.base_url(), backend = ?settings.storage.backend, "app initialized");
        let dashboard = RepositoryBookmarkView::new(storage, client);

        Ok(Self {
            settings_engine,
            dashboard,
        })
    }
}

/// Resolves the storage location for `settings`.
pub fn storage_path(settings: &StorageSettings, data_dir: Option<PathBuf>) -> PathBuf {
    let file_name = settings.backend.default_file_name();
    match (data_dir, settings.path.as_deref()) {
        (Some(dir), _) => dir.join(file_name),
        (None, Some(path)) => PathBuf::from(path),
        (None, None) => platform::get_data_dir().join(file_name),
    }
}

/// Opens the storage back-end selected in `settings`.
pub fn open_storage(
    settings: &StorageSettings,
    data_dir: Option<PathBuf>,
) -> Result<Box<dyn LocalStorage>, StorageError> {
    let path = storage_path(settings, data_dir);
    info!(path = %path.display(), "opening local storage");

    match settings.backend {
        StorageBackend::Sqlite => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::IoError(format!("Failed to create data directory: {}", e))
                })?;
            }
            let db = Database::open(&path)?;
            Ok(Box::new(SqliteStorage::new(Arc::new(db))))
        }
        StorageBackend::JsonFile => Ok(Box::new(JsonFileStorage::new(path))),
    }
}
