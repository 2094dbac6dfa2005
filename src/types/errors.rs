use std::fmt;

// === InputError ===

/// Field-level errors shown inline next to the search form.
///
/// Only one is visible at a time; setting one replaces the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The search was submitted with an empty identifier.
    IdentifierRequired,
    /// The repository lookup failed for any reason.
    RepositoryNotFound,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::IdentifierRequired => write!(f, "Inform author/repository."),
            InputError::RepositoryNotFound => write!(f, "Repository not found."),
        }
    }
}

impl std::error::Error for InputError {}

impl From<GitHubError> for InputError {
    fn from(_: GitHubError) -> Self {
        InputError::RepositoryNotFound
    }
}

// === StorageError ===

/// Errors related to reading or writing the local key-value storage.
#[derive(Debug)]
pub enum StorageError {
    /// An I/O error occurred on a file-backed store.
    IoError(String),
    /// The stored value could not be serialized or parsed.
    SerializationError(String),
    /// Database operation failed.
    DatabaseError(String),
    /// The store refused the write (quota, read-only store).
    WriteRejected(String),
    /// The saved list could not be read, so it must not be overwritten.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::IoError(msg) => write!(f, "Storage I/O error: {}", msg),
            StorageError::SerializationError(msg) => {
                write!(f, "Storage serialization error: {}", msg)
            }
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
            StorageError::WriteRejected(key) => write!(f, "Storage write rejected: {}", key),
            StorageError::Unavailable(cause) => {
                write!(f, "Saved bookmarks could not be read: {}", cause)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === GitHubError ===

/// Errors related to the GitHub repository API.
#[derive(Debug)]
pub enum GitHubError {
    /// The API answered 404 for the identifier.
    NotFound(String),
    /// A network error occurred while communicating with GitHub.
    NetworkError(String),
    /// The GitHub API returned a non-success status.
    ApiError(String),
    /// The response body did not match the expected shape.
    InvalidResponse(String),
    /// The HTTP client could not be configured.
    ClientError(String),
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitHubError::NotFound(id) => write!(f, "GitHub repository not found: {}", id),
            GitHubError::NetworkError(msg) => write!(f, "GitHub network error: {}", msg),
            GitHubError::ApiError(msg) => write!(f, "GitHub API error: {}", msg),
            GitHubError::InvalidResponse(msg) => {
                write!(f, "GitHub invalid response: {}", msg)
            }
            GitHubError::ClientError(msg) => write!(f, "GitHub client error: {}", msg),
        }
    }
}

impl std::error::Error for GitHubError {}
