//! GitHub Explorer database layer.
//!
//! Provides the SQLite connection and schema migrations behind
//! [`SqliteStorage`](crate::services::local_storage::SqliteStorage).
//!
//! # Usage
//!
//! ```no_run
//! use github_explorer::database::Database;
//!
//! let db = Database::open("github-explorer.db").expect("failed to open database");
//! let db = Database::open_in_memory().expect("failed to open in-memory database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
