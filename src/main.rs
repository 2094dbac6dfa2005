//! GitHub Explorer command line front-end.
//!
//! Each invocation performs one dashboard action against the persisted
//! bookmark list, or reads and edits the settings file, and prints the outcome.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use github_explorer::app::{App, AppOptions};
use github_explorer::logging;
use github_explorer::services::github_api::RepositoryApi;
use github_explorer::services::local_storage::LocalStorage;
use github_explorer::services::settings_engine::{parse_value, SettingsEngine, SettingsEngineTrait};
use github_explorer::types::errors::StorageError;
use github_explorer::ui::dashboard::RepositoryBookmarkView;

#[derive(Debug, Parser)]
#[command(name = "github-explorer", version, about = "Explore repositories on GitHub")]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Directory holding the bookmark storage
    #[arg(long, global = true, env = "GITHUB_EXPLORER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(flatten)]
    Bookmarks(BookmarkCommand),
    /// Read or change settings
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
enum BookmarkCommand {
    /// Look up a repository and bookmark it
    Add {
        /// Repository identifier, `owner/name`
        identifier: String,
    },
    /// List bookmarked repositories
    List,
    /// Remove every bookmark with this identifier
    Remove { identifier: String },
    /// Print the detail route of a bookmarked repository
    Open { identifier: String },
    /// Print the whole dashboard
    Show,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print one setting (dot key such as `api.base_url`) or all of them
    Get { key: Option<String> },
    /// Change a setting; the value is parsed as JSON when possible
    Set { key: String, value: String },
    /// Restore the default settings
    Reset,
    /// Print the settings file location
    Path,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    let mut out = io::stdout().lock();

    let result = match cli.command {
        Command::Config { action } => {
            let mut engine = SettingsEngine::new(cli.config);
            run_config(&mut engine, action, &mut out)
        }
        Command::Bookmarks(command) => {
            let options = AppOptions {
                config_path: cli.config,
                data_dir: cli.data_dir,
            };
            match App::new(options) {
                Ok(mut app) => run(&mut app.dashboard, command, &mut out).await,
                Err(e) => Err(e.to_string()),
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn io_error(e: io::Error) -> String {
    e.to_string()
}

async fn run<S, A>(
    dashboard: &mut RepositoryBookmarkView<S, A>,
    command: BookmarkCommand,
    out: &mut impl Write,
) -> Result<(), String>
where
    S: LocalStorage,
    A: RepositoryApi,
{
    if let Some(failure) = dashboard.load_failure() {
        return Err(StorageError::Unavailable(failure.to_string()).to_string());
    }

    match command {
        BookmarkCommand::Add { identifier } => {
            let added = dashboard.search(&identifier).await.map_err(|e| e.to_string())?;
            match (added, dashboard.input_error()) {
                (Some(repository), _) => {
                    writeln!(out, "added {}", repository.full_name).map_err(io_error)
                }
                (None, Some(error)) => Err(error.to_string()),
                (None, None) => Ok(()),
            }
        }
        BookmarkCommand::List => {
            for repository in dashboard.repositories() {
                let written = if repository.description.is_empty() {
                    writeln!(out, "{}", repository.full_name)
                } else {
                    writeln!(out, "{}\t{}", repository.full_name, repository.description)
                };
                written.map_err(io_error)?;
            }
            Ok(())
        }
        BookmarkCommand::Remove { identifier } => {
            let removed = dashboard
                .remove_by_identifier(&identifier)
                .map_err(|e| e.to_string())?;
            writeln!(out, "removed {} bookmark(s)", removed).map_err(io_error)
        }
        BookmarkCommand::Open { identifier } => {
            let repository = dashboard
                .repositories()
                .iter()
                .find(|r| r.full_name == identifier)
                .ok_or_else(|| format!("{} is not bookmarked", identifier))?;
            let route = RepositoryBookmarkView::<S, A>::detail_route(repository);
            writeln!(out, "{}", route).map_err(io_error)
        }
        BookmarkCommand::Show => write!(out, "{}", dashboard.render()).map_err(io_error),
    }
}

fn run_config(
    engine: &mut SettingsEngine,
    action: ConfigCommand,
    out: &mut impl Write,
) -> Result<(), String> {
    match action {
        // Reset works even when the current file no longer parses.
        ConfigCommand::Reset => {
            engine.reset().map_err(|e| e.to_string())?;
            writeln!(out, "settings reset: {}", engine.get_config_path()).map_err(io_error)
        }
        ConfigCommand::Path => writeln!(out, "{}", engine.get_config_path()).map_err(io_error),
        ConfigCommand::Get { key } => {
            engine.load().map_err(|e| e.to_string())?;
            let value = engine
                .get_value(key.as_deref().unwrap_or(""))
                .map_err(|e| e.to_string())?;
            let text = match value {
                serde_json::Value::String(s) => s,
                other => serde_json::to_string_pretty(&other).map_err(|e| e.to_string())?,
            };
            writeln!(out, "{}", text).map_err(io_error)
        }
        ConfigCommand::Set { key, value } => {
            engine.load().map_err(|e| e.to_string())?;
            engine
                .set_value(&key, parse_value(&value))
                .map_err(|e| e.to_string())?;
            writeln!(out, "{} updated", key).map_err(io_error)
        }
    }
}
