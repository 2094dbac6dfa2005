// GitHub Explorer platform paths
// Config and data directories per OS, selected with `cfg(target_os)`.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "github-explorer";

/// Environment variable that overrides the data directory on every platform.
pub const ENV_DATA_DIR: &str = "GITHUB_EXPLORER_DATA_DIR";

fn home() -> PathBuf {
    #[cfg(target_os = "windows")]
    let var = "USERPROFILE";
    #[cfg(not(target_os = "windows"))]
    let var = "HOME";
    PathBuf::from(env::var(var).unwrap_or_else(|_| String::from(".")))
}

/// Returns the configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/github-explorer` or `~/.config/github-explorer`
/// - **macOS**: `~/Library/Application Support/github-explorer`
/// - **Windows**: `%APPDATA%/github-explorer`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        home().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home().join("AppData").join("Roaming"))
            .join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home().join(".config"))
            .join(APP_DIR)
    }
}

/// Returns the data directory, honouring [`ENV_DATA_DIR`].
///
/// - **Linux**: `$XDG_DATA_HOME/github-explorer` or `~/.local/share/github-explorer`
/// - **macOS**: `~/Library/Application Support/github-explorer`
/// - **Windows**: `%LOCALAPPDATA%/github-explorer`
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(ENV_DATA_DIR) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    #[cfg(target_os = "macos")]
    {
        home().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        env::var("LOCALAPPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home().join("AppData").join("Local"))
            .join(APP_DIR)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home().join(".local").join("share"))
            .join(APP_DIR)
    }
}
