// GitHub Explorer Settings Engine
// Loads, edits and saves the application settings.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ExplorerSettings;

/// Environment variable holding an API token.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";
/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "GITHUB_EXPLORER_API_URL";
/// Shown instead of a configured token.
pub const REDACTED: &str = "<redacted>";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ExplorerSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ExplorerSettings;
    /// Reads one setting by dot key, or all of them for an empty key.
    /// The token is always redacted.
    fn get_value(&self, key: &str) -> Result<Value, SettingsError>;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists settings as JSON on disk.
///
/// Holds only what is in the file; environment overrides are applied to a
/// copy by [`SettingsEngine::effective_settings`] and never saved.
pub struct SettingsEngine {
    config_path: String,
    settings: ExplorerSettings,
}

impl SettingsEngine {
    /// Uses `path_override` when given, otherwise `settings.json` in the
    /// platform config directory.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: ExplorerSettings::default(),
        }
    }

    /// The loaded settings with environment overrides on top.
    pub fn effective_settings(&self) -> ExplorerSettings {
        let mut settings = self.settings.clone();
        apply_overrides(&mut settings, |key| std::env::var(key).ok());
        settings
    }
}

/// Overlays `GITHUB_TOKEN` and `GITHUB_EXPLORER_API_URL` onto `settings`.
///
/// Empty values are ignored.
pub fn apply_overrides<F>(settings: &mut ExplorerSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    if let Some(token) = non_empty(ENV_TOKEN) {
        debug!("using API token from {}", ENV_TOKEN);
        settings.api.token = Some(token);
    }
    if let Some(url) = non_empty(ENV_API_URL) {
        debug!(%url, "using API base URL from {}", ENV_API_URL);
        settings.api.base_url = url;
    }
}

/// Parses a command-line value: JSON when it parses, a plain string otherwise.
///
/// `10` becomes a number, `null` clears an optional setting, `JsonFile` stays
/// a string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn to_json(settings: &ExplorerSettings) -> Result<Value, SettingsError> {
    serde_json::to_value(settings).map_err(|e| {
        SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
    })
}

/// Turns `api.base_url` into the JSON pointer `/api/base_url`.
fn pointer(key: &str) -> Result<String, SettingsError> {
    if key.contains('/') || key.contains('~') || key.split('.').any(str::is_empty) {
        return Err(SettingsError::InvalidKey(format!("Malformed key '{}'", key)));
    }
    Ok(format!("/{}", key.replace('.', "/")))
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    fn load(&mut self) -> Result<ExplorerSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            info!(path = %self.config_path, "no settings file, using defaults");
            self.settings = ExplorerSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Ok(self.settings.clone())
    }

    /// Writes the current settings next to the target and renames it into place.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| {
            SettingsError::IoError(format!("Failed to create config directory: {}", e))
        })?;

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let io_err =
            |e: std::io::Error| SettingsError::IoError(format!("Failed to write config file: {}", e));
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(json.as_bytes()).map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;

        info!(path = %self.config_path, "settings saved");
        Ok(())
    }

    fn get_settings(&self) -> &ExplorerSettings {
        &self.settings
    }

    fn get_value(&self, key: &str) -> Result<Value, SettingsError> {
        let mut json = to_json(&self.settings)?;
        if let Some(token) = json.pointer_mut("/api/token").filter(|t| !t.is_null()) {
            *token = Value::String(REDACTED.to_string());
        }
        if key.is_empty() {
            return Ok(json);
        }
        json.pointer(&pointer(key)?)
            .cloned()
            .ok_or_else(|| SettingsError::InvalidKey(format!("Key '{}' not found in settings", key)))
    }

    /// Updates one setting addressed by a dot key and saves.
    ///
    /// Only existing keys can be set; the result must still deserialize as
    /// [`ExplorerSettings`]. Nothing changes on error.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }
        let not_found = || SettingsError::InvalidKey(format!("Key '{}' not found in settings", key));

        let mut json = to_json(&self.settings)?;
        let (parent, leaf) = key.rsplit_once('.').unwrap_or(("", key));
        let parent_ptr = if parent.is_empty() { String::new() } else { pointer(parent)? };

        match json.pointer_mut(&parent_ptr) {
            Some(Value::Object(map)) if map.contains_key(leaf) => {
                map.insert(leaf.to_string(), value);
            }
            _ => return Err(not_found()),
        }

        let next: ExplorerSettings = serde_json::from_value(json).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        let previous = std::mem::replace(&mut self.settings, next);
        if let Err(e) = self.save() {
            self.settings = previous;
            return Err(e);
        }
        debug!(key, "setting updated");
        Ok(())
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ExplorerSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
