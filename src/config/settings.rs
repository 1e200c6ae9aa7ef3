//! Configuration settings for datefixer.
//!
//! Settings are loaded from `~/.datefixer/config.yaml`. Every field has a
//! default, so a partial file (or none at all) is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::DateFixerError;
use crate::store::{MessageSchema, ShiftScope};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Where timestamps live in the message store.
    pub store: StoreConfig,
    /// Shift behavior.
    pub shift: ShiftConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Directory the file picker starts in. Defaults to the home directory.
    #[serde(default)]
    pub start_dir: Option<PathBuf>,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to `colored`'s global switch.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Message store layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Table holding the messages.
    #[serde(default = "default_table")]
    pub table: String,
    /// Integer epoch timestamp column.
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
}

/// Shift behavior settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShiftConfig {
    /// Rows an update applies to: `all` or `future`.
    pub scope: ShiftScope,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_table() -> String {
    crate::store::MessageSchema::default().table().to_string()
}

fn default_timestamp_column() -> String {
    crate::store::MessageSchema::default()
        .timestamp_column()
        .to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            start_dir: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            timestamp_column: default_timestamp_column(),
        }
    }
}

impl StoreConfig {
    /// Validate the configured names into a schema.
    ///
    /// # Errors
    ///
    /// Returns `DateFixerError::Schema` if a name is not a plain identifier.
    pub fn schema(&self) -> Result<MessageSchema, DateFixerError> {
        MessageSchema::new(&self.table, &self.timestamp_column)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, DateFixerError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, DateFixerError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            DateFixerError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            DateFixerError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), DateFixerError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), DateFixerError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            DateFixerError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, DateFixerError> {
        serde_yaml::to_string(self)
            .map_err(|e| DateFixerError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Directory the file picker starts in.
    #[must_use]
    pub fn start_dir(&self) -> PathBuf {
        self.general
            .start_dir
            .clone()
            .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert!(config.general.start_dir.is_none());
        assert_eq!(config.store.table, "Messages");
        assert_eq!(config.store.timestamp_column, "timestamp");
        assert_eq!(config.shift.scope, ShiftScope::All);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.shift.scope, ShiftScope::All);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.store.table = "message".to_string();
        config.shift.scope = ShiftScope::Future;
        config.general.start_dir = Some(PathBuf::from("/data/chats"));

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.store.table, "message");
        assert_eq!(loaded.shift.scope, ShiftScope::Future);
        assert_eq!(loaded.start_dir(), PathBuf::from("/data/chats"));
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        // Write a partial config (only some fields)
        let partial_yaml = r#"
shift:
  scope: future
store:
  timestamp_column: sent_at
"#;
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        // Custom values should be loaded
        assert_eq!(config.shift.scope, ShiftScope::Future);
        assert_eq!(config.store.timestamp_column, "sent_at");
        // Defaults should be used for missing fields
        assert_eq!(config.store.table, "Messages");
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "shift:\n  scope: sideways\n").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, DateFixerError::Config(_)));
    }

    #[test]
    fn test_store_schema_validation() {
        let mut store = StoreConfig::default();
        assert!(store.schema().is_ok());

        store.table = "Messages; --".to_string();
        assert!(matches!(store.schema(), Err(DateFixerError::Schema(_))));
    }
}
