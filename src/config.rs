//! Configuration file support for picklist.
//!
//! Configuration is loaded from `~/.config/picklist/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PICKLIST_CONFIG`)
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/picklist/config.toml
//! identity = "key"                      # or "reference"
//! on_options_change = "reset-highlight" # or "keep", "reset"
//!
//! [[options]]
//! label = "First"
//! value = 1
//!
//! [[options]]
//! label = "Second"
//! value = { id = 2, tags = ["b"] }
//! key = "second"
//!
//! [[fields]]
//! title = "Tags"
//! mode = "multiple"
//! initial = ["First"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::log;
use crate::select::{Identity, Mode, OptionRef, OptionsChange, SelectOption};

const CONFIG_ENV: &str = "PICKLIST_CONFIG";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How options are compared for membership
    pub identity: Identity,

    /// What fields do when their option list changes
    pub on_options_change: OptionsChange,

    /// Options shared by every field
    pub options: Vec<OptionConfig>,

    /// Fields shown by the host, top to bottom
    pub fields: Vec<FieldConfig>,
}

/// One option entry
#[derive(Debug, Clone, Deserialize)]
pub struct OptionConfig {
    pub label: String,

    /// Opaque payload
    #[serde(default)]
    pub value: Value,

    /// Stable key, defaults to the label
    #[serde(default)]
    pub key: Option<String>,
}

/// One select field
#[derive(Debug, Clone, Deserialize)]
pub struct FieldConfig {
    pub title: String,

    pub mode: Mode,

    /// Keys of preselected options. Single fields use the first entry.
    #[serde(default)]
    pub initial: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let labels = ["First", "Second", "Third", "Fourth", "Fifth"];
        Self {
            identity: Identity::default(),
            on_options_change: OptionsChange::default(),
            options: labels
                .iter()
                .zip(1..)
                .map(|(label, value)| OptionConfig {
                    label: label.to_string(),
                    value: Value::from(value),
                    key: None,
                })
                .collect(),
            fields: vec![
                FieldConfig {
                    title: "Multiple".to_string(),
                    mode: Mode::Multiple,
                    initial: vec!["First".to_string()],
                },
                FieldConfig {
                    title: "Single".to_string(),
                    mode: Mode::Single,
                    initial: vec!["First".to_string()],
                },
            ],
        }
    }
}

impl OptionConfig {
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.label)
    }

    /// Build a fresh option allocation.
    pub fn build(&self) -> OptionRef {
        SelectOption::new(self.label.clone(), self.value.clone())
            .with_key(self.key())
            .shared()
    }
}

impl Config {
    /// Load configuration, falling back to defaults.
    ///
    /// Uses `path` if given, then `$PICKLIST_CONFIG`, then the default path.
    /// A missing file yields defaults; an unreadable or malformed one yields
    /// defaults and a warning.
    pub fn load(path: Option<PathBuf>) -> Self {
        let config_path = path
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(Self::config_path);

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => {
                log::log(&format!("Loaded config from {}", config_path.display()));
                config
            }
            Err(e) => {
                eprintln!("Warning: {}", e);
                log::log(&format!("Using default config: {}", e));
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("picklist")
            .join("config.toml")
    }

    /// Build the option list as fresh allocations.
    pub fn build_options(&self) -> Vec<OptionRef> {
        self.options.iter().map(OptionConfig::build).collect()
    }
}
