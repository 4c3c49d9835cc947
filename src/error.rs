//! Error types for picklist
//!
//! - `ConfigError` for loading the configuration file
//! - `PicklistError` as the top-level error type
//!
//! The select control itself has no failure modes; these cover the
//! terminal host around it.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for picklist
#[derive(Debug, Error)]
pub enum PicklistError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Field '{0}' preselects unknown option '{1}'")]
    UnknownInitial(String, String),
}

/// Result type alias for PicklistError
pub type Result<T> = std::result::Result<T, PicklistError>;

