//! Settings errors: unreadable files, unknown extensions and values that
//! fail [`Config::validate`](crate::Config::validate).

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// A value outside what the editor accepts, keyed by `section.field`.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// Config files must end in `.toml` or `.json`.
    #[error("Unsupported config file extension: {0}")]
    UnsupportedFormat(String),

    #[error("No config directory on this platform")]
    NoConfigDirectory,

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

impl SettingsError {
    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        SettingsError::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
