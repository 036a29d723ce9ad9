//! Grid Mapper Settings Crate
//!
//! Handles application configuration: editor defaults, storage location,
//! color history tuning and export defaults.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, ColorHistorySettings, Config, EditorSettings, ExportSettings,
    StorageBackend, StorageSettings,
};
pub use error::{SettingsError, SettingsResult};
