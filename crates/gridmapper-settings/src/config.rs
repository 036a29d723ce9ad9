//! Configuration and settings management for Grid Mapper
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Editor defaults (grid size, cell size, starting tool, shape, size and color)
//! - Storage (backend and data directory)
//! - Color history (recent list cap, debounce window)
//! - Export defaults (format, output directory, JPEG quality)

use crate::error::{SettingsError, SettingsResult};
use gridmapper_core::constants::{
    COLOR_HISTORY_DEBOUNCE_MS, DEFAULT_CELL_SIZE, DEFAULT_COLOR, DEFAULT_GRID_HEIGHT,
    DEFAULT_GRID_WIDTH, MAX_CELL_SIZE, MAX_GRID_DIMENSION, MAX_RECENT_COLORS, MIN_CELL_SIZE,
    MIN_GRID_DIMENSION,
};
use gridmapper_core::{HexColor, ShapeKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "gridmapper";
const CONFIG_FILE: &str = "config.toml";

const TOOLS: [&str; 4] = ["select", "place", "text", "erase"];
const SIZES: [&str; 6] = ["tiny", "small", "medium", "large", "huge", "gargantuan"];
const EXPORT_FORMATS: [&str; 3] = ["png", "jpeg", "pdf"];

/// Editor defaults for a fresh session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Grid width in cells
    pub grid_width: u32,
    /// Grid height in cells
    pub grid_height: u32,
    /// Rendered cell size in pixels
    pub cell_size: u32,
    /// Starting paint color, `#rrggbb`
    pub default_color: String,
    /// Starting tool id (select, place, text, erase)
    pub default_tool: String,
    /// Starting shape id; `None` starts with no shape selected
    pub default_shape: Option<String>,
    /// Starting size category id
    pub default_size: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            default_color: DEFAULT_COLOR.to_string(),
            default_tool: "place".to_string(),
            default_shape: Some("wall".to_string()),
            default_size: "medium".to_string(),
        }
    }
}

/// Where maps, notes and preferences are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON files under the data directory
    #[default]
    File,
    /// Nothing survives the process
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory holding the JSON collections
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR),
        }
    }
}

/// Color history tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorHistorySettings {
    /// Unfavorited colors kept before the oldest is evicted
    pub max_recent: usize,
    /// Quiet period before a picked color is recorded, in milliseconds
    pub debounce_ms: u64,
}

impl Default for ColorHistorySettings {
    fn default() -> Self {
        Self {
            max_recent: MAX_RECENT_COLORS,
            debounce_ms: COLOR_HISTORY_DEBOUNCE_MS,
        }
    }
}

/// Export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// png, jpeg or pdf
    pub format: String,
    pub output_dir: PathBuf,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: "png".to_string(),
            output_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            jpeg_quality: 95,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections and keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub storage: StorageSettings,
    pub color_history: ColorHistorySettings,
    pub export: ExportSettings,
}

/// `<config dir>/gridmapper/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or(SettingsError::NoConfigDirectory)
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let editor = &self.editor;
        for (key, value) in [
            ("editor.grid_width", editor.grid_width),
            ("editor.grid_height", editor.grid_height),
        ] {
            if !(MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&value) {
                return Err(SettingsError::invalid(
                    key,
                    format!("{value} is outside {MIN_GRID_DIMENSION}..={MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&editor.cell_size) {
            return Err(SettingsError::invalid(
                "editor.cell_size",
                format!("{} is outside {MIN_CELL_SIZE}..={MAX_CELL_SIZE}", editor.cell_size),
            ));
        }
        editor
            .default_color
            .parse::<HexColor>()
            .map_err(|e| SettingsError::invalid("editor.default_color", e.to_string()))?;
        one_of("editor.default_tool", &editor.default_tool, &TOOLS)?;
        one_of("editor.default_size", &editor.default_size, &SIZES)?;
        if let Some(shape) = &editor.default_shape {
            shape
                .parse::<ShapeKind>()
                .map_err(|e| SettingsError::invalid("editor.default_shape", e.to_string()))?;
        }

        if self.color_history.max_recent == 0 {
            return Err(SettingsError::invalid("color_history.max_recent", "must be > 0"));
        }

        one_of("export.format", &self.export.format, &EXPORT_FORMATS)?;
        if !(1..=100).contains(&self.export.jpeg_quality) {
            return Err(SettingsError::invalid("export.jpeg_quality", "must be within 1..=100"));
        }

        Ok(())
    }
}

fn one_of(key: &str, value: &str, allowed: &[&str]) -> SettingsResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::invalid(
            key,
            format!("'{}' is not one of {}", value, allowed.join(", ")),
        ))
    }
}
