//! Wiring from configuration to a running editor.

use anyhow::{Context, Result};
use gridmapper_core::{CellSize, GridBounds, HexColor, ShapeKind};
use gridmapper_designer::{
    EditorDefaults, ExportFormat, ExportOptions, SizeCategory, Tool, ToolSettings,
};
use gridmapper_settings::{Config, ExportSettings, StorageBackend, StorageSettings};
use gridmapper_store::Store;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Session defaults from the `editor` and `color_history` sections.
pub fn editor_defaults(config: &Config) -> Result<EditorDefaults> {
    let editor = &config.editor;
    let bounds = GridBounds::new(editor.grid_width, editor.grid_height)?;
    let cell_size = CellSize::new(editor.cell_size)?;
    let tool_settings = ToolSettings {
        tool: editor.default_tool.parse::<Tool>()?,
        shape: editor
            .default_shape
            .as_deref()
            .map(str::parse::<ShapeKind>)
            .transpose()?,
        text: String::new(),
        color: editor.default_color.parse::<HexColor>()?,
        size: editor.default_size.parse::<SizeCategory>()?,
    };
    Ok(EditorDefaults {
        bounds,
        cell_size,
        tool_settings,
        color_debounce: Duration::from_millis(config.color_history.debounce_ms),
        max_recent_colors: config.color_history.max_recent,
    })
}

/// Open the configured backend.
pub fn open_store(storage: &StorageSettings) -> Store {
    match storage.backend {
        StorageBackend::File => Store::open_dir(&storage.data_dir),
        StorageBackend::Memory => {
            info!("Using in-memory store; nothing will be kept");
            Store::in_memory()
        }
    }
}

/// Export options from the `export` section, with command line overrides.
pub fn export_options(
    export: &ExportSettings,
    format: Option<ExportFormat>,
    dir: Option<PathBuf>,
) -> Result<ExportOptions> {
    let format = match format {
        Some(format) => format,
        None => export
            .format
            .parse()
            .with_context(|| format!("Invalid export format '{}'", export.format))?,
    };
    let mut options = ExportOptions::new(format, dir.unwrap_or_else(|| export.output_dir.clone()));
    options.jpeg_quality = export.jpeg_quality;
    Ok(options)
}
