//! # Grid Mapper
//!
//! A grid-based map builder for tabletop role-playing games:
//! - Paint shapes and short text glyphs onto a rectangular grid
//! - Tiny objects share a cell, one per quadrant
//! - Multiple saved maps with rich-text notes
//! - PNG/JPEG export
//!
//! ## Architecture
//!
//! Grid Mapper is organized as a workspace with multiple crates:
//!
//! 1. **gridmapper-core** - Data model, identifiers, grid bounds, errors
//! 2. **gridmapper-store** - Repository trait with in-memory and JSON file backends
//! 3. **gridmapper-designer** - Occupancy rules, pointer interaction, rendering, export, session
//! 4. **gridmapper-settings** - Configuration files
//! 5. **gridmapper** - This facade and the command line binary

pub mod app;

pub use gridmapper_core as core;
pub use gridmapper_designer as designer;
pub use gridmapper_settings as settings;
pub use gridmapper_store as store;

pub use gridmapper_core::{
    Cell, CellSize, Error, GridBounds, HexColor, MapElement, MapId, MapRecord, Result, ShapeKind,
    SubCell, UserId,
};
pub use gridmapper_designer::{
    Canvas, EditorDefaults, EditorState, ExportFormat, ExportOptions, PointerButton, PointerEvent,
    SizeCategory, Tool, ToolSettings,
};
pub use gridmapper_settings::Config;
pub use gridmapper_store::Store;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
