//! Shared constants for grid bounds, zoom steps and session defaults.

/// Smallest grid width/height accepted at the form boundary.
pub const MIN_GRID_DIMENSION: u32 = 5;
/// Largest grid width/height accepted at the form boundary.
pub const MAX_GRID_DIMENSION: u32 = 100;

/// Default grid width for a fresh scratch map.
pub const DEFAULT_GRID_WIDTH: u32 = 30;
/// Default grid height for a fresh scratch map.
pub const DEFAULT_GRID_HEIGHT: u32 = 20;

/// Smallest rendered cell size in pixels.
pub const MIN_CELL_SIZE: u32 = 20;
/// Largest rendered cell size in pixels.
pub const MAX_CELL_SIZE: u32 = 100;
/// Default rendered cell size in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 40;
/// Zoom in/out changes the cell size by this many pixels.
pub const CELL_SIZE_STEP: u32 = 10;

/// Maximum number of tiny elements sharing one cell (one per quadrant).
pub const MAX_TINY_PER_CELL: usize = 4;

/// Name given to a session that has never been saved.
pub const UNTITLED_MAP_NAME: &str = "Untitled Map";

/// Default paint color.
pub const DEFAULT_COLOR: &str = "#000000";

/// Unfavorited colors kept in the history before the oldest is evicted.
pub const MAX_RECENT_COLORS: usize = 15;

/// Default debounce window for color history commits, in milliseconds.
pub const COLOR_HISTORY_DEBOUNCE_MS: u64 = 500;
