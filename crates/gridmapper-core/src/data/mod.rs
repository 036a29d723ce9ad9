//! Data models for the map editor
//!
//! This module provides:
//! - Grid addressing (cells, quadrants, bounds, cell size)
//! - Validated hex colors and the closed set of shape kinds
//! - Placed elements and their persisted row layout
//! - Saved maps, notes, color history and user preferences

pub mod color;
pub mod color_history;
pub mod element;
pub mod grid;
pub mod map;
pub mod note;
pub mod preferences;
pub mod shape_kind;

pub use color::HexColor;
pub use color_history::ColorHistoryEntry;
pub use element::{ElementContent, ElementDraft, Footprint, MapElement};
pub use grid::{Cell, CellSize, GridBounds, SubCell};
pub use map::{validate_name, MapRecord};
pub use note::{MapNote, NoteBlock, NoteBlockKind, DEFAULT_FONT_FAMILY};
pub use preferences::{ClockTime, Meridiem, TimeOfDay, UserPreferences};
pub use shape_kind::ShapeKind;
