//! # Grid Mapper Core
//!
//! Core types and utilities for Grid Mapper.
//! Provides the data model shared by the store, designer and settings
//! crates: identifiers, grid addressing, elements, maps, notes, color
//! history, preferences, the error taxonomy and a small debouncer.

pub mod constants;
pub mod data;
pub mod debounce;
pub mod error;
pub mod types;

pub use data::{
    Cell, CellSize, ClockTime, ColorHistoryEntry, ElementContent, ElementDraft, Footprint,
    GridBounds, HexColor, MapElement, MapNote, MapRecord, Meridiem, NoteBlock, NoteBlockKind,
    ShapeKind, SubCell, TimeOfDay, UserPreferences,
};
pub use data::map::validate_name;

pub use debounce::Debouncer;

pub use error::{Error, Result, StoreError, StoreResult, ValidationError};

pub use types::{ColorId, ElementId, MapId, NoteId, PreferencesId, UserId};
