//! Identifier types.
//!
//! Every persisted entity is keyed by a UUID wrapped in its own newtype so an
//! element id can never be passed where a map id is expected.
//!
//! ## Modules
//!
//! - [`ids`]: `ElementId`, `MapId`, `NoteId`, `ColorId`, `PreferencesId`, `UserId`

pub mod ids;

pub use ids::*;
