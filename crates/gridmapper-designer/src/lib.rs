//! # Grid Mapper Designer
//!
//! This crate provides the map editing engine: where elements may go, how
//! pointer input turns into edits, and how a map is drawn and exported.
//!
//! ## Core Components
//!
//! ### Placement
//! - **Sizes**: The size catalog (Tiny through Gargantuan) and footprints
//! - **Shapes**: The glyph table, one render function per shape kind
//! - **Occupancy**: Eviction, quadrant and homogeneity rules for placement
//! - **Element Store**: The live collection, indexed by cell in draw order
//!
//! ### Interaction
//! - **Canvas**: Pointer state machine (paint, erase, pan, select, drag)
//! - **Selection**: Hit testing and multi-selection
//! - **Viewport**: Cell size, zoom and scroll
//!
//! ### Session
//! - **Editor State**: New/save/load/delete maps, notes and preferences
//! - **Mirror**: Ordered best-effort forwarding of edits to the store
//! - **Color History**: Recent and favorite colors
//! - **Rendering / Export**: Raster output as PNG or JPEG
//!
//! ## Architecture
//!
//! ```text
//! EditorState (Session)
//!   ├── Canvas (Pointer state machine)
//!   │     ├── ElementStore (Cell index)
//!   │     ├── SelectionManager
//!   │     └── Viewport
//!   ├── RemoteMirror (Store writes)
//!   ├── ColorHistory
//!   └── NoteLibrary
//!
//! Occupancy (Placement rules)
//!   └── Sizes / Shapes
//!
//! Renderer (tiny-skia)
//!   └── Export (PNG / JPEG)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gridmapper_designer::{Canvas, PointerButton, PointerEvent, ToolSettings};
//!
//! let mut canvas = Canvas::default();
//! let settings = ToolSettings::default();
//!
//! canvas.handle_pointer(PointerEvent::down(PointerButton::Left, 45.0, 45.0), &settings);
//! canvas.handle_pointer(PointerEvent::up(PointerButton::Left, 45.0, 45.0), &settings);
//! assert_eq!(canvas.element_count(), 1);
//! ```

pub mod canvas;
pub mod color_history;
pub mod designer_state;
pub mod element_store;
pub mod export;
pub mod font_manager;
pub mod mirror;
pub mod notes;
pub mod occupancy;
pub mod renderer;
pub mod selection_manager;
pub mod serialization;
pub mod shapes;
pub mod sizes;
pub mod viewport;

pub use canvas::{
    Canvas, Change, ChangeSet, HoverOverlay, InteractionState, Modifiers, PointerButton,
    PointerEvent, PointerKind, Tool, ToolSettings,
};
pub use color_history::{ColorHistory, ColorPalette};
pub use designer_state::{EditorDefaults, EditorState, NewMapOutcome, UnsavedChanges};
pub use element_store::ElementStore;
pub use export::{export, ColorSpace, ExportFormat, ExportOptions, ExportReport};
pub use mirror::RemoteMirror;
pub use notes::{MoveDirection, NoteDocument, NoteLibrary};
pub use occupancy::{try_place, PlacementPlan, PlacementRequest, QuadrantState, Rejection};
pub use renderer::{render_canvas, RenderOptions};
pub use selection_manager::SelectionManager;
pub use serialization::MapDocument;
pub use sizes::SizeCategory;
pub use viewport::{GridPoint, Viewport};
