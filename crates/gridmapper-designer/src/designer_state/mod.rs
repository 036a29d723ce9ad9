//! Editor session state.
//!
//! One [`EditorState`] owns everything a running editor needs:
//! - the live canvas and toolbar settings
//! - the active map (or the scratch map)
//! - the element mirror, color history, notes and preferences
//!
//! It is split into submodules:
//! - `session`: new/save/load/delete/list maps and reset
//! - `file_io`: standalone map documents
//! - `notes`: the note editor and note library
//! - `preferences`: dark mode and time of day

mod file_io;
mod notes;
mod preferences;
mod session;

pub use session::{NewMapOutcome, UnsavedChanges};

use crate::canvas::{Canvas, ChangeSet, PointerEvent, Tool, ToolSettings};
use crate::color_history::{ColorHistory, ColorPalette};
use crate::export::{self, ExportOptions, ExportReport};
use crate::mirror::RemoteMirror;
use crate::notes::{NoteDocument, NoteLibrary};
use crate::sizes::SizeCategory;
use gridmapper_core::constants::{COLOR_HISTORY_DEBOUNCE_MS, MAX_RECENT_COLORS, UNTITLED_MAP_NAME};
use gridmapper_core::{
    CellSize, ColorHistoryEntry, Debouncer, GridBounds, HexColor, MapId, MapRecord, ShapeKind,
    StoreResult, UserId, UserPreferences,
};
use gridmapper_store::Store;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Starting values for a session, usually taken from the app config.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorDefaults {
    pub bounds: GridBounds,
    pub cell_size: CellSize,
    pub tool_settings: ToolSettings,
    pub color_debounce: Duration,
    pub max_recent_colors: usize,
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            bounds: GridBounds::default(),
            cell_size: CellSize::default(),
            tool_settings: ToolSettings::default(),
            color_debounce: Duration::from_millis(COLOR_HISTORY_DEBOUNCE_MS),
            max_recent_colors: MAX_RECENT_COLORS,
        }
    }
}

/// The editor session.
pub struct EditorState {
    pub canvas: Canvas,
    pub tool_settings: ToolSettings,
    pub note: NoteDocument,
    defaults: EditorDefaults,
    store: Store,
    owner: UserId,
    map: Option<MapRecord>,
    map_name: String,
    preferences: UserPreferences,
    mirror: RemoteMirror,
    colors: ColorHistory,
    notes: NoteLibrary,
    color_debouncer: Debouncer,
    is_modified: bool,
    current_file_path: Option<PathBuf>,
}

impl EditorState {
    /// Start a scratch session. Must be called from within a tokio runtime.
    pub fn new(store: Store, owner: UserId, defaults: EditorDefaults) -> Self {
        let mirror = RemoteMirror::spawn(store.elements().clone());
        let colors = ColorHistory::new(owner, store.colors().clone())
            .with_max_recent(defaults.max_recent_colors);
        let notes = NoteLibrary::new(owner, store.notes().clone());

        Self {
            canvas: Canvas::new(defaults.bounds, defaults.cell_size),
            tool_settings: defaults.tool_settings.clone(),
            note: NoteDocument::new(),
            color_debouncer: Debouncer::new(defaults.color_debounce),
            defaults,
            store,
            owner,
            map: None,
            map_name: UNTITLED_MAP_NAME.to_string(),
            preferences: UserPreferences::new(owner),
            mirror,
            colors,
            notes,
            is_modified: false,
            current_file_path: None,
        }
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn defaults(&self) -> &EditorDefaults {
        &self.defaults
    }

    /// The saved map being edited, `None` for the scratch map.
    pub fn map(&self) -> Option<&MapRecord> {
        self.map.as_ref()
    }

    pub fn map_id(&self) -> Option<MapId> {
        self.canvas.map_id()
    }

    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    pub fn is_scratch(&self) -> bool {
        self.map.is_none()
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool_settings.tool = tool;
    }

    pub fn set_shape(&mut self, shape: Option<ShapeKind>) {
        self.tool_settings.shape = shape;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.tool_settings.text = text.into();
    }

    pub fn set_size(&mut self, size: SizeCategory) {
        self.tool_settings.size = size;
    }

    /// Feed a pointer event to the canvas and mirror whatever it changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ChangeSet {
        let changes = self.canvas.handle_pointer(event, &self.tool_settings);
        self.commit(changes)
    }

    /// Nudge the selection by whole cells.
    pub fn move_selection(&mut self, dx: i32, dy: i32) -> ChangeSet {
        let changes = self.canvas.move_selection(dx, dy);
        self.commit(changes)
    }

    fn commit(&mut self, changes: ChangeSet) -> ChangeSet {
        if !changes.is_empty() {
            self.is_modified = true;
            self.mirror.submit(changes.clone());
        }
        changes
    }

    /// Wait for every queued element write to reach the store.
    pub async fn flush(&self) {
        self.mirror.flush().await;
    }

    /// Element writes that failed since the session started.
    pub fn mirror_failures(&self) -> usize {
        self.mirror.failure_count()
    }

    /// Color chosen from the picker. The history write waits until the
    /// picker has been still for the debounce window.
    pub fn pick_color(&mut self, color: HexColor) {
        self.tool_settings.color = color.clone();
        let colors = self.colors.clone();
        self.color_debouncer.schedule(async move {
            if let Err(e) = colors.use_color(color.clone()).await {
                warn!(%color, error = %e, "failed to record color");
            }
        });
    }

    /// Color chosen from the history swatches; recorded immediately.
    pub async fn select_color(&mut self, color: HexColor) -> StoreResult<ColorHistoryEntry> {
        self.tool_settings.color = color.clone();
        self.colors.use_color(color).await
    }

    pub fn color_history(&self) -> &ColorHistory {
        &self.colors
    }

    pub async fn color_palette(&self) -> StoreResult<ColorPalette> {
        self.colors.palette().await
    }

    /// Whether a debounced color write is still waiting.
    pub fn color_commit_pending(&self) -> bool {
        self.color_debouncer.is_pending()
    }

    pub fn zoom_in(&mut self) -> CellSize {
        self.canvas.viewport_mut().zoom_in();
        self.canvas.cell_size()
    }

    pub fn zoom_out(&mut self) -> CellSize {
        self.canvas.viewport_mut().zoom_out();
        self.canvas.cell_size()
    }

    /// Resize the grid, clamping both sides into the accepted range.
    pub fn set_grid_size(&mut self, width: i64, height: i64) -> GridBounds {
        let bounds = GridBounds::clamped(width, height);
        if bounds != self.canvas.bounds() {
            self.canvas.set_bounds(bounds);
            self.is_modified = true;
        }
        bounds
    }

    /// Render the map and write it under its current name.
    pub fn export(&self, options: &ExportOptions) -> anyhow::Result<ExportReport> {
        export::export(&self.canvas, &self.map_name, options)
    }
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("owner", &self.owner)
            .field("map_id", &self.map_id())
            .field("map_name", &self.map_name)
            .field("elements", &self.canvas.element_count())
            .field("is_modified", &self.is_modified)
            .finish_non_exhaustive()
    }
}
