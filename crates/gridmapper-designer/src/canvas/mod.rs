//! Canvas holding the live element collection and its interaction state.

mod operations;
mod types;

pub use types::{
    Change, ChangeSet, HoverOverlay, InteractionState, Modifiers, PaintKey, PointerButton,
    PointerEvent, PointerKind, Tool, ToolSettings,
};

use crate::element_store::ElementStore;
use crate::selection_manager::SelectionManager;
use crate::viewport::Viewport;
use gridmapper_core::{CellSize, GridBounds, MapElement, MapId};

/// Canvas state: elements, selection, viewport and the pointer state machine.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub element_store: ElementStore,
    pub selection_manager: SelectionManager,
    viewport: Viewport,
    state: InteractionState,
    hover: Option<HoverOverlay>,
    map_id: Option<MapId>,
}

impl Canvas {
    /// Creates an empty scratch canvas.
    pub fn new(bounds: GridBounds, cell_size: CellSize) -> Self {
        Self {
            element_store: ElementStore::new(),
            selection_manager: SelectionManager::new(),
            viewport: Viewport::new(bounds, cell_size),
            state: InteractionState::Idle,
            hover: None,
            map_id: None,
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.viewport.bounds()
    }

    /// Resize the grid. Elements outside the new bounds are kept but leave
    /// the selection.
    pub fn set_bounds(&mut self, bounds: GridBounds) {
        self.viewport.set_bounds(bounds);
        let store = &self.element_store;
        self.selection_manager.retain(|id| {
            store
                .get(id)
                .is_some_and(|element| bounds.contains(element.cell()))
        });
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn cell_size(&self) -> CellSize {
        self.viewport.cell_size()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn hover(&self) -> Option<HoverOverlay> {
        self.hover
    }

    /// Map new elements are attached to; `None` while editing the scratch map.
    pub fn map_id(&self) -> Option<MapId> {
        self.map_id
    }

    pub fn set_map_id(&mut self, map_id: Option<MapId>) {
        self.map_id = map_id;
    }

    pub fn element_count(&self) -> usize {
        self.element_store.len()
    }

    /// Elements in draw order.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &MapElement> + '_ {
        self.element_store.iter()
    }

    /// Swap in a freshly loaded collection, dropping selection and any drag.
    pub fn replace_elements(&mut self, elements: Vec<MapElement>) {
        self.element_store = ElementStore::from_elements(elements);
        self.selection_manager.clear();
        self.state = InteractionState::Idle;
        self.hover = None;
    }

    /// Remove every element, returning the deletions for mirroring.
    pub fn clear(&mut self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        for element in self.element_store.iter() {
            changes.push(Change::Deleted {
                id: element.id,
                map_id: element.map_id,
            });
        }
        self.element_store.clear();
        self.selection_manager.clear();
        self.state = InteractionState::Idle;
        changes
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(GridBounds::default(), CellSize::default())
    }
}
