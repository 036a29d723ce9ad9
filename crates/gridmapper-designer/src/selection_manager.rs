use crate::element_store::ElementStore;
use gridmapper_core::ElementId;
use std::collections::HashSet;

/// Tracks which elements are selected for the select tool.
///
/// `SelectionManager` is responsible for:
/// - Hit-testing a pointer position against the element store
/// - Replacing the selection on a plain click
/// - Toggling membership on a ctrl/cmd click
/// - Dropping ids whose elements no longer exist
///
/// # Selection Model
///
/// - **Members**: an unordered set of element ids.
/// - **Primary**: the most recently clicked member, if it is still selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: HashSet<ElementId>,
    primary: Option<ElementId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridmapper_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert!(manager.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<ElementId> {
        self.primary
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in no particular order.
    pub fn ids(&self) -> Vec<ElementId> {
        self.selected.iter().copied().collect()
    }

    /// Topmost element under a point given in fractional cell units.
    ///
    /// Elements are tested against their full footprint, so a 2x2 table is
    /// hit from any of its four cells and a tiny element only from its
    /// quadrant.
    pub fn hit_test(store: &ElementStore, gx: f64, gy: f64) -> Option<ElementId> {
        store.iter().rev().find(|e| e.covers(gx, gy)).map(|e| e.id)
    }

    /// Make `id` the only selected element.
    pub fn select_only(&mut self, id: ElementId) {
        self.selected.clear();
        self.selected.insert(id);
        self.primary = Some(id);
    }

    /// Add or remove `id`, returning whether it is selected afterwards.
    pub fn toggle(&mut self, id: ElementId) -> bool {
        if self.selected.remove(&id) {
            if self.primary == Some(id) {
                self.primary = None;
            }
            false
        } else {
            self.selected.insert(id);
            self.primary = Some(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.primary = None;
    }

    /// Forget ids whose elements were erased or replaced.
    pub fn prune(&mut self, store: &ElementStore) {
        self.retain(|id| store.contains(id));
    }

    /// Keep only the ids `keep` accepts.
    pub fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) {
        self.selected.retain(|id| keep(*id));
        if let Some(primary) = self.primary {
            if !self.selected.contains(&primary) {
                self.primary = None;
            }
        }
    }
}
