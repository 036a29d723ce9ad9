//! In-memory element collection.
//!
//! Keeps elements in draw order and indexes them by anchor cell. The order
//! is insertion order; replacing an element (a move) keeps its position, so
//! per-cell lookups return elements in the same order a full scan would.

use gridmapper_core::{Cell, ElementId, MapElement};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    element: MapElement,
}

#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    slots: HashMap<ElementId, Slot>,
    draw_order: BTreeMap<u64, ElementId>,
    cells: HashMap<Cell, SmallVec<[(u64, ElementId); 4]>>,
    next_seq: u64,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding `elements` in the given order.
    pub fn from_elements(elements: impl IntoIterator<Item = MapElement>) -> Self {
        let mut store = Self::new();
        for element in elements {
            store.insert(element);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<&MapElement> {
        self.slots.get(&id).map(|slot| &slot.element)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Append an element on top of the draw order. An element with the same
    /// id is replaced in place instead.
    pub fn insert(&mut self, element: MapElement) {
        if self.slots.contains_key(&element.id) {
            self.replace(element);
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index(element.cell(), seq, element.id);
        self.draw_order.insert(seq, element.id);
        self.slots.insert(element.id, Slot { seq, element });
    }

    /// Swap in a new version of an existing element, keeping its draw
    /// position. Returns the previous version.
    pub fn replace(&mut self, element: MapElement) -> Option<MapElement> {
        let (seq, old_cell) = {
            let slot = self.slots.get(&element.id)?;
            (slot.seq, slot.element.cell())
        };
        let new_cell = element.cell();
        if old_cell != new_cell {
            self.unindex(old_cell, element.id);
            self.index(new_cell, seq, element.id);
        }
        self.slots
            .insert(element.id, Slot { seq, element })
            .map(|slot| slot.element)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<MapElement> {
        let slot = self.slots.remove(&id)?;
        self.draw_order.remove(&slot.seq);
        self.unindex(slot.element.cell(), id);
        Some(slot.element)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.draw_order.clear();
        self.cells.clear();
    }

    /// All elements, bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MapElement> + '_ {
        self.draw_order
            .values()
            .filter_map(move |id| self.slots.get(id).map(|slot| &slot.element))
    }

    /// Elements anchored at `cell`, bottom to top.
    pub fn at_cell(&self, cell: Cell) -> impl Iterator<Item = &MapElement> + '_ {
        self.cells
            .get(&cell)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(move |(_, id)| self.slots.get(id).map(|slot| &slot.element))
    }

    /// Snapshot in draw order.
    pub fn to_vec(&self) -> Vec<MapElement> {
        self.iter().cloned().collect()
    }

    fn index(&mut self, cell: Cell, seq: u64, id: ElementId) {
        let entries = self.cells.entry(cell).or_default();
        let at = entries.partition_point(|(s, _)| *s < seq);
        entries.insert(at, (seq, id));
    }

    fn unindex(&mut self, cell: Cell, id: ElementId) {
        if let Some(entries) = self.cells.get_mut(&cell) {
            entries.retain(|(_, e)| *e != id);
            if entries.is_empty() {
                self.cells.remove(&cell);
            }
        }
    }
}
