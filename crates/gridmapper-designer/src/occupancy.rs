//! Grid occupancy rules.
//!
//! Decides whether a placement is legal and which existing elements it
//! evicts. Nothing here mutates the collection: callers apply the returned
//! plan themselves, and treat a [`Rejection`] as a silent no-op.
//!
//! Rules, checked in order:
//! 1. The target cell must lie inside the grid.
//! 2. A normal (whole-cell) placement evicts every element anchored at the
//!    cell, tiny or not, and is never rejected.
//! 3. A tiny placement evicts normal occupants, then must fit among the tiny
//!    occupants: at most four per cell, one per quadrant, all with the same
//!    content.

use gridmapper_core::constants::MAX_TINY_PER_CELL;
use gridmapper_core::{
    Cell, ElementContent, ElementDraft, ElementId, Footprint, GridBounds, HexColor, MapElement,
    SubCell,
};
use thiserror::Error;

/// What the pointer asked to place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    pub cell: Cell,
    /// Quadrant under the pointer; required for tiny placements.
    pub sub: Option<SubCell>,
    pub content: ElementContent,
    pub color: HexColor,
    pub footprint: Footprint,
}

/// Outcome of an accepted placement.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPlan {
    pub to_remove: Vec<ElementId>,
    pub to_add: ElementDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("cell {0} is outside the grid")]
    OutOfGrid(Cell),

    #[error("cell {0} already holds four tiny elements")]
    CellFull(Cell),

    #[error("cell {0} holds tiny elements with different content")]
    MixedContent(Cell),

    #[error("quadrant ({}, {}) of cell {cell} is taken", .sub.x(), .sub.y())]
    QuadrantTaken { cell: Cell, sub: SubCell },

    #[error("tiny placement at {0} has no quadrant")]
    MissingSubCell(Cell),
}

/// Occupancy of one quadrant, for the hover overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadrantState {
    Free,
    Occupied,
}

/// Check a placement against the elements currently in the collection.
pub fn try_place<'a, I>(
    bounds: GridBounds,
    request: PlacementRequest,
    elements: I,
) -> Result<PlacementPlan, Rejection>
where
    I: IntoIterator<Item = &'a MapElement>,
{
    let cell = request.cell;
    if !bounds.contains(cell) {
        return Err(Rejection::OutOfGrid(cell));
    }

    let occupants = elements.into_iter().filter(|e| e.is_at(cell));

    if !request.footprint.is_tiny() {
        return Ok(PlacementPlan {
            to_remove: occupants.map(|e| e.id).collect(),
            to_add: ElementDraft {
                cell,
                sub: None,
                content: request.content,
                color: request.color,
                footprint: request.footprint,
            },
        });
    }

    let mut to_remove = Vec::new();
    let mut tiny: Vec<&MapElement> = Vec::with_capacity(MAX_TINY_PER_CELL);
    for occupant in occupants {
        if occupant.is_tiny() {
            tiny.push(occupant);
        } else {
            to_remove.push(occupant.id);
        }
    }

    if tiny.len() >= MAX_TINY_PER_CELL {
        return Err(Rejection::CellFull(cell));
    }
    if tiny.iter().any(|e| e.content != request.content) {
        return Err(Rejection::MixedContent(cell));
    }
    let sub = request.sub.ok_or(Rejection::MissingSubCell(cell))?;
    if tiny.iter().any(|e| e.sub() == Some(sub)) {
        return Err(Rejection::QuadrantTaken { cell, sub });
    }

    Ok(PlacementPlan {
        to_remove,
        to_add: ElementDraft {
            cell,
            sub: Some(sub),
            content: request.content,
            color: request.color,
            footprint: Footprint::Tiny,
        },
    })
}

/// The element an erase at `cell` removes: the first one anchored there, in
/// collection order.
pub fn erase_target<'a, I>(cell: Cell, elements: I) -> Option<ElementId>
where
    I: IntoIterator<Item = &'a MapElement>,
{
    elements.into_iter().find(|e| e.is_at(cell)).map(|e| e.id)
}

/// Copies of the named elements shifted by `(dx, dy)`, in collection order.
///
/// Destination occupancy is not checked; moved elements may share a cell
/// with each other or with stationary ones.
pub fn translate<'a, I>(ids: &[ElementId], dx: i32, dy: i32, elements: I) -> Vec<MapElement>
where
    I: IntoIterator<Item = &'a MapElement>,
{
    elements
        .into_iter()
        .filter(|e| ids.contains(&e.id))
        .map(|e| {
            let mut moved = e.clone();
            moved.translate(dx, dy);
            moved
        })
        .collect()
}

/// Which quadrants of `cell` hold a tiny element, in row-major order.
pub fn quadrant_states<'a, I>(cell: Cell, elements: I) -> [QuadrantState; 4]
where
    I: IntoIterator<Item = &'a MapElement>,
{
    let mut states = [QuadrantState::Free; 4];
    for element in elements.into_iter().filter(|e| e.is_at(cell)) {
        if let Some(sub) = element.sub() {
            states[sub.index()] = QuadrantState::Occupied;
        }
    }
    states
}
