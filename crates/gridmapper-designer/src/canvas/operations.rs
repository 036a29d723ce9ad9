//! Pointer handling and element operations for Canvas.

use super::types::{
    Change, ChangeSet, HoverOverlay, InteractionState, PaintKey, PointerButton, PointerEvent,
    PointerKind, Tool, ToolSettings,
};
use super::Canvas;
use crate::occupancy::{self, PlacementRequest};
use crate::selection_manager::SelectionManager;
use crate::viewport::GridPoint;
use gridmapper_core::{Cell, ElementId, SubCell};
use tracing::{debug, trace};

impl Canvas {
    /// Feed one pointer event through the interaction state machine.
    ///
    /// Returns the element changes the event applied, in application order.
    pub fn handle_pointer(&mut self, event: PointerEvent, settings: &ToolSettings) -> ChangeSet {
        match event.kind {
            PointerKind::Down => self.pointer_down(event, settings),
            PointerKind::Move => self.pointer_move(event, settings),
            PointerKind::Up => {
                self.finish_gesture("pointer up");
                ChangeSet::new()
            }
            PointerKind::Leave => {
                self.finish_gesture("pointer left canvas");
                self.hover = None;
                ChangeSet::new()
            }
        }
    }

    fn pointer_down(&mut self, event: PointerEvent, settings: &ToolSettings) -> ChangeSet {
        match event.button {
            PointerButton::Middle => {
                if self.state.is_idle() {
                    self.transition(InteractionState::Panning {
                        anchor: (event.x, event.y),
                    });
                    self.hover = None;
                }
                ChangeSet::new()
            }
            PointerButton::Right => {
                if matches!(self.state, InteractionState::Panning { .. }) {
                    return ChangeSet::new();
                }
                let point = self.viewport.to_grid(event.x, event.y);
                if !self.bounds().contains(point.cell) {
                    return ChangeSet::new();
                }
                self.erase_at(point.cell)
            }
            PointerButton::Left if self.state.is_idle() => {
                let point = self.viewport.to_grid(event.x, event.y);
                if !self.bounds().contains(point.cell) {
                    return ChangeSet::new();
                }
                self.hover = None;
                match settings.tool {
                    Tool::Select => {
                        self.select_down(point, event);
                        ChangeSet::new()
                    }
                    Tool::Place | Tool::Text => self.paint_down(point, settings),
                    Tool::Erase => {
                        self.transition(InteractionState::DragErasing {
                            last_cell: point.cell,
                        });
                        self.erase_at(point.cell)
                    }
                }
            }
            _ => ChangeSet::new(),
        }
    }

    fn select_down(&mut self, point: GridPoint, event: PointerEvent) {
        match SelectionManager::hit_test(&self.element_store, point.gx, point.gy) {
            Some(hit) if event.modifiers.toggles_selection() => {
                let selected = self.selection_manager.toggle(hit);
                trace!(%hit, selected, "toggled selection");
            }
            Some(hit) => {
                if !self.selection_manager.is_selected(hit) {
                    self.selection_manager.select_only(hit);
                }
                self.transition(InteractionState::DraggingSelection {
                    anchor_cell: point.cell,
                });
            }
            None => {
                if !event.modifiers.any() {
                    self.selection_manager.clear();
                }
            }
        }
    }

    fn paint_down(&mut self, point: GridPoint, settings: &ToolSettings) -> ChangeSet {
        if settings.paint_content().is_none() {
            trace!(tool = %settings.tool, "nothing selected to paint");
            return ChangeSet::new();
        }
        let key = paint_key(point, settings);
        self.transition(InteractionState::DragPainting { last: key });
        self.place_with(point.cell, Some(point.sub), settings)
    }

    fn pointer_move(&mut self, event: PointerEvent, settings: &ToolSettings) -> ChangeSet {
        match self.state {
            InteractionState::Idle => {
                self.update_hover(event, settings);
                ChangeSet::new()
            }
            InteractionState::Panning { anchor } => {
                let (dx, dy) = (event.x - anchor.0, event.y - anchor.1);
                self.viewport.scroll_by(-dx, -dy);
                self.state = InteractionState::Panning {
                    anchor: (event.x, event.y),
                };
                ChangeSet::new()
            }
            InteractionState::DragPainting { last } => {
                let point = self.viewport.to_grid(event.x, event.y);
                if !self.bounds().contains(point.cell) {
                    return ChangeSet::new();
                }
                let key = paint_key(point, settings);
                if key == last {
                    return ChangeSet::new();
                }
                self.state = InteractionState::DragPainting { last: key };
                self.place_with(point.cell, Some(point.sub), settings)
            }
            InteractionState::DragErasing { last_cell } => {
                let point = self.viewport.to_grid(event.x, event.y);
                if !self.bounds().contains(point.cell) || point.cell == last_cell {
                    return ChangeSet::new();
                }
                self.state = InteractionState::DragErasing {
                    last_cell: point.cell,
                };
                self.erase_at(point.cell)
            }
            InteractionState::DraggingSelection { anchor_cell } => {
                let cell = self.viewport.to_grid(event.x, event.y).cell;
                let (dx, dy) =
                    self.clamp_selection_delta(cell.x - anchor_cell.x, cell.y - anchor_cell.y);
                if dx == 0 && dy == 0 {
                    return ChangeSet::new();
                }
                self.state = InteractionState::DraggingSelection {
                    anchor_cell: anchor_cell.offset(dx, dy),
                };
                self.move_selection(dx, dy)
            }
        }
    }

    fn update_hover(&mut self, event: PointerEvent, settings: &ToolSettings) {
        if !settings.tool.paints() {
            self.hover = None;
            return;
        }
        let point = self.viewport.to_grid(event.x, event.y);
        self.hover = self.bounds().contains(point.cell).then(|| HoverOverlay {
            cell: point.cell,
            quadrants: settings.is_tiny().then(|| {
                occupancy::quadrant_states(point.cell, self.element_store.at_cell(point.cell))
            }),
        });
    }

    fn finish_gesture(&mut self, reason: &'static str) {
        if !self.state.is_idle() {
            debug!(from = ?self.state, reason, "interaction finished");
            self.state = InteractionState::Idle;
        }
    }

    fn transition(&mut self, next: InteractionState) {
        debug!(from = ?self.state, to = ?next, "interaction state");
        self.state = next;
    }

    /// Attempt one placement using the toolbar's content, color and size.
    pub fn place_with(
        &mut self,
        cell: Cell,
        sub: Option<SubCell>,
        settings: &ToolSettings,
    ) -> ChangeSet {
        let Some(content) = settings.paint_content() else {
            return ChangeSet::new();
        };
        self.place(PlacementRequest {
            cell,
            sub,
            content,
            color: settings.color.clone(),
            footprint: settings.footprint(),
        })
    }

    /// Run the occupancy check and apply the plan. Rejections change nothing.
    pub fn place(&mut self, request: PlacementRequest) -> ChangeSet {
        let cell = request.cell;
        let plan = match occupancy::try_place(
            self.bounds(),
            request,
            self.element_store.at_cell(cell),
        ) {
            Ok(plan) => plan,
            Err(rejection) => {
                trace!(%rejection, "placement rejected");
                return ChangeSet::new();
            }
        };

        let mut changes = ChangeSet::new();
        for id in plan.to_remove {
            if let Some(removed) = self.element_store.remove(id) {
                changes.push(Change::Deleted {
                    id,
                    map_id: removed.map_id,
                });
            }
        }
        let element = plan.to_add.into_element(self.map_id);
        self.element_store.insert(element.clone());
        changes.push(Change::Created(element));
        self.selection_manager.prune(&self.element_store);
        changes
    }

    /// Remove the first element anchored at `cell`, if any.
    pub fn erase_at(&mut self, cell: Cell) -> ChangeSet {
        let mut changes = ChangeSet::new();
        let target = occupancy::erase_target(cell, self.element_store.at_cell(cell));
        if let Some(removed) = target.and_then(|id| self.element_store.remove(id)) {
            trace!(id = %removed.id, %cell, "erased element");
            changes.push(Change::Deleted {
                id: removed.id,
                map_id: removed.map_id,
            });
            self.selection_manager.prune(&self.element_store);
        }
        changes
    }

    /// Shift every selected element by `(dx, dy)` without occupancy checks.
    pub fn move_selection(&mut self, dx: i32, dy: i32) -> ChangeSet {
        let ids = self.selection_manager.ids();
        self.move_elements(&ids, dx, dy)
    }

    pub fn move_elements(&mut self, ids: &[ElementId], dx: i32, dy: i32) -> ChangeSet {
        let mut changes = ChangeSet::new();
        if ids.is_empty() || (dx == 0 && dy == 0) {
            return changes;
        }
        for moved in occupancy::translate(ids, dx, dy, self.element_store.iter()) {
            self.element_store.replace(moved.clone());
            changes.push(Change::Updated(moved));
        }
        changes
    }

    /// Reduce a drag delta so every selected anchor stays inside the grid.
    fn clamp_selection_delta(&self, dx: i32, dy: i32) -> (i32, i32) {
        let bounds = self.bounds();
        let mut range_x = (i32::MIN, i32::MAX);
        let mut range_y = (i32::MIN, i32::MAX);
        for id in self.selection_manager.ids() {
            if let Some(element) = self.element_store.get(id) {
                let cell = element.cell();
                range_x.0 = range_x.0.max(-cell.x);
                range_x.1 = range_x.1.min(bounds.width() as i32 - 1 - cell.x);
                range_y.0 = range_y.0.max(-cell.y);
                range_y.1 = range_y.1.min(bounds.height() as i32 - 1 - cell.y);
            }
        }
        (clamp_or_zero(dx, range_x), clamp_or_zero(dy, range_y))
    }
}

fn clamp_or_zero(value: i32, (lo, hi): (i32, i32)) -> i32 {
    if lo > hi {
        0
    } else {
        value.clamp(lo, hi)
    }
}

fn paint_key(point: GridPoint, settings: &ToolSettings) -> PaintKey {
    (point.cell, settings.is_tiny().then_some(point.sub))
}
