//! Canvas type definitions: Tool, PointerEvent, InteractionState, ChangeSet, ToolSettings.

use crate::occupancy::QuadrantState;
use crate::sizes::SizeCategory;
use gridmapper_core::{
    Cell, ElementContent, ElementId, Footprint, HexColor, MapElement, MapId, ShapeKind, SubCell,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Active editing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Select,
    #[default]
    Place,
    Text,
    Erase,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Select, Tool::Place, Tool::Text, Tool::Erase];

    pub fn id(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Place => "place",
            Tool::Text => "text",
            Tool::Erase => "erase",
        }
    }

    /// Whether left-clicking with this tool paints elements.
    pub fn paints(&self) -> bool {
        matches!(self, Tool::Place | Tool::Text)
    }
}

impl FromStr for Tool {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.id() == s)
            .ok_or_else(|| ValidationError::UnknownTool(s.to_string()))
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Middle,
    Right,
    None,
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        meta: false,
        shift: false,
    };

    /// Ctrl on most platforms, cmd on macOS.
    pub fn toggles_selection(&self) -> bool {
        self.ctrl || self.meta
    }

    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

/// One pointer event in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub button: PointerButton,
    pub x: f64,
    pub y: f64,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn down(button: PointerButton, x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            button: PointerButton::None,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn up(button: PointerButton, x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            button,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn leave() -> Self {
        Self {
            kind: PointerKind::Leave,
            button: PointerButton::None,
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Where a paint drag last attempted a placement. The quadrant is only
/// tracked in tiny mode.
pub type PaintKey = (Cell, Option<SubCell>);

/// Interaction substate of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    DragPainting {
        last: PaintKey,
    },
    DragErasing {
        last_cell: Cell,
    },
    Panning {
        anchor: (f64, f64),
    },
    DraggingSelection {
        anchor_cell: Cell,
    },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }
}

/// A local mutation that has already been applied to the element store.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Created(MapElement),
    Updated(MapElement),
    Deleted { id: ElementId, map_id: Option<MapId> },
}

impl Change {
    pub fn element_id(&self) -> ElementId {
        match self {
            Change::Created(element) | Change::Updated(element) => element.id,
            Change::Deleted { id, .. } => *id,
        }
    }

    /// Map the change belongs to; `None` for the scratch map.
    pub fn map_id(&self) -> Option<MapId> {
        match self {
            Change::Created(element) | Change::Updated(element) => element.map_id,
            Change::Deleted { map_id, .. } => *map_id,
        }
    }
}

/// Changes produced by one event, in the order they were applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeSet(Vec<Change>);

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.0.push(change);
    }

    pub fn extend(&mut self, other: ChangeSet) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.0.iter()
    }

    pub fn created(&self) -> impl Iterator<Item = &MapElement> {
        self.0.iter().filter_map(|change| match change {
            Change::Created(element) => Some(element),
            _ => None,
        })
    }

    pub fn deleted(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.0.iter().filter_map(|change| match change {
            Change::Deleted { id, .. } => Some(*id),
            _ => None,
        })
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Highlight under the pointer while a painting tool is idle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverOverlay {
    pub cell: Cell,
    /// Quadrant occupancy, present in tiny mode only.
    pub quadrants: Option<[QuadrantState; 4]>,
}

/// What the toolbar currently has selected.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub tool: Tool,
    pub shape: Option<ShapeKind>,
    pub text: String,
    pub color: HexColor,
    pub size: SizeCategory,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: Tool::Place,
            shape: Some(ShapeKind::Wall),
            text: String::new(),
            color: HexColor::black(),
            size: SizeCategory::Medium,
        }
    }
}

impl ToolSettings {
    /// Content a left click would paint, if the active tool paints and has
    /// something to paint.
    pub fn paint_content(&self) -> Option<ElementContent> {
        match self.tool {
            Tool::Place => self.shape.map(ElementContent::Shape),
            Tool::Text if !self.text.is_empty() => Some(ElementContent::Text(self.text.clone())),
            _ => None,
        }
    }

    pub fn footprint(&self) -> Footprint {
        self.size.footprint()
    }

    pub fn is_tiny(&self) -> bool {
        self.size.is_tiny()
    }
}
