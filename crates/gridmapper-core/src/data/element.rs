//! Placed map elements.
//!
//! A [`MapElement`] is anchored at one cell and carries either a shape glyph
//! or a short text string. Tiny elements (0.5 x 0.5 footprint) additionally
//! occupy one quadrant of their cell. The type keeps the sub-cell present
//! exactly when the footprint is tiny; the flat row used for persistence is
//! validated against the same rule on the way in.

use super::color::HexColor;
use super::grid::{Cell, SubCell};
use super::shape_kind::ShapeKind;
use crate::error::ValidationError;
use crate::types::{ElementId, MapId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Occupied size in grid-cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Footprint {
    /// A quarter cell (0.5 x 0.5), placed in a quadrant.
    Tiny,
    /// Whole cells, each side at least 1.
    Cells { width: u8, height: u8 },
}

impl Footprint {
    /// A square footprint of `n` cells per side; `n` is raised to at least 1.
    pub fn square(n: u8) -> Self {
        let n = n.max(1);
        Footprint::Cells {
            width: n,
            height: n,
        }
    }

    /// Interpret persisted `width`/`height` values. Exactly `0.5` on both
    /// sides is tiny; otherwise both must be positive integers.
    pub fn from_grid_units(width: f64, height: f64) -> Result<Self, ValidationError> {
        if width == 0.5 && height == 0.5 {
            return Ok(Footprint::Tiny);
        }
        let whole = |v: f64| v >= 1.0 && v <= u8::MAX as f64 && v.fract() == 0.0;
        if whole(width) && whole(height) {
            Ok(Footprint::Cells {
                width: width as u8,
                height: height as u8,
            })
        } else {
            Err(ValidationError::element(format!(
                "footprint {width}x{height} is neither tiny nor whole cells"
            )))
        }
    }

    pub fn is_tiny(&self) -> bool {
        matches!(self, Footprint::Tiny)
    }

    pub fn width(&self) -> f64 {
        match self {
            Footprint::Tiny => 0.5,
            Footprint::Cells { width, .. } => f64::from(*width),
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            Footprint::Tiny => 0.5,
            Footprint::Cells { height, .. } => f64::from(*height),
        }
    }
}

/// What an element shows. Two tiny elements may share a cell only when
/// their content compares equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementContent {
    Shape(ShapeKind),
    Text(String),
}

impl ElementContent {
    pub fn is_text(&self) -> bool {
        matches!(self, ElementContent::Text(_))
    }

    pub fn shape(&self) -> Option<ShapeKind> {
        match self {
            ElementContent::Shape(kind) => Some(*kind),
            ElementContent::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ElementContent::Shape(_) => None,
            ElementContent::Text(text) => Some(text),
        }
    }
}

/// An element that has passed the occupancy check but has no identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDraft {
    pub cell: Cell,
    pub sub: Option<SubCell>,
    pub content: ElementContent,
    pub color: HexColor,
    pub footprint: Footprint,
}

impl ElementDraft {
    /// Assign an id and timestamp, attaching the element to `map_id`.
    pub fn into_element(self, map_id: Option<MapId>) -> MapElement {
        MapElement {
            id: ElementId::new(),
            map_id,
            grid_x: self.cell.x,
            grid_y: self.cell.y,
            sub: self.sub,
            footprint: self.footprint,
            content: self.content,
            color: self.color,
            created_at: Utc::now(),
        }
    }
}

/// A placed object on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElementRecord", into = "ElementRecord")]
pub struct MapElement {
    pub id: ElementId,
    pub map_id: Option<MapId>,
    pub grid_x: i32,
    pub grid_y: i32,
    sub: Option<SubCell>,
    footprint: Footprint,
    pub content: ElementContent,
    pub color: HexColor,
    pub created_at: DateTime<Utc>,
}

impl MapElement {
    /// Build a normal (whole-cell) element.
    pub fn normal(cell: Cell, footprint: Footprint, content: ElementContent, color: HexColor) -> Self {
        let footprint = if footprint.is_tiny() {
            Footprint::square(1)
        } else {
            footprint
        };
        ElementDraft {
            cell,
            sub: None,
            content,
            color,
            footprint,
        }
        .into_element(None)
    }

    /// Build a tiny element in the given quadrant.
    pub fn tiny(cell: Cell, sub: SubCell, content: ElementContent, color: HexColor) -> Self {
        ElementDraft {
            cell,
            sub: Some(sub),
            content,
            color,
            footprint: Footprint::Tiny,
        }
        .into_element(None)
    }

    /// Anchor cell.
    pub fn cell(&self) -> Cell {
        Cell::new(self.grid_x, self.grid_y)
    }

    pub fn sub(&self) -> Option<SubCell> {
        self.sub
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub fn is_tiny(&self) -> bool {
        self.footprint.is_tiny()
    }

    pub fn is_at(&self, cell: Cell) -> bool {
        self.grid_x == cell.x && self.grid_y == cell.y
    }

    /// Shift the anchor cell; the quadrant, if any, is kept.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.grid_x += dx;
        self.grid_y += dy;
    }

    /// Whether a point given in fractional cell units falls on this element.
    pub fn covers(&self, gx: f64, gy: f64) -> bool {
        let (x0, y0) = match self.sub {
            Some(sub) => (
                self.grid_x as f64 + f64::from(sub.x()) * 0.5,
                self.grid_y as f64 + f64::from(sub.y()) * 0.5,
            ),
            None => (self.grid_x as f64, self.grid_y as f64),
        };
        gx >= x0
            && gy >= y0
            && gx < x0 + self.footprint.width()
            && gy < y0 + self.footprint.height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ElementType {
    Shape,
    Text,
}

/// Flat row layout shared with the storage backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ElementRecord {
    id: ElementId,
    #[serde(default)]
    map_id: Option<MapId>,
    element_type: ElementType,
    grid_x: i32,
    grid_y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_x: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_y: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shape_type: Option<ShapeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_content: Option<String>,
    color: HexColor,
    width: f64,
    height: f64,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
}

impl TryFrom<ElementRecord> for MapElement {
    type Error = ValidationError;

    fn try_from(row: ElementRecord) -> Result<Self, Self::Error> {
        let footprint = Footprint::from_grid_units(row.width, row.height)?;

        let sub = match (row.sub_x, row.sub_y) {
            (Some(x), Some(y)) => Some(
                SubCell::new(x, y)
                    .ok_or_else(|| ValidationError::element(format!("sub-cell ({x}, {y})")))?,
            ),
            (None, None) => None,
            _ => return Err(ValidationError::element("sub_x and sub_y must come together")),
        };
        if sub.is_some() != footprint.is_tiny() {
            return Err(ValidationError::element(
                "sub-cell must be present exactly when the footprint is 0.5",
            ));
        }

        let content = match (row.element_type, row.shape_type, row.text_content) {
            (ElementType::Shape, Some(kind), _) => ElementContent::Shape(kind),
            (ElementType::Text, _, Some(text)) if !text.is_empty() => ElementContent::Text(text),
            (ElementType::Shape, None, _) => {
                return Err(ValidationError::element("shape element without shape_type"))
            }
            (ElementType::Text, _, _) => {
                return Err(ValidationError::element("text element without text_content"))
            }
        };

        Ok(MapElement {
            id: row.id,
            map_id: row.map_id,
            grid_x: row.grid_x,
            grid_y: row.grid_y,
            sub,
            footprint,
            content,
            color: row.color,
            created_at: row.created_at,
        })
    }
}

impl From<MapElement> for ElementRecord {
    fn from(element: MapElement) -> Self {
        let (element_type, shape_type, text_content) = match element.content {
            ElementContent::Shape(kind) => (ElementType::Shape, Some(kind), None),
            ElementContent::Text(text) => (ElementType::Text, None, Some(text)),
        };
        ElementRecord {
            id: element.id,
            map_id: element.map_id,
            element_type,
            grid_x: element.grid_x,
            grid_y: element.grid_y,
            sub_x: element.sub.map(|s| s.x()),
            sub_y: element.sub.map(|s| s.y()),
            shape_type,
            text_content,
            color: element.color,
            width: element.footprint.width(),
            height: element.footprint.height(),
            created_at: element.created_at,
        }
    }
}
