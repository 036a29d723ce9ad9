//! Grid addressing: cells, quadrants, grid bounds and cell size.

use crate::constants::{
    CELL_SIZE_STEP, DEFAULT_CELL_SIZE, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MAX_CELL_SIZE,
    MAX_GRID_DIMENSION, MIN_CELL_SIZE, MIN_GRID_DIMENSION,
};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One grid-aligned unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This cell shifted by a delta.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four quadrants of a cell, used only by tiny elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubCell {
    x: u8,
    y: u8,
}

impl SubCell {
    pub const TOP_LEFT: SubCell = SubCell { x: 0, y: 0 };
    pub const TOP_RIGHT: SubCell = SubCell { x: 1, y: 0 };
    pub const BOTTOM_LEFT: SubCell = SubCell { x: 0, y: 1 };
    pub const BOTTOM_RIGHT: SubCell = SubCell { x: 1, y: 1 };

    /// Quadrant at `(x, y)`; both coordinates must be 0 or 1.
    pub fn new(x: u8, y: u8) -> Option<Self> {
        (x <= 1 && y <= 1).then_some(Self { x, y })
    }

    /// Quadrant under a pointer, given its offset inside the cell as a
    /// fraction in `[0, 1)` on each axis.
    pub fn from_offset(fx: f64, fy: f64) -> Self {
        Self {
            x: u8::from(fx >= 0.5),
            y: u8::from(fy >= 0.5),
        }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Row-major index in `0..4`.
    pub fn index(&self) -> usize {
        usize::from(self.y * 2 + self.x)
    }

    /// All four quadrants in row-major order.
    pub fn all() -> [SubCell; 4] {
        [
            Self::TOP_LEFT,
            Self::TOP_RIGHT,
            Self::BOTTOM_LEFT,
            Self::BOTTOM_RIGHT,
        ]
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    width: u32,
    height: u32,
}

impl GridBounds {
    /// Checked constructor; rejects dimensions outside `[5, 100]`.
    pub fn new(width: u32, height: u32) -> Result<Self, ValidationError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Ok(Self { width, height })
    }

    /// Clamps each dimension into `[5, 100]`, the way the size inputs do.
    pub fn clamped(width: i64, height: i64) -> Self {
        let clamp = |v: i64| v.clamp(MIN_GRID_DIMENSION as i64, MAX_GRID_DIMENSION as i64) as u32;
        Self {
            width: clamp(width),
            height: clamp(height),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the cell lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

fn check_dimension(axis: &'static str, value: u32) -> Result<(), ValidationError> {
    if (MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::GridDimension {
            axis,
            value,
            min: MIN_GRID_DIMENSION,
            max: MAX_GRID_DIMENSION,
        })
    }
}

/// Rendered size of one cell in pixels, kept within `[20, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CellSize(u32);

impl CellSize {
    pub fn new(pixels: u32) -> Result<Self, ValidationError> {
        if (MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&pixels) {
            Ok(Self(pixels))
        } else {
            Err(ValidationError::CellSize {
                value: pixels,
                min: MIN_CELL_SIZE,
                max: MAX_CELL_SIZE,
            })
        }
    }

    pub fn clamped(pixels: u32) -> Self {
        Self(pixels.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE))
    }

    pub fn pixels(&self) -> u32 {
        self.0
    }

    pub fn zoom_in(self) -> Self {
        Self::clamped(self.0 + CELL_SIZE_STEP)
    }

    pub fn zoom_out(self) -> Self {
        Self::clamped(self.0.saturating_sub(CELL_SIZE_STEP))
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self(DEFAULT_CELL_SIZE)
    }
}

impl TryFrom<u32> for CellSize {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CellSize> for u32 {
    fn from(size: CellSize) -> Self {
        size.0
    }
}
