//! Viewport and coordinate transformation for the grid canvas.
//!
//! The canvas is drawn at `cell_size` pixels per cell and shown through a
//! scrollable window. Pointer positions arrive relative to that window; the
//! viewport adds the scroll offset and divides by the cell size to get grid
//! coordinates.

use gridmapper_core::{Cell, CellSize, GridBounds, SubCell};

/// Scroll and zoom state of the canvas window.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    bounds: GridBounds,
    cell_size: CellSize,
    view_width: f64,
    view_height: f64,
    scroll_x: f64,
    scroll_y: f64,
}

/// A pointer position resolved against the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    /// Position in fractional cell units.
    pub gx: f64,
    pub gy: f64,
    pub cell: Cell,
    /// Quadrant of `cell` under the pointer.
    pub sub: SubCell,
}

impl GridPoint {
    pub fn from_grid_units(gx: f64, gy: f64) -> Self {
        let cell = Cell::new(gx.floor() as i32, gy.floor() as i32);
        Self {
            gx,
            gy,
            cell,
            sub: SubCell::from_offset(gx - gx.floor(), gy - gy.floor()),
        }
    }
}

impl Viewport {
    /// A window exactly as large as the content, so nothing scrolls until
    /// [`set_view_size`](Self::set_view_size) shrinks it.
    pub fn new(bounds: GridBounds, cell_size: CellSize) -> Self {
        let mut viewport = Self {
            bounds,
            cell_size,
            view_width: 0.0,
            view_height: 0.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        };
        viewport.view_width = viewport.content_width();
        viewport.view_height = viewport.content_height();
        viewport
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn cell_size(&self) -> CellSize {
        self.cell_size
    }

    /// Cell size in pixels as a float.
    pub fn cell_pixels(&self) -> f64 {
        f64::from(self.cell_size.pixels())
    }

    pub fn content_width(&self) -> f64 {
        f64::from(self.bounds.width()) * self.cell_pixels()
    }

    pub fn content_height(&self) -> f64 {
        f64::from(self.bounds.height()) * self.cell_pixels()
    }

    pub fn view_size(&self) -> (f64, f64) {
        (self.view_width, self.view_height)
    }

    pub fn scroll(&self) -> (f64, f64) {
        (self.scroll_x, self.scroll_y)
    }

    /// Sets the window dimensions (typically called when the window resizes).
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_width = width.max(0.0);
        self.view_height = height.max(0.0);
        self.clamp_scroll();
    }

    pub fn set_bounds(&mut self, bounds: GridBounds) {
        self.bounds = bounds;
        self.clamp_scroll();
    }

    pub fn set_cell_size(&mut self, cell_size: CellSize) {
        self.cell_size = cell_size;
        self.clamp_scroll();
    }

    /// Grows cells by one zoom step, stopping at the maximum.
    pub fn zoom_in(&mut self) {
        self.set_cell_size(self.cell_size.zoom_in());
    }

    /// Shrinks cells by one zoom step, stopping at the minimum.
    pub fn zoom_out(&mut self) {
        self.set_cell_size(self.cell_size.zoom_out());
    }

    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll();
    }

    /// Scrolls by a delta, clamped to the content extent.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.set_scroll(self.scroll_x + dx, self.scroll_y + dy);
    }

    /// Converts a window position to grid coordinates. Positions off the
    /// grid still resolve; callers range-check the cell.
    pub fn to_grid(&self, x: f64, y: f64) -> GridPoint {
        let cell = self.cell_pixels();
        GridPoint::from_grid_units((x + self.scroll_x) / cell, (y + self.scroll_y) / cell)
    }

    /// Top-left corner of a cell in content pixels.
    pub fn cell_origin(&self, cell: Cell) -> (f64, f64) {
        let size = self.cell_pixels();
        (f64::from(cell.x) * size, f64::from(cell.y) * size)
    }

    fn clamp_scroll(&mut self) {
        let max_x = (self.content_width() - self.view_width).max(0.0);
        let max_y = (self.content_height() - self.view_height).max(0.0);
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GridBounds::default(), CellSize::default())
    }
}
