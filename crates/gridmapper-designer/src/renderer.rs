//! Canvas renderer for the grid map
//! Renders the grid and its elements to an image buffer using tiny-skia for anti-aliased 2D rendering.
//!
//! Features:
//! - Grid lines at every cell boundary
//! - Shape glyphs through the shape registry, text labels through system fonts
//! - Tiny elements drawn into their quadrant
//! - Optional selection outlines and hover overlay

use crate::canvas::Canvas;
use crate::font_manager;
use crate::occupancy::QuadrantState;
use crate::shapes;
use gridmapper_core::{ElementContent, HexColor, MapElement, SubCell};
use image::{Rgb, RgbImage};
use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::{Color, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::warn;

fn bg_color(dark_mode: bool) -> Color {
    if dark_mode {
        Color::from_rgba8(55, 65, 81, 255)
    } else {
        Color::from_rgba8(255, 255, 255, 255)
    }
}
fn grid_color() -> Color {
    Color::from_rgba8(221, 221, 221, 255)
}
fn selection_color() -> Color {
    Color::from_rgba8(59, 130, 246, 255)
}
fn hover_color() -> Color {
    Color::from_rgba8(59, 130, 246, 56)
}
fn free_quadrant_color() -> Color {
    Color::from_rgba8(34, 197, 94, 72)
}
fn taken_quadrant_color() -> Color {
    Color::from_rgba8(239, 68, 68, 72)
}

/// What to draw besides the map itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub dark_mode: bool,
    /// Selection outlines and the hover overlay. Off for exports.
    pub overlays: bool,
}

impl RenderOptions {
    /// Plain map, light background, no editor overlays.
    pub fn export() -> Self {
        Self::default()
    }
}

pub fn to_skia_color(color: &HexColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::from_rgba8(r, g, b, 255)
}

/// Label size for text elements: 0.6 of the box, shrinking with the square
/// root of the length for longer labels but never below 0.4.
pub fn text_font_size(box_size: f32, len: usize) -> f32 {
    if len > 1 {
        (box_size * 0.4).max(box_size * 0.6 / (len as f32).sqrt())
    } else {
        box_size * 0.6
    }
}

/// Pixel rectangle an element is drawn into.
pub fn element_rect(element: &MapElement, cell_size: f32) -> Option<Rect> {
    let (mut x, mut y) = (
        element.grid_x as f32 * cell_size,
        element.grid_y as f32 * cell_size,
    );
    if let Some(sub) = element.sub() {
        x += f32::from(sub.x()) * cell_size / 2.0;
        y += f32::from(sub.y()) * cell_size / 2.0;
    }
    let footprint = element.footprint();
    Rect::from_xywh(
        x,
        y,
        footprint.width() as f32 * cell_size,
        footprint.height() as f32 * cell_size,
    )
}

/// Render the whole grid (not just the visible window) to an image.
pub fn render_canvas(canvas: &Canvas, options: RenderOptions) -> RgbImage {
    let viewport = canvas.viewport();
    let cell = viewport.cell_pixels() as f32;
    let width = viewport.content_width() as u32;
    let height = viewport.content_height() as u32;

    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::new(width, height);
    };
    pixmap.fill(bg_color(options.dark_mode));

    draw_grid(&mut pixmap, canvas, cell);

    for element in canvas.elements() {
        let Some(rect) = element_rect(element, cell) else {
            continue;
        };
        let color = to_skia_color(&element.color);
        match &element.content {
            ElementContent::Shape(kind) => shapes::render(*kind, &mut pixmap, rect, color),
            ElementContent::Text(text) => draw_label(&mut pixmap, text, rect, color),
        }
    }

    if options.overlays {
        draw_selection(&mut pixmap, canvas, cell);
        draw_hover(&mut pixmap, canvas, cell);
    }

    // Convert Pixmap to RgbImage
    let data = pixmap.data();
    RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    })
}

fn draw_grid(pixmap: &mut Pixmap, canvas: &Canvas, cell: f32) {
    let bounds = canvas.bounds();
    let (w, h) = (bounds.width() as f32 * cell, bounds.height() as f32 * cell);

    let mut pb = PathBuilder::new();
    for x in 0..=bounds.width() {
        let px = x as f32 * cell + 0.5;
        pb.move_to(px, 0.0);
        pb.line_to(px, h);
    }
    for y in 0..=bounds.height() {
        let py = y as f32 * cell + 0.5;
        pb.move_to(0.0, py);
        pb.line_to(w, py);
    }
    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color(grid_color());
        paint.anti_alias = false;
        let stroke = Stroke {
            width: 1.0,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn draw_label(pixmap: &mut Pixmap, text: &str, rect: Rect, color: Color) {
    let Some(font) = font_manager::label_font() else {
        warn!(text, "no font available, skipping text element");
        return;
    };
    let size = text_font_size(rect.width().min(rect.height()), text.chars().count());
    let center = (rect.x() + rect.width() / 2.0, rect.y() + rect.height() / 2.0);
    draw_centered_text(pixmap, font, text, size, center, color);
}

fn draw_centered_text(
    pixmap: &mut Pixmap,
    font: &Font<'static>,
    text: &str,
    size: f32,
    center: (f32, f32),
    color: Color,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let text_width = font
        .layout(text, scale, rt_point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    // Middle baseline: half way between ascent and descent.
    let baseline = center.1 + (v_metrics.ascent + v_metrics.descent) / 2.0;
    let start = rt_point(center.0 - text_width / 2.0, baseline);

    let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
    let (r, g, b) = (color.red(), color.green(), color.blue());
    for glyph in font.layout(text, scale, start) {
        let Some(bounding_box) = glyph.pixel_bounding_box() else {
            continue;
        };
        let data = pixmap.data_mut();
        glyph.draw(|gx, gy, v| {
            let px = gx as i32 + bounding_box.min.x;
            let py = gy as i32 + bounding_box.min.y;
            if px < 0 || px >= width || py < 0 || py >= height || v <= 0.0 {
                return;
            }
            let idx = ((py * width + px) * 4) as usize;
            let pixel = &mut data[idx..idx + 4];
            // Source-over onto an opaque background.
            let blend = |dst: u8, src: f32| (src * 255.0 * v + f32::from(dst) * (1.0 - v)) as u8;
            pixel[0] = blend(pixel[0], r);
            pixel[1] = blend(pixel[1], g);
            pixel[2] = blend(pixel[2], b);
            pixel[3] = 255;
        });
    }
}

fn draw_selection(pixmap: &mut Pixmap, canvas: &Canvas, cell: f32) {
    let mut paint = Paint::default();
    paint.set_color(selection_color());
    paint.anti_alias = true;
    let stroke = Stroke {
        width: 2.0,
        ..Default::default()
    };
    for element in canvas
        .elements()
        .filter(|e| canvas.selection_manager.is_selected(e.id))
    {
        if let Some(rect) = element_rect(element, cell) {
            let path = PathBuilder::from_rect(rect);
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

fn draw_hover(pixmap: &mut Pixmap, canvas: &Canvas, cell: f32) {
    let Some(hover) = canvas.hover() else {
        return;
    };
    let (x, y) = (hover.cell.x as f32 * cell, hover.cell.y as f32 * cell);
    let mut paint = Paint::default();

    match hover.quadrants {
        None => {
            paint.set_color(hover_color());
            if let Some(rect) = Rect::from_xywh(x, y, cell, cell) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
        Some(states) => {
            let half = cell / 2.0;
            for sub in SubCell::all() {
                paint.set_color(match states[sub.index()] {
                    QuadrantState::Free => free_quadrant_color(),
                    QuadrantState::Occupied => taken_quadrant_color(),
                });
                let qx = x + f32::from(sub.x()) * half;
                let qy = y + f32::from(sub.y()) * half;
                if let Some(rect) = Rect::from_xywh(qx, qy, half, half) {
                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }
            }
        }
    }
}
