//! Shape registry.
//!
//! One static table maps every [`ShapeKind`] to its palette data and a plain
//! drawing routine. Routines only draw into the target rectangle of the
//! pixmap they are given.

use gridmapper_core::{Footprint, ShapeKind};
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::trace;

/// Draws one shape into `rect` using `color` as the primary fill.
pub type RenderFn = fn(&mut Pixmap, Rect, Color);

#[derive(Debug, Clone, Copy)]
pub struct ShapeDefinition {
    pub kind: ShapeKind,
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub default_width: u8,
    pub default_height: u8,
    pub render: RenderFn,
}

impl ShapeDefinition {
    pub fn default_footprint(&self) -> Footprint {
        Footprint::Cells {
            width: self.default_width,
            height: self.default_height,
        }
    }
}

const fn def(
    kind: ShapeKind,
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    default_width: u8,
    default_height: u8,
    render: RenderFn,
) -> ShapeDefinition {
    ShapeDefinition {
        kind,
        id,
        name,
        icon,
        default_width,
        default_height,
        render,
    }
}

/// Palette order; index `i` holds `ShapeKind::ALL[i]`.
pub static SHAPES: [ShapeDefinition; 16] = [
    def(ShapeKind::Wall, "wall", "Wall", "▬", 1, 1, render_wall),
    def(ShapeKind::Door, "door", "Door", "⌂", 1, 1, render_door),
    def(ShapeKind::Window, "window", "Window", "▢", 1, 1, render_window),
    def(ShapeKind::Table, "table", "Table", "⊡", 2, 1, render_table),
    def(ShapeKind::Chair, "chair", "Chair", "⊓", 1, 1, render_chair),
    def(ShapeKind::Bed, "bed", "Bed", "▭", 2, 3, render_bed),
    def(ShapeKind::Chest, "chest", "Chest", "▣", 1, 1, render_chest),
    def(ShapeKind::Tree, "tree", "Tree", "♠", 1, 1, render_tree),
    def(ShapeKind::Rock, "rock", "Rock", "◆", 1, 1, render_rock),
    def(ShapeKind::Water, "water", "Water", "≈", 1, 1, render_water),
    def(ShapeKind::Stairs, "stairs", "Stairs", "≡", 2, 2, render_stairs),
    def(ShapeKind::DoorOpen, "door-open", "Open Door", "⊏", 1, 1, render_door_open),
    def(ShapeKind::DoorLocked, "door-locked", "Locked Door", "⊠", 1, 1, render_door_locked),
    def(ShapeKind::Food, "food", "Food", "◍", 1, 1, render_food),
    def(ShapeKind::Farm, "farm", "Farm", "⊞", 1, 1, render_farm),
    def(ShapeKind::Campsite, "campsite", "Campsite", "▲", 1, 1, render_campsite),
];

/// Registry entry for a kind.
pub fn definition(kind: ShapeKind) -> &'static ShapeDefinition {
    &SHAPES[kind as usize]
}

/// Registry entry for a persisted identifier.
pub fn lookup(id: &str) -> Option<&'static ShapeDefinition> {
    SHAPES.iter().find(|d| d.id == id)
}

pub fn render(kind: ShapeKind, pixmap: &mut Pixmap, rect: Rect, color: Color) {
    (definition(kind).render)(pixmap, rect, color);
}

/// Render by identifier; unknown identifiers draw nothing.
pub fn render_by_id(id: &str, pixmap: &mut Pixmap, rect: Rect, color: Color) -> bool {
    match lookup(id) {
        Some(shape) => {
            (shape.render)(pixmap, rect, color);
            true
        }
        None => {
            trace!("No shape registered for {:?}", id);
            false
        }
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// Sub-rectangle given as fractions of `rect`.
fn part(rect: Rect, fx: f32, fy: f32, fw: f32, fh: f32) -> Option<Rect> {
    Rect::from_xywh(
        rect.x() + rect.width() * fx,
        rect.y() + rect.height() * fy,
        rect.width() * fw,
        rect.height() * fh,
    )
}

fn fill(pixmap: &mut Pixmap, rect: Option<Rect>, color: Color) {
    if let Some(r) = rect {
        pixmap.fill_rect(r, &paint(color), Transform::identity(), None);
    }
}

fn stroke_path(pixmap: &mut Pixmap, path: Option<Path>, color: Color, width: f32) {
    if let Some(p) = path {
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        pixmap.stroke_path(&p, &paint(color), &stroke, Transform::identity(), None);
    }
}

fn fill_path(pixmap: &mut Pixmap, path: Option<Path>, color: Color) {
    if let Some(p) = path {
        pixmap.fill_path(&p, &paint(color), FillRule::Winding, Transform::identity(), None);
    }
}

fn stroke_rect(pixmap: &mut Pixmap, rect: Option<Rect>, color: Color, width: f32) {
    stroke_path(pixmap, rect.map(PathBuilder::from_rect), color, width);
}

/// Quarter circle centred at `(cx, cy)` sweeping from +x to +y.
fn quarter_arc(cx: f32, cy: f32, r: f32) -> Option<Path> {
    const K: f32 = 0.552_284_8;
    let mut pb = PathBuilder::new();
    pb.move_to(cx + r, cy);
    pb.cubic_to(cx + r, cy + r * K, cx + r * K, cy + r, cx, cy + r);
    pb.finish()
}

fn render_wall(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    fill(pixmap, Some(rect), color);
}

fn render_door(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    fill(pixmap, Some(rect), color);
    let r = rect.width().min(rect.height()) * 0.3;
    let arc = quarter_arc(
        rect.x() + rect.width() * 0.2,
        rect.y() + rect.height() * 0.2,
        r,
    );
    stroke_path(pixmap, arc, Color::WHITE, 2.0);
}

fn render_window(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    fill(pixmap, Some(rect), color);
    stroke_rect(pixmap, part(rect, 0.2, 0.2, 0.6, 0.6), Color::WHITE, 2.0);
    let mut pb = PathBuilder::new();
    pb.move_to(rect.x() + rect.width() * 0.5, rect.y() + rect.height() * 0.2);
    pb.line_to(rect.x() + rect.width() * 0.5, rect.y() + rect.height() * 0.8);
    pb.move_to(rect.x() + rect.width() * 0.2, rect.y() + rect.height() * 0.5);
    pb.line_to(rect.x() + rect.width() * 0.8, rect.y() + rect.height() * 0.5);
    stroke_path(pixmap, pb.finish(), Color::WHITE, 2.0);
}

fn render_table(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    let top = part(rect, 0.1, 0.1, 0.8, 0.8);
    fill(pixmap, top, color);
    stroke_rect(pixmap, top, Color::BLACK, 2.0);
}

fn render_chair(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    fill(pixmap, part(rect, 0.2, 0.2, 0.6, 0.6), color);
    fill(pixmap, part(rect, 0.3, 0.1, 0.4, 0.2), color);
}

fn render_bed(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    fill(pixmap, part(rect, 0.1, 0.2, 0.8, 0.7), color);
    fill(pixmap, part(rect, 0.1, 0.1, 0.8, 0.15), color);
}

fn render_chest(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    let body = part(rect, 0.15, 0.15, 0.7, 0.7);
    fill(pixmap, body, color);
    stroke_rect(pixmap, body, Color::BLACK, 2.0);
    fill(pixmap, part(rect, 0.45, 0.4, 0.1, 0.2), Color::BLACK);
}

fn render_tree(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    let crown = PathBuilder::from_circle(
        rect.x() + rect.width() * 0.5,
        rect.y() + rect.height() * 0.4,
        rect.width().min(rect.height()) * 0.35,
    );
    fill_path(pixmap, crown, color);
    fill(pixmap, part(rect, 0.4, 0.6, 0.2, 0.3), color);
}

fn render_rock(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    let at = |fx: f32, fy: f32| (rect.x() + rect.width() * fx, rect.y() + rect.height() * fy);
    let mut pb = PathBuilder::new();
    let (x, y) = at(0.5, 0.1);
    pb.move_to(x, y);
    for (fx, fy) in [(0.85, 0.4), (0.7, 0.85), (0.3, 0.85), (0.15, 0.4)] {
        let (x, y) = at(fx, fy);
        pb.line_to(x, y);
    }
    pb.close();
    fill_path(pixmap, pb.finish(), color);
}

fn render_water(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    fill(pixmap, Some(rect), color);
    let mut pb = PathBuilder::new();
    for i in 0..3 {
        let y = rect.y() + rect.height() * (0.25 + i as f32 * 0.25);
        let swell = rect.height() * 0.05;
        pb.move_to(rect.x(), y);
        pb.quad_to(rect.x() + rect.width() * 0.25, y - swell, rect.x() + rect.width() * 0.5, y);
        pb.quad_to(rect.x() + rect.width() * 0.75, y + swell, rect.right(), y);
    }
    stroke_path(pixmap, pb.finish(), Color::from_rgba8(255, 255, 255, 128), 1.0);
}

fn render_stairs(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    const STEPS: usize = 5;
    let step = 1.0 / STEPS as f32;
    for i in 0..STEPS {
        let tread = part(rect, 0.0, i as f32 * step, 1.0, step * 0.8);
        fill(pixmap, tread, color);
        stroke_rect(pixmap, tread, Color::BLACK, 1.0);
    }
}

fn render_door_open(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    fill(pixmap, part(rect, 0.0, 0.0, 0.15, 1.0), color);
    let arc = quarter_arc(rect.x(), rect.y(), rect.width().min(rect.height()) * 0.9);
    stroke_path(pixmap, arc, color, 2.0);
}

fn render_door_locked(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    render_door(pixmap, rect, color);
    let hole = PathBuilder::from_circle(
        rect.x() + rect.width() * 0.5,
        rect.y() + rect.height() * 0.45,
        rect.width().min(rect.height()) * 0.1,
    );
    fill_path(pixmap, hole, Color::WHITE);
    fill(pixmap, part(rect, 0.46, 0.5, 0.08, 0.2), Color::WHITE);
}

fn render_food(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    let cx = rect.x() + rect.width() * 0.5;
    let cy = rect.y() + rect.height() * 0.5;
    let r = rect.width().min(rect.height());
    fill_path(pixmap, PathBuilder::from_circle(cx, cy, r * 0.35), color);
    fill_path(pixmap, PathBuilder::from_circle(cx, cy, r * 0.22), Color::WHITE);
    fill_path(pixmap, PathBuilder::from_circle(cx, cy, r * 0.1), color);
}

fn render_farm(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    fill(pixmap, Some(rect), color);
    let mut pb = PathBuilder::new();
    for i in 1..4 {
        let x = rect.x() + rect.width() * i as f32 * 0.25;
        pb.move_to(x, rect.y() + rect.height() * 0.1);
        pb.line_to(x, rect.y() + rect.height() * 0.9);
    }
    stroke_path(pixmap, pb.finish(), Color::from_rgba8(0, 0, 0, 100), 1.5);
}

fn render_campsite(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    let at = |fx: f32, fy: f32| (rect.x() + rect.width() * fx, rect.y() + rect.height() * fy);
    let mut tent = PathBuilder::new();
    let (x, y) = at(0.5, 0.15);
    tent.move_to(x, y);
    let (x, y) = at(0.9, 0.85);
    tent.line_to(x, y);
    let (x, y) = at(0.1, 0.85);
    tent.line_to(x, y);
    tent.close();
    fill_path(pixmap, tent.finish(), color);

    let mut flap = PathBuilder::new();
    let (x, y) = at(0.5, 0.45);
    flap.move_to(x, y);
    let (x, y) = at(0.62, 0.85);
    flap.line_to(x, y);
    let (x, y) = at(0.38, 0.85);
    flap.line_to(x, y);
    flap.close();
    fill_path(pixmap, flap.finish(), Color::BLACK);
}
