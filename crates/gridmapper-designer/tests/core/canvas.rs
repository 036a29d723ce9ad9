//! End-to-end pointer scenarios on the default 30x20 canvas.

use gridmapper_core::{Cell, ElementContent, GridBounds, HexColor, ShapeKind, SubCell};
use gridmapper_designer::{
    Canvas, InteractionState, Modifiers, PointerButton, PointerEvent, SizeCategory, Tool,
    ToolSettings,
};

const CELL: f64 = 40.0;

fn cell_center(x: i32, y: i32) -> (f64, f64) {
    (f64::from(x) * CELL + CELL / 2.0, f64::from(y) * CELL + CELL / 2.0)
}

fn quadrant_center(x: i32, y: i32, sub: SubCell) -> (f64, f64) {
    let q = CELL / 2.0;
    (
        f64::from(x) * CELL + f64::from(sub.x()) * q + q / 2.0,
        f64::from(y) * CELL + f64::from(sub.y()) * q + q / 2.0,
    )
}

fn click(canvas: &mut Canvas, settings: &ToolSettings, (px, py): (f64, f64)) -> usize {
    let created = canvas.handle_pointer(PointerEvent::down(PointerButton::Left, px, py), settings);
    canvas.handle_pointer(PointerEvent::up(PointerButton::Left, px, py), settings);
    created.len()
}

fn tiny_text(text: &str) -> ToolSettings {
    ToolSettings {
        tool: Tool::Text,
        text: text.to_string(),
        size: SizeCategory::Tiny,
        ..ToolSettings::default()
    }
}

#[test]
fn test_wall_twice_keeps_second_color() {
    let mut canvas = Canvas::default();
    let red = HexColor::from_rgb(0xff, 0, 0);
    let blue = HexColor::from_rgb(0, 0, 0xff);

    let mut settings = ToolSettings {
        shape: Some(ShapeKind::Wall),
        color: red,
        ..ToolSettings::default()
    };
    click(&mut canvas, &settings, cell_center(5, 5));
    settings.color = blue.clone();
    click(&mut canvas, &settings, cell_center(5, 5));

    let at_cell: Vec<_> = canvas.element_store.at_cell(Cell::new(5, 5)).collect();
    assert_eq!(at_cell.len(), 1);
    assert_eq!(at_cell[0].color, blue);
    assert_eq!(canvas.element_count(), 1);
}

#[test]
fn test_four_tiny_texts_fill_a_cell() {
    let mut canvas = Canvas::default();
    let settings = tiny_text("1");

    for sub in [
        SubCell::TOP_LEFT,
        SubCell::TOP_RIGHT,
        SubCell::BOTTOM_LEFT,
        SubCell::BOTTOM_RIGHT,
    ] {
        click(&mut canvas, &settings, quadrant_center(2, 2, sub));
    }
    assert_eq!(canvas.element_store.at_cell(Cell::new(2, 2)).count(), 4);

    for sub in SubCell::all() {
        assert_eq!(click(&mut canvas, &settings, quadrant_center(2, 2, sub)), 0);
    }
    assert_eq!(canvas.element_count(), 4);
}

#[test]
fn test_different_tiny_text_rejected() {
    let mut canvas = Canvas::default();
    click(&mut canvas, &tiny_text("A"), quadrant_center(2, 2, SubCell::TOP_LEFT));
    let created = click(&mut canvas, &tiny_text("B"), quadrant_center(2, 2, SubCell::BOTTOM_LEFT));

    assert_eq!(created, 0);
    assert_eq!(canvas.element_count(), 1);
    let only = canvas.elements().next().unwrap();
    assert_eq!(only.content, ElementContent::Text("A".into()));
}

#[test]
fn test_select_and_drag_moves_one_cell() {
    let mut canvas = Canvas::default();
    let place = ToolSettings::default();
    click(&mut canvas, &place, cell_center(3, 3));
    click(&mut canvas, &place, cell_center(10, 10));
    let ids: Vec<_> = canvas.elements().map(|e| e.id).collect();
    let (e, other) = (ids[0], ids[1]);

    let select = ToolSettings {
        tool: Tool::Select,
        ..ToolSettings::default()
    };
    let (px, py) = cell_center(3, 3);
    canvas.handle_pointer(PointerEvent::down(PointerButton::Left, px, py), &select);
    assert!(canvas.selection_manager.is_selected(e));
    assert_eq!(canvas.selection_manager.len(), 1);
    assert!(matches!(
        canvas.state(),
        InteractionState::DraggingSelection { .. }
    ));

    let (mx, my) = cell_center(4, 3);
    let changes = canvas.handle_pointer(PointerEvent::moved(mx, my), &select);
    canvas.handle_pointer(PointerEvent::up(PointerButton::Left, mx, my), &select);

    assert_eq!(changes.len(), 1);
    assert_eq!(canvas.element_store.get(e).unwrap().grid_x, 4);
    assert_eq!(canvas.element_store.get(e).unwrap().grid_y, 3);
    assert_eq!(canvas.element_store.get(other).unwrap().cell(), Cell::new(10, 10));
    assert!(canvas.state().is_idle());
}

#[test]
fn test_shrinking_grid_keeps_selection_draggable() {
    let mut canvas = Canvas::default();
    let place = ToolSettings::default();
    click(&mut canvas, &place, cell_center(25, 5));
    click(&mut canvas, &place, cell_center(2, 2));
    let ids: Vec<_> = canvas.elements().map(|e| e.id).collect();
    let (far, near) = (ids[0], ids[1]);

    let select = ToolSettings {
        tool: Tool::Select,
        ..ToolSettings::default()
    };
    click(&mut canvas, &select, cell_center(2, 2));
    let (fx, fy) = cell_center(25, 5);
    canvas.handle_pointer(
        PointerEvent::down(PointerButton::Left, fx, fy).with_modifiers(Modifiers::CTRL),
        &select,
    );
    assert_eq!(canvas.selection_manager.len(), 2);

    canvas.set_bounds(GridBounds::new(20, 20).unwrap());
    assert_eq!(canvas.selection_manager.len(), 1);
    assert!(canvas.selection_manager.is_selected(near));

    let (px, py) = cell_center(2, 2);
    canvas.handle_pointer(PointerEvent::down(PointerButton::Left, px, py), &select);
    let (mx, my) = cell_center(3, 2);
    let changes = canvas.handle_pointer(PointerEvent::moved(mx, my), &select);
    canvas.handle_pointer(PointerEvent::up(PointerButton::Left, mx, my), &select);

    assert_eq!(changes.len(), 1);
    assert_eq!(canvas.element_store.get(near).unwrap().cell(), Cell::new(3, 2));
    assert_eq!(canvas.element_store.get(far).unwrap().cell(), Cell::new(25, 5));
}

#[test]
fn test_click_on_empty_clears_selection_unless_modified() {
    let mut canvas = Canvas::default();
    click(&mut canvas, &ToolSettings::default(), cell_center(1, 1));
    let select = ToolSettings {
        tool: Tool::Select,
        ..ToolSettings::default()
    };
    click(&mut canvas, &select, cell_center(1, 1));
    assert_eq!(canvas.selection_manager.len(), 1);

    let (px, py) = cell_center(7, 7);
    canvas.handle_pointer(
        PointerEvent::down(PointerButton::Left, px, py).with_modifiers(Modifiers::CTRL),
        &select,
    );
    assert_eq!(canvas.selection_manager.len(), 1);

    click(&mut canvas, &select, cell_center(7, 7));
    assert!(canvas.selection_manager.is_empty());
}

#[test]
fn test_drag_paint_places_once_per_cell() {
    let mut canvas = Canvas::default();
    let settings = ToolSettings::default();

    let (px, py) = cell_center(0, 0);
    canvas.handle_pointer(PointerEvent::down(PointerButton::Left, px, py), &settings);
    for x in [0, 1, 1, 2, 2] {
        let (mx, my) = cell_center(x, 0);
        canvas.handle_pointer(PointerEvent::moved(mx + 3.0, my), &settings);
    }
    canvas.handle_pointer(PointerEvent::leave(), &settings);

    assert_eq!(canvas.element_count(), 3);
    assert!(canvas.state().is_idle());

    // Moving after the gesture ended paints nothing.
    let (mx, my) = cell_center(5, 0);
    canvas.handle_pointer(PointerEvent::moved(mx, my), &settings);
    assert_eq!(canvas.element_count(), 3);
}

#[test]
fn test_erase_drag_removes_one_per_cell_visit() {
    let mut canvas = Canvas::default();
    let tiny = ToolSettings {
        size: SizeCategory::Tiny,
        ..ToolSettings::default()
    };
    for sub in [SubCell::TOP_LEFT, SubCell::TOP_RIGHT, SubCell::BOTTOM_LEFT] {
        click(&mut canvas, &tiny, quadrant_center(2, 2, sub));
    }
    click(&mut canvas, &ToolSettings::default(), cell_center(3, 2));
    assert_eq!(canvas.element_count(), 4);

    let erase = ToolSettings {
        tool: Tool::Erase,
        ..ToolSettings::default()
    };
    let (px, py) = cell_center(2, 2);
    canvas.handle_pointer(PointerEvent::down(PointerButton::Left, px, py), &erase);
    assert_eq!(canvas.element_count(), 3);

    // Staying inside the cell does not erase again.
    canvas.handle_pointer(PointerEvent::moved(px + 5.0, py + 5.0), &erase);
    assert_eq!(canvas.element_count(), 3);

    let (nx, ny) = cell_center(3, 2);
    canvas.handle_pointer(PointerEvent::moved(nx, ny), &erase);
    assert_eq!(canvas.element_count(), 2);

    canvas.handle_pointer(PointerEvent::moved(px, py), &erase);
    canvas.handle_pointer(PointerEvent::up(PointerButton::Left, px, py), &erase);
    assert_eq!(canvas.element_count(), 1);
    assert_eq!(canvas.element_store.at_cell(Cell::new(2, 2)).count(), 1);
}

#[test]
fn test_right_click_erases_with_any_tool() {
    let mut canvas = Canvas::default();
    let settings = ToolSettings::default();
    click(&mut canvas, &settings, cell_center(6, 6));

    let (px, py) = cell_center(6, 6);
    let changes = canvas.handle_pointer(PointerEvent::down(PointerButton::Right, px, py), &settings);
    assert_eq!(changes.deleted().count(), 1);
    assert_eq!(canvas.element_count(), 0);
    assert!(canvas.state().is_idle());
}

#[test]
fn test_clicks_outside_grid_ignored() {
    let mut canvas = Canvas::default();
    let settings = ToolSettings::default();
    assert_eq!(click(&mut canvas, &settings, (30.0 * CELL + 5.0, 10.0)), 0);
    assert_eq!(canvas.element_count(), 0);
}
