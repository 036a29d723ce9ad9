//! Occupancy rules applied to a live element store.

use gridmapper_core::{
    Cell, ElementContent, Footprint, GridBounds, HexColor, MapElement, ShapeKind, SubCell,
};
use gridmapper_designer::occupancy::{erase_target, translate, try_place, PlacementRequest, Rejection};
use gridmapper_designer::ElementStore;

fn shape(kind: ShapeKind) -> ElementContent {
    ElementContent::Shape(kind)
}

fn place(
    store: &mut ElementStore,
    cell: Cell,
    footprint: Footprint,
    sub: Option<SubCell>,
    content: ElementContent,
) -> Result<MapElement, Rejection> {
    let request = PlacementRequest {
        cell,
        sub,
        content,
        color: HexColor::black(),
        footprint,
    };
    let plan = try_place(GridBounds::default(), request, store.at_cell(cell))?;
    for id in plan.to_remove {
        store.remove(id);
    }
    let element = plan.to_add.into_element(None);
    store.insert(element.clone());
    Ok(element)
}

#[test]
fn test_normal_placement_replaces_any_footprint() {
    let cell = Cell::new(5, 5);
    for old in 1..=4u8 {
        for new in 1..=4u8 {
            let mut store = ElementStore::new();
            let first = place(&mut store, cell, Footprint::square(old), None, shape(ShapeKind::Wall)).unwrap();
            let second = place(&mut store, cell, Footprint::square(new), None, shape(ShapeKind::Tree)).unwrap();

            let at_cell: Vec<_> = store.at_cell(cell).collect();
            assert_eq!(at_cell.len(), 1);
            assert_eq!(at_cell[0].id, second.id);
            assert!(!store.contains(first.id));
        }
    }
}

#[test]
fn test_four_tiny_per_cell() {
    let mut store = ElementStore::new();
    let cell = Cell::new(2, 2);
    for sub in SubCell::all() {
        place(&mut store, cell, Footprint::Tiny, Some(sub), shape(ShapeKind::Rock)).unwrap();
    }
    assert_eq!(store.len(), 4);

    for sub in SubCell::all() {
        let result = place(&mut store, cell, Footprint::Tiny, Some(sub), shape(ShapeKind::Rock));
        assert_eq!(result, Err(Rejection::CellFull(cell)));
    }
    assert_eq!(store.len(), 4);
}

#[test]
fn test_tiny_quadrant_taken() {
    let mut store = ElementStore::new();
    let cell = Cell::new(1, 1);
    place(&mut store, cell, Footprint::Tiny, Some(SubCell::TOP_LEFT), shape(ShapeKind::Rock)).unwrap();
    let result = place(&mut store, cell, Footprint::Tiny, Some(SubCell::TOP_LEFT), shape(ShapeKind::Rock));
    assert_eq!(
        result,
        Err(Rejection::QuadrantTaken {
            cell,
            sub: SubCell::TOP_LEFT
        })
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn test_tiny_cells_are_homogeneous() {
    let mut store = ElementStore::new();
    let cell = Cell::new(3, 3);
    place(&mut store, cell, Footprint::Tiny, Some(SubCell::TOP_LEFT), shape(ShapeKind::Wall)).unwrap();

    for sub in [SubCell::TOP_RIGHT, SubCell::BOTTOM_LEFT, SubCell::BOTTOM_RIGHT] {
        let result = place(&mut store, cell, Footprint::Tiny, Some(sub), shape(ShapeKind::Tree));
        assert_eq!(result, Err(Rejection::MixedContent(cell)));
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn test_normal_clears_tiny_occupants() {
    let mut store = ElementStore::new();
    let cell = Cell::new(4, 4);
    for sub in [SubCell::TOP_LEFT, SubCell::TOP_RIGHT, SubCell::BOTTOM_LEFT] {
        place(&mut store, cell, Footprint::Tiny, Some(sub), shape(ShapeKind::Chair)).unwrap();
    }
    let table = place(&mut store, cell, Footprint::square(1), None, shape(ShapeKind::Table)).unwrap();

    let at_cell: Vec<_> = store.at_cell(cell).collect();
    assert_eq!(at_cell.len(), 1);
    assert_eq!(at_cell[0].id, table.id);
    assert!(!at_cell[0].is_tiny());
}

#[test]
fn test_tiny_evicts_normal_occupant() {
    let mut store = ElementStore::new();
    let cell = Cell::new(6, 1);
    let wall = place(&mut store, cell, Footprint::square(1), None, shape(ShapeKind::Wall)).unwrap();
    place(&mut store, cell, Footprint::Tiny, Some(SubCell::BOTTOM_RIGHT), shape(ShapeKind::Food)).unwrap();

    assert!(!store.contains(wall.id));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_erase_removes_exactly_one() {
    let mut store = ElementStore::new();
    let cell = Cell::new(2, 2);
    assert_eq!(erase_target(cell, store.at_cell(cell)), None);

    let first = place(&mut store, cell, Footprint::Tiny, Some(SubCell::TOP_LEFT), shape(ShapeKind::Rock)).unwrap();
    place(&mut store, cell, Footprint::Tiny, Some(SubCell::TOP_RIGHT), shape(ShapeKind::Rock)).unwrap();
    place(&mut store, Cell::new(3, 2), Footprint::square(1), None, shape(ShapeKind::Wall)).unwrap();

    let target = erase_target(cell, store.at_cell(cell)).unwrap();
    assert_eq!(target, first.id);
    store.remove(target);
    assert_eq!(store.len(), 2);
    assert_eq!(store.at_cell(cell).count(), 1);
}

#[test]
fn test_translate_ignores_destination_occupancy() {
    let mut store = ElementStore::new();
    let a = place(&mut store, Cell::new(1, 1), Footprint::square(1), None, shape(ShapeKind::Wall)).unwrap();
    let b = place(&mut store, Cell::new(2, 1), Footprint::square(1), None, shape(ShapeKind::Door)).unwrap();
    let c = place(&mut store, Cell::new(8, 8), Footprint::square(1), None, shape(ShapeKind::Tree)).unwrap();

    let moved = translate(&[a.id], 1, 0, store.iter());
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].cell(), Cell::new(2, 1));
    for element in moved {
        store.replace(element);
    }

    assert_eq!(store.get(a.id).unwrap().cell(), Cell::new(2, 1));
    assert_eq!(store.get(b.id).unwrap().cell(), Cell::new(2, 1));
    assert_eq!(store.get(c.id).unwrap().cell(), Cell::new(8, 8));
    assert_eq!(store.at_cell(Cell::new(2, 1)).count(), 2);
}

#[test]
fn test_out_of_grid_rejected() {
    let mut store = ElementStore::new();
    let cell = Cell::new(30, 0);
    let result = place(&mut store, cell, Footprint::square(1), None, shape(ShapeKind::Wall));
    assert_eq!(result, Err(Rejection::OutOfGrid(cell)));
    assert!(store.is_empty());
}
