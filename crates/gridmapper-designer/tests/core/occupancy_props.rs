//! Occupancy invariants under random edit sequences.

use gridmapper_core::{Cell, ElementContent, Footprint, HexColor, ShapeKind, SubCell};
use gridmapper_designer::occupancy::PlacementRequest;
use gridmapper_designer::Canvas;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Place {
        cell: (i32, i32),
        tiny: bool,
        shape: ShapeKind,
        sub: usize,
    },
    Erase((i32, i32)),
}

fn op() -> impl Strategy<Value = Op> {
    let cell = (0..4i32, 0..4i32);
    prop_oneof![
        4 => (
            cell.clone(),
            any::<bool>(),
            prop_oneof![Just(ShapeKind::Wall), Just(ShapeKind::Tree)],
            0..4usize
        )
            .prop_map(|(cell, tiny, shape, sub)| Op::Place { cell, tiny, shape, sub }),
        1 => cell.prop_map(Op::Erase),
    ]
}

fn apply(canvas: &mut Canvas, op: &Op) {
    match *op {
        Op::Place { cell, tiny, shape, sub } => {
            canvas.place(PlacementRequest {
                cell: Cell::new(cell.0, cell.1),
                sub: tiny.then(|| SubCell::all()[sub]),
                content: ElementContent::Shape(shape),
                color: HexColor::black(),
                footprint: if tiny { Footprint::Tiny } else { Footprint::square(1) },
            });
        }
        Op::Erase(cell) => {
            canvas.erase_at(Cell::new(cell.0, cell.1));
        }
    }
}

proptest! {
    #[test]
    fn cells_stay_consistent(ops in proptest::collection::vec(op(), 1..60)) {
        let mut canvas = Canvas::default();
        for op in &ops {
            apply(&mut canvas, op);
        }

        for x in 0..4 {
            for y in 0..4 {
                let cell = Cell::new(x, y);
                let occupants: Vec<_> = canvas.element_store.at_cell(cell).collect();
                let normal = occupants.iter().filter(|e| !e.is_tiny()).count();

                if normal > 0 {
                    prop_assert_eq!(occupants.len(), 1);
                    continue;
                }
                prop_assert!(occupants.len() <= 4);
                let subs: HashSet<_> = occupants.iter().filter_map(|e| e.sub()).collect();
                prop_assert_eq!(subs.len(), occupants.len());
                if let Some(first) = occupants.first() {
                    prop_assert!(occupants.iter().all(|e| e.content == first.content));
                }
            }
        }
    }

    #[test]
    fn rejected_placements_change_nothing(ops in proptest::collection::vec(op(), 1..40)) {
        let mut canvas = Canvas::default();
        for op in &ops {
            let before = canvas.element_store.to_vec();
            apply(&mut canvas, op);
            if matches!(op, Op::Place { .. }) && canvas.element_store.len() == before.len() {
                // Either a replacement or a rejection; a rejection leaves the
                // collection exactly as it was.
                let after = canvas.element_store.to_vec();
                let unchanged = before.iter().all(|e| after.contains(e));
                let replaced = after.iter().filter(|e| !before.contains(e)).count() == 1;
                prop_assert!(unchanged || replaced);
            }
        }
    }
}
