//! Standalone map documents through the editor session.

use gridmapper_core::{Cell, UserId};
use gridmapper_designer::{EditorDefaults, EditorState, PointerButton, PointerEvent};
use gridmapper_store::Store;

#[tokio::test]
async fn test_save_and_open_map_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ruins.gmap.json");

    let mut editor = EditorState::new(Store::in_memory(), UserId::guest(), EditorDefaults::default());
    editor.set_grid_size(12, 9);
    editor.handle_pointer(PointerEvent::down(PointerButton::Left, 60.0, 60.0));
    editor.handle_pointer(PointerEvent::up(PointerButton::Left, 60.0, 60.0));
    assert_eq!(editor.display_name(), "Untitled Map*");

    editor.save_to_file(&path).unwrap();
    assert_eq!(editor.display_name(), "Untitled Map");
    assert_eq!(editor.current_file_path(), Some(&path));

    let mut other = EditorState::new(Store::in_memory(), UserId::guest(), EditorDefaults::default());
    other.load_from_file(&path).unwrap();
    assert!(other.is_scratch());
    assert_eq!(other.canvas.bounds().width(), 12);
    assert_eq!(other.canvas.bounds().height(), 9);
    assert_eq!(other.canvas.element_count(), 1);
    let element = other.canvas.elements().next().unwrap();
    assert_eq!(element.cell(), Cell::new(1, 1));
    assert_eq!(element.map_id, None);
}

#[tokio::test]
async fn test_open_garbage_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut editor = EditorState::new(Store::in_memory(), UserId::guest(), EditorDefaults::default());
    assert!(editor.load_from_file(&path).is_err());
    assert_eq!(editor.map_name(), "Untitled Map");
}
