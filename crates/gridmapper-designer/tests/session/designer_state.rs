//! Map lifecycle through the editor session.

use async_trait::async_trait;
use gridmapper_core::{
    Cell, ElementId, Error, MapElement, StoreError, StoreResult, TimeOfDay, UserId,
};
use gridmapper_designer::{
    EditorDefaults, EditorState, ExportFormat, ExportOptions, NewMapOutcome, PointerButton,
    PointerEvent, UnsavedChanges,
};
use gridmapper_store::{MemoryRepository, Query, Repository, Store};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn editor(store: &Store) -> EditorState {
    EditorState::new(store.clone(), UserId::guest(), EditorDefaults::default())
}

fn paint(editor: &mut EditorState, x: i32, y: i32) {
    let (px, py) = (f64::from(x) * 40.0 + 20.0, f64::from(y) * 40.0 + 20.0);
    editor.handle_pointer(PointerEvent::down(PointerButton::Left, px, py));
    editor.handle_pointer(PointerEvent::up(PointerButton::Left, px, py));
}

async fn stored_elements(store: &Store, editor: &EditorState) -> Vec<MapElement> {
    let map_id = editor.map_id().unwrap();
    store.elements().list(&Query::all().in_map(map_id)).await.unwrap()
}

#[tokio::test]
async fn test_starts_as_untitled_scratch_map() {
    let store = Store::in_memory();
    let editor = editor(&store);
    assert!(editor.is_scratch());
    assert_eq!(editor.map_name(), "Untitled Map");
    assert_eq!(editor.canvas.bounds().width(), 30);
    assert_eq!(editor.canvas.bounds().height(), 20);
    assert_eq!(editor.canvas.cell_size().pixels(), 40);
}

#[tokio::test]
async fn test_scratch_edits_are_not_mirrored() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    paint(&mut editor, 1, 1);
    editor.flush().await;
    assert!(store.elements().list(&Query::all()).await.unwrap().is_empty());
    assert_eq!(editor.mirror_failures(), 0);
}

#[tokio::test]
async fn test_save_scratch_map_creates_map_and_elements() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    paint(&mut editor, 1, 1);
    paint(&mut editor, 2, 1);

    let map = editor.save_map("  Goblin Cave ").await.unwrap();
    assert_eq!(map.name, "Goblin Cave");
    assert_eq!(editor.map_name(), "Goblin Cave");
    assert_eq!(editor.map_id(), Some(map.id));
    assert!(!editor.is_modified());

    let stored = stored_elements(&store, &editor).await;
    assert_eq!(stored.len(), 2);
    assert!(editor.canvas.elements().all(|e| e.map_id == Some(map.id)));
}

#[tokio::test]
async fn test_edits_after_save_reach_the_store() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    paint(&mut editor, 1, 1);
    editor.save_map("Keep").await.unwrap();

    paint(&mut editor, 4, 4);
    paint(&mut editor, 1, 1);
    editor.flush().await;
    let stored = stored_elements(&store, &editor).await;
    assert_eq!(stored.len(), 2);

    let changes = editor.reset_elements();
    assert_eq!(changes.len(), 2);
    editor.flush().await;
    assert!(stored_elements(&store, &editor).await.is_empty());
}

#[tokio::test]
async fn test_blank_name_rejected_without_side_effects() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    paint(&mut editor, 1, 1);

    let err = editor.save_map("   ").await.unwrap_err();
    assert!(err.is_validation_error());
    assert!(editor.is_scratch());
    assert!(store.maps().list(&Query::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_resave_renames_and_resizes() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    let first = editor.save_map("Draft").await.unwrap();

    editor.set_grid_size(3, 250);
    editor.zoom_in();
    let second = editor.save_map("Final").await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.name, "Final");
    assert_eq!((second.grid_width, second.grid_height), (5, 100));
    assert_eq!(second.cell_size.pixels(), 50);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(store.maps().list(&Query::all()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_new_map_prompts_when_elements_exist() {
    let store = Store::in_memory();
    let mut editor = editor(&store);

    assert_eq!(
        editor.new_map(UnsavedChanges::Prompt).await.unwrap(),
        NewMapOutcome::Reset
    );

    paint(&mut editor, 3, 3);
    editor.set_grid_size(10, 10);
    assert_eq!(
        editor.new_map(UnsavedChanges::Prompt).await.unwrap(),
        NewMapOutcome::NeedsConfirmation
    );
    assert_eq!(editor.canvas.element_count(), 1);

    assert_eq!(
        editor.new_map(UnsavedChanges::Discard).await.unwrap(),
        NewMapOutcome::Reset
    );
    assert_eq!(editor.canvas.element_count(), 0);
    assert_eq!(editor.canvas.bounds().width(), 30);
    assert_eq!(editor.map_name(), "Untitled Map");
    assert!(store.maps().list(&Query::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_new_map_save_as_then_reset() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    paint(&mut editor, 3, 3);

    let outcome = editor
        .new_map(UnsavedChanges::SaveAs("Tavern".into()))
        .await
        .unwrap();
    assert_eq!(outcome, NewMapOutcome::Reset);
    assert!(editor.is_scratch());
    assert_eq!(editor.canvas.element_count(), 0);

    let maps = editor.list_maps().await.unwrap();
    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0].name, "Tavern");
    let elements = store
        .elements()
        .list(&Query::all().in_map(maps[0].id))
        .await
        .unwrap();
    assert_eq!(elements.len(), 1);
}

#[tokio::test]
async fn test_load_map_adopts_grid_and_elements() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    editor.set_grid_size(12, 8);
    paint(&mut editor, 2, 2);
    paint(&mut editor, 5, 6);
    let saved = editor.save_map("Crypt").await.unwrap();
    editor.new_map(UnsavedChanges::Discard).await.unwrap();

    let loaded = editor.load_map(saved.id).await.unwrap();
    assert_eq!(loaded.name, "Crypt");
    assert_eq!(editor.map_name(), "Crypt");
    assert_eq!(editor.canvas.bounds().width(), 12);
    assert_eq!(editor.canvas.bounds().height(), 8);
    assert_eq!(editor.canvas.element_count(), 2);
    assert_eq!(
        editor.canvas.element_store.at_cell(Cell::new(5, 6)).count(),
        1
    );
}

#[tokio::test]
async fn test_load_missing_map_keeps_session() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    paint(&mut editor, 2, 2);

    let err = editor.load_map(gridmapper_core::MapId::new()).await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(err.is_not_found());
    assert_eq!(editor.canvas.element_count(), 1);
}

#[tokio::test]
async fn test_delete_active_map_resets_session() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    paint(&mut editor, 1, 1);
    let map = editor.save_map("Doomed").await.unwrap();

    editor.delete_map(map.id).await.unwrap();
    assert!(editor.is_scratch());
    assert_eq!(editor.canvas.element_count(), 0);
    assert!(editor.list_maps().await.unwrap().is_empty());
    assert!(store.elements().list(&Query::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_other_map_keeps_session() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    let other = editor.save_map("Other").await.unwrap();
    editor.new_map(UnsavedChanges::Discard).await.unwrap();
    paint(&mut editor, 1, 1);
    let active = editor.save_map("Active").await.unwrap();

    editor.delete_map(other.id).await.unwrap();
    assert_eq!(editor.map_id(), Some(active.id));
    assert_eq!(editor.canvas.element_count(), 1);
}

#[tokio::test]
async fn test_list_maps_newest_first() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    for name in ["One", "Two", "Three"] {
        editor.save_map(name).await.unwrap();
        editor.new_map(UnsavedChanges::Discard).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let names: Vec<_> = editor
        .list_maps()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["Three", "Two", "One"]);

    let other_owner = EditorState::new(store.clone(), UserId::new(), EditorDefaults::default());
    assert!(other_owner.list_maps().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_preferences_persist_per_owner() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    editor.set_dark_mode(true).await.unwrap();
    editor.set_time_of_day(TimeOfDay::Night).await.unwrap();

    let mut reopened = EditorState::new(store.clone(), UserId::guest(), EditorDefaults::default());
    assert!(!reopened.preferences().dark_mode);
    let prefs = reopened.load_preferences().await.unwrap();
    assert!(prefs.dark_mode);
    assert_eq!(prefs.time_of_day, TimeOfDay::Night);
    assert_eq!(prefs.custom_time.to_string(), "21:00");

    let all = store.preferences().list(&Query::all()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_zoom_stays_in_range() {
    let store = Store::in_memory();
    let mut editor = editor(&store);
    for _ in 0..10 {
        editor.zoom_in();
    }
    assert_eq!(editor.canvas.cell_size().pixels(), 100);
    for _ in 0..10 {
        editor.zoom_out();
    }
    assert_eq!(editor.canvas.cell_size().pixels(), 20);
}

#[tokio::test]
async fn test_export_uses_map_name() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::in_memory();
    let mut editor = editor(&store);
    paint(&mut editor, 0, 0);
    editor.save_map("Lair").await.unwrap();

    let report = editor
        .export(&ExportOptions::new(ExportFormat::Png, dir.path()))
        .unwrap();
    assert_eq!(report.path, dir.path().join("Lair.png"));
    assert!(report.path.exists());
}

/// Element repository that refuses every create after the first `allowed`.
struct FlakyElements {
    inner: MemoryRepository<MapElement>,
    allowed: usize,
    creates: AtomicUsize,
}

#[async_trait]
impl Repository<MapElement> for FlakyElements {
    async fn list(&self, query: &Query) -> StoreResult<Vec<MapElement>> {
        self.inner.list(query).await
    }

    async fn get(&self, id: ElementId) -> StoreResult<MapElement> {
        self.inner.get(id).await
    }

    async fn create(&self, element: MapElement) -> StoreResult<MapElement> {
        if self.creates.fetch_add(1, Ordering::SeqCst) >= self.allowed {
            return Err(StoreError::backend("disk full"));
        }
        self.inner.create(element).await
    }

    async fn update(&self, element: MapElement) -> StoreResult<MapElement> {
        self.inner.update(element).await
    }

    async fn delete(&self, id: ElementId) -> StoreResult<()> {
        self.inner.delete(id).await
    }

    async fn delete_where(&self, query: &Query) -> StoreResult<usize> {
        self.inner.delete_where(query).await
    }
}

#[tokio::test]
async fn test_failed_first_save_leaves_no_map_behind() {
    let flaky = Arc::new(FlakyElements {
        inner: MemoryRepository::new(),
        allowed: 1,
        creates: AtomicUsize::new(0),
    });
    let store = Store::in_memory().with_elements(flaky.clone());
    let mut editor = editor(&store);
    paint(&mut editor, 1, 1);
    paint(&mut editor, 2, 1);

    let err = editor.save_map("Half").await.unwrap_err();
    assert!(err.is_store_error());
    assert!(editor.is_scratch());
    assert_eq!(editor.canvas.element_count(), 2);
    assert!(store.maps().list(&Query::all()).await.unwrap().is_empty());
    assert!(flaky.list(&Query::all()).await.unwrap().is_empty());
    assert!(editor.list_maps().await.unwrap().is_empty());
}
