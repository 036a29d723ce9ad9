//! Store facade: cascading deletes and preferences upsert

use gridmapper_core::{
    Cell, CellSize, ElementContent, Footprint, GridBounds, HexColor, MapElement, MapNote,
    MapRecord, ShapeKind, StoreError, TimeOfDay, UserId, UserPreferences,
};
use gridmapper_store::{Query, Store};
use tempfile::TempDir;

async fn seeded(store: &Store) -> (MapRecord, MapRecord) {
    let owner = UserId::guest();
    let doomed = store
        .maps()
        .create(MapRecord::new(owner, "Doomed", GridBounds::default(), CellSize::default()).unwrap())
        .await
        .unwrap();
    let kept = store
        .maps()
        .create(MapRecord::new(owner, "Kept", GridBounds::default(), CellSize::default()).unwrap())
        .await
        .unwrap();

    for (map, x) in [(&doomed, 0), (&doomed, 1), (&kept, 2)] {
        let mut element = MapElement::normal(
            Cell::new(x, 0),
            Footprint::square(1),
            ElementContent::Shape(ShapeKind::Tree),
            HexColor::black(),
        );
        element.map_id = Some(map.id);
        store.elements().create(element).await.unwrap();
    }

    store
        .notes()
        .create(MapNote::new(owner, "Lore".into(), Vec::new(), Some(doomed.id)))
        .await
        .unwrap();

    (doomed, kept)
}

async fn check_cascade(store: Store) {
    let (doomed, kept) = seeded(&store).await;

    store.delete_map(doomed.id).await.unwrap();

    assert_eq!(
        store.maps().get(doomed.id).await.unwrap_err(),
        StoreError::not_found("maps", doomed.id)
    );
    assert!(store.maps().get(kept.id).await.is_ok());

    let elements = store.elements().list(&Query::all()).await.unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].map_id, Some(kept.id));

    let notes = store.notes().list(&Query::all()).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].map_id, None);
}

#[tokio::test]
async fn test_delete_map_cascades_in_memory() {
    check_cascade(Store::in_memory()).await;
}

#[tokio::test]
async fn test_delete_map_cascades_on_disk() {
    let dir = TempDir::new().unwrap();
    check_cascade(Store::open_dir(dir.path())).await;
}

#[tokio::test]
async fn test_delete_unknown_map_fails_without_side_effects() {
    let store = Store::in_memory();
    let (_, kept) = seeded(&store).await;
    let stranger = MapRecord::new(
        UserId::guest(),
        "Stranger",
        GridBounds::default(),
        CellSize::default(),
    )
    .unwrap();

    assert!(store.delete_map(stranger.id).await.is_err());
    assert_eq!(store.elements().list(&Query::all()).await.unwrap().len(), 3);
    assert!(store.maps().get(kept.id).await.is_ok());
}

#[tokio::test]
async fn test_preferences_upsert_keeps_single_record() {
    let store = Store::in_memory();
    let owner = UserId::new();
    assert!(store.preferences_for(owner).await.unwrap().is_none());

    let first = store.save_preferences(UserPreferences::new(owner)).await.unwrap();

    let mut changed = UserPreferences::new(owner);
    changed.set_dark_mode(true);
    changed.set_time_of_day(TimeOfDay::Night);
    let second = store.save_preferences(changed).await.unwrap();

    assert_eq!(first.id, second.id);
    let all = store.preferences().list(&Query::all()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].dark_mode);
    assert_eq!(all[0].time_of_day, TimeOfDay::Night);
}
