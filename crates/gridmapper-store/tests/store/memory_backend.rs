//! In-memory repository behaviour

use chrono::Duration;
use gridmapper_core::{
    Cell, CellSize, ElementContent, Footprint, GridBounds, HexColor, MapElement, MapId,
    MapRecord, ShapeKind, StoreError, UserId,
};
use gridmapper_store::{MemoryRepository, OrderBy, Query, Repository};

fn map_named(owner: UserId, name: &str) -> MapRecord {
    MapRecord::new(owner, name, GridBounds::default(), CellSize::default()).unwrap()
}

fn wall_at(map_id: MapId, x: i32, y: i32) -> MapElement {
    let mut element = MapElement::normal(
        Cell::new(x, y),
        Footprint::square(1),
        ElementContent::Shape(ShapeKind::Wall),
        HexColor::black(),
    );
    element.map_id = Some(map_id);
    element
}

#[tokio::test]
async fn test_create_get_update_delete() {
    let repo = MemoryRepository::<MapRecord>::new();
    let map = repo.create(map_named(UserId::guest(), "Crypt")).await.unwrap();

    let fetched = repo.get(map.id).await.unwrap();
    assert_eq!(fetched.name, "Crypt");

    let mut renamed = fetched.clone();
    renamed.name = "Old Crypt".into();
    repo.update(renamed).await.unwrap();
    assert_eq!(repo.get(map.id).await.unwrap().name, "Old Crypt");

    repo.delete(map.id).await.unwrap();
    assert!(matches!(
        repo.get(map.id).await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_duplicate_create_rejected() {
    let repo = MemoryRepository::<MapRecord>::new();
    let map = map_named(UserId::guest(), "Twice");
    repo.create(map.clone()).await.unwrap();
    assert!(matches!(
        repo.create(map).await,
        Err(StoreError::AlreadyExists { .. })
    ));
}

#[tokio::test]
async fn test_update_unknown_is_not_found() {
    let repo = MemoryRepository::<MapRecord>::new();
    let err = repo
        .update(map_named(UserId::guest(), "Ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_filters_by_owner_and_orders() {
    let alice = UserId::new();
    let bob = UserId::new();

    let mut older = map_named(alice, "Older");
    older.updated_at -= Duration::hours(1);
    let newer = map_named(alice, "Newer");
    let other = map_named(bob, "Bob's");

    let repo = MemoryRepository::with_items(vec![older, other, newer]);

    let natural = repo.list(&Query::all().owned_by(alice)).await.unwrap();
    let names: Vec<_> = natural.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Older", "Newer"]);

    let recent = repo
        .list(&Query::all().owned_by(alice).ordered(OrderBy::UpdatedDesc))
        .await
        .unwrap();
    let names: Vec<_> = recent.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Newer", "Older"]);

    assert_eq!(repo.list(&Query::all()).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_delete_where_by_map() {
    let keep = MapId::new();
    let doomed = MapId::new();
    let repo = MemoryRepository::with_items(vec![
        wall_at(keep, 0, 0),
        wall_at(doomed, 1, 0),
        wall_at(doomed, 2, 0),
    ]);

    let removed = repo.delete_where(&Query::all().in_map(doomed)).await.unwrap();
    assert_eq!(removed, 2);

    let left = repo.list(&Query::all()).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].map_id, Some(keep));
}
