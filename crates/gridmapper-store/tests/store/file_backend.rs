//! JSON file repository behaviour

use gridmapper_core::{
    Cell, ElementContent, HexColor, MapElement, MapId, StoreError, SubCell,
};
use gridmapper_store::{Entity, JsonFileRepository, Query, Repository};
use serde_json::json;
use tempfile::TempDir;

fn tiny_text(map_id: MapId, sub: SubCell) -> MapElement {
    let mut element = MapElement::tiny(
        Cell::new(2, 2),
        sub,
        ElementContent::Text("1".into()),
        HexColor::black(),
    );
    element.map_id = Some(map_id);
    element
}

#[tokio::test]
async fn test_missing_file_is_empty_collection() {
    let dir = TempDir::new().unwrap();
    let repo = JsonFileRepository::<MapElement>::new(dir.path());
    assert!(repo.list(&Query::all()).await.unwrap().is_empty());
    assert!(!repo.path().exists());
}

#[tokio::test]
async fn test_writes_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let map_id = MapId::new();
    let element = tiny_text(map_id, SubCell::BOTTOM_LEFT);

    {
        let repo = JsonFileRepository::<MapElement>::new(dir.path());
        repo.create(element.clone()).await.unwrap();
        assert!(repo.path().ends_with("tabletop_elements.json"));
    }

    let reopened = JsonFileRepository::<MapElement>::new(dir.path());
    let loaded = reopened.list(&Query::all().in_map(map_id)).await.unwrap();
    assert_eq!(loaded, vec![element]);
    assert!(!dir.path().join("tabletop_elements.json.tmp").exists());
}

#[tokio::test]
async fn test_malformed_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    let good = tiny_text(MapId::new(), SubCell::TOP_LEFT);
    let bad = json!({
        "id": uuid::Uuid::new_v4(),
        "element_type": "shape",
        "shape_type": "rock",
        "grid_x": 0, "grid_y": 0,
        "color": "#000000",
        "width": 0.5, "height": 0.5
    });
    let contents = json!([serde_json::to_value(&good).unwrap(), bad]);
    let path = dir
        .path()
        .join(format!("{}.json", <MapElement as Entity>::STORAGE_KEY));
    std::fs::write(&path, serde_json::to_vec(&contents).unwrap()).unwrap();

    let repo = JsonFileRepository::<MapElement>::new(dir.path());
    let loaded = repo.list(&Query::all()).await.unwrap();
    assert_eq!(loaded, vec![good]);
}

#[tokio::test]
async fn test_malformed_rows_survive_rewrite() {
    let dir = TempDir::new().unwrap();
    let good = tiny_text(MapId::new(), SubCell::TOP_LEFT);
    let bad = json!({ "id": "not-a-uuid", "element_type": "shape" });
    let contents = json!([serde_json::to_value(&good).unwrap(), bad.clone()]);
    let path = dir.path().join("tabletop_elements.json");
    std::fs::write(&path, serde_json::to_vec(&contents).unwrap()).unwrap();

    let repo = JsonFileRepository::<MapElement>::new(dir.path());
    let added = repo
        .create(tiny_text(MapId::new(), SubCell::TOP_RIGHT))
        .await
        .unwrap();
    repo.delete(good.id).await.unwrap();

    let rows: Vec<serde_json::Value> =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.contains(&bad));

    let reopened = JsonFileRepository::<MapElement>::new(dir.path());
    let ids: Vec<_> = reopened
        .list(&Query::all())
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![added.id]);
}

#[tokio::test]
async fn test_corrupt_file_reports_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("tabletop_elements.json"), b"not json").unwrap();

    let repo = JsonFileRepository::<MapElement>::new(dir.path());
    let err = repo.list(&Query::all()).await.unwrap_err();
    assert!(matches!(err, StoreError::Serialization { .. }));
}

#[tokio::test]
async fn test_delete_persists() {
    let dir = TempDir::new().unwrap();
    let map_id = MapId::new();
    let repo = JsonFileRepository::<MapElement>::new(dir.path());
    let a = repo.create(tiny_text(map_id, SubCell::TOP_LEFT)).await.unwrap();
    let b = repo
        .create(tiny_text(map_id, SubCell::TOP_RIGHT))
        .await
        .unwrap();
    repo.delete(a.id).await.unwrap();

    let reopened = JsonFileRepository::<MapElement>::new(dir.path());
    let ids: Vec<_> = reopened
        .list(&Query::all())
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![b.id]);
}
