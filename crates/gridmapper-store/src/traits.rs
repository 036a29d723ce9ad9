//! Repository contract shared by every backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gridmapper_core::{MapId, StoreResult, UserId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A persisted record type.
pub trait Entity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Id: Copy + Eq + Hash + Display + Debug + Send + Sync + 'static;

    /// Collection name used in error messages and logs.
    const COLLECTION: &'static str;
    /// File stem used by the JSON backend.
    const STORAGE_KEY: &'static str;

    fn id(&self) -> Self::Id;

    /// Owning user, for collections that are per-user.
    fn owner(&self) -> Option<UserId> {
        None
    }

    /// Map the record belongs to, for collections that hang off a map.
    fn map_id(&self) -> Option<MapId> {
        None
    }

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc> {
        self.created_at()
    }
}

/// Result ordering for [`Repository::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Insertion order.
    #[default]
    Natural,
    /// Most recently updated first.
    UpdatedDesc,
    /// Oldest first.
    CreatedAsc,
}

/// Filter and ordering for list and bulk delete calls.
///
/// Records without an owner pass any owner filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Query {
    pub owner: Option<UserId>,
    pub map_id: Option<MapId>,
    pub order: OrderBy,
}

impl Query {
    /// Everything, in insertion order.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn owned_by(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn in_map(mut self, map_id: MapId) -> Self {
        self.map_id = Some(map_id);
        self
    }

    pub fn ordered(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        let owner_ok = match (self.owner, entity.owner()) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        };
        let map_ok = match self.map_id {
            Some(wanted) => entity.map_id() == Some(wanted),
            None => true,
        };
        owner_ok && map_ok
    }

    /// Filter and order a slice of records.
    pub fn apply<T: Entity>(&self, items: &[T]) -> Vec<T> {
        let mut selected: Vec<T> = items.iter().filter(|e| self.matches(*e)).cloned().collect();
        match self.order {
            OrderBy::Natural => {}
            OrderBy::UpdatedDesc => selected.sort_by(|a, b| b.updated_at().cmp(&a.updated_at())),
            OrderBy::CreatedAsc => selected.sort_by_key(|e| e.created_at()),
        }
        selected
    }
}

/// Async CRUD over one collection. Every call may fail with a
/// [`StoreError`](gridmapper_core::StoreError).
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn list(&self, query: &Query) -> StoreResult<Vec<T>>;

    async fn get(&self, id: T::Id) -> StoreResult<T>;

    /// Insert a new record; fails if the id is already present.
    async fn create(&self, entity: T) -> StoreResult<T>;

    /// Replace an existing record; fails if the id is unknown.
    async fn update(&self, entity: T) -> StoreResult<T>;

    async fn delete(&self, id: T::Id) -> StoreResult<()>;

    /// Remove every record matching the query, returning how many went.
    async fn delete_where(&self, query: &Query) -> StoreResult<usize>;
}
