//! In-memory backend.

use crate::collection;
use crate::traits::{Entity, Query, Repository};
use async_trait::async_trait;
use gridmapper_core::StoreResult;
use parking_lot::RwLock;

/// Keeps a collection in a `Vec`, in insertion order. Nothing survives the
/// process.
#[derive(Debug)]
pub struct MemoryRepository<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Start from existing records.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn list(&self, query: &Query) -> StoreResult<Vec<T>> {
        Ok(query.apply(&self.items.read()))
    }

    async fn get(&self, id: T::Id) -> StoreResult<T> {
        collection::find(&self.items.read(), id)
    }

    async fn create(&self, entity: T) -> StoreResult<T> {
        collection::insert(&mut self.items.write(), entity.clone())?;
        Ok(entity)
    }

    async fn update(&self, entity: T) -> StoreResult<T> {
        collection::replace(&mut self.items.write(), entity.clone())?;
        Ok(entity)
    }

    async fn delete(&self, id: T::Id) -> StoreResult<()> {
        collection::remove(&mut self.items.write(), id).map(|_| ())
    }

    async fn delete_where(&self, query: &Query) -> StoreResult<usize> {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|e| !query.matches(e));
        Ok(before - items.len())
    }
}
