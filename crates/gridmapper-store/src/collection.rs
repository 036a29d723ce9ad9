//! Vec-backed mutations shared by the memory and file backends.

use crate::traits::Entity;
use gridmapper_core::{StoreError, StoreResult};

pub(crate) fn find<T: Entity>(items: &[T], id: T::Id) -> StoreResult<T> {
    items
        .iter()
        .find(|e| e.id() == id)
        .cloned()
        .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))
}

pub(crate) fn insert<T: Entity>(items: &mut Vec<T>, entity: T) -> StoreResult<()> {
    let id = entity.id();
    if items.iter().any(|e| e.id() == id) {
        return Err(StoreError::AlreadyExists {
            collection: T::COLLECTION.to_string(),
            id: id.to_string(),
        });
    }
    items.push(entity);
    Ok(())
}

pub(crate) fn replace<T: Entity>(items: &mut [T], entity: T) -> StoreResult<()> {
    let id = entity.id();
    let slot = items
        .iter_mut()
        .find(|e| e.id() == id)
        .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))?;
    *slot = entity;
    Ok(())
}

pub(crate) fn remove<T: Entity>(items: &mut Vec<T>, id: T::Id) -> StoreResult<T> {
    let index = items
        .iter()
        .position(|e| e.id() == id)
        .ok_or_else(|| StoreError::not_found(T::COLLECTION, id))?;
    Ok(items.remove(index))
}
