//! JSON file backend.
//!
//! Each collection lives in one pretty-printed JSON array named after its
//! storage key (`tabletop_maps.json`, ...). The file is read once, cached,
//! and rewritten in full after every mutation through a temporary file and
//! a rename. A failed write leaves both the cache and the file untouched.
//! Rows that fail to decode are hidden from callers but written back
//! unchanged on every rewrite.

use crate::collection;
use crate::traits::{Entity, Query, Repository};
use async_trait::async_trait;
use gridmapper_core::StoreResult;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct Rows<T> {
    items: Vec<T>,
    /// Raw rows that did not decode as `T`.
    skipped: Vec<Value>,
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    cache: Mutex<Option<Rows<T>>>,
}

impl<T: Entity> JsonFileRepository<T> {
    /// Repository stored in `dir/<storage key>.json`. Nothing is read until
    /// the first call.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", T::STORAGE_KEY)),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn loaded(&self) -> StoreResult<MutexGuard<'_, Option<Rows<T>>>> {
        let mut guard = self.cache.lock().await;
        if guard.is_none() {
            *guard = Some(self.read_file().await?);
        }
        Ok(guard)
    }

    async fn read_file(&self) -> StoreResult<Rows<T>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                return Ok(Rows::default());
            }
            Err(e) => return Err(e.into()),
        };

        // Rows are decoded one by one so a single bad record does not hide
        // the rest of the collection.
        let raw: Vec<Value> = serde_json::from_slice(&bytes)?;
        let mut rows = Rows {
            items: Vec::with_capacity(raw.len()),
            skipped: Vec::new(),
        };
        for row in raw {
            match serde_json::from_value::<T>(row.clone()) {
                Ok(item) => rows.items.push(item),
                Err(e) => {
                    warn!("Skipping malformed {} record: {}", T::COLLECTION, e);
                    rows.skipped.push(row);
                }
            }
        }
        debug!(
            "Loaded {} {} records from {} ({} skipped)",
            rows.items.len(),
            T::COLLECTION,
            self.path.display(),
            rows.skipped.len()
        );
        Ok(rows)
    }

    async fn write_file(&self, rows: &Rows<T>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut out = Vec::with_capacity(rows.items.len() + rows.skipped.len());
        for item in &rows.items {
            out.push(serde_json::to_value(item)?);
        }
        out.extend(rows.skipped.iter().cloned());
        let json = serde_json::to_vec_pretty(&out)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Apply `op` to a copy of the collection, persist it, then commit it to
    /// the cache.
    async fn mutate<R: Send>(
        &self,
        op: impl FnOnce(&mut Vec<T>) -> StoreResult<R> + Send,
    ) -> StoreResult<R> {
        let mut guard = self.loaded().await?;
        let mut next = guard.as_ref().cloned().unwrap_or_default();
        let out = op(&mut next.items)?;
        self.write_file(&next).await?;
        *guard = Some(next);
        Ok(out)
    }

    fn items(guard: &Option<Rows<T>>) -> &[T] {
        guard.as_ref().map(|rows| rows.items.as_slice()).unwrap_or_default()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for JsonFileRepository<T> {
    async fn list(&self, query: &Query) -> StoreResult<Vec<T>> {
        let guard = self.loaded().await?;
        Ok(query.apply(Self::items(&guard)))
    }

    async fn get(&self, id: T::Id) -> StoreResult<T> {
        let guard = self.loaded().await?;
        collection::find(Self::items(&guard), id)
    }

    async fn create(&self, entity: T) -> StoreResult<T> {
        let stored = entity.clone();
        self.mutate(move |items| collection::insert(items, entity)).await?;
        Ok(stored)
    }

    async fn update(&self, entity: T) -> StoreResult<T> {
        let stored = entity.clone();
        self.mutate(move |items| collection::replace(items, entity)).await?;
        Ok(stored)
    }

    async fn delete(&self, id: T::Id) -> StoreResult<()> {
        self.mutate(move |items| collection::remove(items, id).map(|_| ()))
            .await
    }

    async fn delete_where(&self, query: &Query) -> StoreResult<usize> {
        let query = *query;
        self.mutate(move |items| {
            let before = items.len();
            items.retain(|e| !query.matches(e));
            Ok(before - items.len())
        })
        .await
    }
}
