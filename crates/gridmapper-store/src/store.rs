//! One handle over every collection the editor persists.

use crate::file::JsonFileRepository;
use crate::memory::MemoryRepository;
use crate::traits::{Query, Repository};
use chrono::Utc;
use gridmapper_core::{
    ColorHistoryEntry, MapElement, MapId, MapNote, MapRecord, StoreResult, UserId,
    UserPreferences,
};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Shared repositories. Cloning is cheap; clones see the same data.
#[derive(Clone)]
pub struct Store {
    maps: Arc<dyn Repository<MapRecord>>,
    elements: Arc<dyn Repository<MapElement>>,
    notes: Arc<dyn Repository<MapNote>>,
    colors: Arc<dyn Repository<ColorHistoryEntry>>,
    preferences: Arc<dyn Repository<UserPreferences>>,
}

impl Store {
    pub fn new(
        maps: Arc<dyn Repository<MapRecord>>,
        elements: Arc<dyn Repository<MapElement>>,
        notes: Arc<dyn Repository<MapNote>>,
        colors: Arc<dyn Repository<ColorHistoryEntry>>,
        preferences: Arc<dyn Repository<UserPreferences>>,
    ) -> Self {
        Self {
            maps,
            elements,
            notes,
            colors,
            preferences,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryRepository::new()),
            Arc::new(MemoryRepository::new()),
            Arc::new(MemoryRepository::new()),
            Arc::new(MemoryRepository::new()),
            Arc::new(MemoryRepository::new()),
        )
    }

    /// JSON files under `dir`, created on first write.
    pub fn open_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        info!("Using JSON store at {}", dir.display());
        Self::new(
            Arc::new(JsonFileRepository::new(dir)),
            Arc::new(JsonFileRepository::new(dir)),
            Arc::new(JsonFileRepository::new(dir)),
            Arc::new(JsonFileRepository::new(dir)),
            Arc::new(JsonFileRepository::new(dir)),
        )
    }

    /// Swap the element repository, keeping the others.
    pub fn with_elements(mut self, elements: Arc<dyn Repository<MapElement>>) -> Self {
        self.elements = elements;
        self
    }

    pub fn maps(&self) -> &Arc<dyn Repository<MapRecord>> {
        &self.maps
    }

    pub fn elements(&self) -> &Arc<dyn Repository<MapElement>> {
        &self.elements
    }

    pub fn notes(&self) -> &Arc<dyn Repository<MapNote>> {
        &self.notes
    }

    pub fn colors(&self) -> &Arc<dyn Repository<ColorHistoryEntry>> {
        &self.colors
    }

    pub fn preferences(&self) -> &Arc<dyn Repository<UserPreferences>> {
        &self.preferences
    }

    /// Delete a map together with its elements. Notes that referenced it are
    /// kept but unlinked.
    pub async fn delete_map(&self, id: MapId) -> StoreResult<()> {
        self.maps.get(id).await?;

        let removed = self.elements.delete_where(&Query::all().in_map(id)).await?;

        let linked = self.notes.list(&Query::all().in_map(id)).await?;
        let unlinked = linked.len();
        for mut note in linked {
            note.map_id = None;
            self.notes.update(note).await?;
        }

        self.maps.delete(id).await?;
        info!(
            "Deleted map {} ({} elements, {} notes unlinked)",
            id, removed, unlinked
        );
        Ok(())
    }

    pub async fn preferences_for(&self, owner: UserId) -> StoreResult<Option<UserPreferences>> {
        let found = self.preferences.list(&Query::all().owned_by(owner)).await?;
        Ok(found.into_iter().next())
    }

    /// Insert or replace the owner's single preferences record.
    pub async fn save_preferences(&self, mut prefs: UserPreferences) -> StoreResult<UserPreferences> {
        prefs.updated_at = Utc::now();
        match self.preferences_for(prefs.owner).await? {
            Some(existing) => {
                prefs.id = existing.id;
                self.preferences.update(prefs).await
            }
            None => self.preferences.create(prefs).await,
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
