//! Map lifecycle: new, save, load, delete, list and reset.

use super::EditorState;
use crate::canvas::{Canvas, ChangeSet};
use gridmapper_core::constants::UNTITLED_MAP_NAME;
use gridmapper_core::{validate_name, CellSize, GridBounds, MapId, MapRecord, Result};
use gridmapper_store::{OrderBy, Query};
use tracing::{debug, info, warn};

/// What to do with unsaved elements when starting a new map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsavedChanges {
    /// Ask first if there is anything to lose.
    Prompt,
    /// Save under this name, then start over.
    SaveAs(String),
    /// Start over without saving.
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewMapOutcome {
    /// Nothing changed; the caller should ask the user.
    NeedsConfirmation,
    /// The session is now a fresh scratch map.
    Reset,
}

impl EditorState {
    pub async fn new_map(&mut self, unsaved: UnsavedChanges) -> Result<NewMapOutcome> {
        match unsaved {
            UnsavedChanges::Prompt if self.canvas.element_count() > 0 => {
                return Ok(NewMapOutcome::NeedsConfirmation);
            }
            UnsavedChanges::SaveAs(name) => {
                self.save_map(&name).await?;
            }
            _ => {}
        }
        self.reset().await;
        Ok(NewMapOutcome::Reset)
    }

    /// Persist the session under `name`.
    ///
    /// A scratch session becomes a new map: the record is created, every
    /// element is written under it and the collection is reloaded from the
    /// store. If an element write fails the new record is removed again and
    /// the session stays scratch. An existing map is renamed and resized in
    /// place.
    pub async fn save_map(&mut self, name: &str) -> Result<MapRecord> {
        let name = validate_name("Map", name)?;
        self.mirror.flush().await;

        let bounds = self.canvas.bounds();
        let cell_size = self.canvas.cell_size();

        let saved = match self.map.clone() {
            Some(mut record) => {
                record.update(&name, bounds, cell_size)?;
                self.store.maps().update(record).await?
            }
            None => {
                let record = MapRecord::new(self.owner, &name, bounds, cell_size)?;
                let record = self.store.maps().create(record).await?;
                if let Err(e) = self.write_elements(record.id).await {
                    warn!(id = %record.id, error = %e, "saving elements failed, dropping map");
                    if let Err(cleanup) = self.store.delete_map(record.id).await {
                        warn!(id = %record.id, error = %cleanup, "partial map left in store");
                    }
                    return Err(e);
                }
                let elements = self
                    .store
                    .elements()
                    .list(&Query::all().in_map(record.id))
                    .await?;
                self.canvas.replace_elements(elements);
                self.canvas.set_map_id(Some(record.id));
                record
            }
        };

        info!(id = %saved.id, name = %saved.name, "saved map");
        self.map_name = saved.name.clone();
        self.map = Some(saved.clone());
        self.is_modified = false;
        Ok(saved)
    }

    /// Make a saved map the active one.
    pub async fn load_map(&mut self, id: MapId) -> Result<MapRecord> {
        self.mirror.flush().await;

        let record = self.store.maps().get(id).await?;
        let elements = self.store.elements().list(&Query::all().in_map(id)).await?;

        let mut canvas = self.fresh_canvas(record.bounds(), record.cell_size);
        canvas.replace_elements(elements);
        canvas.set_map_id(Some(id));
        info!(
            id = %record.id,
            name = %record.name,
            elements = canvas.element_count(),
            "loaded map"
        );

        self.canvas = canvas;
        self.map_name = record.name.clone();
        self.map = Some(record.clone());
        self.is_modified = false;
        self.current_file_path = None;
        Ok(record)
    }

    /// Delete a map with its elements. Deleting the active map resets the
    /// session to scratch.
    pub async fn delete_map(&mut self, id: MapId) -> Result<()> {
        self.mirror.flush().await;
        self.store.delete_map(id).await?;
        self.note.unlink_map(id);
        if self.map_id() == Some(id) {
            self.reset().await;
        }
        Ok(())
    }

    /// The owner's maps, most recently updated first.
    pub async fn list_maps(&self) -> Result<Vec<MapRecord>> {
        let maps = self
            .store
            .maps()
            .list(&Query::all().owned_by(self.owner).ordered(OrderBy::UpdatedDesc))
            .await?;
        Ok(maps)
    }

    /// Remove every element from the current map.
    pub fn reset_elements(&mut self) -> ChangeSet {
        let changes = self.canvas.clear();
        info!(removed = changes.len(), "reset map elements");
        self.commit(changes)
    }

    async fn write_elements(&self, map_id: MapId) -> Result<()> {
        for mut element in self.canvas.element_store.to_vec() {
            element.map_id = Some(map_id);
            self.store.elements().create(element).await?;
        }
        Ok(())
    }

    async fn reset(&mut self) {
        self.mirror.flush().await;
        self.canvas = self.fresh_canvas(self.defaults.bounds, self.canvas.cell_size());
        self.map = None;
        self.map_name = UNTITLED_MAP_NAME.to_string();
        self.is_modified = false;
        self.current_file_path = None;
        debug!("session reset to scratch map");
    }

    /// An empty canvas that keeps the current view size.
    pub(super) fn fresh_canvas(&self, bounds: GridBounds, cell_size: CellSize) -> Canvas {
        let mut canvas = Canvas::new(bounds, cell_size);
        let (width, height) = self.canvas.viewport().view_size();
        canvas.viewport_mut().set_view_size(width, height);
        canvas
    }
}
