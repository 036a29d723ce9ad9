//! Map document files (save, load) for the session.

use super::EditorState;
use crate::serialization::MapDocument;
use std::path::{Path, PathBuf};
use tracing::info;

impl EditorState {
    /// Write the map to a standalone document file.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut document =
            MapDocument::new(&self.map_name, self.canvas.bounds(), self.canvas.cell_size());
        if let Some(map) = &self.map {
            document.metadata.created = map.created_at;
        }
        document.elements = self.canvas.element_store.to_vec();
        document.save_to_file(&path)?;

        info!(path = %path.as_ref().display(), "wrote map file");
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Open a document file as a new scratch map.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let document = MapDocument::load_from_file(&path)?;

        let mut canvas = self.fresh_canvas(document.grid.bounds(), document.grid.cell_size);
        let elements = document
            .elements
            .into_iter()
            .map(|mut element| {
                element.map_id = None;
                element
            })
            .collect();
        canvas.replace_elements(elements);

        self.canvas = canvas;
        self.map = None;
        self.map_name = document.metadata.name;
        self.current_file_path = Some(path.as_ref().to_path_buf());
        self.is_modified = false;
        info!(path = %path.as_ref().display(), "opened map file");
        Ok(())
    }

    pub fn current_file_path(&self) -> Option<&PathBuf> {
        self.current_file_path.as_ref()
    }

    /// Map name for a title bar, marked when there are unsaved edits.
    pub fn display_name(&self) -> String {
        if self.is_modified {
            format!("{}*", self.map_name)
        } else {
            self.map_name.clone()
        }
    }
}
