//! Note editing for the session.

use super::EditorState;
use crate::notes::NoteDocument;
use gridmapper_core::{MapNote, NoteBlockKind, NoteId, Result, StoreResult};
use uuid::Uuid;

impl EditorState {
    /// Start an empty, unsaved note.
    pub fn new_note(&mut self) {
        self.note = NoteDocument::new();
    }

    /// Append a block styled for the current theme.
    pub fn add_note_block(&mut self, kind: NoteBlockKind) -> Uuid {
        self.note.add_block(kind, self.preferences.dark_mode)
    }

    /// Save the current note. With `link_to_map` the note is attached to the
    /// active map; the scratch map cannot be linked.
    pub async fn save_note(&mut self, name: &str, link_to_map: bool) -> Result<MapNote> {
        let link = if link_to_map { self.map_id() } else { None };
        self.notes.save(&mut self.note, name, link).await
    }

    pub async fn load_note(&mut self, id: NoteId) -> StoreResult<()> {
        self.note = self.notes.load(id).await?;
        Ok(())
    }

    pub async fn list_notes(&self) -> StoreResult<Vec<MapNote>> {
        self.notes.list().await
    }

    /// Notes attached to the active map. Empty for the scratch map.
    pub async fn notes_for_map(&self) -> StoreResult<Vec<MapNote>> {
        match self.map_id() {
            Some(map_id) => self.notes.for_map(map_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Delete a stored note. Deleting the open note starts a new one.
    pub async fn delete_note(&mut self, id: NoteId) -> StoreResult<()> {
        self.notes.delete(id).await?;
        if self.note.saved().is_some_and(|note| note.id == id) {
            self.new_note();
        }
        Ok(())
    }
}
