//! Rich-text notes: the block editor and the saved note library.

use gridmapper_core::{
    validate_name, MapId, MapNote, NoteBlock, NoteBlockKind, NoteId, Result, StoreResult, UserId,
};
use gridmapper_store::{OrderBy, Query, Repository};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// The note being edited. Not persisted until saved through [`NoteLibrary`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteDocument {
    saved: Option<MapNote>,
    blocks: Vec<NoteBlock>,
}

impl NoteDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_note(note: MapNote) -> Self {
        Self {
            blocks: note.blocks.clone(),
            saved: Some(note),
        }
    }

    /// The stored note this document was loaded from or last saved as.
    pub fn saved(&self) -> Option<&MapNote> {
        self.saved.as_ref()
    }

    pub fn blocks(&self) -> &[NoteBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append an empty block; returns its id.
    pub fn add_block(&mut self, kind: NoteBlockKind, dark_mode: bool) -> Uuid {
        let block = NoteBlock::new(kind, dark_mode);
        let id = block.id;
        self.blocks.push(block);
        id
    }

    /// Edit a block in place. Returns false for an unknown id.
    pub fn update_block(&mut self, id: Uuid, edit: impl FnOnce(&mut NoteBlock)) -> bool {
        match self.blocks.iter_mut().find(|b| b.id == id) {
            Some(block) => {
                edit(block);
                true
            }
            None => false,
        }
    }

    pub fn delete_block(&mut self, id: Uuid) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        self.blocks.len() != before
    }

    /// Forget a link to a map that no longer exists.
    pub fn unlink_map(&mut self, map_id: MapId) {
        if let Some(note) = self.saved.as_mut() {
            if note.map_id == Some(map_id) {
                note.map_id = None;
            }
        }
    }

    /// Swap a block with its neighbour. No-op at either end.
    pub fn move_block(&mut self, id: Uuid, direction: MoveDirection) -> bool {
        let Some(index) = self.blocks.iter().position(|b| b.id == id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.blocks.len() => index + 1,
            _ => return false,
        };
        self.blocks.swap(index, target);
        true
    }
}

/// One owner's saved notes.
#[derive(Clone)]
pub struct NoteLibrary {
    owner: UserId,
    repo: Arc<dyn Repository<MapNote>>,
}

impl NoteLibrary {
    pub fn new(owner: UserId, repo: Arc<dyn Repository<MapNote>>) -> Self {
        Self { owner, repo }
    }

    /// Store `doc` under `name`, creating a note the first time and updating
    /// it afterwards. `link` replaces the map link when given.
    pub async fn save(
        &self,
        doc: &mut NoteDocument,
        name: &str,
        link: Option<MapId>,
    ) -> Result<MapNote> {
        let name = validate_name("Note", name)?;
        let saved = match doc.saved.clone() {
            Some(mut note) => {
                note.name = name;
                note.blocks = doc.blocks.clone();
                if link.is_some() {
                    note.map_id = link;
                }
                note.updated_at = chrono::Utc::now();
                self.repo.update(note).await?
            }
            None => {
                let note = MapNote::new(self.owner, name, doc.blocks.clone(), link);
                self.repo.create(note).await?
            }
        };
        info!(id = %saved.id, name = %saved.name, "saved note");
        doc.saved = Some(saved.clone());
        Ok(saved)
    }

    pub async fn load(&self, id: NoteId) -> StoreResult<NoteDocument> {
        Ok(NoteDocument::from_note(self.repo.get(id).await?))
    }

    /// Notes newest first.
    pub async fn list(&self) -> StoreResult<Vec<MapNote>> {
        self.repo
            .list(&Query::all().owned_by(self.owner).ordered(OrderBy::UpdatedDesc))
            .await
    }

    /// Notes linked to one map, newest first.
    pub async fn for_map(&self, map_id: MapId) -> StoreResult<Vec<MapNote>> {
        self.repo
            .list(
                &Query::all()
                    .owned_by(self.owner)
                    .in_map(map_id)
                    .ordered(OrderBy::UpdatedDesc),
            )
            .await
    }

    pub async fn delete(&self, id: NoteId) -> StoreResult<()> {
        self.repo.delete(id).await
    }
}

impl std::fmt::Debug for NoteLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteLibrary")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}
