//! Rich-text notes attached to maps.

use super::color::HexColor;
use crate::types::{MapId, NoteId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font used for new blocks.
pub const DEFAULT_FONT_FAMILY: &str = "Arial";

/// Block styles offered by the notes editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteBlockKind {
    Title,
    Header,
    Body,
    Bullet,
}

impl NoteBlockKind {
    /// Point size used when a block is rendered.
    pub fn font_size(&self) -> f32 {
        match self {
            NoteBlockKind::Title => 24.0,
            NoteBlockKind::Header => 18.0,
            NoteBlockKind::Body | NoteBlockKind::Bullet => 14.0,
        }
    }
}

/// One paragraph of a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteBlock {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: NoteBlockKind,
    pub content: String,
    #[serde(rename = "fontFamily", default = "default_font_family")]
    pub font_family: String,
    #[serde(default)]
    pub color: HexColor,
}

fn default_font_family() -> String {
    DEFAULT_FONT_FAMILY.to_string()
}

impl NoteBlock {
    /// An empty block; text is white in dark mode and black otherwise.
    pub fn new(kind: NoteBlockKind, dark_mode: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: String::new(),
            font_family: default_font_family(),
            color: if dark_mode {
                HexColor::white()
            } else {
                HexColor::black()
            },
        }
    }
}

/// A saved note, optionally linked to a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNote {
    pub id: NoteId,
    #[serde(default)]
    pub map_id: Option<MapId>,
    pub owner: UserId,
    pub name: String,
    #[serde(rename = "content")]
    pub blocks: Vec<NoteBlock>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MapNote {
    pub fn new(owner: UserId, name: String, blocks: Vec<NoteBlock>, map_id: Option<MapId>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            map_id,
            owner,
            name,
            blocks,
            created_at: now,
            updated_at: now,
        }
    }
}
