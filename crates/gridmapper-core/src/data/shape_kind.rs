//! The closed set of shape glyphs an element can carry.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape identifier, persisted as its kebab-case id (`"door-open"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Wall,
    Door,
    Window,
    Table,
    Chair,
    Bed,
    Chest,
    Tree,
    Rock,
    Water,
    Stairs,
    DoorOpen,
    DoorLocked,
    Food,
    Farm,
    Campsite,
}

impl ShapeKind {
    /// Every shape in palette order.
    pub const ALL: [ShapeKind; 16] = [
        ShapeKind::Wall,
        ShapeKind::Door,
        ShapeKind::Window,
        ShapeKind::Table,
        ShapeKind::Chair,
        ShapeKind::Bed,
        ShapeKind::Chest,
        ShapeKind::Tree,
        ShapeKind::Rock,
        ShapeKind::Water,
        ShapeKind::Stairs,
        ShapeKind::DoorOpen,
        ShapeKind::DoorLocked,
        ShapeKind::Food,
        ShapeKind::Farm,
        ShapeKind::Campsite,
    ];

    /// Persisted identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Door => "door",
            Self::Window => "window",
            Self::Table => "table",
            Self::Chair => "chair",
            Self::Bed => "bed",
            Self::Chest => "chest",
            Self::Tree => "tree",
            Self::Rock => "rock",
            Self::Water => "water",
            Self::Stairs => "stairs",
            Self::DoorOpen => "door-open",
            Self::DoorLocked => "door-locked",
            Self::Food => "food",
            Self::Farm => "farm",
            Self::Campsite => "campsite",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| ValidationError::UnknownShape(s.to_string()))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
