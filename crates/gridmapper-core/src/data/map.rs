//! Saved map records.

use super::grid::{CellSize, GridBounds};
use crate::error::ValidationError;
use crate::types::{MapId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, owned grid. Elements reference it through their `map_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRecord {
    pub id: MapId,
    pub owner: UserId,
    pub name: String,
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size: CellSize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MapRecord {
    /// Create a record for a map that is being saved for the first time.
    pub fn new(
        owner: UserId,
        name: &str,
        bounds: GridBounds,
        cell_size: CellSize,
    ) -> Result<Self, ValidationError> {
        let name = validate_name("Map", name)?;
        let now = Utc::now();
        Ok(Self {
            id: MapId::new(),
            owner,
            name,
            grid_width: bounds.width(),
            grid_height: bounds.height(),
            cell_size,
            created_at: now,
            updated_at: now,
        })
    }

    /// Grid dimensions, clamped into the accepted range.
    pub fn bounds(&self) -> GridBounds {
        GridBounds::clamped(i64::from(self.grid_width), i64::from(self.grid_height))
    }

    /// Apply a rename/resize and bump `updated_at`.
    pub fn update(
        &mut self,
        name: &str,
        bounds: GridBounds,
        cell_size: CellSize,
    ) -> Result<(), ValidationError> {
        self.name = validate_name("Map", name)?;
        self.grid_width = bounds.width();
        self.grid_height = bounds.height();
        self.cell_size = cell_size;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Trim a user supplied name, rejecting it when nothing is left.
pub fn validate_name(what: &'static str, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyName { what })
    } else {
        Ok(trimmed.to_string())
    }
}
