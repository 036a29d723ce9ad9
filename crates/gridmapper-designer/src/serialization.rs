//! Standalone map documents.
//!
//! A map can be written to a single JSON file holding its name, grid
//! configuration and elements, independent of the store.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use gridmapper_core::{CellSize, GridBounds, MapElement};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Suggested extension for map documents.
pub const MAP_FILE_EXTENSION: &str = "gmap.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub metadata: MapMetadata,
    pub grid: GridSettings,
    #[serde(default)]
    pub elements: Vec<MapElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    pub width: u32,
    pub height: u32,
    pub cell_size: CellSize,
}

impl GridSettings {
    pub fn bounds(&self) -> GridBounds {
        GridBounds::clamped(i64::from(self.width), i64::from(self.height))
    }
}

impl MapDocument {
    pub fn new(name: &str, bounds: GridBounds, cell_size: CellSize) -> Self {
        let now = Utc::now();
        Self {
            metadata: MapMetadata {
                name: name.to_string(),
                created: now,
                modified: now,
            },
            grid: GridSettings {
                width: bounds.width(),
                height: bounds.height(),
                cell_size,
            },
            elements: Vec::new(),
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize map")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write map file {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read map file {}", path.as_ref().display()))?;
        let document = serde_json::from_str(&content).context("Failed to parse map file")?;
        Ok(document)
    }
}
