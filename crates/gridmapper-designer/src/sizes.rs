//! Creature/object size categories and the footprint each one occupies.

use gridmapper_core::{Footprint, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
    Gargantuan,
}

/// Display data for a size category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDefinition {
    pub name: &'static str,
    pub feet: &'static str,
    /// Side length in grid squares; `0.5` only for tiny.
    pub grid_squares: f64,
    pub description: &'static str,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 6] = [
        SizeCategory::Tiny,
        SizeCategory::Small,
        SizeCategory::Medium,
        SizeCategory::Large,
        SizeCategory::Huge,
        SizeCategory::Gargantuan,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SizeCategory::Tiny => "tiny",
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
            SizeCategory::Huge => "huge",
            SizeCategory::Gargantuan => "gargantuan",
        }
    }

    pub fn definition(&self) -> SizeDefinition {
        match self {
            SizeCategory::Tiny => SizeDefinition {
                name: "Tiny",
                feet: "2.5 x 2.5 ft",
                grid_squares: 0.5,
                description: "Quarter of a square; up to four share one cell",
            },
            SizeCategory::Small => SizeDefinition {
                name: "Small",
                feet: "5 x 5 ft",
                grid_squares: 1.0,
                description: "One square",
            },
            SizeCategory::Medium => SizeDefinition {
                name: "Medium",
                feet: "5 x 5 ft",
                grid_squares: 1.0,
                description: "One square",
            },
            SizeCategory::Large => SizeDefinition {
                name: "Large",
                feet: "10 x 10 ft",
                grid_squares: 2.0,
                description: "2 x 2 squares",
            },
            SizeCategory::Huge => SizeDefinition {
                name: "Huge",
                feet: "15 x 15 ft",
                grid_squares: 3.0,
                description: "3 x 3 squares",
            },
            SizeCategory::Gargantuan => SizeDefinition {
                name: "Gargantuan",
                feet: "20 x 20 ft",
                grid_squares: 4.0,
                description: "4 x 4 squares",
            },
        }
    }

    /// Footprint used when placing at this size.
    pub fn footprint(&self) -> Footprint {
        match self {
            SizeCategory::Tiny => Footprint::Tiny,
            SizeCategory::Small | SizeCategory::Medium => Footprint::square(1),
            SizeCategory::Large => Footprint::square(2),
            SizeCategory::Huge => Footprint::square(3),
            SizeCategory::Gargantuan => Footprint::square(4),
        }
    }

    pub fn is_tiny(&self) -> bool {
        matches!(self, SizeCategory::Tiny)
    }
}

impl FromStr for SizeCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SizeCategory::ALL
            .iter()
            .copied()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| ValidationError::UnknownSize(s.to_string()))
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
