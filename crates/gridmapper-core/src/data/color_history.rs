//! Recently used and favorite paint colors.

use super::color::HexColor;
use crate::types::{ColorId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorHistoryEntry {
    pub id: ColorId,
    pub owner: UserId,
    pub color: HexColor,
    #[serde(default)]
    pub is_favorited: bool,
    pub last_used_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl ColorHistoryEntry {
    /// A fresh, unfavorited entry used just now.
    pub fn new(owner: UserId, color: HexColor) -> Self {
        let now = Utc::now();
        Self {
            id: ColorId::new(),
            owner,
            color,
            is_favorited: false,
            last_used_at: now,
            created_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_used_at = Utc::now();
    }

    /// Display order: favorites first, then most recently used.
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        b.is_favorited
            .cmp(&a.is_favorited)
            .then_with(|| b.last_used_at.cmp(&a.last_used_at))
    }
}
