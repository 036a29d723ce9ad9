//! Per-owner history of paint colors.
//!
//! Every color the user paints with is remembered. Favorites stay until
//! unfavorited; the rest form a "recent" list capped at `max_recent`, with
//! the least recently used entries evicted as new colors arrive.

use gridmapper_core::constants::MAX_RECENT_COLORS;
use gridmapper_core::{ColorHistoryEntry, ColorId, HexColor, StoreResult, UserId};
use gridmapper_store::{Query, Repository};
use std::sync::Arc;
use tracing::debug;

/// Handle over one owner's color history. Cheap to clone.
#[derive(Clone)]
pub struct ColorHistory {
    owner: UserId,
    repo: Arc<dyn Repository<ColorHistoryEntry>>,
    max_recent: usize,
}

/// Entries split the way the palette shows them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorPalette {
    pub favorites: Vec<ColorHistoryEntry>,
    pub recent: Vec<ColorHistoryEntry>,
}

impl ColorHistory {
    pub fn new(owner: UserId, repo: Arc<dyn Repository<ColorHistoryEntry>>) -> Self {
        Self {
            owner,
            repo,
            max_recent: MAX_RECENT_COLORS,
        }
    }

    pub fn with_max_recent(mut self, max_recent: usize) -> Self {
        self.max_recent = max_recent.max(1);
        self
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn max_recent(&self) -> usize {
        self.max_recent
    }

    /// Record a use of `color`: bump an existing entry, or add a new one and
    /// evict the least recently used unfavorited entries beyond the cap.
    pub async fn use_color(&self, color: HexColor) -> StoreResult<ColorHistoryEntry> {
        let entries = self.entries().await?;
        if let Some(mut existing) = entries.into_iter().find(|e| e.color == color) {
            existing.touch();
            return self.repo.update(existing).await;
        }

        let created = self
            .repo
            .create(ColorHistoryEntry::new(self.owner, color))
            .await?;

        let mut unfavorited: Vec<_> = self
            .entries()
            .await?
            .into_iter()
            .filter(|e| !e.is_favorited)
            .collect();
        if unfavorited.len() > self.max_recent {
            unfavorited.sort_by_key(|e| e.last_used_at);
            let excess = unfavorited.len() - self.max_recent;
            for stale in &unfavorited[..excess] {
                debug!(color = %stale.color, "evicting color from history");
                self.repo.delete(stale.id).await?;
            }
        }
        Ok(created)
    }

    pub async fn toggle_favorite(&self, id: ColorId) -> StoreResult<ColorHistoryEntry> {
        let mut entry = self.repo.get(id).await?;
        entry.is_favorited = !entry.is_favorited;
        self.repo.update(entry).await
    }

    /// Move a favorite back into the recent list as the newest entry.
    pub async fn unfavorite(&self, id: ColorId) -> StoreResult<ColorHistoryEntry> {
        let mut entry = self.repo.get(id).await?;
        entry.is_favorited = false;
        entry.touch();
        self.repo.update(entry).await
    }

    /// All entries, favorites first, then most recently used.
    pub async fn entries(&self) -> StoreResult<Vec<ColorHistoryEntry>> {
        let mut entries = self
            .repo
            .list(&Query::all().owned_by(self.owner))
            .await?;
        entries.sort_by(ColorHistoryEntry::display_order);
        Ok(entries)
    }

    /// Favorites plus at most `max_recent` recent colors.
    pub async fn palette(&self) -> StoreResult<ColorPalette> {
        let (favorites, mut recent): (Vec<_>, Vec<_>) = self
            .entries()
            .await?
            .into_iter()
            .partition(|e| e.is_favorited);
        recent.truncate(self.max_recent);
        Ok(ColorPalette { favorites, recent })
    }
}

impl std::fmt::Debug for ColorHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorHistory")
            .field("owner", &self.owner)
            .field("max_recent", &self.max_recent)
            .finish_non_exhaustive()
    }
}
