//! [`Entity`] bindings for the core record types.

use crate::traits::Entity;
use chrono::{DateTime, Utc};
use gridmapper_core::{
    ColorHistoryEntry, ColorId, ElementId, MapElement, MapId, MapNote, MapRecord, NoteId,
    PreferencesId, UserId, UserPreferences,
};

impl Entity for MapRecord {
    type Id = MapId;
    const COLLECTION: &'static str = "maps";
    const STORAGE_KEY: &'static str = "tabletop_maps";

    fn id(&self) -> MapId {
        self.id
    }

    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for MapElement {
    type Id = ElementId;
    const COLLECTION: &'static str = "elements";
    const STORAGE_KEY: &'static str = "tabletop_elements";

    fn id(&self) -> ElementId {
        self.id
    }

    fn map_id(&self) -> Option<MapId> {
        self.map_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for MapNote {
    type Id = NoteId;
    const COLLECTION: &'static str = "notes";
    const STORAGE_KEY: &'static str = "tabletop_notes";

    fn id(&self) -> NoteId {
        self.id
    }

    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }

    fn map_id(&self) -> Option<MapId> {
        self.map_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Entity for ColorHistoryEntry {
    type Id = ColorId;
    const COLLECTION: &'static str = "color history";
    const STORAGE_KEY: &'static str = "tabletop_color_history";

    fn id(&self) -> ColorId {
        self.id
    }

    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.last_used_at
    }
}

impl Entity for UserPreferences {
    type Id = PreferencesId;
    const COLLECTION: &'static str = "preferences";
    const STORAGE_KEY: &'static str = "tabletop_preferences";

    fn id(&self) -> PreferencesId {
        self.id
    }

    fn owner(&self) -> Option<UserId> {
        Some(self.owner)
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
