//! System font lookup for text elements.
//!
//! Nothing is bundled: faces come from the fonts installed on the machine.
//! Lookups that find nothing are cached too, and callers skip the text.

use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight, ID};
use parking_lot::Mutex;
use rusttype::Font;
use std::{
    collections::{HashMap, HashSet},
    fs,
    sync::OnceLock,
};
use tracing::debug;

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "loaded system fonts");
        db
    })
}

pub fn list_font_families() -> Vec<String> {
    let mut set = HashSet::new();
    for face in db().faces() {
        for (name, _) in &face.families {
            set.insert(name.clone());
        }
    }
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}

/// A face for `family`, falling back to any sans-serif face and then to any
/// face at all. `None` when the machine has no usable fonts.
pub fn font_for(family: &str, bold: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
    };
    if let Some(font) = cache.lock().get(&key) {
        return *font;
    }

    let loaded = load_font_from_system(family, bold).map(|font| -> &'static Font<'static> {
        Box::leak(Box::new(font))
    });
    if loaded.is_none() {
        debug!(family, bold, "no usable font face");
    }
    cache.lock().insert(key, loaded);
    loaded
}

/// Bold Arial, the face cell labels are drawn with.
pub fn label_font() -> Option<&'static Font<'static>> {
    font_for("Arial", true)
}

fn load_font_from_system(family: &str, bold: bool) -> Option<Font<'static>> {
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        "Serif" => vec![Family::Serif],
        "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db()
        .query(&query)
        .or_else(|| db().faces().next().map(|face| face.id))?;
    load_face(id)
}

fn load_face(id: ID) -> Option<Font<'static>> {
    let face = db().face(id)?;
    let bytes = match &face.source {
        Source::File(path) | Source::SharedFile(path, _) => fs::read(path).ok()?,
        Source::Binary(bytes) => bytes.as_ref().as_ref().to_vec(),
    };
    Font::try_from_vec_and_index(bytes, face.index)
}
