//! # Grid Mapper Store
//!
//! Persistence for maps, elements, notes, color history and preferences.
//! Every collection sits behind the async [`Repository`] trait, with an
//! in-memory backend and a JSON file backend.

mod collection;
pub mod entities;
pub mod file;
pub mod memory;
pub mod store;
pub mod traits;

pub use file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use store::Store;
pub use traits::{Entity, OrderBy, Query, Repository};
