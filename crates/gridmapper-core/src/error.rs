//! Error handling for Grid Mapper
//!
//! Provides the error types shared by every layer of the editor:
//! - Store errors (the persistence collaborator failed)
//! - Validation errors (bad input rejected at a boundary)
//!
//! Occupancy rejections are not errors; they live with the occupancy model
//! and are treated as silent no-ops by callers.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Persistence error type
///
/// Represents a failed call against a repository backend. Messages are kept
/// as strings so the type stays `Clone` and can cross task boundaries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The requested entity does not exist
    #[error("{collection} entry not found: {id}")]
    NotFound {
        /// The collection that was queried.
        collection: String,
        /// The id that was looked up.
        id: String,
    },

    /// An entity with the same id already exists
    #[error("{collection} entry already exists: {id}")]
    AlreadyExists {
        /// The collection that was written.
        collection: String,
        /// The conflicting id.
        id: String,
    },

    /// Backing file could not be read or written
    #[error("Storage I/O error: {reason}")]
    Io {
        /// The reason for the I/O failure.
        reason: String,
    },

    /// Stored data could not be encoded or decoded
    #[error("Storage serialization error: {reason}")]
    Serialization {
        /// The reason for the serialization failure.
        reason: String,
    },

    /// The backend refused or failed the request
    #[error("Storage backend error: {reason}")]
    Backend {
        /// The reason given by the backend.
        reason: String,
    },
}

impl StoreError {
    /// Shorthand for a not-found error.
    pub fn not_found(collection: &str, id: impl ToString) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a backend error.
    pub fn backend(reason: impl Into<String>) -> Self {
        StoreError::Backend {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Validation error type
///
/// Raised when input is rejected at a form or decoding boundary, before it
/// can reach the occupancy model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A grid dimension is outside the accepted range
    #[error("Grid {axis} {value} is outside {min}..={max}")]
    GridDimension {
        /// "width" or "height".
        axis: &'static str,
        /// The rejected value.
        value: u32,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },

    /// Cell size is outside the accepted range
    #[error("Cell size {value} is outside {min}..={max}")]
    CellSize {
        /// The rejected value.
        value: u32,
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },

    /// A name field was empty after trimming
    #[error("{what} name must not be empty")]
    EmptyName {
        /// What was being named (map, note).
        what: &'static str,
    },

    /// A color string is not `#rrggbb`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A persisted element row breaks the element invariants
    #[error("Invalid element: {reason}")]
    InvalidElement {
        /// Which invariant was broken.
        reason: String,
    },

    /// An unknown shape identifier
    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    /// An unknown size category
    #[error("Unknown size category: {0}")]
    UnknownSize(String),

    /// An unknown editing tool
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// An unknown export format
    #[error("Unknown export format: {0}")]
    UnknownExportFormat(String),

    /// A clock time string is not `HH:MM`
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),
}

impl ValidationError {
    /// Shorthand for an invalid element error.
    pub fn element(reason: impl Into<String>) -> Self {
        ValidationError::InvalidElement {
            reason: reason.into(),
        }
    }
}

/// Main error type for Grid Mapper
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a not-found store error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Store(StoreError::NotFound { .. }))
    }

    /// Check if this is a store error
    pub fn is_store_error(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for repository calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;
