//! Error types for store and settings operations
//!
//! Grid-facing calls never surface these; they log and degrade instead.
//! Only the mutating store API and the settings loader return them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Row out of bounds: {index} (count {count})")]
    RowOutOfBounds { index: usize, count: usize },

    #[error("Address must not be empty")]
    EmptyAddress,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl TableError {
    /// Create a row out of bounds error
    pub fn out_of_bounds(index: usize, count: usize) -> Self {
        Self::RowOutOfBounds { index, count }
    }
}
