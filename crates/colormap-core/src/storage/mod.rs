//! Storage abstraction for saved colormaps.

mod file;
mod library;
mod memory;

pub use file::FileStorage;
pub use library::{ColormapLibrary, NAME_PREFIX};
pub use memory::MemoryStorage;

use crate::interval::Interval;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Colormap not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid colormap name: {0:?}")]
    InvalidId(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for colormap storage backends.
///
/// Each entry is one snapshot: the full interval sequence at save time.
pub trait Storage: Send + Sync {
    /// Save a snapshot under `id`, replacing any previous one.
    fn save(&self, id: &str, intervals: &[Interval]) -> StorageResult<()>;

    /// Load a snapshot.
    fn load(&self, id: &str) -> StorageResult<Vec<Interval>>;

    /// Delete a snapshot. Deleting a missing id is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all snapshot ids.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a snapshot exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}
