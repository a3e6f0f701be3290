//! Error types shared by the colormap operations.

use crate::storage::StorageError;
use thiserror::Error;

/// Errors produced while editing, loading or persisting a colormap.
#[derive(Debug, Error)]
pub enum ColormapError {
    #[error("Invalid range: min {lower} must be less than max {upper}")]
    InvalidRange { lower: f64, upper: f64 },
    #[error("Missing range bound: both min and max are required")]
    MissingBound,
    #[error("No color selected")]
    MissingColor,
    #[error("Malformed colormap data: {0}")]
    MalformedPersistedData(String),
    #[error("Unknown color name: {0}")]
    UnknownColorName(String),
    #[error("Colormap not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ColormapError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound(name) => Self::NotFound(name),
            StorageError::Serialization(message) => Self::MalformedPersistedData(message),
            other => Self::Storage(other),
        }
    }
}

/// Result type for colormap operations.
pub type ColormapResult<T> = Result<T, ColormapError>;

impl ColormapError {
    /// Whether this error is one of the range-validation kinds.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, Self::InvalidRange { .. } | Self::MissingBound)
    }
}
