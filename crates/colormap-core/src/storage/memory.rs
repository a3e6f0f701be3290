//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::interval::Interval;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage. Saved colormaps live as long as the process.
#[derive(Default)]
pub struct MemoryStorage {
    colormaps: RwLock<HashMap<String, Vec<Interval>>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, intervals: &[Interval]) -> StorageResult<()> {
        let mut colormaps = self.colormaps.write().map_err(lock_error)?;
        colormaps.insert(id.to_string(), intervals.to_vec());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<Vec<Interval>> {
        let colormaps = self.colormaps.read().map_err(lock_error)?;
        colormaps
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut colormaps = self.colormaps.write().map_err(lock_error)?;
        colormaps.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let colormaps = self.colormaps.read().map_err(lock_error)?;
        Ok(colormaps.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let colormaps = self.colormaps.read().map_err(lock_error)?;
        Ok(colormaps.contains_key(id))
    }
}
