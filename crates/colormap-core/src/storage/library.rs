//! Named colormap snapshots on top of a storage backend.

use super::{Storage, StorageError, StorageResult};
use crate::interval::Interval;
use crate::interval_set::IntervalSet;
use std::sync::Arc;

/// Prefix of generated snapshot names (`colormap_01`, `colormap_02`, ...).
pub const NAME_PREFIX: &str = "colormap_";

pub struct ColormapLibrary<S: Storage> {
    storage: Arc<S>,
}

impl<S: Storage> Clone for ColormapLibrary<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Storage> ColormapLibrary<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Next free generated name, numbered from one past the current count.
    pub fn next_name(&self) -> StorageResult<String> {
        let mut number = self.storage.list()?.len() + 1;
        loop {
            let name = format!("{}{:02}", NAME_PREFIX, number);
            if !self.storage.exists(&name)? {
                return Ok(name);
            }
            number += 1;
        }
    }

    /// Store the current intervals under a fresh name and return it.
    pub fn save_snapshot(&self, set: &IntervalSet) -> StorageResult<String> {
        let name = self.next_name()?;
        self.storage.save(&name, set.intervals())?;
        log::info!("Saved {} ({} intervals)", name, set.len());
        Ok(name)
    }

    pub fn load_snapshot(&self, name: &str) -> StorageResult<Vec<Interval>> {
        let intervals = self.storage.load(name)?;
        log::info!("Loaded {} ({} intervals)", name, intervals.len());
        Ok(intervals)
    }

    pub fn delete(&self, name: &str) -> StorageResult<()> {
        if !self.storage.exists(name)? {
            return Err(StorageError::NotFound(name.to_string()));
        }
        self.storage.delete(name)
    }

    /// Saved names, generated ones in numeric order first.
    pub fn names(&self) -> StorageResult<Vec<String>> {
        let mut names = self.storage.list()?;
        names.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
        Ok(names)
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

fn sort_key(name: &str) -> (u64, &str) {
    let number = name
        .strip_prefix(NAME_PREFIX)
        .and_then(|suffix| suffix.parse::<u64>().ok())
        .unwrap_or(u64::MAX);
    (number, name)
}
