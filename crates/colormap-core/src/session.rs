//! User actions against a colormap and the state they mutate.
//!
//! A session owns the interval set and the named-colormap library. Each
//! action is one read-modify-write; failures are turned into a status message
//! and leave the colormap as it was.

use crate::color;
use crate::config::ColormapConfig;
use crate::error::{ColormapError, ColormapResult};
use crate::interval::{ColorRef, Interval};
use crate::interval_set::IntervalSet;
use crate::persist;
use crate::render::ColorBar;
use crate::storage::{ColormapLibrary, Storage};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// An action triggered from the front end.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add a colored range. Missing fields come straight from empty form inputs.
    Add {
        color: Option<ColorRef>,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Save a snapshot under a generated name.
    Save,
    /// Replace the colormap with a saved snapshot.
    LoadNamed(String),
    /// Replace the colormap with an uploaded `data:...;base64,...` file.
    Upload(String),
    /// Replace the colormap with a JSON file from disk.
    Import(PathBuf),
    /// Write the colormap as a JSON file.
    Export(PathBuf),
    /// Delete a saved snapshot.
    DeleteSaved(String),
    Reset,
    SetBackgroundColor(ColorRef),
    /// Re-render without changing anything.
    Refresh,
}

/// What the front end shows after an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub bar: ColorBar,
    pub info: Vec<String>,
    pub status: String,
    /// Saved snapshot names, for populating a picker.
    pub saved: Vec<String>,
    pub ok: bool,
}

pub struct ColormapSession<S: Storage> {
    set: IntervalSet,
    library: ColormapLibrary<S>,
    config: ColormapConfig,
}

impl<S: Storage> ColormapSession<S> {
    pub fn new(config: ColormapConfig, storage: Arc<S>) -> Self {
        Self {
            set: IntervalSet::with_config(&config),
            library: ColormapLibrary::new(storage),
            config,
        }
    }

    pub fn set(&self) -> &IntervalSet {
        &self.set
    }

    pub fn library(&self) -> &ColormapLibrary<S> {
        &self.library
    }

    pub fn config(&self) -> &ColormapConfig {
        &self.config
    }

    /// Run an action and render the result.
    pub fn apply(&mut self, action: Action) -> Response {
        log::debug!("Applying {:?}", action);
        let (status, ok) = match self.execute(action) {
            Ok(status) => (status, true),
            Err(e) => {
                if e.is_invalid_range() {
                    log::debug!("{}", e);
                } else {
                    log::warn!("{}", e);
                }
                (e.to_string(), false)
            }
        };
        self.respond(status, ok)
    }

    fn respond(&self, status: String, ok: bool) -> Response {
        let bar = ColorBar::from_set(&self.set);
        let info = bar.describe();
        let saved = self.library.names().unwrap_or_else(|e| {
            log::warn!("Failed to list saved colormaps: {}", e);
            Vec::new()
        });
        Response {
            bar,
            info,
            status,
            saved,
            ok,
        }
    }

    fn execute(&mut self, action: Action) -> ColormapResult<String> {
        match action {
            Action::Add { color, min, max } => {
                let color = color.ok_or(ColormapError::MissingColor)?;
                let (min, max) = min.zip(max).ok_or(ColormapError::MissingBound)?;
                if color::try_resolve(&color).is_err() {
                    log::warn!("Unknown color name {}, it will render as white", color);
                }
                self.set.add(Interval::new(color.clone(), min, max))?;
                Ok(format!("Added {} over [{}, {}]", color, min, max))
            }
            Action::Save => {
                let name = self.library.save_snapshot(&self.set)?;
                Ok(format!("Saved as {}", name))
            }
            Action::LoadNamed(name) => {
                let intervals = self.library.load_snapshot(&name)?;
                self.set.load(intervals)?;
                Ok(format!("Loaded {}", name))
            }
            Action::Upload(contents) => {
                let json = persist::decode_upload(&contents)?;
                self.set.load_json(&json)?;
                log::info!("Loaded uploaded colormap ({} intervals)", self.set.len());
                Ok("Loaded uploaded colormap".to_string())
            }
            Action::Import(path) => {
                let intervals = persist::read_file(&path)?;
                self.set.load(intervals)?;
                log::info!("Imported {}", path.display());
                Ok(format!("Imported {}", path.display()))
            }
            Action::Export(path) => {
                persist::write_file(&path, self.set.intervals())?;
                log::info!("Exported {}", path.display());
                Ok(format!("Exported to {}", path.display()))
            }
            Action::DeleteSaved(name) => {
                self.library.delete(&name)?;
                Ok(format!("Deleted {}", name))
            }
            Action::Reset => {
                self.set.reset();
                log::info!("Colormap reset");
                Ok("Colormap reset".to_string())
            }
            Action::SetBackgroundColor(color) => {
                self.set.set_background_color(color.clone());
                Ok(format!("Background color set to {}", color))
            }
            Action::Refresh => Ok(String::new()),
        }
    }
}

/// A session behind a mutex, so concurrent callers are applied one at a time.
pub struct SharedSession<S: Storage> {
    inner: Arc<Mutex<ColormapSession<S>>>,
}

impl<S: Storage> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Storage> SharedSession<S> {
    pub fn new(session: ColormapSession<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn dispatch(&self, action: Action) -> Response {
        // Every mutation leaves the set valid, so a poisoned lock is still usable.
        let mut session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        session.apply(action)
    }

    /// Run `f` against the current interval set under the lock.
    pub fn with_set<R>(&self, f: impl FnOnce(&IntervalSet) -> R) -> R {
        let session = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(session.set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use base64::{Engine, engine::general_purpose::STANDARD};
    use tempfile::tempdir;

    fn session() -> ColormapSession<MemoryStorage> {
        ColormapSession::new(ColormapConfig::default(), Arc::new(MemoryStorage::new()))
    }

    fn add(color: &str, min: f64, max: f64) -> Action {
        Action::Add {
            color: Some(ColorRef::new(color)),
            min: Some(min),
            max: Some(max),
        }
    }

    #[test]
    fn test_add_renders_info() {
        let mut session = session();
        let response = session.apply(add("red", 20.0, 40.0));

        assert!(response.ok);
        assert_eq!(response.info[1], "Color: red, Range: [20, 40]");
        assert_eq!(response.bar.ticks, vec![0.0, 20.0, 40.0, 100.0]);
    }

    #[test]
    fn test_missing_fields_are_noops() {
        let mut session = session();
        let before = session.set().clone();

        let response = session.apply(Action::Add {
            color: Some(ColorRef::new("red")),
            min: None,
            max: Some(40.0),
        });
        assert!(!response.ok);
        assert!(!response.status.is_empty());

        let response = session.apply(Action::Add {
            color: None,
            min: Some(10.0),
            max: Some(40.0),
        });
        assert!(!response.ok);
        assert_eq!(session.set(), &before);
    }

    #[test]
    fn test_save_and_load_named() {
        let mut session = session();
        session.apply(add("red", 20.0, 40.0));
        let response = session.apply(Action::Save);
        assert_eq!(response.status, "Saved as colormap_01");
        assert_eq!(response.saved, vec!["colormap_01"]);

        session.apply(Action::Reset);
        assert_eq!(session.set().len(), 1);

        let response = session.apply(Action::LoadNamed("colormap_01".to_string()));
        assert!(response.ok);
        assert_eq!(session.set().len(), 3);
    }

    #[test]
    fn test_load_unknown_name() {
        let mut session = session();
        let response = session.apply(Action::LoadNamed("colormap_42".to_string()));
        assert!(!response.ok);
        assert_eq!(response.status, "Colormap not found: colormap_42");
    }

    #[test]
    fn test_upload() {
        let mut session = session();
        let json = r#"[{"color": "blue", "min": 0, "max": 50}, {"color": "red", "min": 50, "max": 100}]"#;
        let upload = format!("data:application/json;base64,{}", STANDARD.encode(json));

        let response = session.apply(Action::Upload(upload));
        assert!(response.ok, "{}", response.status);
        assert_eq!(
            response.info,
            vec!["Color: blue, Range: [0, 50]", "Color: red, Range: [50, 100]"]
        );
    }

    #[test]
    fn test_corrupt_saved_colormap_is_malformed() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("colormap_01.json"), "{not json").unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let mut session = ColormapSession::new(ColormapConfig::default(), Arc::new(storage));
        session.apply(add("red", 20.0, 40.0));
        let before = session.set().clone();

        let response = session.apply(Action::LoadNamed("colormap_01".to_string()));
        assert!(!response.ok);
        assert!(response.status.starts_with("Malformed colormap data"), "{}", response.status);
        assert_eq!(session.set(), &before);
    }

    #[test]
    fn test_malformed_upload_keeps_state() {
        let mut session = session();
        session.apply(add("red", 20.0, 40.0));
        let before = session.set().clone();

        let upload = format!("data:application/json;base64,{}", STANDARD.encode("{not json"));
        let response = session.apply(Action::Upload(upload));

        assert!(!response.ok);
        assert!(response.status.starts_with("Malformed colormap data"));
        assert_eq!(session.set(), &before);
    }

    #[test]
    fn test_export_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.json");
        let mut session = session();
        session.apply(add("red", 20.0, 40.0));
        session.apply(add("blue", 30.0, 50.0));
        let expected = session.set().clone();

        assert!(session.apply(Action::Export(path.clone())).ok);
        session.apply(Action::Reset);
        assert!(session.apply(Action::Import(path)).ok);
        assert_eq!(session.set(), &expected);
    }

    #[test]
    fn test_background_color() {
        let mut session = session();
        session.apply(add("red", 20.0, 40.0));
        let response = session.apply(Action::SetBackgroundColor(ColorRef::new("black")));

        assert_eq!(response.info[0], "Color: black, Range: [0, 20]");
        assert_eq!(response.info[2], "Color: black, Range: [40, 100]");
    }

    #[test]
    fn test_delete_saved() {
        let mut session = session();
        session.apply(Action::Save);
        let response = session.apply(Action::DeleteSaved("colormap_01".to_string()));
        assert!(response.ok);
        assert!(response.saved.is_empty());
    }

    #[test]
    fn test_shared_session_serializes_actions() {
        let shared = SharedSession::new(session());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                std::thread::spawn(move || {
                    let lower = i as f64 * 10.0;
                    shared.dispatch(add("red", lower, lower + 15.0));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        shared.with_set(|set| assert!(set.is_valid()));
    }
}
