//! Colormap configuration.

use crate::error::{ColormapError, ColormapResult};
use crate::interval::{ColorRef, Domain};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "COLORMAP_CONFIG";

/// How `IntervalSet::load` treats intervals that overlap each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
    /// Refuse the whole sequence.
    #[default]
    Reject,
    /// Replay the sequence through split-on-insert, later entries winning.
    Repair,
}

/// Settings for a colormap session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColormapConfig {
    pub domain_min: f64,
    pub domain_max: f64,
    /// Color of the initial sentinel interval and of gap fills after a reset.
    pub default_background: ColorRef,
    pub load_policy: LoadPolicy,
    /// Directory for saved colormaps. `None` uses the platform data directory.
    pub storage_dir: Option<PathBuf>,
    /// Width of the terminal color bar in cells.
    pub bar_width: usize,
}

impl Default for ColormapConfig {
    fn default() -> Self {
        Self {
            domain_min: 0.0,
            domain_max: 100.0,
            default_background: ColorRef::new("white"),
            load_policy: LoadPolicy::Reject,
            storage_dir: None,
            bar_width: 60,
        }
    }
}

impl ColormapConfig {
    pub fn domain(&self) -> Domain {
        Domain::new(self.domain_min, self.domain_max)
    }

    pub fn validate(&self) -> ColormapResult<()> {
        if !self.domain_min.is_finite() || !self.domain_max.is_finite() {
            return Err(ColormapError::Config("domain bounds must be finite".to_string()));
        }
        if self.domain_min >= self.domain_max {
            return Err(ColormapError::Config(format!(
                "domain_min ({}) must be less than domain_max ({})",
                self.domain_min, self.domain_max
            )));
        }
        if self.bar_width == 0 {
            return Err(ColormapError::Config("bar_width must be positive".to_string()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> ColormapResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ColormapError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ColormapResult<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|e| {
            ColormapError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Resolve the config from an explicit path, then `COLORMAP_CONFIG`, then defaults.
    pub fn discover(explicit: Option<&Path>) -> ColormapResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(path) => Self::load(Path::new(&path)),
                None => Ok(Self::default()),
            },
        }
    }
}
