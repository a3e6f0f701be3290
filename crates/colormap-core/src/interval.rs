//! Interval value types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque color identifier (a CSS name or a hex string).
///
/// The interval algebra only compares these for equality; resolving them to
/// actual color values happens in [`crate::color`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRef(String);

impl ColorRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColorRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ColorRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A half-open range `[lower, upper)` tagged with a color.
///
/// On disk this is `{ "color": ..., "min": ..., "max": ... }`. Gap-fill
/// intervals additionally carry `"background": true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub color: ColorRef,
    #[serde(rename = "min")]
    pub lower: f64,
    #[serde(rename = "max")]
    pub upper: f64,
    /// Set only on intervals synthesized to fill gaps.
    #[serde(default, skip_serializing_if = "is_false")]
    pub background: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Interval {
    /// Create a user-colored interval.
    pub fn new(color: impl Into<ColorRef>, lower: f64, upper: f64) -> Self {
        Self {
            color: color.into(),
            lower,
            upper,
            background: false,
        }
    }

    /// Create a gap-fill interval in the background color.
    pub fn background(color: impl Into<ColorRef>, lower: f64, upper: f64) -> Self {
        Self {
            color: color.into(),
            lower,
            upper,
            background: true,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// True for zero-width or inverted ranges.
    pub fn is_empty(&self) -> bool {
        !(self.lower < self.upper)
    }

    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    /// Check whether `value` lies in `[lower, upper)`.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value < self.upper
    }

    /// Check whether this interval shares more than a boundary point with `[lower, upper)`.
    pub fn overlaps(&self, lower: f64, upper: f64) -> bool {
        self.lower < upper && lower < self.upper
    }

    /// Same interval with a different range, keeping color and background flag.
    pub(crate) fn with_range(&self, lower: f64, upper: f64) -> Self {
        Self {
            color: self.color.clone(),
            lower,
            upper,
            background: self.background,
        }
    }
}

/// The fixed numeric range a colormap must cover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}
