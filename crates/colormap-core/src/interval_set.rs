//! Ordered set of disjoint colored intervals covering a domain.
//!
//! New intervals always win: any existing interval they overlap is truncated
//! or split in two to make room, never merged or blended. Gaps left after a
//! load are closed by `normalize` with intervals in the background color.

use crate::config::{ColormapConfig, LoadPolicy};
use crate::error::{ColormapError, ColormapResult};
use crate::interval::{ColorRef, Domain, Interval};
use crate::persist;
use thiserror::Error;

/// A broken structural invariant, reported by [`IntervalSet::check_invariants`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("interval {index} is empty or not finite")]
    Degenerate { index: usize },
    #[error("interval {index} starts before its predecessor")]
    Unsorted { index: usize },
    #[error("interval {index} overlaps its predecessor")]
    Overlap { index: usize },
    #[error("range [{lower}, {upper}) is not covered")]
    Gap { lower: f64, upper: f64 },
    #[error("interval {index} lies outside the domain")]
    OutOfDomain { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSet {
    /// Sorted by `lower`.
    intervals: Vec<Interval>,
    domain: Domain,
    background: ColorRef,
    default_background: ColorRef,
    load_policy: LoadPolicy,
}

impl Default for IntervalSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalSet {
    /// Create a set over `[0, 100]` holding a single white sentinel.
    pub fn new() -> Self {
        Self::with_config(&ColormapConfig::default())
    }

    pub fn with_config(config: &ColormapConfig) -> Self {
        let domain = config.domain();
        let background = config.default_background.clone();
        Self {
            intervals: vec![Interval::background(background.clone(), domain.min, domain.max)],
            domain,
            background: background.clone(),
            default_background: background,
            load_policy: config.load_policy,
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn background_color(&self) -> &ColorRef {
        &self.background
    }

    pub fn load_policy(&self) -> LoadPolicy {
        self.load_policy
    }

    pub fn set_load_policy(&mut self, policy: LoadPolicy) {
        self.load_policy = policy;
    }

    /// Split-on-insert without gap filling.
    ///
    /// The range is clamped to the domain. Invalid ranges leave the set untouched.
    pub fn insert(&mut self, interval: Interval) -> ColormapResult<()> {
        let interval = self.prepare(interval)?;
        log::debug!(
            "Inserting {} over [{}, {})",
            interval.color,
            interval.lower,
            interval.upper
        );

        let mut updated = split_around(&self.intervals, interval.lower, interval.upper);
        updated.push(interval);
        sort_by_lower(&mut updated);
        self.intervals = updated;
        Ok(())
    }

    /// Insert followed by `normalize`.
    pub fn add(&mut self, interval: Interval) -> ColormapResult<()> {
        self.insert(interval)?;
        self.normalize();
        Ok(())
    }

    /// Sort by lower bound and fill every uncovered range with the background color.
    pub fn normalize(&mut self) {
        let mut current = std::mem::take(&mut self.intervals);
        current.retain(|interval| !interval.is_empty());
        sort_by_lower(&mut current);

        let mut filled = Vec::with_capacity(current.len() * 2 + 1);
        let mut cursor = self.domain.min;
        for interval in current {
            if cursor < interval.lower {
                filled.push(Interval::background(
                    self.background.clone(),
                    cursor,
                    interval.lower,
                ));
            }
            cursor = cursor.max(interval.upper);
            filled.push(interval);
        }
        if cursor < self.domain.max {
            filled.push(Interval::background(
                self.background.clone(),
                cursor,
                self.domain.max,
            ));
        }

        self.intervals = filled;
    }

    /// Recolor the gap-fill intervals and track `color` as the new background.
    ///
    /// Intervals the user added keep their color even when it equals the old background.
    pub fn set_background_color(&mut self, color: impl Into<ColorRef>) {
        let color = color.into();
        let mut recolored = 0;
        for interval in self.intervals.iter_mut().filter(|i| i.background) {
            interval.color = color.clone();
            recolored += 1;
        }
        log::debug!(
            "Background {} -> {} ({} intervals recolored)",
            self.background,
            color,
            recolored
        );
        self.background = color;
    }

    /// Replace the whole collection with an untrusted sequence.
    ///
    /// On error the current collection is left as it was.
    pub fn load(&mut self, intervals: Vec<Interval>) -> ColormapResult<()> {
        for (index, interval) in intervals.iter().enumerate() {
            if !interval.is_finite() || interval.is_empty() {
                return Err(ColormapError::MalformedPersistedData(format!(
                    "entry {} has an invalid range [{}, {}]",
                    index, interval.lower, interval.upper
                )));
            }
            if !self.domain.contains(interval.lower) || !self.domain.contains(interval.upper) {
                return Err(ColormapError::MalformedPersistedData(format!(
                    "entry {} [{}, {}] lies outside the domain [{}, {}]",
                    index, interval.lower, interval.upper, self.domain.min, self.domain.max
                )));
            }
        }

        let mut loaded = match self.load_policy {
            LoadPolicy::Reject => {
                let mut sorted = intervals;
                sort_by_lower(&mut sorted);
                if let Some(pair) = sorted.windows(2).find(|pair| pair[0].upper > pair[1].lower) {
                    return Err(ColormapError::MalformedPersistedData(format!(
                        "[{}, {}] overlaps [{}, {}]",
                        pair[0].lower, pair[0].upper, pair[1].lower, pair[1].upper
                    )));
                }
                sorted
            }
            LoadPolicy::Repair => {
                let mut repaired: Vec<Interval> = Vec::with_capacity(intervals.len());
                for interval in intervals {
                    repaired = split_around(&repaired, interval.lower, interval.upper);
                    repaired.push(interval);
                }
                sort_by_lower(&mut repaired);
                repaired
            }
        };

        match uniform_background(&loaded) {
            Some(color) => self.background = color,
            None if !loaded.iter().any(|i| i.background) => {
                // Plain {color, min, max} data: treat the background color as gap fill.
                for interval in loaded.iter_mut().filter(|i| i.color == self.background) {
                    interval.background = true;
                }
            }
            None => {}
        }
        log::debug!("Loaded {} intervals", loaded.len());
        self.intervals = loaded;
        self.normalize();
        Ok(())
    }

    /// Back to a single sentinel in the default background color.
    pub fn reset(&mut self) {
        self.background = self.default_background.clone();
        self.intervals = vec![Interval::background(
            self.background.clone(),
            self.domain.min,
            self.domain.max,
        )];
    }

    /// Color at `value`. The domain's upper end belongs to the last interval.
    pub fn color_at(&self, value: f64) -> Option<&ColorRef> {
        if let Some(interval) = self.intervals.iter().find(|i| i.contains(value)) {
            return Some(&interval.color);
        }
        self.intervals
            .last()
            .filter(|last| last.upper == value)
            .map(|last| &last.color)
    }

    /// Sorted, de-duplicated interval boundaries.
    pub fn transitions(&self) -> Vec<f64> {
        let mut points: Vec<f64> = self
            .intervals
            .iter()
            .flat_map(|interval| [interval.lower, interval.upper])
            .collect();
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut cursor = self.domain.min;
        for (index, interval) in self.intervals.iter().enumerate() {
            if !interval.is_finite() || interval.is_empty() {
                return Err(InvariantViolation::Degenerate { index });
            }
            if interval.lower < self.domain.min || interval.upper > self.domain.max {
                return Err(InvariantViolation::OutOfDomain { index });
            }
            if index > 0 {
                let previous = &self.intervals[index - 1];
                if interval.lower < previous.lower {
                    return Err(InvariantViolation::Unsorted { index });
                }
                if previous.upper > interval.lower {
                    return Err(InvariantViolation::Overlap { index });
                }
            }
            if cursor < interval.lower {
                return Err(InvariantViolation::Gap {
                    lower: cursor,
                    upper: interval.lower,
                });
            }
            cursor = interval.upper;
        }
        if cursor < self.domain.max {
            return Err(InvariantViolation::Gap {
                lower: cursor,
                upper: self.domain.max,
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.check_invariants().is_ok()
    }

    pub fn to_json(&self) -> ColormapResult<String> {
        persist::to_json(&self.intervals)
    }

    /// Parse a persisted colormap and `load` it.
    pub fn load_json(&mut self, json: &str) -> ColormapResult<()> {
        let intervals = persist::parse_intervals(json)?;
        self.load(intervals)
    }

    /// Validate a new interval and clip it to the domain.
    fn prepare(&self, interval: Interval) -> ColormapResult<Interval> {
        let invalid = || ColormapError::InvalidRange {
            lower: interval.lower,
            upper: interval.upper,
        };
        if !interval.is_finite() || interval.is_empty() {
            return Err(invalid());
        }

        let lower = self.domain.clamp(interval.lower);
        let upper = self.domain.clamp(interval.upper);
        if lower >= upper {
            return Err(invalid());
        }
        Ok(Interval {
            color: interval.color,
            lower,
            upper,
            background: false,
        })
    }
}

/// Remainders of `existing` once `[lower, upper)` has been cut out of it.
///
/// An interval strictly containing the range yields two pieces. Intervals
/// inside the range, or matching it exactly, yield nothing.
fn split_around(existing: &[Interval], lower: f64, upper: f64) -> Vec<Interval> {
    let mut remainders = Vec::with_capacity(existing.len() + 1);
    for interval in existing {
        if !interval.overlaps(lower, upper) {
            remainders.push(interval.clone());
            continue;
        }
        if interval.lower < lower {
            remainders.push(interval.with_range(interval.lower, lower));
        }
        if interval.upper > upper {
            remainders.push(interval.with_range(upper, interval.upper));
        }
    }
    remainders.retain(|interval| !interval.is_empty());
    remainders
}

fn sort_by_lower(intervals: &mut [Interval]) {
    intervals.sort_by(|a, b| a.lower.total_cmp(&b.lower));
}

/// The shared color of all background-flagged intervals, if there is exactly one.
fn uniform_background(intervals: &[Interval]) -> Option<ColorRef> {
    let mut flagged = intervals.iter().filter(|i| i.background).map(|i| &i.color);
    let first = flagged.next()?;
    flagged.all(|color| color == first).then(|| first.clone())
}
