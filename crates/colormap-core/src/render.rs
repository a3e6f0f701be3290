//! Rendering model for a colormap: resolved bar segments plus tick marks.

use crate::color::{Rgba, resolve};
use crate::interval::{ColorRef, Domain};
use crate::interval_set::IntervalSet;
use std::fmt::Write;

/// One colored stretch of the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub color: ColorRef,
    pub rgba: Rgba,
    pub lower: f64,
    pub upper: f64,
}

/// Horizontal color bar over the domain, with a tick at every interval boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBar {
    pub domain: Domain,
    pub segments: Vec<BarSegment>,
    pub ticks: Vec<f64>,
}

impl ColorBar {
    pub fn from_set(set: &IntervalSet) -> Self {
        let segments = set
            .intervals()
            .iter()
            .map(|interval| BarSegment {
                color: interval.color.clone(),
                rgba: resolve(&interval.color),
                lower: interval.lower,
                upper: interval.upper,
            })
            .collect();
        Self {
            domain: set.domain(),
            segments,
            ticks: set.transitions(),
        }
    }

    /// One `Color: <name>, Range: [<min>, <max>]` line per segment.
    pub fn describe(&self) -> Vec<String> {
        self.segments
            .iter()
            .map(|s| format!("Color: {}, Range: [{}, {}]", s.color, s.lower, s.upper))
            .collect()
    }

    /// Segment drawn in cell `index` of a bar `width` cells wide.
    fn segment_at_cell(&self, index: usize, width: usize) -> Option<&BarSegment> {
        let center = self.domain.min + self.domain.width() * (index as f64 + 0.5) / width as f64;
        self.segments
            .iter()
            .find(|s| s.lower <= center && center < s.upper)
    }

    fn cell_of(&self, value: f64, width: usize) -> usize {
        let fraction = (value - self.domain.min) / self.domain.width();
        ((fraction * width as f64).round() as usize).min(width.saturating_sub(1))
    }

    /// Render as 24-bit ANSI background cells with a tick row underneath.
    pub fn to_ansi(&self, width: usize) -> String {
        let width = width.max(1);
        let mut out = String::new();

        for index in 0..width {
            match self.segment_at_cell(index, width) {
                Some(s) => {
                    write!(out, "\x1b[48;2;{};{};{}m \x1b[0m", s.rgba.r, s.rgba.g, s.rgba.b).ok();
                }
                None => out.push(' '),
            }
        }
        out.push('\n');

        let mut marks = vec![' '; width];
        for &tick in &self.ticks {
            marks[self.cell_of(tick, width)] = '|';
        }
        out.extend(marks);
        out.push('\n');

        let mut labels = String::new();
        for &tick in &self.ticks {
            let column = self.cell_of(tick, width);
            let label = tick.to_string();
            let current = labels.chars().count();
            if column >= current {
                labels.push_str(&" ".repeat(column - current));
                labels.push_str(&label);
                labels.push(' ');
            }
        }
        out.push_str(labels.trim_end());
        out
    }
}
