//! Color-name resolution and the selectable palette.

use crate::error::{ColormapError, ColormapResult};
use crate::interval::ColorRef;
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// `#rrggbb`, with an alpha byte appended when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Resolve a CSS color name or hex string.
pub fn try_resolve(color: &ColorRef) -> ColormapResult<Rgba> {
    let normalized = color.as_str().trim().to_ascii_lowercase();
    let parsed = parse_color(&normalized)
        .map_err(|_| ColormapError::UnknownColorName(color.to_string()))?;
    Ok(Rgba::from(parsed.to_alpha_color::<Srgb>()))
}

/// Resolve a color, falling back to opaque white for names that cannot be parsed.
pub fn resolve(color: &ColorRef) -> Rgba {
    match try_resolve(color) {
        Ok(rgba) => rgba,
        Err(e) => {
            log::warn!("{}, substituting white", e);
            Rgba::white()
        }
    }
}

/// A selectable color with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub label: &'static str,
    pub value: &'static str,
}

impl PaletteEntry {
    pub const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }

    pub fn color_ref(&self) -> ColorRef {
        ColorRef::new(self.value)
    }
}

/// Colors offered by the picker.
pub const PALETTE: &[PaletteEntry] = &[
    PaletteEntry::new("Red", "red"),
    PaletteEntry::new("Blue", "blue"),
    PaletteEntry::new("Green", "green"),
    PaletteEntry::new("Orange", "orange"),
    PaletteEntry::new("Purple", "purple"),
    PaletteEntry::new("Yellow", "yellow"),
    PaletteEntry::new("Cyan", "cyan"),
    PaletteEntry::new("Magenta", "magenta"),
    PaletteEntry::new("Gray", "gray"),
    PaletteEntry::new("Brown", "brown"),
];

/// Find a palette entry by label or value, ignoring case.
pub fn palette_entry(name: &str) -> Option<&'static PaletteEntry> {
    PALETTE
        .iter()
        .find(|entry| entry.label.eq_ignore_ascii_case(name) || entry.value.eq_ignore_ascii_case(name))
}
