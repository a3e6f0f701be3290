//! Persisted colormap format and upload decoding.
//!
//! A colormap file is a pretty-printed JSON array of `{ "color", "min", "max" }`
//! objects. Gap-fill intervals are written with an extra `"background": true`
//! key, so consumers that accept exactly `{color, min, max}` will see it; files
//! without the key load fine. Browser uploads arrive as
//! `data:<mime>;base64,<payload>` strings.

use crate::error::{ColormapError, ColormapResult};
use crate::interval::Interval;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::fs;
use std::path::Path;

/// Serialize intervals as an indented JSON array.
pub fn to_json(intervals: &[Interval]) -> ColormapResult<String> {
    serde_json::to_string_pretty(intervals)
        .map_err(|e| ColormapError::MalformedPersistedData(format!("Failed to serialize: {}", e)))
}

/// Parse a JSON array of intervals.
pub fn parse_intervals(json: &str) -> ColormapResult<Vec<Interval>> {
    serde_json::from_str(json).map_err(|e| {
        ColormapError::MalformedPersistedData(format!("expected an array of {{color, min, max}}: {}", e))
    })
}

/// Decode a `data:<mime>;base64,<payload>` upload into its UTF-8 text.
pub fn decode_upload(contents: &str) -> ColormapResult<String> {
    let (header, payload) = contents.split_once(',').ok_or_else(|| {
        ColormapError::MalformedPersistedData("upload is missing the data URL header".to_string())
    })?;
    if !header.ends_with(";base64") {
        return Err(ColormapError::MalformedPersistedData(format!(
            "unsupported upload encoding: {}",
            header
        )));
    }

    let bytes = STANDARD.decode(payload.trim()).map_err(|e| {
        ColormapError::MalformedPersistedData(format!("invalid base64 payload: {}", e))
    })?;
    String::from_utf8(bytes)
        .map_err(|e| ColormapError::MalformedPersistedData(format!("upload is not UTF-8: {}", e)))
}

/// Encode JSON text as a `data:application/json;base64,...` string, the inverse of [`decode_upload`].
pub fn encode_download(json: &str) -> String {
    format!("data:application/json;base64,{}", STANDARD.encode(json))
}

pub fn read_file(path: &Path) -> ColormapResult<Vec<Interval>> {
    let json = fs::read_to_string(path)
        .map_err(|e| ColormapError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_intervals(&json)
}

pub fn write_file(path: &Path, intervals: &[Interval]) -> ColormapResult<()> {
    let json = to_json(intervals)?;
    fs::write(path, json)
        .map_err(|e| ColormapError::Io(format!("Failed to write {}: {}", path.display(), e)))
}
