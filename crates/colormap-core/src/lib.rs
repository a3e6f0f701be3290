//! Colormap Core Library
//!
//! Data structures and logic for building piecewise-constant colormaps: a set of
//! disjoint, colored intervals covering a fixed numeric domain.

pub mod color;
pub mod config;
pub mod error;
pub mod interval;
pub mod interval_set;
pub mod persist;
pub mod render;
pub mod session;
pub mod storage;

pub use color::{PALETTE, PaletteEntry, Rgba, resolve, try_resolve};
pub use config::{ColormapConfig, LoadPolicy};
pub use error::{ColormapError, ColormapResult};
pub use interval::{ColorRef, Domain, Interval};
pub use interval_set::IntervalSet;
pub use render::{BarSegment, ColorBar};
pub use session::{Action, ColormapSession, Response, SharedSession};
pub use storage::{ColormapLibrary, FileStorage, MemoryStorage, Storage, StorageError};
