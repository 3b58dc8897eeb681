// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Colors, palettes and per-detection color resolution.

/// Color definitions and palettes.
pub mod color;

/// Mapping detections to palette slots.
pub mod lookup;

pub use color::{Color, ColorPalette, ColorSource};
pub use lookup::{resolve_color, resolve_color_idx, ColorLookup};
