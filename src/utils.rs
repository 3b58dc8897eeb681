// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Utility functions shared by the library and the CLI.

use std::path::{Path, PathBuf};

use image::RgbImage;

/// Swap the first and third channel of every pixel in place.
///
/// Converts an RGB buffer into BGR order and back; applying it twice is a no-op.
pub fn swap_rb(image: &mut RgbImage) {
    for pixel in image.pixels_mut() {
        pixel.0.swap(0, 2);
    }
}

/// Find the next available run directory (annotate, annotate2, annotate3, etc.)
#[must_use]
pub fn find_next_run_dir(base: impl AsRef<Path>, prefix: &str) -> PathBuf {
    let base_path = base.as_ref();

    let first = base_path.join(prefix);
    if !first.exists() {
        return first;
    }

    (2_usize..)
        .map(|i| base_path.join(format!("{prefix}{i}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Pluralize a word based on count.
#[must_use]
pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}
