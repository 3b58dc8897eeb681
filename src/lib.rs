// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # Video Analyzer
//!
//! Columnar detection results and annotation rendering for video analytics.
//!
//! The crate holds the data model shared by a detect → track → annotate
//! pipeline: a [`Detections`] set stores boxes, masks, scores, class and track
//! IDs as aligned arrays, and annotators draw them onto BGR frames.
//!
//! ## Features
//!
//! - **Columnar detections** - Aligned `ndarray` columns with subsetting by
//!   position, range, index list or boolean mask
//! - **Anchor geometry** - Nine box anchors plus mask center of mass
//! - **Color palettes** - Default and legacy palettes with index, class or
//!   track lookup
//! - **Annotators** - Bounding boxes and labels with rounded backgrounds
//! - **Pipeline glue** - [`Analyzer`] runs any [`Detector`] and [`Tracker`]
//!   over a frame sequence
//!
//! ## Quick Start
//!
//! ```no_run
//! use ndarray::array;
//! use video_analyzer::{Annotator, BgrImage, BoundingBoxAnnotator, Detections, LabelAnnotator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let detections = Detections::new(array![[10.0, 20.0, 110.0, 220.0], [50.0, 60.0, 90.0, 140.0]])
//!         .with_confidence(array![0.91, 0.42])
//!         .with_class_id(array![0, 2]);
//!
//!     let mut frame = BgrImage::new(640, 480);
//!     BoundingBoxAnnotator::new().annotate(&mut frame, &detections, None)?;
//!     LabelAnnotator::new().annotate(&mut frame, &detections, None)?;
//!
//!     let confident = detections.subset(vec![true, false])?;
//!     println!("{confident}");
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Draw boxes and labels from a detection file
//! video-analyzer annotate --source frame.jpg --detections frame.txt
//!
//! # Color by track and put labels under the box
//! video-analyzer annotate -s frame.jpg -d tracks.txt --color-lookup track --text-position bottom_center
//! ```
//!
//! Detection files hold one `x1 y1 x2 y2 confidence class_id [track_id]` row
//! per line; see [`io`].

// Modules
pub mod analyzer;
pub mod anchors;
pub mod annotate;
pub mod cli;
pub mod config;
pub mod detections;
pub mod error;
pub mod io;
pub mod utils;
pub mod visualizer;

// Re-exports for convenience
pub use analyzer::{Analyzer, Detector, Tracker};
pub use anchors::Position;
pub use annotate::{Annotator, BgrImage, BoundingBoxAnnotator, LabelAnnotator};
pub use config::{AnalyzerConfig, AnnotationConfig, DetectionConfig, TrackConfig};
pub use detections::{Detection, DetectionIndex, Detections, ExtraColumn, ExtraValue};
pub use error::{AnalyzerError, Result};
pub use visualizer::{Color, ColorLookup, ColorPalette, ColorSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "video-analyzer");
    }
}
