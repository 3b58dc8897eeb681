// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing detections onto frames.
//!
//! Frames are [`BgrImage`] buffers: an [`image::RgbImage`] whose three channels
//! hold blue, green and red in that order, matching what video decoders hand
//! out. Annotators mutate the frame in place and hand the same buffer back so
//! calls can be chained.

/// Bounding-box annotator.
pub mod bounding_box;

/// Font discovery.
pub mod font;

/// Label annotator and its layout helpers.
pub mod label;

use image::RgbImage;

use crate::detections::Detections;
use crate::error::Result;

pub use bounding_box::BoundingBoxAnnotator;
pub use label::LabelAnnotator;

/// Frame in BGR channel order.
pub type BgrImage = RgbImage;

/// Something that draws a [`Detections`] set onto a frame.
///
/// Implementations draw detections in insertion order, so later detections
/// paint over earlier ones. A color-resolution failure aborts the whole call.
pub trait Annotator {
    /// Draw `detections` onto `scene`.
    ///
    /// `custom_color_lookup`, when given, holds one palette slot per detection
    /// and overrides the annotator's configured color lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a detection's color cannot be resolved or the
    /// annotator cannot prepare its drawing resources.
    fn annotate<'a>(
        &self,
        scene: &'a mut BgrImage,
        detections: &Detections,
        custom_color_lookup: Option<&[i64]>,
    ) -> Result<&'a mut BgrImage>;
}
