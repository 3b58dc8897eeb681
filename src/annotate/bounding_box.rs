// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::annotate::{Annotator, BgrImage};
use crate::detections::Detections;
use crate::error::Result;
use crate::visualizer::{resolve_color, ColorLookup, ColorSource};

/// Draws an unfilled rectangle around every detection.
#[derive(Debug, Clone)]
pub struct BoundingBoxAnnotator {
    /// Fixed color or palette.
    pub color: ColorSource,
    /// Line thickness in pixels.
    pub thickness: u32,
    /// How detections map to palette slots.
    pub color_lookup: ColorLookup,
}

impl Default for BoundingBoxAnnotator {
    fn default() -> Self {
        Self {
            color: ColorSource::default(),
            thickness: 2,
            color_lookup: ColorLookup::Class,
        }
    }
}

impl BoundingBoxAnnotator {
    /// Create an annotator with the default palette, thickness 2 and class lookup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color or palette.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<ColorSource>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the line thickness.
    #[must_use]
    pub const fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the color lookup strategy.
    #[must_use]
    pub const fn with_color_lookup(mut self, color_lookup: ColorLookup) -> Self {
        self.color_lookup = color_lookup;
        self
    }
}

/// Draw a hollow rectangle between the inclusive corners `(x1, y1)` and
/// `(x2, y2)`, with the stroke centered on the edge.
///
/// Pixels outside the image are clipped. Corners far outside the image are
/// pulled in to just past the border first, so extreme coordinates cannot
/// overflow the ring arithmetic.
pub fn draw_rectangle(
    scene: &mut BgrImage,
    (x1, y1): (i32, i32),
    (x2, y2): (i32, i32),
    color: Rgb<u8>,
    thickness: u32,
) {
    let (width, height) = (i64::from(scene.width()), i64::from(scene.height()));
    // Rings further out than twice the image size never touch it.
    let thickness = i64::from(thickness.max(1)).min(4 * width.max(height) + 4);
    let margin = thickness + 1;
    let clamp_x = |x: i32| i64::from(x).clamp(-margin, width + margin);
    let clamp_y = |y: i32| i64::from(y).clamp(-margin, height + margin);
    let (x1, y1, x2, y2) = (clamp_x(x1), clamp_y(y1), clamp_x(x2), clamp_y(y2));

    for t in 0..thickness {
        // Outermost ring first: -thickness/2 ..= thickness - thickness/2 - 1
        let inset = t - thickness / 2;
        let (tx1, ty1) = (x1 + inset, y1 + inset);
        let (tx2, ty2) = (x2 - inset, y2 - inset);
        if tx2 < tx1 || ty2 < ty1 {
            continue;
        }
        let rect = Rect::at(tx1 as i32, ty1 as i32)
            .of_size((tx2 - tx1 + 1) as u32, (ty2 - ty1 + 1) as u32);
        draw_hollow_rect_mut(scene, rect, color);
    }
}

impl Annotator for BoundingBoxAnnotator {
    fn annotate<'a>(
        &self,
        scene: &'a mut BgrImage,
        detections: &Detections,
        custom_color_lookup: Option<&[i64]>,
    ) -> Result<&'a mut BgrImage> {
        for (i, row) in detections.xyxy.rows().into_iter().enumerate() {
            let color = resolve_color(
                &self.color,
                detections,
                i,
                self.color_lookup,
                custom_color_lookup,
            )?;
            draw_rectangle(
                scene,
                (row[0] as i32, row[1] as i32),
                (row[2] as i32, row[3] as i32),
                Rgb(color.as_bgr()),
                self.thickness,
            );
        }
        Ok(scene)
    }
}
