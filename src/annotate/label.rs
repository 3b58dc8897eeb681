// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use ab_glyph::{FontArc, PxScale};
use image::Rgb;
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::anchors::Position;
use crate::annotate::font::default_font;
use crate::annotate::{Annotator, BgrImage};
use crate::detections::Detections;
use crate::error::Result;
use crate::visualizer::{resolve_color, Color, ColorLookup, ColorSource};

/// Pixel height of a glyph line at `text_scale == 1.0`.
pub const FONT_BASE_PX: f32 = 32.0;

/// Draws a text label on a (optionally rounded) colored background per detection.
#[derive(Clone)]
pub struct LabelAnnotator {
    /// Background color or palette.
    pub color: ColorSource,
    /// Text color.
    pub text_color: Color,
    /// Font scale relative to [`FONT_BASE_PX`].
    pub text_scale: f32,
    /// Stroke thickness of the text.
    pub text_thickness: u32,
    /// Padding between text and background edge.
    pub text_padding: u32,
    /// Where the label sits relative to the detection.
    pub text_position: Position,
    /// How detections map to palette slots.
    pub color_lookup: ColorLookup,
    /// Requested corner radius, clamped to half the smaller background side.
    pub border_radius: u32,
    /// Data column whose values are used as label text, if present.
    pub class_name_field: Option<String>,
    font: Option<FontArc>,
}

impl std::fmt::Debug for LabelAnnotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelAnnotator")
            .field("color", &self.color)
            .field("text_color", &self.text_color)
            .field("text_scale", &self.text_scale)
            .field("text_thickness", &self.text_thickness)
            .field("text_padding", &self.text_padding)
            .field("text_position", &self.text_position)
            .field("color_lookup", &self.color_lookup)
            .field("border_radius", &self.border_radius)
            .field("class_name_field", &self.class_name_field)
            .field("font", &self.font.as_ref().map(|_| "<font>"))
            .finish()
    }
}

impl Default for LabelAnnotator {
    fn default() -> Self {
        Self {
            color: ColorSource::default(),
            text_color: Color::WHITE,
            text_scale: 0.5,
            text_thickness: 1,
            text_padding: 10,
            text_position: Position::TopLeft,
            color_lookup: ColorLookup::Class,
            border_radius: 0,
            class_name_field: None,
            font: None,
        }
    }
}

impl LabelAnnotator {
    /// Create an annotator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background color or palette.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<ColorSource>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the text color.
    #[must_use]
    pub const fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set the font scale.
    #[must_use]
    pub const fn with_text_scale(mut self, scale: f32) -> Self {
        self.text_scale = scale;
        self
    }

    /// Set the text stroke thickness.
    #[must_use]
    pub const fn with_text_thickness(mut self, thickness: u32) -> Self {
        self.text_thickness = thickness;
        self
    }

    /// Set the padding around the text.
    #[must_use]
    pub const fn with_text_padding(mut self, padding: u32) -> Self {
        self.text_padding = padding;
        self
    }

    /// Set the label anchor position.
    #[must_use]
    pub const fn with_text_position(mut self, position: Position) -> Self {
        self.text_position = position;
        self
    }

    /// Set the color lookup strategy.
    #[must_use]
    pub const fn with_color_lookup(mut self, color_lookup: ColorLookup) -> Self {
        self.color_lookup = color_lookup;
        self
    }

    /// Set the background corner radius.
    #[must_use]
    pub const fn with_border_radius(mut self, radius: u32) -> Self {
        self.border_radius = radius;
        self
    }

    /// Use the `key` data column as label text when the set carries it.
    #[must_use]
    pub fn with_class_name_field(mut self, key: impl Into<String>) -> Self {
        self.class_name_field = Some(key.into());
        self
    }

    /// Use `font` instead of downloading the default one.
    #[must_use]
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    fn scale(&self) -> PxScale {
        PxScale::from(self.text_scale * FONT_BASE_PX)
    }

    /// Text for detection `i`.
    ///
    /// Caller labels win, then the configured class-name column, then the
    /// class ID (suffixed with `- {track_id}` when tracked), then the index.
    #[must_use]
    pub fn label_text(&self, detections: &Detections, i: usize, labels: Option<&[String]>) -> String {
        if let Some(label) = labels.and_then(|l| l.get(i)) {
            return label.clone();
        }
        if let Some(name) = self
            .class_name_field
            .as_deref()
            .and_then(|key| detections.field(key))
            .and_then(|column| column.display_row(i))
        {
            return name;
        }
        if let Some(ref class_id) = detections.class_id {
            return match detections.track_id {
                Some(ref track_id) => format!("{}- {}", class_id[i], track_id[i]),
                None => class_id[i].to_string(),
            };
        }
        i.to_string()
    }

    /// Draw labels, using `labels[i]` as the text of detection `i` when given.
    ///
    /// Anchors, colors and texts are resolved for every detection before the
    /// font is loaded or a pixel is written, so a failing detection leaves the
    /// scene untouched.
    ///
    /// # Errors
    ///
    /// Returns color-resolution errors, anchor errors (center of mass without
    /// masks), [`crate::AnalyzerError::LengthMismatch`] if `labels` is not `N`
    /// long, and font errors when no font was configured and the default one
    /// cannot be loaded.
    pub fn annotate_with_labels<'a>(
        &self,
        scene: &'a mut BgrImage,
        detections: &Detections,
        labels: Option<&[String]>,
        custom_color_lookup: Option<&[i64]>,
    ) -> Result<&'a mut BgrImage> {
        if detections.is_empty() {
            return Ok(scene);
        }
        let plans = self.plan(detections, labels, custom_color_lookup)?;

        let font = match self.font {
            Some(ref font) => font.clone(),
            None => default_font()?,
        };
        let glyphs = GlyphText {
            font: &font,
            scale: self.scale(),
            thickness: self.text_thickness,
        };
        self.render(scene, &plans, &glyphs);
        Ok(scene)
    }

    fn plan(
        &self,
        detections: &Detections,
        labels: Option<&[String]>,
        custom_color_lookup: Option<&[i64]>,
    ) -> Result<Vec<LabelPlan>> {
        if let Some(labels) = labels {
            if labels.len() != detections.len() {
                return Err(crate::AnalyzerError::LengthMismatch {
                    what: "labels".to_string(),
                    expected: detections.len(),
                    actual: labels.len(),
                });
            }
        }

        let anchors = detections.anchor_coordinates(self.text_position)?;
        anchors
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, anchor)| -> Result<LabelPlan> {
                let color = resolve_color(
                    &self.color,
                    detections,
                    i,
                    self.color_lookup,
                    custom_color_lookup,
                )?;
                Ok(LabelPlan {
                    anchor: (anchor[0] as i32, anchor[1] as i32),
                    color,
                    text: self.label_text(detections, i, labels),
                })
            })
            .collect()
    }

    fn render(&self, scene: &mut BgrImage, plans: &[LabelPlan], text: &impl LabelText) {
        let padding = i32::try_from(self.text_padding).unwrap_or(i32::MAX);
        let border_radius = i32::try_from(self.border_radius).unwrap_or(i32::MAX);
        let bounds = (scene.width(), scene.height());

        for plan in plans {
            let (text_w, text_h) = text.size(&plan.text);
            let background = text_background_xyxy(
                plan.anchor,
                (
                    text_w.saturating_add(padding.saturating_mul(2)),
                    text_h.saturating_add(padding.saturating_mul(2)),
                ),
                self.text_position,
            );
            if !overlaps(background, bounds) {
                continue;
            }
            draw_rounded_rectangle(scene, background, Rgb(plan.color.as_bgr()), border_radius);

            let (text_x, baseline_y) = text_origin(background, padding, text_h);
            let top_y = baseline_y.saturating_sub(text_h);
            let text_box = (
                text_x,
                top_y,
                text_x.saturating_add(text_w),
                baseline_y,
            );
            if overlaps(text_box, bounds) {
                text.draw(scene, Rgb(self.text_color.as_bgr()), (text_x, top_y), &plan.text);
            }
        }
    }
}

impl Annotator for LabelAnnotator {
    fn annotate<'a>(
        &self,
        scene: &'a mut BgrImage,
        detections: &Detections,
        custom_color_lookup: Option<&[i64]>,
    ) -> Result<&'a mut BgrImage> {
        self.annotate_with_labels(scene, detections, None, custom_color_lookup)
    }
}

/// Everything a label needs before text is measured.
#[derive(Debug, Clone, PartialEq)]
struct LabelPlan {
    anchor: (i32, i32),
    color: Color,
    text: String,
}

/// Text measurement and drawing used by the label pass.
trait LabelText {
    /// Rendered `(width, height)` of `text`.
    fn size(&self, text: &str) -> (i32, i32);

    /// Draw `text` with its top-left corner at `origin`.
    fn draw(&self, scene: &mut BgrImage, color: Rgb<u8>, origin: (i32, i32), text: &str);
}

struct GlyphText<'f> {
    font: &'f FontArc,
    scale: PxScale,
    thickness: u32,
}

impl LabelText for GlyphText<'_> {
    fn size(&self, text: &str) -> (i32, i32) {
        measure_text(self.font, self.scale, self.thickness, text)
    }

    fn draw(&self, scene: &mut BgrImage, color: Rgb<u8>, (x, y): (i32, i32), text: &str) {
        let passes = i32::try_from(self.thickness.max(1)).unwrap_or(i32::MAX);
        for dx in 0..passes {
            draw_text_mut(scene, color, x.saturating_add(dx), y, self.scale, self.font, text);
        }
    }
}

/// Rendered size `(width, height)` of `text`, widened by the stroke thickness.
#[must_use]
pub fn measure_text(font: &FontArc, scale: PxScale, thickness: u32, text: &str) -> (i32, i32) {
    let (w, h) = text_size(scale, font, text);
    let w = i32::try_from(w).unwrap_or(i32::MAX);
    let h = i32::try_from(h).unwrap_or(i32::MAX);
    let extra = i32::try_from(thickness.max(1) - 1).unwrap_or(i32::MAX);
    (w.saturating_add(extra), h)
}

/// Whether the inclusive box `(x1, y1, x2, y2)` touches a `width x height` image.
fn overlaps((x1, y1, x2, y2): (i32, i32, i32, i32), (width, height): (u32, u32)) -> bool {
    x2 >= 0 && y2 >= 0 && i64::from(x1) < i64::from(width) && i64::from(y1) < i64::from(height)
}

/// Background box `(x1, y1, x2, y2)` of size `text_wh` placed at `anchor`.
///
/// The box sits on the side of the anchor named by `position`: a top-left
/// label grows right and up from the anchor, a bottom-right label grows left
/// and down, centered positions straddle the anchor. Coordinates saturate at
/// the `i32` range.
#[must_use]
pub const fn text_background_xyxy(
    anchor: (i32, i32),
    text_wh: (i32, i32),
    position: Position,
) -> (i32, i32, i32, i32) {
    let (cx, cy) = anchor;
    let (w, h) = text_wh;
    let (hw, hh) = (w / 2, h / 2);
    match position {
        Position::TopLeft => (cx, cy.saturating_sub(h), cx.saturating_add(w), cy),
        Position::TopRight => (cx.saturating_sub(w), cy.saturating_sub(h), cx, cy),
        Position::TopCenter => (
            cx.saturating_sub(hw),
            cy.saturating_sub(h),
            cx.saturating_add(hw),
            cy,
        ),
        Position::Center | Position::CenterOfMass => (
            cx.saturating_sub(hw),
            cy.saturating_sub(hh),
            cx.saturating_add(hw),
            cy.saturating_add(hh),
        ),
        Position::BottomLeft => (cx, cy, cx.saturating_add(w), cy.saturating_add(h)),
        Position::BottomRight => (cx.saturating_sub(w), cy, cx, cy.saturating_add(h)),
        Position::BottomCenter => (
            cx.saturating_sub(hw),
            cy,
            cx.saturating_add(hw),
            cy.saturating_add(h),
        ),
        Position::CenterLeft => (
            cx.saturating_sub(w),
            cy.saturating_sub(hh),
            cx,
            cy.saturating_add(hh),
        ),
        Position::CenterRight => (
            cx,
            cy.saturating_sub(hh),
            cx.saturating_add(w),
            cy.saturating_add(hh),
        ),
    }
}

/// Text origin `(x, baseline_y)` inside a background box.
#[must_use]
pub const fn text_origin(background: (i32, i32, i32, i32), padding: i32, text_h: i32) -> (i32, i32) {
    (
        background.0.saturating_add(padding),
        background.1.saturating_add(padding).saturating_add(text_h),
    )
}

/// Corner radius actually drawn: never more than half the smaller side.
#[must_use]
pub fn effective_border_radius(xyxy: (i32, i32, i32, i32), border_radius: i32) -> i32 {
    let (x1, y1, x2, y2) = xyxy;
    let half_side = (i64::from(x2) - i64::from(x1)).min(i64::from(y2) - i64::from(y1)) / 2;
    i64::from(border_radius).min(half_side).max(0) as i32
}

/// Fill a rectangle with rounded corners.
///
/// Built from two overlapping filled rectangles (one inset horizontally, one
/// vertically by the radius) and a filled circle at each corner. Parts outside
/// the image are clipped; the radius is additionally limited to twice the
/// larger image side.
pub fn draw_rounded_rectangle(
    scene: &mut BgrImage,
    xyxy: (i32, i32, i32, i32),
    color: Rgb<u8>,
    border_radius: i32,
) {
    let (width, height) = (scene.width(), scene.height());
    let (x1, y1, x2, y2) = xyxy;
    if x2 < x1 || y2 < y1 || !overlaps(xyxy, (width, height)) {
        return;
    }
    let (w, h) = (i64::from(width), i64::from(height));
    let r = i64::from(effective_border_radius(xyxy, border_radius)).min(2 * w.max(h));
    let (x1, y1, x2, y2) = (i64::from(x1), i64::from(y1), i64::from(x2), i64::from(y2));

    let rectangles = [
        ((x1 + r, y1), (x2 - r, y2)),
        ((x1, y1 + r), (x2, y2 - r)),
    ];
    for ((rx1, ry1), (rx2, ry2)) in rectangles {
        let (rx1, rx2) = (rx1.clamp(-1, w), rx2.clamp(-1, w));
        let (ry1, ry2) = (ry1.clamp(-1, h), ry2.clamp(-1, h));
        let rect = Rect::at(rx1 as i32, ry1 as i32)
            .of_size((rx2 - rx1 + 1) as u32, (ry2 - ry1 + 1) as u32);
        draw_filled_rect_mut(scene, rect, color);
    }

    if r > 0 {
        let centers = [
            (x1 + r, y1 + r),
            (x2 - r, y1 + r),
            (x1 + r, y2 - r),
            (x2 - r, y2 - r),
        ];
        for (cx, cy) in centers {
            if cx + r < 0 || cy + r < 0 || cx - r >= w || cy - r >= h {
                continue;
            }
            draw_filled_circle_mut(scene, (cx as i32, cy as i32), r as i32, color);
        }
    }
}
