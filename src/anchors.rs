// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Anchor geometry.
//!
//! Pure functions that turn `xyxy` boxes (or instance masks) into the reference
//! point used to place overlays. No function here depends on more than one
//! detection at a time.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;

use crate::error::{AnalyzerError, Result};

/// Named reference point on a bounding box or mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// `(x1, y1)`
    TopLeft,
    /// `(x2, y1)`
    TopRight,
    /// `((x1+x2)/2, y1)`
    TopCenter,
    /// `(x1, y2)`
    BottomLeft,
    /// `(x2, y2)`
    BottomRight,
    /// `((x1+x2)/2, y2)`
    BottomCenter,
    /// `(x1, (y1+y2)/2)`
    CenterLeft,
    /// `(x2, (y1+y2)/2)`
    CenterRight,
    /// `((x1+x2)/2, (y1+y2)/2)`
    Center,
    /// Mask-weighted centroid, requires instance masks.
    CenterOfMass,
}

impl Position {
    /// Every supported position, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::TopLeft,
        Self::TopRight,
        Self::TopCenter,
        Self::BottomLeft,
        Self::BottomRight,
        Self::BottomCenter,
        Self::CenterLeft,
        Self::CenterRight,
        Self::Center,
        Self::CenterOfMass,
    ];

    /// Canonical lower snake case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::TopRight => "top_right",
            Self::TopCenter => "top_center",
            Self::BottomLeft => "bottom_left",
            Self::BottomRight => "bottom_right",
            Self::BottomCenter => "bottom_center",
            Self::CenterLeft => "center_left",
            Self::CenterRight => "center_right",
            Self::Center => "center",
            Self::CenterOfMass => "center_of_mass",
        }
    }
}

impl FromStr for Position {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| {
                AnalyzerError::InvalidArgument(format!(
                    "unsupported anchor position '{s}', expected one of: {}",
                    Self::ALL.map(|p| p.as_str()).join(", ")
                ))
            })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anchor point of a single `[x1, y1, x2, y2]` box.
///
/// Returns `None` for [`Position::CenterOfMass`], which needs a mask.
#[must_use]
pub fn box_anchor(xyxy: [f32; 4], position: Position) -> Option<[f32; 2]> {
    let [x1, y1, x2, y2] = xyxy;
    let cx = (x1 + x2) / 2.0;
    let cy = (y1 + y2) / 2.0;
    let point = match position {
        Position::TopLeft => [x1, y1],
        Position::TopRight => [x2, y1],
        Position::TopCenter => [cx, y1],
        Position::BottomLeft => [x1, y2],
        Position::BottomRight => [x2, y2],
        Position::BottomCenter => [cx, y2],
        Position::CenterLeft => [x1, cy],
        Position::CenterRight => [x2, cy],
        Position::Center => [cx, cy],
        Position::CenterOfMass => return None,
    };
    Some(point)
}

/// Anchor points for an `(N, 4)` array of boxes, as an `(N, 2)` array.
///
/// # Errors
///
/// Returns [`AnalyzerError::MissingField`] for [`Position::CenterOfMass`];
/// use [`mask_centroids`] for that position.
pub fn box_anchors(xyxy: ArrayView2<'_, f32>, position: Position) -> Result<Array2<f32>> {
    let n = xyxy.nrows();
    let mut anchors = Array2::zeros((n, 2));

    for (i, row) in xyxy.axis_iter(Axis(0)).enumerate() {
        let point = box_anchor([row[0], row[1], row[2], row[3]], position).ok_or_else(|| {
            AnalyzerError::MissingField(
                "center of mass anchor requires instance masks".to_string(),
            )
        })?;
        anchors[[i, 0]] = point[0];
        anchors[[i, 1]] = point[1];
    }

    Ok(anchors)
}

/// Centroid of one boolean mask.
///
/// Each set pixel at `(row, col)` counts as a unit cell centered at
/// `(col + 0.5, row + 0.5)`. An empty mask divides by one instead of zero.
/// The result is truncated to integer pixel coordinates.
#[must_use]
pub fn mask_centroid(mask: ArrayView2<'_, bool>) -> [f32; 2] {
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut count = 0u64;

    for ((row, col), &set) in mask.indexed_iter() {
        if set {
            sum_x += col as f64 + 0.5;
            sum_y += row as f64 + 0.5;
            count += 1;
        }
    }

    let count = count.max(1) as f64;
    [(sum_x / count).trunc() as f32, (sum_y / count).trunc() as f32]
}

/// Centroids of an `(N, H, W)` stack of masks, as an `(N, 2)` array of `(x, y)`.
///
/// Masks are processed in parallel; each centroid depends only on its own mask.
#[must_use]
pub fn mask_centroids(masks: ArrayView3<'_, bool>) -> Array2<f32> {
    let n = masks.len_of(Axis(0));
    let centroids: Vec<[f32; 2]> = (0..n)
        .into_par_iter()
        .map(|i| mask_centroid(masks.index_axis(Axis(0), i)))
        .collect();

    let mut out = Array2::zeros((n, 2));
    for (i, [x, y]) in centroids.into_iter().enumerate() {
        out[[i, 0]] = x;
        out[[i, 1]] = y;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    #[test]
    fn test_box_anchor_table() {
        let xyxy = [10.0, 20.0, 30.0, 40.0];
        let cases = [
            (Position::TopLeft, [10.0, 20.0]),
            (Position::TopRight, [30.0, 20.0]),
            (Position::TopCenter, [20.0, 20.0]),
            (Position::BottomLeft, [10.0, 40.0]),
            (Position::BottomRight, [30.0, 40.0]),
            (Position::BottomCenter, [20.0, 40.0]),
            (Position::CenterLeft, [10.0, 30.0]),
            (Position::CenterRight, [30.0, 30.0]),
            (Position::Center, [20.0, 30.0]),
        ];
        for (position, expected) in cases {
            assert_eq!(box_anchor(xyxy, position), Some(expected), "{position}");
        }
        assert_eq!(box_anchor(xyxy, Position::CenterOfMass), None);
    }

    #[test]
    fn test_box_anchors_array() {
        let xyxy = array![[0.0, 0.0, 10.0, 10.0], [5.0, 5.0, 6.0, 8.0]];
        let anchors = box_anchors(xyxy.view(), Position::Center).unwrap();
        assert_eq!(anchors, array![[5.0, 5.0], [5.5, 6.5]]);

        let err = box_anchors(xyxy.view(), Position::CenterOfMass).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingField(_)));
    }

    #[test]
    fn test_mask_centroid_single_pixel() {
        let mut mask = Array3::from_elem((1, 4, 4), false);
        mask[[0, 1, 1]] = true;
        let centroids = mask_centroids(mask.view());
        assert_eq!(centroids, array![[1.0, 1.0]]);
    }

    #[test]
    fn test_mask_centroid_block() {
        // Pixels in rows 2..4 and cols 4..8: x = (4.5+..+7.5)/4 = 6, y = (2.5+3.5)/2 = 3
        let mut mask = Array3::from_elem((2, 6, 10), false);
        for row in 2..4 {
            for col in 4..8 {
                mask[[1, row, col]] = true;
            }
        }
        mask[[0, 5, 9]] = true;
        let centroids = mask_centroids(mask.view());
        assert_eq!(centroids, array![[9.0, 5.0], [6.0, 3.0]]);
    }

    #[test]
    fn test_mask_centroid_empty() {
        let mask = Array3::from_elem((1, 3, 3), false);
        let centroids = mask_centroids(mask.view());
        assert_eq!(centroids, array![[0.0, 0.0]]);
    }

    #[test]
    fn test_position_parse() {
        assert_eq!("top_left".parse::<Position>().unwrap(), Position::TopLeft);
        assert_eq!(
            "CENTER_OF_MASS".parse::<Position>().unwrap(),
            Position::CenterOfMass
        );
        assert_eq!(
            "bottom-center".parse::<Position>().unwrap(),
            Position::BottomCenter
        );
        assert!(matches!(
            "middle".parse::<Position>(),
            Err(AnalyzerError::InvalidArgument(_))
        ));
        for position in Position::ALL {
            assert_eq!(position.to_string().parse::<Position>().unwrap(), position);
        }
    }
}
