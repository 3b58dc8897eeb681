// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fmt;
use std::str::FromStr;

use crate::detections::Detections;
use crate::error::{AnalyzerError, Result};
use crate::visualizer::color::{Color, ColorSource};

/// Strategy for mapping a detection to a palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorLookup {
    /// Slot is the detection's position in the set.
    Index,
    /// Slot is the detection's class ID.
    #[default]
    Class,
    /// Slot is the detection's track ID.
    Track,
}

impl ColorLookup {
    /// Every lookup strategy.
    pub const ALL: [Self; 3] = [Self::Index, Self::Class, Self::Track];

    /// Lower case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Class => "class",
            Self::Track => "track",
        }
    }
}

impl FromStr for ColorLookup {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == normalized)
            .ok_or_else(|| {
                AnalyzerError::InvalidArgument(format!(
                    "unsupported color lookup '{s}', expected one of: index, class, track"
                ))
            })
    }
}

impl fmt::Display for ColorLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette slot for the detection at `detection_idx`.
///
/// A `custom_color_lookup` array, when given, overrides `color_lookup`.
///
/// # Errors
///
/// * [`AnalyzerError::OutOfBounds`] if `detection_idx >= detections.len()`.
/// * [`AnalyzerError::LengthMismatch`] if the custom array is not `N` long.
/// * [`AnalyzerError::MissingField`] for class/track lookup without that field.
pub fn resolve_color_idx(
    detections: &Detections,
    detection_idx: usize,
    color_lookup: ColorLookup,
    custom_color_lookup: Option<&[i64]>,
) -> Result<i64> {
    let n = detections.len();
    if detection_idx >= n {
        return Err(AnalyzerError::OutOfBounds {
            index: detection_idx,
            len: n,
        });
    }

    if let Some(custom) = custom_color_lookup {
        if custom.len() != n {
            return Err(AnalyzerError::LengthMismatch {
                what: "custom color lookup".to_string(),
                expected: n,
                actual: custom.len(),
            });
        }
        return Ok(custom[detection_idx]);
    }

    match color_lookup {
        ColorLookup::Index => Ok(detection_idx as i64),
        ColorLookup::Class => detections
            .class_id
            .as_ref()
            .map(|c| c[detection_idx])
            .ok_or_else(|| {
                AnalyzerError::MissingField(
                    "could not resolve color by class: detections have no class_id".to_string(),
                )
            }),
        ColorLookup::Track => detections
            .track_id
            .as_ref()
            .map(|t| t[detection_idx])
            .ok_or_else(|| {
                AnalyzerError::MissingField(
                    "could not resolve color by track: detections have no track_id".to_string(),
                )
            }),
    }
}

/// Final color for the detection at `detection_idx`.
///
/// # Errors
///
/// Propagates [`resolve_color_idx`] errors, and palette errors for negative slots.
pub fn resolve_color(
    color: &ColorSource,
    detections: &Detections,
    detection_idx: usize,
    color_lookup: ColorLookup,
    custom_color_lookup: Option<&[i64]>,
) -> Result<Color> {
    let idx = resolve_color_idx(detections, detection_idx, color_lookup, custom_color_lookup)?;
    color.by_idx(idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizer::color::ColorPalette;
    use ndarray::array;

    fn boxes(n: usize) -> Detections {
        Detections::new(ndarray::Array2::zeros((n, 4)))
    }

    #[test]
    fn test_by_index() {
        let detections = boxes(3);
        assert_eq!(
            resolve_color_idx(&detections, 2, ColorLookup::Index, None).unwrap(),
            2
        );
    }

    #[test]
    fn test_by_class_and_track() {
        let detections = boxes(2)
            .with_class_id(array![5, 9])
            .with_track_id(array![100, 101]);
        assert_eq!(
            resolve_color_idx(&detections, 1, ColorLookup::Class, None).unwrap(),
            9
        );
        assert_eq!(
            resolve_color_idx(&detections, 0, ColorLookup::Track, None).unwrap(),
            100
        );
    }

    #[test]
    fn test_missing_fields() {
        let detections = boxes(2);
        assert!(matches!(
            resolve_color_idx(&detections, 0, ColorLookup::Class, None),
            Err(AnalyzerError::MissingField(_))
        ));
        assert!(matches!(
            resolve_color_idx(&detections, 0, ColorLookup::Track, None),
            Err(AnalyzerError::MissingField(_))
        ));
    }

    #[test]
    fn test_custom_lookup() {
        let detections = boxes(3);
        let custom = [7, 8, 9];
        assert_eq!(
            resolve_color_idx(&detections, 1, ColorLookup::Class, Some(&custom)).unwrap(),
            8
        );
        assert!(matches!(
            resolve_color_idx(&detections, 1, ColorLookup::Index, Some(&custom[..2])),
            Err(AnalyzerError::LengthMismatch {
                expected: 3,
                actual: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_out_of_bounds() {
        let detections = boxes(2);
        assert!(matches!(
            resolve_color_idx(&detections, 2, ColorLookup::Index, None),
            Err(AnalyzerError::OutOfBounds { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_resolve_color() {
        let detections = boxes(2).with_class_id(array![0, 22]);
        let palette = ColorPalette::default_palette();
        let source = ColorSource::from(palette.clone());
        assert_eq!(
            resolve_color(&source, &detections, 1, ColorLookup::Class, None).unwrap(),
            palette.by_idx(1).unwrap()
        );

        let fixed = ColorSource::from(Color::GREEN);
        assert_eq!(
            resolve_color(&fixed, &detections, 1, ColorLookup::Class, None).unwrap(),
            Color::GREEN
        );
    }

    #[test]
    fn test_parse_lookup() {
        assert_eq!("class".parse::<ColorLookup>().unwrap(), ColorLookup::Class);
        assert_eq!("TRACK".parse::<ColorLookup>().unwrap(), ColorLookup::Track);
        assert!(matches!(
            "random".parse::<ColorLookup>(),
            Err(AnalyzerError::InvalidArgument(_))
        ));
    }
}
