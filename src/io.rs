// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Plain-text detection files.
//!
//! One detection per line, fields separated by whitespace or commas:
//!
//! ```text
//! # x1 y1 x2 y2 confidence class_id [track_id]
//! 10 20 110 220 0.91 0
//! 50,60,90,140,0.42,2
//! ```
//!
//! Blank lines and `#` comments are skipped. Six columns parse like detector
//! output, seven like tracker output. Every row must have the same width.

use std::fs;
use std::path::Path;

use ndarray::Array2;

use crate::detections::Detections;
use crate::error::{AnalyzerError, Result};

/// Parse detections from text.
///
/// # Errors
///
/// Returns [`AnalyzerError::ParseError`] for non-numeric fields, rows of
/// unequal width or an unsupported column count.
pub fn parse_detections(text: &str) -> Result<Detections> {
    let mut values = Vec::new();
    let mut width = None;
    let mut rows = 0;

    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .map(|f| {
                f.parse::<f32>().map_err(|_| {
                    AnalyzerError::ParseError(format!(
                        "line {}: '{f}' is not a number",
                        lineno + 1
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        match width {
            None => width = Some(fields.len()),
            Some(w) if w != fields.len() => {
                return Err(AnalyzerError::ParseError(format!(
                    "line {}: expected {w} fields, found {}",
                    lineno + 1,
                    fields.len()
                )));
            }
            Some(_) => {}
        }
        values.extend(fields);
        rows += 1;
    }

    let Some(width) = width else {
        return Ok(Detections::empty());
    };
    let table = Array2::from_shape_vec((rows, width), values)
        .map_err(|e| AnalyzerError::ParseError(e.to_string()))?;

    match width {
        6 => Detections::from_detector_output(table.view()),
        7 => Detections::from_tracker_output(table.view()),
        n => Err(AnalyzerError::ParseError(format!(
            "expected 6 or 7 fields per detection, found {n}"
        ))),
    }
}

/// Read and parse a detection file.
///
/// # Errors
///
/// Returns [`AnalyzerError::Io`] if the file cannot be read, otherwise the
/// errors of [`parse_detections`].
pub fn read_detections(path: impl AsRef<Path>) -> Result<Detections> {
    let text = fs::read_to_string(path)?;
    parse_detections(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_parse_detector_rows() {
        let detections = parse_detections(
            "# header\n10 20 110 220 0.91 0\n\n50,60,90,140,0.42,2  # trailing\n",
        )
        .unwrap();
        assert_eq!(detections.len(), 2);
        assert_eq!(detections.class_id, Some(array![0, 2]));
        assert!(detections.track_id.is_none());
        assert_eq!(detections.xyxy.row(1).to_vec(), vec![50.0, 60.0, 90.0, 140.0]);
    }

    #[test]
    fn test_parse_tracker_rows() {
        let detections = parse_detections("0 0 5 5 0.5 1 7\n1 1 6 6 0.6 1 8").unwrap();
        assert_eq!(detections.track_id, Some(array![7, 8]));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_detections("\n# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_detections("0 0 5 5 0.5 x"),
            Err(AnalyzerError::ParseError(_))
        ));
        assert!(matches!(
            parse_detections("0 0 5 5 0.5 1\n0 0 5 5 0.5 1 2"),
            Err(AnalyzerError::ParseError(_))
        ));
        assert!(matches!(
            parse_detections("0 0 5 5"),
            Err(AnalyzerError::ParseError(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_detections("/nonexistent/detections.txt").unwrap_err();
        assert!(matches!(err, AnalyzerError::Io(_)));
    }
}
