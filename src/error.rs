// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the analyzer library.

use std::fmt;

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Main error type for the analyzer library.
///
/// Every failure in the detection model and the renderers is a contract
/// violation surfaced synchronously to the caller; nothing is retried.
#[derive(Debug)]
pub enum AnalyzerError {
    /// Unsupported value (unknown anchor position, lookup policy, hex color, negative palette index).
    InvalidArgument(String),
    /// A field required by the operation is absent from the detection set.
    MissingField(String),
    /// An array length does not match the number of detections.
    LengthMismatch {
        /// What was being compared.
        what: String,
        /// Expected length (the detection count).
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
    /// A detection index is outside `0..len`.
    OutOfBounds {
        /// Offending index.
        index: usize,
        /// Number of detections.
        len: usize,
    },
    /// Error processing images.
    ImageError(String),
    /// Font could not be located, downloaded or parsed.
    FontError(String),
    /// Malformed detection text input.
    ParseError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Error reported by a detector collaborator.
    DetectorError(String),
    /// Error reported by a tracker collaborator.
    TrackerError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            Self::MissingField(msg) => write!(f, "Missing field: {msg}"),
            Self::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "Length mismatch: {what} has length {actual}, expected {expected}"
            ),
            Self::OutOfBounds { index, len } => write!(
                f,
                "Out of bounds: detection index {index} is out of bounds for detections of length {len}"
            ),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::FontError(msg) => write!(f, "Font error: {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::DetectorError(msg) => write!(f, "Detector error: {msg}"),
            Self::TrackerError(msg) => write!(f, "Tracker error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for AnalyzerError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}
