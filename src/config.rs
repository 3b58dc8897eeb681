// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Analyzer configuration.
//!
//! [`AnalyzerConfig`] tunes the stages of an
//! [`Analyzer`](crate::analyzer::Analyzer). The detector and tracker themselves
//! are attached to the analyzer; a section left at `None` keeps that stage's
//! output unfiltered. All structs use a builder pattern for convenient
//! construction.
//!
//! # Example
//!
//! ```rust
//! use video_analyzer::{AnalyzerConfig, AnnotationConfig, DetectionConfig};
//!
//! let config = AnalyzerConfig::new()
//!     .with_annotation(AnnotationConfig::new().with_print(true))
//!     .with_detection(DetectionConfig::new().with_confidence(0.5).with_classes(vec![0, 2]));
//! ```

/// Verbose actions applied to analyzer output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationConfig {
    /// Save annotated frames through [`Analyzer::save`](crate::Analyzer::save).
    pub save: bool,
    /// Display annotated frames. This crate opens no windows; the flag is
    /// carried for callers that own a display.
    pub show: bool,
    /// Log detection summaries.
    pub print: bool,
}

impl AnnotationConfig {
    /// Create a configuration with every action disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable saving.
    #[must_use]
    pub const fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    /// Enable or disable display.
    #[must_use]
    pub const fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// Enable or disable logging of detection summaries.
    #[must_use]
    pub const fn with_print(mut self, print: bool) -> Self {
        self.print = print;
        self
    }
}

/// Post-filter applied to raw detector output.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionConfig {
    /// Confidence threshold for detections (0.0 to 1.0).
    /// Detections with confidence scores lower than this value are discarded.
    pub confidence_threshold: f32,
    /// Class IDs to keep. `None` keeps every class.
    pub classes: Option<Vec<i64>>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.25,
            classes: None,
        }
    }
}

impl DetectionConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence threshold.
    ///
    /// # Arguments
    ///
    /// * `threshold` - The minimum confidence score (0.0 to 1.0).
    #[must_use]
    pub const fn with_confidence(mut self, threshold: f32) -> Self {
        self.confidence_threshold = threshold;
        self
    }

    /// Restrict detections to the given class IDs.
    #[must_use]
    pub fn with_classes(mut self, classes: Vec<i64>) -> Self {
        self.classes = Some(classes);
        self
    }
}

/// Settings for the tracking stage.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackConfig {
    /// Detections below this confidence are not handed to the tracker.
    pub min_confidence: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
        }
    }
}

impl TrackConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum confidence passed to the tracker.
    #[must_use]
    pub const fn with_min_confidence(mut self, threshold: f32) -> Self {
        self.min_confidence = threshold;
        self
    }
}

/// Top-level analyzer configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerConfig {
    /// Verbose actions; `None` disables them.
    pub annotation: Option<AnnotationConfig>,
    /// Detector output filter; `None` keeps raw detector output.
    pub detection: Option<DetectionConfig>,
    /// Tracker input filter; `None` hands every detection to the tracker.
    pub track: Option<TrackConfig>,
}

impl AnalyzerConfig {
    /// Create a configuration with every section unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable verbose actions.
    #[must_use]
    pub fn with_annotation(mut self, annotation: AnnotationConfig) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Filter detector output.
    #[must_use]
    pub fn with_detection(mut self, detection: DetectionConfig) -> Self {
        self.detection = Some(detection);
        self
    }

    /// Filter tracker input.
    #[must_use]
    pub fn with_track(mut self, track: TrackConfig) -> Self {
        self.track = Some(track);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AnalyzerConfig::default();
        assert!(config.annotation.is_none());
        assert!(config.detection.is_none());
        assert!(config.track.is_none());

        let detection = DetectionConfig::default();
        assert!((detection.confidence_threshold - 0.25).abs() < f32::EPSILON);
        assert!(detection.classes.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = AnalyzerConfig::new()
            .with_annotation(AnnotationConfig::new().with_print(true).with_save(true))
            .with_detection(DetectionConfig::new().with_confidence(0.5).with_classes(vec![0]))
            .with_track(TrackConfig::new().with_min_confidence(0.1));

        let annotation = config.annotation.clone().unwrap();
        assert!(annotation.print);
        assert!(annotation.save);
        assert!(!annotation.show);

        let detection = config.detection.clone().unwrap();
        assert!((detection.confidence_threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(detection.classes, Some(vec![0]));

        assert!(config.track.is_some());
    }
}
