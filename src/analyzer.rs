// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-frame analysis pipeline.
//!
//! The [`Analyzer`] wires an optional [`Detector`] and [`Tracker`] together and
//! turns their raw row output into [`Detections`]. Inference backends and
//! tracking algorithms live outside this crate; they only have to implement
//! the two traits below.

use std::fs;
use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::annotate::{Annotator, BgrImage, BoundingBoxAnnotator, LabelAnnotator};
use crate::config::AnalyzerConfig;
use crate::detections::Detections;
use crate::error::Result;
use crate::utils::{find_next_run_dir, swap_rb};
use crate::{info, verbose, warn};

/// Object detector collaborator.
pub trait Detector {
    /// Detect objects in `frame`.
    ///
    /// Returns an `(N, 6)` array of rows `[x1, y1, x2, y2, confidence, class_id]`.
    ///
    /// # Errors
    ///
    /// Implementations report backend failures as
    /// [`AnalyzerError::DetectorError`](crate::AnalyzerError::DetectorError).
    fn detect(&mut self, frame: &BgrImage) -> Result<Array2<f32>>;
}

/// Multi-object tracker collaborator.
pub trait Tracker {
    /// Associate `detections` with existing tracks.
    ///
    /// Returns an `(M, 7)` array of rows
    /// `[x1, y1, x2, y2, score, class_id, track_id]` for the active tracks.
    ///
    /// # Errors
    ///
    /// Implementations report failures as
    /// [`AnalyzerError::TrackerError`](crate::AnalyzerError::TrackerError).
    fn update(&mut self, detections: &Detections) -> Result<Array2<f32>>;
}

/// Detection, tracking and annotation for a stream of frames.
pub struct Analyzer {
    config: AnalyzerConfig,
    detector: Option<Box<dyn Detector>>,
    tracker: Option<Box<dyn Tracker>>,
    box_annotator: BoundingBoxAnnotator,
    label_annotator: Option<LabelAnnotator>,
    save_dir: Option<PathBuf>,
}

impl Analyzer {
    /// Create an analyzer with no detector or tracker attached.
    ///
    /// When the annotation config enables saving, frames go to the next free
    /// `runs/analyze[N]` directory unless [`Analyzer::with_save_dir`] says otherwise.
    #[must_use]
    pub fn new(config: AnalyzerConfig) -> Self {
        let save_dir = config
            .annotation
            .as_ref()
            .filter(|a| a.save)
            .map(|_| find_next_run_dir("runs", "analyze"));
        Self {
            config,
            detector: None,
            tracker: None,
            box_annotator: BoundingBoxAnnotator::default(),
            label_annotator: None,
            save_dir,
        }
    }

    /// Save frames under `dir` instead of a fresh run directory.
    #[must_use]
    pub fn with_save_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.save_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Attach a detector.
    #[must_use]
    pub fn with_detector(mut self, detector: Box<dyn Detector>) -> Self {
        verbose!("Initiating detection module");
        self.detector = Some(detector);
        self
    }

    /// Attach a tracker.
    #[must_use]
    pub fn with_tracker(mut self, tracker: Box<dyn Tracker>) -> Self {
        verbose!("Initiating track module");
        self.tracker = Some(tracker);
        self
    }

    /// Replace the bounding-box annotator used by [`Analyzer::annotate`].
    #[must_use]
    pub fn with_box_annotator(mut self, annotator: BoundingBoxAnnotator) -> Self {
        self.box_annotator = annotator;
        self
    }

    /// Draw labels in [`Analyzer::annotate`] with `annotator`.
    #[must_use]
    pub fn with_label_annotator(mut self, annotator: LabelAnnotator) -> Self {
        self.label_annotator = Some(annotator);
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Stages this analyzer can run, in pipeline order.
    #[must_use]
    pub fn supported_modes(&self) -> Vec<&'static str> {
        let mut modes = Vec::new();
        if self.config.annotation.is_some() {
            modes.push("annotation");
        }
        if self.detector.is_some() {
            modes.push("detection");
        }
        if self.tracker.is_some() {
            modes.push("track");
        }
        modes
    }

    /// Detect objects in `frame`, applying the configured detection filter.
    ///
    /// Without a detector this warns and returns an empty set.
    ///
    /// # Errors
    ///
    /// Propagates detector errors and malformed detector output.
    pub fn do_detect(&mut self, frame: &BgrImage) -> Result<Detections> {
        let Some(detector) = self.detector.as_mut() else {
            warn!("No detector attached. Attach one with `with_detector` to run detection.");
            return Ok(Detections::empty());
        };

        let rows = detector.detect(frame)?;
        let detections = Detections::from_detector_output(rows.view())?;

        match self.config.detection {
            Some(ref filter) => {
                let keep: Vec<usize> = detections
                    .iter()
                    .enumerate()
                    .filter(|(_, d)| {
                        let confident = d
                            .confidence
                            .map_or(true, |c| c >= filter.confidence_threshold);
                        let wanted = match (&filter.classes, d.class_id) {
                            (Some(classes), Some(class_id)) => classes.contains(&class_id),
                            _ => true,
                        };
                        confident && wanted
                    })
                    .map(|(i, _)| i)
                    .collect();
                detections.subset(keep)
            }
            None => Ok(detections),
        }
    }

    /// Run the tracker on `detections`.
    ///
    /// Without a tracker this warns and returns the input unchanged.
    ///
    /// # Errors
    ///
    /// Propagates tracker errors and malformed tracker output.
    pub fn do_track(&mut self, detections: &Detections) -> Result<Detections> {
        let Some(tracker) = self.tracker.as_mut() else {
            warn!("No tracker attached. Attach one with `with_tracker` to run tracking.");
            return Ok(detections.clone());
        };

        let rows = match (&self.config.track, &detections.confidence) {
            (Some(track), Some(confidence)) => {
                let keep: Vec<usize> = confidence
                    .iter()
                    .enumerate()
                    .filter(|&(_, &c)| c >= track.min_confidence)
                    .map(|(i, _)| i)
                    .collect();
                tracker.update(&detections.subset(keep)?)?
            }
            _ => tracker.update(detections)?,
        };
        Detections::from_tracker_output(rows.view())
    }

    /// Detect on `frame`, then track the result.
    ///
    /// # Errors
    ///
    /// Propagates detection and tracking errors.
    pub fn do_track_frame(&mut self, frame: &BgrImage) -> Result<Detections> {
        let detections = self.do_detect(frame)?;
        self.do_track(&detections)
    }

    /// Detect and track every frame of a sequence, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing frame and returns its error.
    pub fn do_track_sequence<'a, I>(&mut self, frames: I) -> Result<Vec<Detections>>
    where
        I: IntoIterator<Item = &'a BgrImage>,
    {
        info!("Start tracking.");
        let tracklets = frames
            .into_iter()
            .map(|frame| self.do_track_frame(frame))
            .collect::<Result<Vec<_>>>()?;
        info!("Done processing {} frames.", tracklets.len());
        Ok(tracklets)
    }

    /// Track a sequence of already-detected frames, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing frame and returns its error.
    pub fn do_track_detections(&mut self, detections: &[Detections]) -> Result<Vec<Detections>> {
        detections.iter().map(|d| self.do_track(d)).collect()
    }

    /// Log `detections` when the annotation config asks for printing.
    pub fn verbose(&self, detections: &Detections) {
        if self.config.annotation.as_ref().is_some_and(|a| a.print) {
            info!("{detections}");
        }
    }

    /// Write `frame` as `file_name` into the save directory when saving is enabled.
    ///
    /// Returns the written path, or `None` when saving is off.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Io`](crate::AnalyzerError::Io) if the directory
    /// cannot be created and
    /// [`AnalyzerError::ImageError`](crate::AnalyzerError::ImageError) if encoding fails.
    pub fn save(&self, frame: &BgrImage, file_name: &str) -> Result<Option<PathBuf>> {
        let enabled = self.config.annotation.as_ref().is_some_and(|a| a.save);
        let Some(dir) = self.save_dir.as_ref().filter(|_| enabled) else {
            return Ok(None);
        };

        fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        let mut rgb = frame.clone();
        swap_rb(&mut rgb);
        rgb.save(&path)?;
        verbose!("Saved {}", path.display());
        Ok(Some(path))
    }

    /// Draw boxes, then labels when a label annotator is set.
    ///
    /// # Errors
    ///
    /// Propagates annotator errors.
    pub fn annotate<'a>(
        &self,
        frame: &'a mut BgrImage,
        detections: &Detections,
    ) -> Result<&'a mut BgrImage> {
        let frame = self.box_annotator.annotate(frame, detections, None)?;
        match self.label_annotator {
            Some(ref labels) => labels.annotate(frame, detections, None),
            None => Ok(frame),
        }
    }
}
