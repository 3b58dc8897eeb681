// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use crate::annotate::font::load_font;
use crate::annotate::{Annotator, BgrImage, BoundingBoxAnnotator, LabelAnnotator};
use crate::cli::args::AnnotateArgs;
use crate::detections::Detections;
use crate::error::{AnalyzerError, Result};
use crate::io::read_detections;
use crate::utils::{find_next_run_dir, pluralize, swap_rb};
use crate::{error, info, section, success, verbose, VERSION};

/// Annotate an image with the detections read from a file.
pub fn run_annotate(args: &AnnotateArgs) {
    section!("Video Analyzer {VERSION} 🚀 annotate");

    let detections = match read_detections(&args.detections) {
        Ok(d) => d,
        Err(e) => {
            error!("Error reading detections from '{}': {e}", args.detections);
            process::exit(1);
        }
    };
    if let Err(e) = detections.validate() {
        error!("Invalid detections in '{}': {e}", args.detections);
        process::exit(1);
    }

    let mut frame = match load_frame(&args.source) {
        Ok(f) => f,
        Err(e) => {
            error!("Error loading image '{}': {e}", args.source);
            process::exit(1);
        }
    };

    let start = Instant::now();
    if let Err(e) = draw(args, &mut frame, &detections) {
        error!("Error annotating '{}': {e}", args.source);
        process::exit(1);
    }
    let elapsed = start.elapsed();

    verbose!(
        "{}: {}x{} {}, {:.1}ms",
        args.source,
        frame.width(),
        frame.height(),
        pluralize(detections.len(), "detection"),
        elapsed.as_secs_f64() * 1000.0
    );

    let save_dir = args
        .output
        .as_ref()
        .map_or_else(|| find_next_run_dir("runs", "annotate"), PathBuf::from);

    match save_frame(frame, &args.source, &save_dir) {
        Ok(path) => success!("Results saved to {}", path.display()),
        Err(e) => {
            error!("Error saving annotated image: {e}");
            process::exit(1);
        }
    }
    info!("{detections}");
}

/// Load an image from disk as a BGR frame.
fn load_frame(path: &str) -> Result<BgrImage> {
    let mut frame = image::open(path)?.to_rgb8();
    swap_rb(&mut frame);
    Ok(frame)
}

fn draw(args: &AnnotateArgs, frame: &mut BgrImage, detections: &Detections) -> Result<()> {
    if !(args.text_scale.is_finite() && args.text_scale > 0.0) {
        return Err(AnalyzerError::ConfigError(format!(
            "--text-scale must be a positive number, got {}",
            args.text_scale
        )));
    }

    BoundingBoxAnnotator::new()
        .with_thickness(args.thickness)
        .with_color_lookup(args.color_lookup)
        .annotate(frame, detections, None)?;

    if args.labels {
        let mut labels = LabelAnnotator::new()
            .with_color_lookup(args.color_lookup)
            .with_text_position(args.text_position)
            .with_text_scale(args.text_scale)
            .with_border_radius(args.border_radius);
        if let Some(ref font) = args.font {
            labels = labels.with_font(load_font(Path::new(font))?);
        }
        labels.annotate(frame, detections, None)?;
    }
    Ok(())
}

/// Convert back to RGB and write the frame under `save_dir`, keeping the source file name.
fn save_frame(mut frame: BgrImage, source: &str, save_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(save_dir)?;
    let file_name = Path::new(source)
        .file_name()
        .map_or_else(|| "annotated.jpg".into(), std::ffi::OsStr::to_os_string);
    let path = save_dir.join(file_name);

    swap_rb(&mut frame);
    frame.save(&path)?;
    Ok(path)
}
