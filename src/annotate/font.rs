// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Font discovery for label rendering.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use ab_glyph::FontArc;

use crate::error::{AnalyzerError, Result};
use crate::verbose;

/// Assets URL for downloading fonts
const ASSETS_URL: &str = "https://github.com/ultralytics/assets/releases/download/v0.0.0";

/// Font used when a label annotator is not given one.
pub const DEFAULT_FONT: &str = "Arial.ttf";

/// Directory under the user config dir where fonts are cached.
const CONFIG_SUBDIR: &str = "VideoAnalyzer";

static DEFAULT_FONT_CACHE: OnceLock<FontArc> = OnceLock::new();

/// Locate `font` in the config directory, downloading it on first use.
///
/// # Errors
///
/// Returns [`AnalyzerError::FontError`] if there is no config directory or the
/// download fails, and [`AnalyzerError::Io`] on filesystem errors.
pub fn check_font(font: &str) -> Result<PathBuf> {
    let font_name = Path::new(font)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AnalyzerError::FontError(format!("invalid font name '{font}'")))?;
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AnalyzerError::FontError("no user config directory".to_string()))?
        .join(CONFIG_SUBDIR);
    let font_path = config_dir.join(&font_name);

    if font_path.exists() {
        return Ok(font_path);
    }

    fs::create_dir_all(&config_dir)?;

    let url = format!("{ASSETS_URL}/{font_name}");
    verbose!("Downloading {url} to {}", font_path.display());

    let response = ureq::get(&url)
        .call()
        .map_err(|e| AnalyzerError::FontError(format!("failed to download {url}: {e}")))?;

    let mut file = File::create(&font_path)?;
    let mut reader = response.into_body().into_reader();
    if let Err(e) = io::copy(&mut reader, &mut file) {
        // Try to remove partial file
        let _ = fs::remove_file(&font_path);
        return Err(AnalyzerError::Io(e));
    }

    Ok(font_path)
}

/// Load a TrueType/OpenType font from disk.
///
/// # Errors
///
/// Returns [`AnalyzerError::Io`] if the file cannot be read and
/// [`AnalyzerError::FontError`] if it is not a valid font.
pub fn load_font(path: &Path) -> Result<FontArc> {
    let mut buffer = Vec::new();
    File::open(path)?.read_to_end(&mut buffer)?;
    FontArc::try_from_vec(buffer)
        .map_err(|e| AnalyzerError::FontError(format!("{}: {e}", path.display())))
}

/// The default font, fetched and parsed once per process.
///
/// # Errors
///
/// Propagates [`check_font`] and [`load_font`] errors.
pub fn default_font() -> Result<FontArc> {
    if let Some(font) = DEFAULT_FONT_CACHE.get() {
        return Ok(font.clone());
    }
    let font = load_font(&check_font(DEFAULT_FONT)?)?;
    Ok(DEFAULT_FONT_CACHE.get_or_init(|| font).clone())
}
