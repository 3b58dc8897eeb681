// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyzerError, Result};

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// White color.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Black color.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Red color.
    pub const RED: Self = Self::new(255, 0, 0);
    /// Green color.
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Blue color.
    pub const BLUE: Self = Self::new(0, 0, 255);
    /// Yellow color.
    pub const YELLOW: Self = Self::new(255, 255, 0);
    /// Purple, `#A351FB`, the first entry of the default palette.
    pub const ROBOFLOW: Self = Self::new(163, 81, 251);

    /// Create a new color from RGB values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color from a hex string.
    ///
    /// Accepts `RRGGBB` or the short `RGB` form, with an optional leading `#`.
    /// Each digit of the short form is duplicated, so `"f0a"` is `"ff00aa"`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidArgument`] on non-hex characters or a
    /// length other than 3 or 6.
    pub fn from_hex(color_hex: &str) -> Result<Self> {
        let hex = color_hex.trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AnalyzerError::InvalidArgument(format!(
                "invalid characters in color hash '{color_hex}'"
            )));
        }

        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => {
                return Err(AnalyzerError::InvalidArgument(format!(
                    "invalid length of color hash '{color_hex}'"
                )));
            }
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|e| {
                AnalyzerError::InvalidArgument(format!("invalid color hash '{color_hex}': {e}"))
            })
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Hex representation, `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels in RGB order.
    #[must_use]
    pub const fn as_rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels in BGR order, the layout of the frames we draw on.
    #[must_use]
    pub const fn as_bgr(&self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }
}

impl FromStr for Color {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Default annotation palette (21 colors).
pub const DEFAULT_COLOR_PALETTE: [&str; 21] = [
    "A351FB", "FF4040", "FFA1A0", "FF7633", "FFB633", "D1D435", "4CFB12", "94CF1A", "40DE8A",
    "1B9640", "00D6C1", "2E9CAA", "00C4FF", "364797", "6675FF", "0019EF", "863AFF", "530087",
    "CD3AFF", "FF97CA", "FF39C9",
];

/// Legacy annotation palette (17 colors).
pub const LEGACY_COLOR_PALETTE: [&str; 17] = [
    "A351FB", "E6194B", "3CB44B", "FFE119", "0082C8", "F58231", "911EB4", "46F0F0", "F032E6",
    "D2F53C", "FABEBE", "008080", "E6BEFF", "AA6E28", "FFFAC8", "800000", "AAFFC3",
];

/// An ordered, non-empty list of colors indexed cyclically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<Color>,
}

impl ColorPalette {
    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidArgument`] if `colors` is empty.
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(AnalyzerError::InvalidArgument(
                "color palette must contain at least one color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Create a palette from hex strings.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidArgument`] if any entry is not a valid
    /// hex color or the list is empty.
    pub fn from_hex<S: AsRef<str>>(color_hex_list: &[S]) -> Result<Self> {
        let colors = color_hex_list
            .iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// The default 21-color palette.
    #[must_use]
    pub fn default_palette() -> Self {
        Self::from_const(&DEFAULT_COLOR_PALETTE)
    }

    /// The legacy 17-color palette.
    #[must_use]
    pub fn legacy() -> Self {
        Self::from_const(&LEGACY_COLOR_PALETTE)
    }

    // The constant tables are non-empty and only hold valid 6-digit hex.
    fn from_const(table: &[&str]) -> Self {
        Self {
            colors: table
                .iter()
                .filter_map(|hex| Color::from_hex(hex).ok())
                .collect(),
        }
    }

    /// Number of colors in the palette.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; palettes are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All colors in order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at `idx`, wrapping around the palette length.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::InvalidArgument`] if `idx` is negative.
    pub fn by_idx(&self, idx: i64) -> Result<Color> {
        if idx < 0 {
            return Err(AnalyzerError::InvalidArgument(format!(
                "palette index cannot be negative, got {idx}"
            )));
        }
        let idx = (idx as u64 % self.colors.len() as u64) as usize;
        Ok(self.colors[idx])
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::default_palette()
    }
}

/// Either one fixed color for every detection or a palette indexed per detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSource {
    /// Same color regardless of lookup slot.
    Color(Color),
    /// Slot selects a palette entry.
    Palette(ColorPalette),
}

impl ColorSource {
    /// Resolve the final color for a lookup slot.
    ///
    /// # Errors
    ///
    /// Propagates [`ColorPalette::by_idx`] errors; a fixed color never fails.
    pub fn by_idx(&self, idx: i64) -> Result<Color> {
        match self {
            Self::Color(color) => Ok(*color),
            Self::Palette(palette) => palette.by_idx(idx),
        }
    }
}

impl Default for ColorSource {
    fn default() -> Self {
        Self::Palette(ColorPalette::default())
    }
}

impl From<Color> for ColorSource {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<ColorPalette> for ColorSource {
    fn from(palette: ColorPalette) -> Self {
        Self::Palette(palette)
    }
}
