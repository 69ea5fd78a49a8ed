//! Font loading and glyph scaling.
//!
//! A [`WatermarkFont`] pairs a parsed typeface with the pixel scale it
//! renders at. Two sources exist: the embedded default face (DejaVu Sans,
//! Bitstream Vera license) and a user-supplied outline font file. A custom
//! font always renders at size 40; the embedded face at [`DEFAULT_FONT_SIZE`].

use std::path::Path;
use std::sync::OnceLock;

use ab_glyph::{FontArc, FontVec, PxScale};

use crate::error::{Error, Result};

/// Embedded default font data.
const DEFAULT_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSans.ttf");

/// Pixel size the embedded default font renders at.
pub const DEFAULT_FONT_SIZE: f32 = 24.0;

/// Pixel size a user-supplied font renders at.
pub const CUSTOM_FONT_SIZE: f32 = 40.0;

/// Parsed embedded font, shared across calls via cheap `FontArc` clones.
static DEFAULT_FONT: OnceLock<FontArc> = OnceLock::new();

/// A loaded typeface plus the pixel scale it renders at.
#[derive(Debug, Clone)]
pub struct WatermarkFont {
    font: FontArc,
    scale: PxScale,
}

impl WatermarkFont {
    /// The embedded default font at [`DEFAULT_FONT_SIZE`].
    ///
    /// # Panics
    ///
    /// Panics if the embedded font data fails to parse (should never happen
    /// unless the binary data is corrupted).
    #[must_use]
    pub fn default_font() -> Self {
        let font = DEFAULT_FONT
            .get_or_init(|| {
                FontArc::try_from_slice(DEFAULT_FONT_DATA)
                    .expect("embedded font must parse - this is a bug")
            })
            .clone();
        Self {
            font,
            scale: PxScale::from(DEFAULT_FONT_SIZE),
        }
    }

    /// Load a custom outline font (TTF/OTF) at [`CUSTOM_FONT_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::FontLoad`] if the file cannot be read or is not a
    /// valid outline font.
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| Error::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let font = FontVec::try_from_vec(data).map_err(|e| Error::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            font: FontArc::from(font),
            scale: PxScale::from(CUSTOM_FONT_SIZE),
        })
    }

    /// The underlying typeface.
    #[must_use]
    pub fn font(&self) -> &FontArc {
        &self.font
    }

    /// The pixel scale glyphs are measured and rendered at.
    #[must_use]
    pub fn scale(&self) -> PxScale {
        self.scale
    }
}
