//! Core watermarking pipeline.

use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::compose;
use crate::error::{Error, Result};
use crate::font::WatermarkFont;
use crate::placement::{self, Position, EDGE_MARGIN};
use crate::render;

/// Glyph alpha used when the caller does not pick one.
pub const DEFAULT_OPACITY: u8 = 128;

/// The watermark to apply: text, anchor corner, and glyph alpha.
#[derive(Debug, Clone)]
pub struct WatermarkSpec {
    /// Text drawn onto the image.
    pub text: String,
    /// Corner the text box anchors to.
    pub position: Position,
    /// Glyph alpha, 0 (invisible) to 255 (opaque).
    pub opacity: u8,
}

impl WatermarkSpec {
    /// A spec for `text` at the bottom-right corner with [`DEFAULT_OPACITY`].
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: Position::BottomRight,
            opacity: DEFAULT_OPACITY,
        }
    }
}

/// Result of watermarking a single file in batch mode.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the processed input file.
    pub path: PathBuf,
    /// Whether watermarking succeeded.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
}

/// Measure, place, render, and composite the watermark over `image`.
///
/// The base image converts to RGBA, the text renders in white onto a
/// transparent layer the same size, and the layer blends over the base
/// with the "over" operator. The input image is untouched; the composited
/// copy is returned.
#[must_use]
pub fn apply_watermark(
    image: &DynamicImage,
    spec: &WatermarkSpec,
    font: &WatermarkFont,
) -> RgbaImage {
    let mut base = image.to_rgba8();
    let (img_w, img_h) = base.dimensions();

    let text_box = render::measure_text(font, &spec.text);
    let place = placement::anchor(spec.position, (img_w, img_h), text_box, EDGE_MARGIN);

    let overlay = render::render_overlay(font, &spec.text, (img_w, img_h), place, spec.opacity);
    compose::composite_over(&mut base, &overlay);
    base
}

/// Watermark a single image file: open, compose, save.
///
/// # Errors
///
/// Returns [`Error::ImageNotFound`] if `input` is not an existing file,
/// [`Error::Decode`] if it cannot be decoded, and the errors of
/// [`save_image`] for the output side.
pub fn process_file(
    input: &Path,
    output: &Path,
    spec: &WatermarkSpec,
    font: &WatermarkFont,
) -> Result<()> {
    if !input.is_file() {
        return Err(Error::ImageNotFound(input.to_path_buf()));
    }

    let image = image::open(input).map_err(Error::Decode)?;
    let composited = apply_watermark(&image, spec, font);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    save_image(&composited, output)
}

/// Watermark every supported image in a directory (non-recursive).
///
/// Outputs keep their file name under `output_dir`. Uses parallel
/// iteration when the `cli` feature is enabled (via rayon). One file's
/// failure does not abort the others.
///
/// # Panics
///
/// Panics if a directory entry has no file name (should not happen for
/// regular files).
#[must_use]
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    spec: &WatermarkSpec,
    font: &WatermarkFont,
) -> Vec<ProcessResult> {
    let entries: Vec<_> = match std::fs::read_dir(input_dir) {
        Ok(rd) => rd
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .filter(|e| is_supported_image(e.path().as_path()))
            .collect(),
        Err(e) => {
            return vec![ProcessResult {
                path: input_dir.to_path_buf(),
                success: false,
                message: format!("Failed to read directory: {e}"),
            }];
        }
    };

    if !output_dir.exists() {
        if let Err(e) = std::fs::create_dir_all(output_dir) {
            return vec![ProcessResult {
                path: output_dir.to_path_buf(),
                success: false,
                message: format!("Failed to create output directory: {e}"),
            }];
        }
    }

    let watermark_one = |entry: &std::fs::DirEntry| {
        let input_path = entry.path();
        let filename = input_path.file_name().unwrap();
        let output_path = output_dir.join(filename);
        match process_file(&input_path, &output_path, spec, font) {
            Ok(()) => ProcessResult {
                path: input_path,
                success: true,
                message: format!("saved as {}", output_path.display()),
            },
            Err(e) => ProcessResult {
                path: input_path,
                success: false,
                message: e.to_string(),
            },
        }
    };

    #[cfg(feature = "cli")]
    {
        use rayon::prelude::*;
        entries.par_iter().map(watermark_one).collect()
    }

    #[cfg(not(feature = "cli"))]
    {
        entries.iter().map(watermark_one).collect()
    }
}

/// Check if a file has an extension this tool can read and re-encode.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg" | "png"),
        None => false,
    }
}

/// Save the composited image, dispatching on the output extension.
///
/// PNG keeps the alpha channel; JPEG flattens to opaque RGB before
/// encoding at quality 100. Extension matching is case-insensitive.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] for any extension other than
/// `.png`/`.jpg`/`.jpeg`, and [`Error::Encode`] if writing fails.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat(e.to_string()))?;

    match format {
        ImageFormat::Png => {
            img.save_with_format(path, ImageFormat::Png)
                .map_err(Error::Encode)?;
        }
        ImageFormat::Jpeg => {
            let flattened = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            let file = std::fs::File::create(path)?;
            let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(file, 100);
            encoder
                .encode_image(&flattened)
                .map_err(Error::Encode)?;
        }
        _ => {
            return Err(Error::UnsupportedFormat(format!("{format:?}")));
        }
    }

    Ok(())
}

/// Read the watermark text file, trimmed of surrounding whitespace.
///
/// A missing file yields an empty string; deciding that empty text aborts
/// the run is the caller's job.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file exists but cannot be read.
pub fn load_watermark_text(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Ok(String::new());
    }
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

/// Generate a default output path from an input path.
///
/// Example: `"photo.jpg"` becomes `"photo_watermark.jpg"`.
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    match input.extension() {
        Some(ext) => parent.join(format!("{stem}_watermark.{}", ext.to_string_lossy())),
        None => parent.join(format!("{stem}_watermark")),
    }
}
