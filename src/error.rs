//! Error types for the text-watermark crate.

use std::path::PathBuf;

/// Errors that can occur while watermarking an image.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input image path does not point to an existing file.
    #[error("image file not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// The watermark text file is missing or holds only whitespace.
    #[error("no watermark text: {} is missing or empty", .0.display())]
    WatermarkMissing(PathBuf),

    /// A custom font file could not be read or parsed.
    #[error("failed to load font {}: {reason}", .path.display())]
    FontLoad {
        /// Path of the font file that failed to load.
        path: PathBuf,
        /// What went wrong (I/O or parse).
        reason: String,
    },

    /// The input image could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),

    /// The position keyword is not one of the four corners.
    #[error("invalid position {0:?} (expected top-left, top-right, bottom-left or bottom-right)")]
    InvalidPosition(String),

    /// The output extension maps to neither PNG nor JPEG.
    #[error("unsupported output format: {0} (use .png, .jpg or .jpeg)")]
    UnsupportedFormat(String),

    /// Encoding or writing the output image failed.
    #[error("failed to encode image: {0}")]
    Encode(image::ImageError),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
