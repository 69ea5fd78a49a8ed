//! Overlay watermark text onto images via alpha compositing.
//!
//! The watermark renders in white onto a transparent layer the same size
//! as the image, anchored to one of the four corners with a 10px margin,
//! then alpha-composites over the original pixels. PNG output keeps the
//! alpha channel; JPEG output flattens to opaque RGB.
//!
//! # Quick Start
//!
//! ```no_run
//! use text_watermark::{apply_watermark, WatermarkFont, WatermarkSpec};
//!
//! let font = WatermarkFont::default_font();
//! let spec = WatermarkSpec::new("(c) 2026 easynote");
//! let img = image::open("photo.jpg").unwrap();
//! let out = apply_watermark(&img, &spec, &font);
//! out.save("photo_watermark.png").unwrap();
//! ```
//!
//! # Placement
//!
//! The anchor derives from the measured text box, the image dimensions,
//! and the position keyword. Oversized text is not clamped: the anchor may
//! leave the canvas and glyphs clip at render time.
//!
//! ```
//! use text_watermark::placement::{anchor, Position, EDGE_MARGIN};
//!
//! let place = anchor(Position::BottomRight, (800, 600), (100, 50), EDGE_MARGIN);
//! assert_eq!((place.x, place.y), (690, 540));
//! ```

#![deny(missing_docs)]

pub mod compose;
mod engine;
pub mod error;
pub mod font;
pub mod placement;
pub mod render;

pub use engine::{
    apply_watermark, default_output_path, is_supported_image, load_watermark_text,
    process_directory, process_file, save_image, ProcessResult, WatermarkSpec, DEFAULT_OPACITY,
};
pub use error::{Error, Result};
pub use font::WatermarkFont;
pub use placement::Position;
