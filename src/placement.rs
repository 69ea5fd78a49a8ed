//! Anchor computation for watermark placement.
//!
//! The text box anchors to one of the four image corners with a fixed
//! margin from the relevant edges. Coordinates are signed: when the text
//! box outgrows the image the anchor goes negative and glyphs are clipped
//! at rasterization time, never wrapped or clamped.

use std::str::FromStr;

use crate::error::Error;

/// Margin in pixels between the text box and the anchored edges.
pub const EDGE_MARGIN: u32 = 10;

/// Corner of the image the watermark anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Anchor to the top-left corner.
    TopLeft,
    /// Anchor to the top-right corner.
    TopRight,
    /// Anchor to the bottom-left corner.
    BottomLeft,
    /// Anchor to the bottom-right corner.
    BottomRight,
}

impl Position {
    /// All positions, in CLI help order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The CLI keyword for this position.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(Self::TopLeft),
            "top-right" => Ok(Self::TopRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "bottom-right" => Ok(Self::BottomRight),
            _ => Err(Error::InvalidPosition(s.to_string())),
        }
    }
}

/// Top-left pixel coordinate of the text box on the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Horizontal offset from the image's left edge.
    pub x: i32,
    /// Vertical offset from the image's top edge.
    pub y: i32,
}

impl Placement {
    /// Create a placement at `(x, y)`.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Compute the anchor for a text box of `(text_w, text_h)` pixels on an
/// image of `(img_w, img_h)` pixels, `margin` pixels from the anchored
/// edges.
///
/// The result may lie outside the image when the text plus margin exceeds
/// the image size; callers clip at render time.
#[must_use]
#[allow(clippy::cast_possible_wrap)] // image dimensions stay well below i32::MAX
pub fn anchor(
    position: Position,
    (img_w, img_h): (u32, u32),
    (text_w, text_h): (u32, u32),
    margin: u32,
) -> Placement {
    let img_w = img_w as i32;
    let img_h = img_h as i32;
    let text_w = text_w as i32;
    let text_h = text_h as i32;
    let m = margin as i32;

    match position {
        Position::TopLeft => Placement::new(m, m),
        Position::TopRight => Placement::new(img_w - text_w - m, m),
        Position::BottomLeft => Placement::new(m, img_h - text_h - m),
        Position::BottomRight => Placement::new(img_w - text_w - m, img_h - text_h - m),
    }
}
