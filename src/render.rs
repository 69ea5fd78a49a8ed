//! Text measurement and overlay rasterization.
//!
//! The watermark text is rasterized in white onto a fully transparent
//! layer the same size as the target image, with the glyph coverage scaled
//! by the requested opacity. Compositing the layer onto the image happens
//! in [`crate::compose`].

use ab_glyph::{Font, GlyphId, ScaleFont};
use image::{Rgba, RgbaImage};

use crate::font::WatermarkFont;
use crate::placement::Placement;

/// Measure the pixel bounding box of `text` under `font`.
///
/// Width sums the horizontal advance of each glyph plus kerning; height is
/// the scaled line height (ascent minus descent, plus line gap). Both are
/// rounded up to whole pixels. Empty text measures zero wide.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn measure_text(font: &WatermarkFont, text: &str) -> (u32, u32) {
    let scaled = font.font().as_scaled(font.scale());

    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    let height = if text.is_empty() { 0.0 } else { scaled.height() };
    (width.ceil() as u32, height.ceil() as u32)
}

/// Rasterize `text` in white onto a transparent `canvas_w` x `canvas_h`
/// layer, with the text box's top-left corner at `placement` and `opacity`
/// scaling the glyph coverage.
///
/// Glyph pixels falling outside the canvas are clipped; a placement with
/// negative coordinates renders whatever part of the text still overlaps
/// the canvas.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn render_overlay(
    font: &WatermarkFont,
    text: &str,
    (canvas_w, canvas_h): (u32, u32),
    placement: Placement,
    opacity: u8,
) -> RgbaImage {
    let mut layer = RgbaImage::new(canvas_w, canvas_h);
    if canvas_w == 0 || canvas_h == 0 {
        return layer;
    }

    let scaled = font.font().as_scaled(font.scale());

    #[allow(clippy::cast_precision_loss)]
    let mut cursor_x = placement.x as f32;
    #[allow(clippy::cast_precision_loss)]
    let baseline_y = placement.y as f32 + scaled.ascent();
    let mut prev: Option<GlyphId> = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor_x += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(font.scale(), ab_glyph::point(cursor_x, baseline_y));
        if let Some(outlined) = font.font().outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;
                if x >= 0 && y >= 0 && x < canvas_w as i32 && y < canvas_h as i32 {
                    let alpha = (coverage * f32::from(opacity)).clamp(0.0, 255.0) as u8;
                    let pixel = layer.get_pixel_mut(x as u32, y as u32);
                    // Adjacent glyphs can touch the same pixel; keep the
                    // stronger coverage rather than stacking alpha.
                    if alpha > pixel[3] {
                        *pixel = Rgba([255, 255, 255, alpha]);
                    }
                }
            });
        }

        cursor_x += scaled.h_advance(id);
        prev = Some(id);
    }

    layer
}
