//! Alpha compositing of the text overlay onto the base image.
//!
//! The overlay carries the watermark's opacity in its own alpha channel,
//! so compositing is the plain Porter-Duff "over" operator:
//! `out = top + bottom * (1 - top.alpha)`, per pixel, straight alpha.

use image::{Rgba, RgbaImage};

/// Blend `top` over `bottom` with the "over" operator (straight alpha).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend_over(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let top_a = f32::from(top[3]) / 255.0;
    let bottom_a = f32::from(bottom[3]) / 255.0;

    let out_a = top_a + bottom_a * (1.0 - top_a);
    if out_a < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |t: u8, b: u8| -> u8 {
        let t = f32::from(t) / 255.0;
        let b = f32::from(b) / 255.0;
        let out = (t * top_a + b * bottom_a * (1.0 - top_a)) / out_a;
        (out * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(top[0], bottom[0]),
        channel(top[1], bottom[1]),
        channel(top[2], bottom[2]),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

/// Composite `overlay` over `base` in place.
///
/// Both images must be the same size. Pixels whose overlay alpha is zero
/// leave the base byte-identical, so a fully transparent overlay is a
/// no-op.
pub fn composite_over(base: &mut RgbaImage, overlay: &RgbaImage) {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());

    for (base_px, overlay_px) in base.pixels_mut().zip(overlay.pixels()) {
        if overlay_px[3] == 0 {
            continue;
        }
        *base_px = blend_over(*base_px, *overlay_px);
    }
}
