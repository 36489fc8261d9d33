//! Overlay compositor: places and draws the timestamp on a canvas.
//!
//! Layout is relative to the photo so that stamps look the same on any
//! resolution: the font height is a fraction of the image height, the text
//! starts at a fraction of the width, and its baseline sits a fixed number
//! of pixels above the bottom edge.

use ab_glyph::PxScale;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;

use crate::font::FontAsset;
use crate::stamper::RenderConfig;

/// Where and how large the timestamp is drawn on one photo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    /// Left edge of the text in pixels.
    pub x: i32,
    /// Top of the text box in pixels (what `imageproc` positions by).
    pub y: i32,
    /// Baseline in pixels.
    pub baseline: f32,
    /// Font height in pixels.
    pub font_px: f32,
}

/// Convert a decoded photo to the RGB canvas the stamp is drawn on.
///
/// Transparent pixels are composited over black, so a fully transparent
/// pixel comes out black whatever color it hides.
pub fn flatten_onto_black(decoded: &DynamicImage) -> RgbImage {
    if !decoded.color().has_alpha() {
        return decoded.to_rgb8();
    }
    let rgba = decoded.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let scale = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        Rgb([scale(r), scale(g), scale(b)])
    })
}

/// Compute the text placement for an image of the given size.
pub fn text_placement(width: u32, height: u32, config: &RenderConfig) -> TextPlacement {
    let font_px = (height as f32 * config.font_size_ratio).max(1.0);
    let baseline = height as f32 - config.bottom_margin_px as f32;
    let ascent = config.font.ascent(font_px);

    TextPlacement {
        x: (width as f32 * config.anchor_x_ratio).round() as i32,
        y: (baseline - ascent).round() as i32,
        baseline,
        font_px,
    }
}

/// Draw `text` onto `canvas` at the placement for its size.
///
/// Glyphs falling outside the canvas are clipped.
pub fn draw_stamp(canvas: &mut RgbImage, text: &str, config: &RenderConfig) -> TextPlacement {
    let placement = text_placement(canvas.width(), canvas.height(), config);
    draw_with_font(canvas, text, &placement, config.text_color, &config.font);
    placement
}

fn draw_with_font(
    canvas: &mut RgbImage,
    text: &str,
    placement: &TextPlacement,
    color: Rgb<u8>,
    font: &FontAsset,
) {
    draw_text_mut(
        canvas,
        color,
        placement.x,
        placement.y,
        PxScale::from(placement.font_px),
        font.font(),
        text,
    );
}
