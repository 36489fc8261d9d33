//! The font used for every overlay, compiled into the binary.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use photostamp_common::error::{PhotostampError, PhotostampResult};

const BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// A parsed font shared read-only by all stamping workers.
///
/// Cloning is cheap: the glyph data lives behind an `Arc`.
#[derive(Clone)]
pub struct FontAsset {
    font: FontArc,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl FontAsset {
    /// The font shipped with Photostamp (DejaVu Sans Mono).
    pub fn bundled() -> PhotostampResult<Self> {
        let font = FontArc::try_from_slice(BUNDLED_FONT).map_err(PhotostampError::font)?;
        Ok(Self { font })
    }

    /// Load a TrueType/OpenType font from raw bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> PhotostampResult<Self> {
        let font = FontArc::try_from_vec(bytes).map_err(PhotostampError::font)?;
        Ok(Self { font })
    }

    /// Distance from the top of the text box to the baseline at `px`.
    pub fn ascent(&self, px: f32) -> f32 {
        self.font.as_scaled(PxScale::from(px)).ascent()
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_font_parses() {
        let font = FontAsset::bundled().unwrap();
        let ascent = font.ascent(20.0);
        assert!(ascent > 0.0 && ascent <= 20.0, "ascent {ascent}");
    }

    #[test]
    fn test_garbage_font_is_rejected() {
        let err = FontAsset::from_bytes(vec![0u8; 16]).unwrap_err();
        assert!(matches!(err, PhotostampError::Font { .. }));
    }
}
