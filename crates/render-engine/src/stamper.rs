//! Stamping a single photo: decode, overlay, encode, persist.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::Rgb;
use photostamp_common::config::RenderDefaults;
use photostamp_common::error::{PhotostampError, PhotostampResult};
use photostamp_sequence_model::batch::{OutputFile, TimestampAssignment};

use crate::compositor::{draw_stamp, flatten_onto_black};
use crate::font::FontAsset;

/// Everything needed to render a stamp, shared read-only by all workers.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Font used for the overlay text.
    pub font: FontAsset,

    /// Font height as a fraction of image height.
    pub font_size_ratio: f32,

    /// Left edge of the text as a fraction of image width.
    pub anchor_x_ratio: f32,

    /// Baseline distance from the bottom edge, in pixels.
    pub bottom_margin_px: u32,

    /// JPEG quality (1-100).
    pub jpeg_quality: u8,

    /// Overlay text color.
    pub text_color: Rgb<u8>,
}

impl RenderConfig {
    /// Build the render config from user settings and the bundled font.
    pub fn from_defaults(defaults: &RenderDefaults) -> PhotostampResult<Self> {
        if !(1..=100).contains(&defaults.jpeg_quality) {
            return Err(PhotostampError::config(format!(
                "jpeg quality must be between 1 and 100, got {}",
                defaults.jpeg_quality
            )));
        }
        if !(defaults.font_size_ratio > 0.0 && defaults.font_size_ratio <= 1.0) {
            return Err(PhotostampError::config(format!(
                "font size ratio must be in (0, 1], got {}",
                defaults.font_size_ratio
            )));
        }
        if !(0.0..=1.0).contains(&defaults.anchor_x_ratio) {
            return Err(PhotostampError::config(format!(
                "text anchor ratio must be in [0, 1], got {}",
                defaults.anchor_x_ratio
            )));
        }

        Ok(Self {
            font: FontAsset::bundled()?,
            font_size_ratio: defaults.font_size_ratio,
            anchor_x_ratio: defaults.anchor_x_ratio,
            bottom_margin_px: defaults.bottom_margin_px,
            jpeg_quality: defaults.jpeg_quality,
            text_color: Rgb([255, 255, 255]),
        })
    }

    /// Default layout with an explicit font.
    pub fn with_font(font: FontAsset) -> Self {
        let defaults = RenderDefaults::default();
        Self {
            font,
            font_size_ratio: defaults.font_size_ratio,
            anchor_x_ratio: defaults.anchor_x_ratio,
            bottom_margin_px: defaults.bottom_margin_px,
            jpeg_quality: defaults.jpeg_quality,
            text_color: Rgb([255, 255, 255]),
        }
    }
}

/// Stamp one photo held in memory and return the encoded JPEG.
pub fn stamp_image(
    bytes: &[u8],
    assignment: &TimestampAssignment,
    config: &RenderConfig,
) -> PhotostampResult<Vec<u8>> {
    let file = assignment.file.name();
    let decoded =
        image::load_from_memory(bytes).map_err(|e| PhotostampError::decode(file, e))?;

    let mut canvas = flatten_onto_black(&decoded);
    let text = assignment.stamp_text();
    let placement = draw_stamp(&mut canvas, &text, config);
    tracing::trace!(
        file,
        text = %text,
        x = placement.x,
        y = placement.y,
        font_px = placement.font_px,
        "Drew stamp"
    );

    let mut encoded = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut encoded, config.jpeg_quality);
        encoder
            .encode_image(&canvas)
            .map_err(|e| PhotostampError::encode(file, e))?;
    }
    Ok(encoded)
}

/// Read a photo from `source_dir`, stamp it, and write the result into
/// `target_dir` under its normalized output name.
pub fn stamp_file(
    source_dir: &Path,
    target_dir: &Path,
    assignment: &TimestampAssignment,
    config: &RenderConfig,
) -> PhotostampResult<OutputFile> {
    let source_path = assignment.file.path_in(source_dir);
    let bytes = std::fs::read(&source_path).map_err(|e| PhotostampError::io(&source_path, e))?;

    let encoded = stamp_image(&bytes, assignment, config)?;

    let name = assignment.file.output_name();
    let path = target_dir.join(&name);
    std::fs::write(&path, &encoded).map_err(|e| PhotostampError::io(&path, e))?;

    tracing::debug!(
        input = assignment.file.name(),
        output = %path.display(),
        bytes = encoded.len(),
        "Stamped photo"
    );

    Ok(OutputFile { name, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
    use photostamp_sequence_model::batch::InputFile;
    use photostamp_sequence_model::timestamp::parse_start_time;
    use std::io::Cursor;

    fn assignment(name: &str) -> TimestampAssignment {
        TimestampAssignment {
            file: InputFile::new(name),
            timestamp: parse_start_time("2023-01-01 00:00:05").unwrap(),
        }
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([10, 20, 30]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_stamp_image_outputs_jpeg_of_same_size() {
        let config = RenderConfig::from_defaults(&RenderDefaults::default()).unwrap();
        let out = stamp_image(&png_bytes(320, 240), &assignment("a.png"), &config).unwrap();

        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.dimensions(), (320, 240));
    }

    #[test]
    fn test_stamp_image_draws_white_text_near_bottom_right() {
        let config = RenderConfig::from_defaults(&RenderDefaults::default()).unwrap();
        let out = stamp_image(&png_bytes(800, 600), &assignment("a.png"), &config).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_rgb8();

        let bright = (550..581)
            .flat_map(|y| (560..800).map(move |x| (x, y)))
            .any(|(x, y)| decoded.get_pixel(x, y).0[0] > 150);
        assert!(bright, "expected stamp pixels in the lower right");

        let top_left = decoded.get_pixel(10, 10).0;
        assert!(top_left.iter().all(|c| *c < 60));
    }

    #[test]
    fn test_transparent_pixels_come_out_black() {
        let img = image::RgbaImage::from_pixel(200, 150, image::Rgba([255, 255, 255, 0]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();

        let config = RenderConfig::from_defaults(&RenderDefaults::default()).unwrap();
        let out = stamp_image(&buf, &assignment("clear.png"), &config).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_rgb8();

        let top_left = decoded.get_pixel(10, 10).0;
        assert!(top_left.iter().all(|c| *c < 16), "got {top_left:?}");
    }

    #[test]
    fn test_corrupt_input_is_decode_error() {
        let config = RenderConfig::from_defaults(&RenderDefaults::default()).unwrap();
        let err = stamp_image(b"definitely not a photo", &assignment("bad.png"), &config)
            .unwrap_err();
        match err {
            PhotostampError::Decode { file, .. } => assert_eq!(file, "bad.png"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_quality_rejected() {
        let defaults = RenderDefaults {
            jpeg_quality: 0,
            ..RenderDefaults::default()
        };
        assert!(matches!(
            RenderConfig::from_defaults(&defaults),
            Err(PhotostampError::Config { .. })
        ));
    }

    #[test]
    fn test_stamp_file_writes_normalized_name() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        std::fs::write(source.path().join("trip.day1.png"), png_bytes(64, 48)).unwrap();

        let config = RenderConfig::from_defaults(&RenderDefaults::default()).unwrap();
        let output = stamp_file(
            source.path(),
            target.path(),
            &assignment("trip.day1.png"),
            &config,
        )
        .unwrap();

        assert_eq!(output.name, "trip.day1.jpg");
        assert_eq!(output.path, target.path().join("trip.day1.jpg"));
        assert!(output.path.is_file());
    }

    #[test]
    fn test_stamp_file_missing_input_is_io_error() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        let config = RenderConfig::from_defaults(&RenderDefaults::default()).unwrap();

        let err = stamp_file(source.path(), target.path(), &assignment("gone.png"), &config)
            .unwrap_err();
        assert!(matches!(err, PhotostampError::Io { .. }));
    }
}
