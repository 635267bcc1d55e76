//! JPEG encoding.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG has no alpha channel, so gray+alpha and RGBA views are encoded
//! without their alpha samples.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;

use crate::buffer::PixelView;
use crate::types::ImageError;

/// Encode a pixel view to baseline JPEG bytes.
///
/// Gray views produce a single-component JPEG; every other layout is
/// written as YCbCr. `quality` is clamped to `1..=100`.
///
/// # Errors
///
/// Returns `ImageError::Encode` if the JPEG encoder fails.
pub fn encode_jpeg(view: PixelView<'_>, quality: u8) -> Result<Vec<u8>, ImageError> {
    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let components = view.components();
    let opaque;
    let pixels = if components.has_alpha() {
        opaque = strip_alpha(view);
        opaque.as_slice()
    } else {
        view.as_bytes()
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(
            pixels,
            view.width(),
            view.height(),
            components.without_alpha().color_type(),
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Copy the color samples of every pixel, dropping the trailing alpha sample.
fn strip_alpha(view: PixelView<'_>) -> Vec<u8> {
    let n = view.components().count();
    let keep = view.components().without_alpha().count();
    view.as_bytes()
        .chunks_exact(n)
        .flat_map(|px| &px[..keep])
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::types::Components;

    fn solid(width: u32, height: u32, components: Components, value: u8) -> PixelBuffer {
        let len = (width * height) as usize * components.count();
        PixelBuffer::from_raw(vec![value; len], width, height, components).unwrap()
    }

    #[test]
    fn test_encode_jpeg_basic() {
        let buf = solid(100, 100, Components::Rgb, 128);
        let jpeg_bytes = encode_jpeg(buf.as_view(), 90).unwrap();

        // Check JPEG magic bytes (SOI marker)
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);

        // Check JPEG ends with EOI marker
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let buf = solid(10, 10, Components::Rgb, 128);

        // Quality 0 should be clamped to 1
        assert!(encode_jpeg(buf.as_view(), 0).is_ok());

        // Quality 255 should be clamped to 100
        assert!(encode_jpeg(buf.as_view(), 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_gray() {
        let buf = solid(16, 8, Components::Gray, 200);
        let jpeg = encode_jpeg(buf.as_view(), 100).unwrap();

        let back = crate::decode::decode(&jpeg).unwrap();
        assert_eq!(back.components(), Components::Gray);
        assert_eq!(back.dimensions(), (16, 8));
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let rgba = solid(12, 12, Components::Rgba, 90);
        let back = crate::decode::decode(&encode_jpeg(rgba.as_view(), 100).unwrap()).unwrap();
        assert_eq!(back.components(), Components::Rgb);
        assert_eq!(back.dimensions(), (12, 12));

        let la = solid(12, 12, Components::GrayAlpha, 90);
        let back = crate::decode::decode(&encode_jpeg(la.as_view(), 100).unwrap()).unwrap();
        assert_eq!(back.components(), Components::Gray);
    }

    #[test]
    fn test_strip_alpha() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let view = PixelView::new(&data, 2, 1, Components::Rgba).unwrap();
        assert_eq!(strip_alpha(view), vec![1, 2, 3, 5, 6, 7]);

        let view = PixelView::new(&data, 2, 2, Components::GrayAlpha).unwrap();
        assert_eq!(strip_alpha(view), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_encode_jpeg_small_image() {
        // 1x1 pixel image
        let data = vec![255, 0, 0]; // Red pixel
        let view = PixelView::new(&data, 1, 1, Components::Rgb).unwrap();

        let jpeg_bytes = encode_jpeg(view, 90).unwrap();
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_jpeg_max_quality_is_near_lossless_for_flat_color() {
        let buf = solid(16, 16, Components::Rgb, 77);
        let back = crate::decode::decode(&encode_jpeg(buf.as_view(), 100).unwrap()).unwrap();
        assert!(back.as_bytes().iter().all(|&v| v.abs_diff(77) <= 2));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
