//! BMP encoding.
//!
//! Layouts written:
//! - Gray: 8-bit indexed with a 256-entry gray palette
//! - RGB: 24-bit
//! - RGBA: 32-bit with an alpha mask
//! - Gray+alpha: widened to 32-bit RGBA, BMP has no two-channel layout

use image::codecs::bmp::BmpEncoder;
use image::ImageEncoder;

use crate::buffer::PixelView;
use crate::types::{Components, ImageError};

/// Encode a pixel view to BMP bytes.
///
/// # Errors
///
/// Returns `ImageError::Encode` if the BMP encoder fails.
pub fn encode_bmp(view: PixelView<'_>) -> Result<Vec<u8>, ImageError> {
    let widened;
    let (pixels, components) = match view.components() {
        Components::GrayAlpha => {
            widened = gray_alpha_to_rgba(view.as_bytes());
            (widened.as_slice(), Components::Rgba)
        }
        other => (view.as_bytes(), other),
    };

    let mut buffer = Vec::new();
    BmpEncoder::new(&mut buffer)
        .write_image(pixels, view.width(), view.height(), components.color_type())
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

fn gray_alpha_to_rgba(samples: &[u8]) -> Vec<u8> {
    samples
        .chunks_exact(2)
        .flat_map(|px| [px[0], px[0], px[0], px[1]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_bmp_header() {
        let data = vec![10u8; 4 * 4 * 3];
        let view = PixelView::new(&data, 4, 4, Components::Rgb).unwrap();
        let bmp = encode_bmp(view).unwrap();

        assert_eq!(&bmp[..2], b"BM");
        let file_size = u32::from_le_bytes([bmp[2], bmp[3], bmp[4], bmp[5]]);
        assert_eq!(file_size as usize, bmp.len());
    }

    #[test]
    fn test_encode_bmp_gray_stays_gray() {
        let data: Vec<u8> = (0..6 * 3).map(|i| (i * 14) as u8).collect();
        let view = PixelView::new(&data, 6, 3, Components::Gray).unwrap();
        let back = crate::decode::decode(&encode_bmp(view).unwrap()).unwrap();

        assert_eq!(back.components(), Components::Gray);
        assert_eq!(back.as_bytes(), data.as_slice());
    }

    #[test]
    fn test_encode_bmp_gray_alpha_widens() {
        let data = vec![10, 200, 30, 40];
        let view = PixelView::new(&data, 2, 1, Components::GrayAlpha).unwrap();
        let back = crate::decode::decode(&encode_bmp(view).unwrap()).unwrap();

        assert_eq!(back.components(), Components::Rgba);
        assert_eq!(back.as_bytes(), &[10, 10, 10, 200, 30, 30, 30, 40]);
    }

    #[test]
    fn test_gray_alpha_to_rgba() {
        assert_eq!(gray_alpha_to_rgba(&[1, 2, 3, 4]), vec![1, 1, 1, 2, 3, 3, 3, 4]);
        assert!(gray_alpha_to_rgba(&[]).is_empty());
    }
}
