//! PNG encoding.

use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use crate::buffer::PixelView;
use crate::types::ImageError;

/// Encode a pixel view to 8-bit PNG bytes, keeping every channel.
///
/// # Errors
///
/// Returns `ImageError::Encode` if the PNG encoder fails.
pub fn encode_png(view: PixelView<'_>) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            view.as_bytes(),
            view.width(),
            view.height(),
            view.components().color_type(),
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Components;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let data = vec![0u8; 3 * 3];
        let view = PixelView::new(&data, 3, 3, Components::Gray).unwrap();
        let png = encode_png(view).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_one_pixel_each_layout() {
        for components in [
            Components::Gray,
            Components::GrayAlpha,
            Components::Rgb,
            Components::Rgba,
        ] {
            let data: Vec<u8> = (1..=components.count() as u8).collect();
            let view = PixelView::new(&data, 1, 1, components).unwrap();
            let back = crate::decode::decode(&encode_png(view).unwrap()).unwrap();
            assert_eq!(back.as_bytes(), data.as_slice());
            assert_eq!(back.components(), components);
        }
    }
}
