//! Image decoding for pixlite.
//!
//! This module turns a complete in-memory PNG, JPEG or BMP file into a
//! [`PixelBuffer`]:
//! - The format is sniffed from the magic bytes and pinned for the decoder
//! - The output keeps the source's native channel count (no RGB upconversion)
//! - 16-bit PNG samples are narrowed to 8 bits
//! - Indexed images are expanded; gray-only BMP palettes stay one channel
//!
//! Every failure after a successful sniff surfaces as
//! [`ImageError::Decode`] with the backend's reason, whichever format was
//! attempted. Decoding is pure: the same bytes always produce the same
//! buffer.
//!
//! # Examples
//!
//! ```ignore
//! use pixlite_core::decode::decode;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let buffer = decode(&bytes).unwrap();
//! println!("Decoded {}x{} image", buffer.width(), buffer.height());
//! ```

mod bmp;

use image::DynamicImage;
use log::debug;

use crate::buffer::PixelBuffer;
use crate::format::Format;
use crate::types::{Components, ImageError};

/// Decode an image, detecting the format from its magic bytes.
///
/// # Errors
///
/// Returns `ImageError::UnsupportedFormat` if no signature matches (or
/// fewer than 4 bytes are given) and `ImageError::Decode` if the bytes
/// cannot be parsed.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, ImageError> {
    let format = Format::sniff(bytes).ok_or(ImageError::UnsupportedFormat)?;
    decode_with_format(bytes, format)
}

/// Decode an image whose format is already known.
///
/// # Errors
///
/// Returns `ImageError::Decode` if the bytes are not a valid `format` image.
pub fn decode_with_format(bytes: &[u8], format: Format) -> Result<PixelBuffer, ImageError> {
    let img = image::load_from_memory_with_format(bytes, format.image_format())
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    let gray_palette = format == Format::Bmp && bmp::has_grayscale_palette(bytes);
    let buffer = into_pixel_buffer(img, gray_palette)?;

    debug!(
        "decoded {} {}x{} ({}) from {} bytes",
        format,
        buffer.width(),
        buffer.height(),
        buffer.components(),
        bytes.len()
    );
    Ok(buffer)
}

/// Convert a decoded image into a canonical buffer, keeping its channel count.
fn into_pixel_buffer(img: DynamicImage, gray_palette: bool) -> Result<PixelBuffer, ImageError> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(ImageError::Decode(format!(
            "decoder produced an empty {width}x{height} image"
        )));
    }

    let (components, data) = match img.color().channel_count() {
        1 => (Components::Gray, img.into_luma8().into_raw()),
        2 => (Components::GrayAlpha, img.into_luma_alpha8().into_raw()),
        // Palette expansion of a gray-only palette: every pixel has R == G == B
        3 if gray_palette => (
            Components::Gray,
            img.into_rgb8().into_raw().into_iter().step_by(3).collect(),
        ),
        3 => (Components::Rgb, img.into_rgb8().into_raw()),
        _ => (Components::Rgba, img.into_rgba8().into_raw()),
    };

    if data.is_empty() {
        return Err(ImageError::Decode("decoder produced no pixel data".to_string()));
    }

    PixelBuffer::from_raw(data, width, height, components)
        .map_err(|e| ImageError::Decode(e.to_string()))
}
