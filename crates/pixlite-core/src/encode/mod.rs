//! Image encoding for pixlite.
//!
//! This module provides functionality for:
//! - Encoding pixel views to BMP, JPEG and PNG
//! - Per-format options ([`EncodeOptions`]), currently the JPEG quality
//!
//! Dispatch is a closed `match` over [`Format`]. Encoders only borrow the
//! pixels; the input is never modified and the returned
//! [`CompressedBuffer`] never aliases it.
//!
//! # Examples
//!
//! ```ignore
//! use pixlite_core::encode::{encode, EncodeOptions};
//! use pixlite_core::{Components, Format, PixelBuffer};
//!
//! let buffer = PixelBuffer::new(100, 100, Components::Rgb).unwrap();
//! let png = encode(buffer.as_view(), Format::Png, &EncodeOptions::default()).unwrap();
//! println!("Encoded {} bytes", png.len());
//! ```

mod bmp;
mod jpeg;
mod png;

pub use bmp::encode_bmp;
pub use jpeg::encode_jpeg;
pub use png::encode_png;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::buffer::{CompressedBuffer, PixelView};
use crate::format::Format;
use crate::types::ImageError;

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Per-format encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// JPEG quality (1-100, where 100 is highest quality). Out of range
    /// values are clamped when encoding.
    pub jpeg_quality: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl EncodeOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }
}

/// Encode `view` into `format`.
///
/// PNG keeps every layout, so decoding the result gives back the same
/// `components`. JPEG and BMP cannot store some layouts, and decoding
/// their output gives a different channel count:
///
/// | Input | JPEG decodes as | BMP decodes as |
/// |-------|-----------------|----------------|
/// | Gray | Gray | Gray |
/// | GrayAlpha | Gray (alpha dropped) | Rgba (gray widened) |
/// | Rgb | Rgb | Rgb |
/// | Rgba | Rgb (alpha dropped) | Rgba |
///
/// # Errors
///
/// Returns `ImageError::Encode` if the codec backend rejects the image.
pub fn encode(
    view: PixelView<'_>,
    format: Format,
    options: &EncodeOptions,
) -> Result<CompressedBuffer, ImageError> {
    let data = match format {
        Format::Bmp => encode_bmp(view)?,
        Format::Jpeg => encode_jpeg(view, options.jpeg_quality)?,
        Format::Png => encode_png(view)?,
    };

    debug!(
        "encoded {}x{} ({}) as {}: {} bytes",
        view.width(),
        view.height(),
        view.components(),
        format,
        data.len()
    );
    Ok(CompressedBuffer::new(format, data))
}
