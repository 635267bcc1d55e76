//! Core types shared by the codec, resampling and raster modules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for every pixlite operation.
#[derive(Debug, Error)]
pub enum ImageError {
    /// No supported magic bytes were found, or fewer than 4 bytes were available.
    #[error("Unsupported image format")]
    UnsupportedFormat,

    /// The bytes carried a known signature but could not be decoded.
    #[error("Image open error: {0}")]
    Decode(String),

    /// A zero width or height was requested.
    #[error("Invalid size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// The output format is unknown or could not be inferred.
    #[error("Unsupported output format: {0:?}")]
    UnsupportedOutputFormat(String),

    /// The pixel buffer could not be allocated.
    #[error("Failed to allocate {bytes} bytes for pixel buffer")]
    AllocationFailure { bytes: u128 },

    /// A pixel coordinate lies outside the buffer.
    #[error("Pixel ({x}, {y}) is outside of {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Raw pixel data does not match `width * height * components`.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Channel count outside 1..=4.
    #[error("Invalid component count: {0}")]
    InvalidComponents(u32),

    /// Unknown pixel mode name.
    #[error("Invalid mode: {0:?}")]
    InvalidMode(String),

    /// The encoder backend rejected the image.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Reading from a source or writing to a sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Number and meaning of the channels in one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Components {
    /// Grayscale ("L").
    Gray = 1,
    /// Grayscale with alpha ("LA").
    GrayAlpha = 2,
    /// Red, green, blue ("RGB").
    Rgb = 3,
    /// Red, green, blue, alpha ("RGBA").
    Rgba = 4,
}

impl Components {
    /// Samples per pixel.
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }

    /// Returns true when the last channel is alpha.
    #[inline]
    pub fn has_alpha(self) -> bool {
        matches!(self, Components::GrayAlpha | Components::Rgba)
    }

    /// Layout with the alpha channel removed.
    pub fn without_alpha(self) -> Self {
        match self {
            Components::Gray | Components::GrayAlpha => Components::Gray,
            Components::Rgb | Components::Rgba => Components::Rgb,
        }
    }

    /// Short mode name as used by `Image::new`.
    pub fn mode(self) -> &'static str {
        match self {
            Components::Gray => "L",
            Components::GrayAlpha => "LA",
            Components::Rgb => "RGB",
            Components::Rgba => "RGBA",
        }
    }

    /// The matching 8-bit color type of the `image` crate.
    pub(crate) fn color_type(self) -> image::ExtendedColorType {
        match self {
            Components::Gray => image::ExtendedColorType::L8,
            Components::GrayAlpha => image::ExtendedColorType::La8,
            Components::Rgb => image::ExtendedColorType::Rgb8,
            Components::Rgba => image::ExtendedColorType::Rgba8,
        }
    }
}

impl TryFrom<u32> for Components {
    type Error = ImageError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Components::Gray),
            2 => Ok(Components::GrayAlpha),
            3 => Ok(Components::Rgb),
            4 => Ok(Components::Rgba),
            other => Err(ImageError::InvalidComponents(other)),
        }
    }
}

impl FromStr for Components {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "L" => Ok(Components::Gray),
            "LA" => Ok(Components::GrayAlpha),
            "RGB" => Ok(Components::Rgb),
            "RGBA" => Ok(Components::Rgba),
            other => Err(ImageError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode())
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Catmull-Rom cubic interpolation (sharp, good for both directions).
    #[default]
    CatmullRom,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}
