//! High-level image handle.
//!
//! [`Image`] owns exactly one [`PixelBuffer`] and ties the pipeline
//! together: open (sniff, read, decode), mutate (resize, thumbnail, pixel
//! and rectangle drawing) and save (encode, write). Byte sources only need
//! `Read + Seek` so the magic bytes can be peeked; sinks only need `Write`.
//!
//! # Example
//!
//! ```ignore
//! use pixlite_core::{Format, Image};
//!
//! let mut img = Image::open_path("photo.jpg")?;
//! img.thumbnail(128, 128)?;
//! img.save_path("thumb.png", None)?;
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use log::debug;

use crate::buffer::{CompressedBuffer, PixelBuffer};
use crate::decode::{decode, decode_with_format};
use crate::encode::{encode, EncodeOptions};
use crate::format::{sniff_reader, Format};
use crate::raster;
use crate::resize::{resize_with_filter, thumbnail_dimensions};
use crate::types::{Components, FilterType, ImageError};

/// A decoded image with exclusive ownership of its pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    buffer: PixelBuffer,
}

impl Image {
    /// Read and decode an image from a byte source.
    ///
    /// The first 4 bytes are peeked to identify the format before anything
    /// else is read; the source is then read from its original position to
    /// the end.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::UnsupportedFormat` for unknown magic bytes,
    /// `ImageError::Decode` for corrupt data and `ImageError::Io` if the
    /// source fails.
    pub fn open<R: Read + Seek>(mut source: R) -> Result<Self, ImageError> {
        let format = sniff_reader(&mut source)?.ok_or(ImageError::UnsupportedFormat)?;

        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;

        let buffer = decode_with_format(&bytes, format)?;
        Ok(Self { buffer })
    }

    /// Open and decode the file at `path`.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        debug!("opening {}", path.display());
        Self::open(BufReader::new(File::open(path)?))
    }

    /// Decode an in-memory encoded image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        Ok(Self {
            buffer: decode(bytes)?,
        })
    }

    /// Create a `width` x `height` image filled with `background`.
    pub fn new(
        width: u32,
        height: u32,
        components: Components,
        background: u32,
    ) -> Result<Self, ImageError> {
        let mut buffer = PixelBuffer::new(width, height, components)?;
        raster::fill(&mut buffer.as_view_mut(), background);
        Ok(Self { buffer })
    }

    /// Wrap raw row-major samples without copying.
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        components: Components,
    ) -> Result<Self, ImageError> {
        Ok(Self {
            buffer: PixelBuffer::from_raw(data, width, height, components)?,
        })
    }

    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    /// Returns the size of the image as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn components(&self) -> Components {
        self.buffer.components()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// Returns a resized copy of this image; `self` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidSize` if `width` or `height` is zero.
    pub fn resize(&self, width: u32, height: u32) -> Result<Image, ImageError> {
        self.resize_with_filter(width, height, FilterType::default())
    }

    pub fn resize_with_filter(
        &self,
        width: u32,
        height: u32,
        filter: FilterType,
    ) -> Result<Image, ImageError> {
        Ok(Image {
            buffer: resize_with_filter(self.buffer.as_view(), width, height, filter)?,
        })
    }

    /// Shrink this image in place to fit within `width` x `height`,
    /// preserving its aspect ratio.
    ///
    /// On error the image is unchanged. On success the previous buffer is
    /// dropped as the new one is installed.
    pub fn thumbnail(&mut self, width: u32, height: u32) -> Result<(), ImageError> {
        let (x, y) = thumbnail_dimensions(self.size(), (width, height))?;
        self.buffer = resize_with_filter(self.buffer.as_view(), x, y, FilterType::default())?;
        Ok(())
    }

    /// Read pixel `(x, y)` as a packed color.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<u32, ImageError> {
        raster::get_pixel(self.buffer.as_view(), x, y)
    }

    /// Write pixel `(x, y)` from a packed color.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: u32) -> Result<(), ImageError> {
        raster::put_pixel(&mut self.buffer.as_view_mut(), x, y, color)
    }

    /// Fill a rectangle, clipped to the image bounds.
    pub fn draw_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: u32) {
        raster::fill_rect(&mut self.buffer.as_view_mut(), x, y, width, height, color);
    }

    /// Encode this image into `format`.
    pub fn encode(
        &self,
        format: Format,
        options: &EncodeOptions,
    ) -> Result<CompressedBuffer, ImageError> {
        encode(self.buffer.as_view(), format, options)
    }

    /// Encode with default options and write the bytes to `sink`.
    pub fn save<W: Write>(&self, sink: W, format: Format) -> Result<(), ImageError> {
        self.save_with_options(sink, format, &EncodeOptions::default())
    }

    pub fn save_with_options<W: Write>(
        &self,
        mut sink: W,
        format: Format,
        options: &EncodeOptions,
    ) -> Result<(), ImageError> {
        let compressed = self.encode(format, options)?;
        compressed.write_to(&mut sink)?;
        sink.flush()?;
        Ok(())
    }

    /// Save to `path`. An explicit `format` wins; otherwise the format is
    /// inferred from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::UnsupportedOutputFormat` if no format is given
    /// and the extension is not one of `bmp`, `jpg`, `jpeg` or `png`. The
    /// file is not created in that case.
    pub fn save_path(&self, path: impl AsRef<Path>, format: Option<Format>) -> Result<(), ImageError> {
        let path = path.as_ref();
        let format = format
            .or_else(|| Format::from_path(path))
            .ok_or_else(|| ImageError::UnsupportedOutputFormat(path.display().to_string()))?;

        // Encode before touching the filesystem so failures leave no file behind
        let compressed = self.encode(format, &EncodeOptions::default())?;
        let mut sink = BufWriter::new(File::create(path)?);
        compressed.write_to(&mut sink)?;
        sink.flush()?;

        debug!("saved {} as {}", path.display(), format);
        Ok(())
    }
}

impl From<PixelBuffer> for Image {
    fn from(buffer: PixelBuffer) -> Self {
        Self::from_buffer(buffer)
    }
}
