//! Pixel and compressed buffer ownership.
//!
//! [`PixelBuffer`] is the canonical decoded image: row-major, one byte per
//! sample, channels interleaved within a pixel. It owns its memory and
//! releases it exactly once when dropped, on success and error paths alike.
//! Constructors either return a fully valid buffer or an error, so a
//! half-initialized buffer is never observable.
//!
//! [`PixelView`] and [`PixelViewMut`] expose the same layout over borrowed
//! memory. They let external array libraries hand their storage to the
//! encoder, resampler and rasterizer without copying; the borrow ties the
//! view's lifetime to the memory it aliases.
//!
//! # Example
//!
//! ```ignore
//! use pixlite_core::{Components, PixelBuffer, PixelViewMut};
//!
//! let mut storage = vec![0u8; 4 * 2 * 3];
//! let mut view = PixelViewMut::new(&mut storage, 4, 2, Components::Rgb).unwrap();
//! pixlite_core::raster::put_pixel(&mut view, 1, 1, 0x112233).unwrap();
//! assert_eq!(&storage[15..18], &[0x33, 0x22, 0x11]);
//! ```

use std::io::Write;

use crate::format::Format;
use crate::types::{Components, ImageError};

/// Compute `width * height * components`, rejecting zero dimensions and
/// sizes that cannot be addressed.
pub(crate) fn checked_len(
    width: u32,
    height: u32,
    components: Components,
) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidSize { width, height });
    }

    let bytes = width as u128 * height as u128 * components.count() as u128;
    usize::try_from(bytes)
        .ok()
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(ImageError::AllocationFailure { bytes })
}

/// Allocate a zero-filled sample vector, reporting allocator refusal as an error.
fn allocate_zeroed(len: usize) -> Result<Vec<u8>, ImageError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ImageError::AllocationFailure { bytes: len as u128 })?;
    data.resize(len, 0);
    Ok(data)
}

fn validate_len(
    actual: usize,
    width: u32,
    height: u32,
    components: Components,
) -> Result<(), ImageError> {
    let expected = checked_len(width, height, components)?;
    if actual != expected {
        return Err(ImageError::InvalidBuffer { expected, actual });
    }
    Ok(())
}

/// Byte offset of pixel `(x, y)` or `None` when it lies outside the image.
#[inline]
fn pixel_offset(width: u32, height: u32, components: Components, x: u32, y: u32) -> Option<usize> {
    if x >= width || y >= height {
        return None;
    }
    Some((y as usize * width as usize + x as usize) * components.count())
}

/// Read-only view over row-major 8-bit pixel memory.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    width: u32,
    height: u32,
    components: Components,
    data: &'a [u8],
}

impl<'a> PixelView<'a> {
    /// Wrap borrowed memory, validating its length against the geometry.
    pub fn new(
        data: &'a [u8],
        width: u32,
        height: u32,
        components: Components,
    ) -> Result<Self, ImageError> {
        validate_len(data.len(), width, height, components)?;
        Ok(Self {
            width,
            height,
            components,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn components(&self) -> Components {
        self.components
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.components.count()
    }

    /// The aliased samples.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Samples of pixel `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&'a [u8]> {
        let offset = pixel_offset(self.width, self.height, self.components, x, y)?;
        Some(&self.data[offset..offset + self.components.count()])
    }

    /// Copy into a new owned buffer.
    pub fn to_buffer(&self) -> Result<PixelBuffer, ImageError> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())
            .map_err(|_| ImageError::AllocationFailure {
                bytes: self.data.len() as u128,
            })?;
        data.extend_from_slice(self.data);
        PixelBuffer::from_raw(data, self.width, self.height, self.components)
    }
}

/// Mutable view over row-major 8-bit pixel memory.
#[derive(Debug)]
pub struct PixelViewMut<'a> {
    width: u32,
    height: u32,
    components: Components,
    data: &'a mut [u8],
}

impl<'a> PixelViewMut<'a> {
    /// Wrap borrowed memory, validating its length against the geometry.
    pub fn new(
        data: &'a mut [u8],
        width: u32,
        height: u32,
        components: Components,
    ) -> Result<Self, ImageError> {
        validate_len(data.len(), width, height, components)?;
        Ok(Self {
            width,
            height,
            components,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn components(&self) -> Components {
        self.components
    }

    pub fn row_stride(&self) -> usize {
        self.width as usize * self.components.count()
    }

    /// Shared view of the same memory.
    pub fn as_view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            components: self.components,
            data: &*self.data,
        }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// Mutable samples of pixel `(x, y)`, or `None` outside the image.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let offset = pixel_offset(self.width, self.height, self.components, x, y)?;
        let len = self.components.count();
        Some(&mut self.data[offset..offset + len])
    }
}

/// Canonical decoded image owned by exactly one handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    components: Components,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidSize` for a zero dimension and
    /// `ImageError::AllocationFailure` when the memory cannot be reserved.
    pub fn new(width: u32, height: u32, components: Components) -> Result<Self, ImageError> {
        let len = checked_len(width, height, components)?;
        let data = allocate_zeroed(len)?;
        Ok(Self {
            width,
            height,
            components,
            data,
        })
    }

    /// Take ownership of existing samples without copying.
    ///
    /// # Errors
    ///
    /// Returns `ImageError::InvalidBuffer` when `data.len()` is not exactly
    /// `width * height * components`.
    pub fn from_raw(
        data: Vec<u8>,
        width: u32,
        height: u32,
        components: Components,
    ) -> Result<Self, ImageError> {
        validate_len(data.len(), width, height, components)?;
        Ok(Self {
            width,
            height,
            components,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn components(&self) -> Components {
        self.components
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.components.count()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Array shape `(rows, columns, channels)` for numeric-array consumers.
    pub fn shape(&self) -> (usize, usize, usize) {
        (
            self.height as usize,
            self.width as usize,
            self.components.count(),
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Release ownership of the samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn as_view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width,
            height: self.height,
            components: self.components,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> PixelViewMut<'_> {
        PixelViewMut {
            width: self.width,
            height: self.height,
            components: self.components,
            data: &mut self.data,
        }
    }
}

impl AsRef<[u8]> for PixelBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<'a> From<&'a PixelBuffer> for PixelView<'a> {
    fn from(buffer: &'a PixelBuffer) -> Self {
        buffer.as_view()
    }
}

/// Encoded bytes in one of the supported file formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBuffer {
    format: Format,
    data: Vec<u8>,
}

impl CompressedBuffer {
    pub(crate) fn new(format: Format, data: Vec<u8>) -> Self {
        Self { format, data }
    }

    /// Format of the encoded bytes.
    pub fn format(&self) -> Format {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Write every byte to `sink`.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> std::io::Result<()> {
        sink.write_all(&self.data)
    }
}

impl AsRef<[u8]> for CompressedBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
