//! Pixlite Core - minimal image processing library
//!
//! This crate covers the small pipeline most image tooling needs:
//! open an encoded PNG, JPEG or BMP, inspect and mutate its pixels
//! (resize, thumbnail, pixel access, rectangle fill), then encode the
//! result back to any of those formats.
//!
//! Pixels always live in a [`PixelBuffer`]: tightly packed, row-major,
//! 8 bits per sample with 1 to 4 interleaved channels. [`PixelView`] and
//! [`PixelViewMut`] expose the same layout over memory owned elsewhere so
//! callers can hand in their own buffers without copying.
//!
//! The [`Image`] handle ties the stages together; the free functions in
//! [`decode`], [`encode`], [`resize`] and [`raster`] can be used directly.

pub mod buffer;
pub mod decode;
pub mod encode;
pub mod format;
mod handle;
pub mod raster;
pub mod resize;
pub mod types;

pub use buffer::{CompressedBuffer, PixelBuffer, PixelView, PixelViewMut};
pub use decode::{decode, decode_with_format};
pub use encode::{encode, EncodeOptions};
pub use format::{sniff_reader, Format};
pub use handle::Image;
pub use resize::{resize, thumbnail_dimensions};
pub use types::{Components, FilterType, ImageError};
