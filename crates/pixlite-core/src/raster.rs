//! Pixel access and flat fills.
//!
//! Colors are packed into a `u32`, least-significant byte first: for RGB,
//! bits 0..8 hold red, 8..16 green and 16..24 blue; RGBA adds alpha in
//! bits 24..32. Exactly `components` low-order bytes are used, so extra
//! high bits in a color never reach neighboring samples.

use crate::buffer::{PixelView, PixelViewMut};
use crate::types::{Components, ImageError};

/// Pack up to four samples into a color, first sample in the lowest byte.
pub fn pack_color(samples: &[u8]) -> u32 {
    samples
        .iter()
        .take(4)
        .enumerate()
        .fold(0u32, |acc, (i, &s)| acc | (s as u32) << (8 * i))
}

/// Split a packed color into samples. Only the first `components.count()`
/// entries are meaningful; the rest are zero.
pub fn unpack_color(color: u32, components: Components) -> [u8; 4] {
    let bytes = color.to_le_bytes();
    let mut samples = [0u8; 4];
    let n = components.count();
    samples[..n].copy_from_slice(&bytes[..n]);
    samples
}

fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> ImageError {
    ImageError::OutOfBounds {
        x,
        y,
        width,
        height,
    }
}

/// Read pixel `(x, y)` as a packed color.
///
/// # Errors
///
/// Returns `ImageError::OutOfBounds` outside `[0, width) x [0, height)`.
pub fn get_pixel(view: PixelView<'_>, x: u32, y: u32) -> Result<u32, ImageError> {
    view.pixel(x, y)
        .map(pack_color)
        .ok_or_else(|| out_of_bounds(x, y, view.width(), view.height()))
}

/// Write pixel `(x, y)` from a packed color.
///
/// # Errors
///
/// Returns `ImageError::OutOfBounds` outside `[0, width) x [0, height)`.
pub fn put_pixel(view: &mut PixelViewMut<'_>, x: u32, y: u32, color: u32) -> Result<(), ImageError> {
    let (width, height) = view.dimensions();
    let components = view.components();
    let px = view
        .pixel_mut(x, y)
        .ok_or_else(|| out_of_bounds(x, y, width, height))?;
    px.copy_from_slice(&unpack_color(color, components)[..components.count()]);
    Ok(())
}

/// Paint a `width` x `height` rectangle with its top-left corner at `(x, y)`.
///
/// The rectangle is clipped to the image: the in-bounds part is painted and
/// a rectangle entirely outside paints nothing. Returns the number of
/// pixels written.
pub fn fill_rect(
    view: &mut PixelViewMut<'_>,
    x: i64,
    y: i64,
    width: u32,
    height: u32,
    color: u32,
) -> usize {
    let (img_w, img_h) = view.dimensions();
    let x0 = x.clamp(0, img_w as i64);
    let y0 = y.clamp(0, img_h as i64);
    let x1 = x.saturating_add(width as i64).clamp(0, img_w as i64);
    let y1 = y.saturating_add(height as i64).clamp(0, img_h as i64);
    if x0 >= x1 || y0 >= y1 {
        return 0;
    }

    let components = view.components();
    let n = components.count();
    let samples = unpack_color(color, components);
    let pixel = &samples[..n];
    let stride = view.row_stride();

    let (x0, x1) = (x0 as usize, x1 as usize);
    let data = view.as_bytes_mut();
    for row in y0 as usize..y1 as usize {
        let start = row * stride + x0 * n;
        let end = row * stride + x1 * n;
        for dst in data[start..end].chunks_exact_mut(n) {
            dst.copy_from_slice(pixel);
        }
    }

    (x1 - x0) * (y1 - y0) as usize
}

/// Paint every pixel with `color`.
pub fn fill(view: &mut PixelViewMut<'_>, color: u32) {
    let components = view.components();
    let samples = unpack_color(color, components);
    let pixel = &samples[..components.count()];
    for dst in view.as_bytes_mut().chunks_exact_mut(components.count()) {
        dst.copy_from_slice(pixel);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
