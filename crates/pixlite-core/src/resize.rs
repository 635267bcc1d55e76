//! Image resampling and thumbnail sizing.
//!
//! Provides resize operations using the `image` crate's separable filters.
//! All functions return new `PixelBuffer` instances without modifying the
//! input, and the channel layout of the source is kept.
//!
//! Target sizes are validated before anything is allocated: a zero width or
//! height is `ImageError::InvalidSize`.

use image::imageops;
use image::{ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};
use log::debug;

use crate::buffer::{checked_len, PixelBuffer, PixelView};
use crate::types::{Components, FilterType, ImageError};

/// Resize an image to exact dimensions with the default filter.
///
/// # Errors
///
/// Returns `ImageError::InvalidSize` if `width` or `height` is zero.
pub fn resize(view: PixelView<'_>, width: u32, height: u32) -> Result<PixelBuffer, ImageError> {
    resize_with_filter(view, width, height, FilterType::default())
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `view` - The source pixels
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `ImageError::InvalidSize` for a zero target dimension and
/// `ImageError::AllocationFailure` if the target cannot be addressed.
pub fn resize_with_filter(
    view: PixelView<'_>,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, ImageError> {
    let components = view.components();
    checked_len(width, height, components)?;

    // Fast path: if dimensions match, just copy
    if view.dimensions() == (width, height) {
        return view.to_buffer();
    }

    let filter = filter.to_image_filter();
    let data = match components {
        Components::Gray => resample::<Luma<u8>>(view, width, height, filter)?,
        Components::GrayAlpha => resample::<LumaA<u8>>(view, width, height, filter)?,
        Components::Rgb => resample::<Rgb<u8>>(view, width, height, filter)?,
        Components::Rgba => resample::<Rgba<u8>>(view, width, height, filter)?,
    };

    debug!(
        "resized {}x{} -> {}x{} ({})",
        view.width(),
        view.height(),
        width,
        height,
        components
    );
    PixelBuffer::from_raw(data, width, height, components)
}

fn resample<P>(
    view: PixelView<'_>,
    width: u32,
    height: u32,
    filter: imageops::FilterType,
) -> Result<Vec<u8>, ImageError>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let bytes = view.as_bytes();
    let src: ImageBuffer<P, &[u8]> = ImageBuffer::from_raw(view.width(), view.height(), bytes)
        .ok_or(ImageError::InvalidBuffer {
            expected: view.row_stride() * view.height() as usize,
            actual: bytes.len(),
        })?;
    Ok(imageops::resize(&src, width, height, filter).into_raw())
}

/// Compute the size of an aspect-preserving thumbnail.
///
/// The current size `(x, y)` is fitted into `bounds = (w, h)` in exactly
/// two passes, width first:
///
/// ```text
/// if x > w: y = round(y * w / x); x = w
/// if y > h: x = round(x * h / y); y = h
/// ```
///
/// Rounding is half-up, computed in integer arithmetic, and each rescaled
/// side is kept at least 1 pixel. Images that already fit are unchanged
/// (never upscaled).
///
/// # Errors
///
/// Returns `ImageError::InvalidSize` if either bound is zero.
pub fn thumbnail_dimensions(
    current: (u32, u32),
    bounds: (u32, u32),
) -> Result<(u32, u32), ImageError> {
    let (w, h) = bounds;
    if w == 0 || h == 0 {
        return Err(ImageError::InvalidSize {
            width: w,
            height: h,
        });
    }

    let (mut x, mut y) = current;
    if x > w {
        y = scale_rounded(y, w, x);
        x = w;
    }
    if y > h {
        x = scale_rounded(x, h, y);
        y = h;
    }
    Ok((x, y))
}

/// `round(value * num / den)` with halves rounded up, at least 1.
///
/// Callers guarantee `num < den`, so the result never exceeds `value`.
fn scale_rounded(value: u32, num: u32, den: u32) -> u32 {
    let scaled = (2 * value as u64 * num as u64 + den as u64) / (2 * den as u64);
    (scaled as u32).max(1)
}

/// Resize `view` to fit within `bounds` while preserving aspect ratio.
///
/// # Errors
///
/// Returns `ImageError::InvalidSize` if either bound is zero.
pub fn thumbnail(view: PixelView<'_>, bounds: (u32, u32)) -> Result<PixelBuffer, ImageError> {
    let (width, height) = thumbnail_dimensions(view.dimensions(), bounds)?;
    resize(view, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32, components: Components) -> PixelBuffer {
        // Create a simple gradient image for testing
        let n = components.count();
        let mut pixels = Vec::with_capacity((width * height) as usize * n);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                for c in 1..n {
                    pixels.push(((y * 255) / height.max(1)) as u8 ^ (c as u8 * 40));
                }
            }
        }
        PixelBuffer::from_raw(pixels, width, height, components).unwrap()
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50, Components::Rgb);
        let resized = resize(img.as_view(), 50, 25).unwrap();

        assert_eq!(resized.dimensions(), (50, 25));
        assert_eq!(resized.as_bytes().len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50, Components::Rgb);
        let resized = resize(img.as_view(), 100, 50).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_upscale() {
        let img = create_test_image(50, 25, Components::Rgb);
        let resized = resize_with_filter(img.as_view(), 100, 50, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.dimensions(), (100, 50));
    }

    #[test]
    fn test_resize_keeps_components() {
        for components in [
            Components::Gray,
            Components::GrayAlpha,
            Components::Rgb,
            Components::Rgba,
        ] {
            let img = create_test_image(40, 30, components);
            let resized = resize(img.as_view(), 13, 47).unwrap();
            assert_eq!(resized.components(), components);
            assert_eq!(resized.byte_size(), 13 * 47 * components.count());
        }
    }

    #[test]
    fn test_resize_to_single_pixel() {
        let img = create_test_image(64, 64, Components::Rgba);
        let resized = resize(img.as_view(), 1, 1).unwrap();
        assert_eq!(resized.dimensions(), (1, 1));
        assert_eq!(resized.as_bytes().len(), 4);
    }

    #[test]
    fn test_resize_flat_color_is_stable() {
        let img = PixelBuffer::from_raw(vec![200u8; 30 * 20 * 3], 30, 20, Components::Rgb).unwrap();
        for (w, h) in [(7, 3), (90, 60), (1, 1)] {
            let resized = resize(img.as_view(), w, h).unwrap();
            assert!(resized.as_bytes().iter().all(|&v| v.abs_diff(200) <= 1));
        }
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50, Components::Rgb);

        assert!(matches!(
            resize(img.as_view(), 0, 50),
            Err(ImageError::InvalidSize { width: 0, height: 50 })
        ));
        assert!(matches!(
            resize(img.as_view(), 50, 0),
            Err(ImageError::InvalidSize { width: 50, height: 0 })
        ));
    }

    #[test]
    fn test_resize_does_not_touch_source() {
        let img = create_test_image(20, 20, Components::Gray);
        let before = img.clone();
        resize(img.as_view(), 5, 5).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50, Components::Rgb);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::CatmullRom,
            FilterType::Lanczos3,
        ] {
            let resized = resize_with_filter(img.as_view(), 50, 25, filter).unwrap();
            assert_eq!(resized.dimensions(), (50, 25));
        }
    }

    #[test]
    fn test_thumbnail_dimensions_reference_case() {
        // 184 * 128/256 = 92 > 90, then 128 * 90/92 = 125.2
        assert_eq!(thumbnail_dimensions((256, 184), (128, 90)).unwrap(), (125, 90));
    }

    #[test]
    fn test_thumbnail_dimensions_rounds_half_up() {
        // 3 * 2/4 = 1.5 -> 2
        assert_eq!(thumbnail_dimensions((4, 3), (2, 10)).unwrap(), (2, 2));
        // 5 * 1/2 = 2.5 -> 3
        assert_eq!(thumbnail_dimensions((2, 5), (1, 10)).unwrap(), (1, 3));
    }

    #[test]
    fn test_thumbnail_dimensions_height_only() {
        assert_eq!(thumbnail_dimensions((100, 400), (200, 100)).unwrap(), (25, 100));
    }

    #[test]
    fn test_thumbnail_dimensions_already_fits() {
        assert_eq!(thumbnail_dimensions((100, 50), (256, 256)).unwrap(), (100, 50));
    }

    #[test]
    fn test_thumbnail_dimensions_minimum_one_pixel() {
        assert_eq!(thumbnail_dimensions((1000, 1), (10, 10)).unwrap(), (10, 1));
        assert_eq!(thumbnail_dimensions((1, 1000), (10, 10)).unwrap(), (1, 10));
    }

    #[test]
    fn test_thumbnail_dimensions_zero_bounds_error() {
        assert!(matches!(
            thumbnail_dimensions((100, 100), (0, 100)),
            Err(ImageError::InvalidSize { .. })
        ));
        assert!(matches!(
            thumbnail_dimensions((100, 100), (100, 0)),
            Err(ImageError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_thumbnail() {
        let img = create_test_image(256, 184, Components::Rgb);
        let thumb = thumbnail(img.as_view(), (128, 90)).unwrap();
        assert_eq!(thumb.dimensions(), (125, 90));
        assert_eq!(thumb.components(), Components::Rgb);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
