//! # Pixel signatures
//!
//! Reduces a decoded pixel buffer to three numbers: the mean intensity of the
//! red, green and blue channels, each expressed as a percentage of 255.
//!
//! ## Channel order
//!
//! Raw source buffers come in two layouts:
//!
//! - 3 bytes per pixel, ordered blue, green, red
//! - 4 bytes per pixel, ordered alpha, blue, green, red
//!
//! The alpha byte is skipped; it never contributes to the signature. Both
//! layouts feed the same red, green and blue totals. Buffers handed over by the
//! `image` crate are red, green, blue (alpha last) and are described by
//! [`PixelLayout::Rgb`] and [`PixelLayout::Rgba`].

use crate::error::{Error, Result};
use crate::types::ColorSignature;

/// Byte layout of one pixel in an interleaved buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// blue, green, red
    Bgr,
    /// alpha, blue, green, red
    Abgr,
    /// red, green, blue
    Rgb,
    /// red, green, blue, alpha
    Rgba,
}

impl PixelLayout {
    /// Layout of a raw source buffer
    pub fn from_source(has_alpha: bool) -> Self {
        if has_alpha {
            Self::Abgr
        } else {
            Self::Bgr
        }
    }

    /// Bytes per pixel
    pub fn stride(&self) -> usize {
        match self {
            Self::Bgr | Self::Rgb => 3,
            Self::Abgr | Self::Rgba => 4,
        }
    }

    /// Byte offsets of red, green and blue within one pixel
    fn offsets(&self) -> (usize, usize, usize) {
        match self {
            Self::Bgr => (2, 1, 0),
            Self::Abgr => (3, 2, 1),
            Self::Rgb | Self::Rgba => (0, 1, 2),
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Abgr | Self::Rgba)
    }
}

/// Extract a signature from a raw source buffer (see the module docs for the
/// channel order).
pub fn extract(pixels: &[u8], width: u32, height: u32, has_alpha: bool) -> Result<ColorSignature> {
    extract_with_layout(pixels, width, height, PixelLayout::from_source(has_alpha))
}

/// Extract a signature from a buffer in an explicit layout.
///
/// The buffer must hold exactly `width * height` pixels.
pub fn extract_with_layout(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<ColorSignature> {
    let area = width as u64 * height as u64;
    if area == 0 {
        return Err(Error::Decode(format!(
            "Image has zero area ({} x {})",
            width, height
        )));
    }

    let stride = layout.stride();
    if pixels.len() % stride != 0 {
        return Err(Error::Decode(format!(
            "Pixel buffer of {} bytes is not a multiple of {} bytes per pixel",
            pixels.len(),
            stride
        )));
    }

    let pixel_count = (pixels.len() / stride) as u64;
    if pixel_count != area {
        return Err(Error::Decode(format!(
            "Pixel buffer holds {} pixels, expected {} ({} x {})",
            pixel_count, area, width, height
        )));
    }

    let (r, g, b) = layout.offsets();
    let (mut total_r, mut total_g, mut total_b) = (0u64, 0u64, 0u64);
    for pixel in pixels.chunks_exact(stride) {
        total_r += pixel[r] as u64;
        total_g += pixel[g] as u64;
        total_b += pixel[b] as u64;
    }

    let area = area as f64;
    Ok(ColorSignature {
        red: to_percent(total_r, area),
        green: to_percent(total_g, area),
        blue: to_percent(total_b, area),
    })
}

/// `total / 2.55 / area`, clamped so rounding can't push a white image past 100
#[inline]
fn to_percent(total: u64, area: f64) -> f64 {
    (total as f64 / 2.55 / area).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_bgr_channel_order() {
        // One pixel: blue 0, green 51, red 255
        let signature = extract(&[0, 51, 255], 1, 1, false).unwrap();
        assert_close(signature.red, 100.0);
        assert_close(signature.green, 20.0);
        assert_close(signature.blue, 0.0);
    }

    #[test]
    fn test_abgr_skips_alpha() {
        // alpha 7, blue 0, green 51, red 255: same colour as the BGR test
        let with_alpha = extract(&[7, 0, 51, 255], 1, 1, true).unwrap();
        let without_alpha = extract(&[0, 51, 255], 1, 1, false).unwrap();
        assert_eq!(with_alpha, without_alpha);
    }

    #[test]
    fn test_rgba_layout() {
        let signature =
            extract_with_layout(&[255, 51, 0, 0, 255, 51, 0, 255], 2, 1, PixelLayout::Rgba)
                .unwrap();
        assert!(PixelLayout::Rgba.has_alpha());
        assert!(!PixelLayout::from_source(false).has_alpha());
        assert_close(signature.red, 100.0);
        assert_close(signature.green, 20.0);
        assert_close(signature.blue, 0.0);
    }

    #[test]
    fn test_average_over_area() {
        // Black and white pixels average to 50%
        let signature = extract(&[0, 0, 0, 255, 255, 255], 2, 1, false).unwrap();
        assert_close(signature.red, 50.0);
        assert_close(signature.green, 50.0);
        assert_close(signature.blue, 50.0);
    }

    #[test]
    fn test_percentages_stay_in_range() {
        let white = vec![255u8; 3 * 37 * 19];
        let signature = extract(&white, 37, 19, false).unwrap();
        for channel in [signature.red, signature.green, signature.blue] {
            assert!((0.0..=100.0).contains(&channel));
            assert_close(channel, 100.0);
        }

        let black = vec![0u8; 4 * 16];
        let signature = extract(&black, 4, 4, true).unwrap();
        assert_eq!(signature, ColorSignature::default());
    }

    #[test]
    fn test_zero_area_is_rejected() {
        assert!(matches!(extract(&[], 0, 10, false), Err(Error::Decode(_))));
        assert!(matches!(extract(&[], 10, 0, true), Err(Error::Decode(_))));
    }

    #[test]
    fn test_ragged_buffer_is_rejected() {
        assert!(matches!(
            extract(&[1, 2, 3, 4], 1, 1, false),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_truncated_buffer_is_rejected() {
        // Two pixels present, four declared
        assert!(matches!(
            extract(&[0; 6], 2, 2, false),
            Err(Error::Decode(_))
        ));
    }
}
