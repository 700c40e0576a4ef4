use crate::error::{ArtError, Result};
use image::{GenericImageView, GrayImage, Luma, Pixel, Rgb};

/// Single-channel luminance grid with the same dimensions as its source image
pub type LuminanceMap = GrayImage;

/// Calculate the luminance of one RGB pixel
///
/// Formula: Y = 0.299*R + 0.587*G + 0.114*B (ITU-R BT.601)
///
/// Channels are widened to 16 bits and weighted in 16.16 fixed point, the
/// coefficients summing to 65536, so pure white maps to 255 exactly.
#[inline]
pub fn luminance(pixel: Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0.map(|c| c as u32 * 0x101);
    ((19595 * r + 38470 * g + 7471 * b + (1 << 15)) >> 24) as u8
}

/// Reduce an image to its luminance map
///
/// Alpha is ignored. Works on any 8-bit view: RGB, RGBA, grayscale or a
/// `DynamicImage` decoded by the caller.
///
/// # Arguments
/// * `image` - Decoded source image, borrowed read-only
///
/// # Returns
/// A `LuminanceMap` of identical dimensions, or `EmptyImage` when the image
/// has zero width or height
pub fn reduce<I>(image: &I) -> Result<LuminanceMap>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ArtError::EmptyImage { width, height });
    }

    Ok(GrayImage::from_fn(width, height, |x, y| {
        Luma([luminance(image.get_pixel(x, y).to_rgb())])
    }))
}
