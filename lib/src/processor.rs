use crate::ascii::map_to_glyphs;
use crate::config::ConversionConfig;
use crate::error::Result;
use crate::filters::reduce;
use crate::serialize::serialize;
use image::{GenericImageView, Pixel};
use rayon::prelude::*;

/// Converts a decoded image to ASCII art text
///
/// Runs the full pipeline on the calling thread:
/// 1. Validate the configuration
/// 2. Reduce the image to a luminance map
/// 3. Resample the map onto a character grid
/// 4. Serialize the grid to text
///
/// # Arguments
/// * `image` - The decoded source image
/// * `config` - Conversion parameters
///
/// # Returns
/// The newline-delimited ASCII art, or the first error hit; nothing partial
/// is returned
pub fn process_image<I>(image: &I, config: &ConversionConfig) -> Result<String>
where
    I: GenericImageView,
    I::Pixel: Pixel<Subpixel = u8>,
{
    config.validate()?;

    let lum = reduce(image)?;
    let grid = map_to_glyphs(&lum, config.scale)?;
    Ok(serialize(&grid))
}

/// Converts several independent images in parallel
///
/// Results come back in input order. A failure only affects its own entry.
pub fn process_images<I>(images: &[I], config: &ConversionConfig) -> Vec<Result<String>>
where
    I: GenericImageView + Sync,
    I::Pixel: Pixel<Subpixel = u8>,
{
    images
        .par_iter()
        .map(|image| process_image(image, config))
        .collect()
}
