//! Image source: reads and decodes image files for the converter.

use image::{DynamicImage, ImageError, ImageReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to load image '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Open and decode an image file
///
/// The format is sniffed from the file's leading bytes, falling back to the
/// extension when the contents are not recognised.
pub fn load_image(path: &Path) -> Result<DynamicImage, SourceError> {
    decode(path).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn decode(path: &Path) -> Result<DynamicImage, ImageError> {
    ImageReader::open(path)
        .map_err(ImageError::IoError)?
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()
}
