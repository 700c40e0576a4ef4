//! `render` subcommand: convert image files and write the art to a stream.

use crate::source::load_image;
use asciify::{ConversionConfig, process_images};
use log::error;
use std::io::{self, Write};
use std::path::PathBuf;

/// Convert `inputs` and write their art to `out` in input order
///
/// With more than one input each block is preceded by a `==> path <==`
/// header. Images are decoded one after another, then converted in parallel.
///
/// # Returns
/// The number of inputs that failed to load or convert
pub fn render_files<W: Write>(
    inputs: &[PathBuf],
    config: &ConversionConfig,
    out: &mut W,
) -> io::Result<usize> {
    let mut failed = 0;
    let mut loaded = Vec::with_capacity(inputs.len());
    let mut images = Vec::with_capacity(inputs.len());

    for path in inputs {
        match load_image(path) {
            Ok(img) => {
                loaded.push(path);
                images.push(img);
            }
            Err(e) => {
                error!("{}", e);
                failed += 1;
            }
        }
    }

    let with_headers = inputs.len() > 1;
    for (path, result) in loaded.into_iter().zip(process_images(&images, config)) {
        match result {
            Ok(art) => {
                if with_headers {
                    writeln!(out, "==> {} <==", path.display())?;
                }
                out.write_all(art.as_bytes())?;
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    out.flush()?;
    Ok(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_render_single_file_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("black.png");
        RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])).save(&path).unwrap();

        let mut out = Vec::new();
        let failed =
            render_files(&[path], &ConversionConfig::with_scale(1.0), &mut out).unwrap();
        assert_eq!(failed, 0);
        assert_eq!(String::from_utf8(out).unwrap(), "$ $\n$ $\n");
    }

    #[test]
    fn test_render_many_files_with_failures() {
        let dir = tempfile::tempdir().unwrap();
        let black = dir.path().join("black.png");
        let white = dir.path().join("white.png");
        let missing = dir.path().join("missing.png");
        RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])).save(&black).unwrap();
        RgbImage::from_pixel(2, 2, Rgb([255, 255, 255])).save(&white).unwrap();

        let mut out = Vec::new();
        let inputs = vec![black.clone(), missing, white.clone()];
        let failed = render_files(&inputs, &ConversionConfig::with_scale(1.0), &mut out).unwrap();

        assert_eq!(failed, 1);
        let expected = format!(
            "==> {} <==\n$ $\n$ $\n==> {} <==\n. .\n. .\n",
            black.display(),
            white.display()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
