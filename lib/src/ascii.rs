use crate::config::validate_scale;
use crate::error::{ArtError, Result};
use crate::filters::LuminanceMap;
use crate::lut::glyph_for_luminance;
use std::slice::Chunks;

/// Grid of glyphs produced by the glyph mapper, stored row-major
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterGrid {
    width: u32,
    height: u32,
    cells: Vec<&'static str>,
}

impl CharacterGrid {
    /// Grid with no rows and no columns
    pub fn empty() -> Self {
        Self::default()
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

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Glyph at column `x`, row `y`
    pub fn get(&self, x: u32, y: u32) -> Option<&'static str> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(cell_index(x, y, self.width)).copied()
    }

    /// Rows from top to bottom, each a slice of `width` glyphs
    pub fn rows(&self) -> Chunks<'_, &'static str> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// All glyphs in row-major order
    pub fn glyphs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().copied()
    }
}

/// Row-major offset of (x, y), computed in `usize` so grids past 2^32 cells index correctly
#[inline]
fn cell_index(x: u32, y: u32, width: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Calculate the character grid size for a source image
///
/// 1. Provisional size: floor(width * scale) x floor(height * scale)
/// 2. Aspect ratio ar = width / height
/// 3. Portrait (ar < 1) recomputes the width as round(height' * ar),
///    anything else (square included) recomputes the height as round(width' / ar)
///
/// # Arguments
/// * `width` - Source width in pixels, non-zero
/// * `height` - Source height in pixels, non-zero
/// * `scale` - Validated scale in (0, 1]
///
/// # Returns
/// A tuple of (columns, rows)
pub fn output_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    let mut out_width = (width as f64 * scale).floor() as u32;
    let mut out_height = (height as f64 * scale).floor() as u32;

    let aspect_ratio = width as f64 / height as f64;
    if aspect_ratio < 1.0 {
        out_width = (out_height as f64 * aspect_ratio).round() as u32;
    } else {
        out_height = (out_width as f64 / aspect_ratio).round() as u32;
    }

    (out_width, out_height)
}

/// Resample a luminance map onto a character grid
///
/// Each output cell (ox, oy) samples the source at
/// (floor(ox / scale), floor(oy / scale)), clamped to the source bounds, and
/// takes the ramp glyph for that luminance. Truncation biases sampling toward
/// earlier rows and columns; golden outputs depend on it.
///
/// # Arguments
/// * `lum` - Luminance map of the source image
/// * `scale` - Fraction of the source resolution to render; values above 1 are clamped to 1
///
/// # Returns
/// The character grid, empty when either output dimension rounds to zero
pub fn map_to_glyphs(lum: &LuminanceMap, scale: f64) -> Result<CharacterGrid> {
    validate_scale(scale)?;

    let (width, height) = lum.dimensions();
    if width == 0 || height == 0 {
        return Err(ArtError::EmptyImage { width, height });
    }

    let scale = if scale > 1.0 {
        log::debug!("clamping scale {} to 1.0", scale);
        1.0
    } else {
        scale
    };

    let (out_width, out_height) = output_dimensions(width, height, scale);
    log::debug!(
        "mapping {}x{} luminance map to {}x{} glyphs (scale {})",
        width,
        height,
        out_width,
        out_height,
        scale
    );
    if out_width == 0 || out_height == 0 {
        return Ok(CharacterGrid::empty());
    }

    let source_coord = |out: u32, limit: u32| ((out as f64 / scale).floor() as u32).min(limit - 1);

    let mut cells = Vec::with_capacity(out_width as usize * out_height as usize);
    for oy in 0..out_height {
        let sy = source_coord(oy, height);
        for ox in 0..out_width {
            let sx = source_coord(ox, width);
            cells.push(glyph_for_luminance(lum.get_pixel(sx, sy)[0]));
        }
    }

    Ok(CharacterGrid {
        width: out_width,
        height: out_height,
        cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lut::{GLYPH_RAMP, is_ramp_glyph};
    use image::{GrayImage, Luma};

    #[test]
    fn test_output_dimensions_landscape() {
        assert_eq!(output_dimensions(100, 50, 0.5), (50, 25));
    }

    #[test]
    fn test_output_dimensions_portrait() {
        assert_eq!(output_dimensions(50, 100, 0.5), (25, 50));
    }

    #[test]
    fn test_output_dimensions_square_takes_height_branch() {
        assert_eq!(output_dimensions(10, 10, 0.5), (5, 5));
        assert_eq!(output_dimensions(3, 3, 0.5), (1, 1));
    }

    #[test]
    fn test_output_dimensions_landscape_rounds_height_up() {
        // Provisional 3x2, height recomputed as round(3 / (10 / 9)) = round(2.7)
        assert_eq!(output_dimensions(10, 9, 0.3), (3, 3));
    }

    #[test]
    fn test_output_dimensions_portrait_rounds_width_up() {
        // Provisional 2x3, width recomputed as round(3 * 0.9) = round(2.7)
        assert_eq!(output_dimensions(9, 10, 0.3), (3, 3));
    }

    #[test]
    fn test_map_white_and_black() {
        let white = GrayImage::from_pixel(2, 2, Luma([255]));
        let grid = map_to_glyphs(&white, 1.0).unwrap();
        assert_eq!(grid.dimensions(), (2, 2));
        assert!(grid.glyphs().all(|g| g == GLYPH_RAMP[67]));

        let black = GrayImage::from_pixel(2, 2, Luma([0]));
        let grid = map_to_glyphs(&black, 1.0).unwrap();
        assert!(grid.glyphs().all(|g| g == "$"));
    }

    #[test]
    fn test_map_samples_with_truncation() {
        // Column x carries luminance 25 * x, so each glyph reveals its source column
        let lum = GrayImage::from_fn(10, 9, |x, _| Luma([(x * 25) as u8]));
        let grid = map_to_glyphs(&lum, 0.3).unwrap();
        assert_eq!(grid.dimensions(), (3, 3));

        // ox / 0.3 -> 0, 3.33, 6.67 -> columns 0, 3, 6
        for (ox, sx) in [(0, 0u32), (1, 3), (2, 6)] {
            assert_eq!(
                grid.get(ox, 0),
                Some(glyph_for_luminance((sx * 25) as u8)),
                "column {ox}"
            );
        }
    }

    #[test]
    fn test_map_clamps_scale_above_one() {
        let lum = GrayImage::from_pixel(4, 2, Luma([90]));
        let clamped = map_to_glyphs(&lum, 3.0).unwrap();
        assert_eq!(clamped, map_to_glyphs(&lum, 1.0).unwrap());
        assert_eq!(clamped.dimensions(), (4, 2));
    }

    #[test]
    fn test_map_tiny_scale_gives_empty_grid() {
        let lum = GrayImage::from_pixel(3, 1, Luma([10]));
        let grid = map_to_glyphs(&lum, 0.5).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(grid.dimensions(), (0, 0));
    }

    #[test]
    fn test_map_rejects_bad_scale() {
        let lum = GrayImage::from_pixel(2, 2, Luma([10]));
        assert_eq!(map_to_glyphs(&lum, 0.0), Err(ArtError::InvalidScale(0.0)));
        assert_eq!(map_to_glyphs(&lum, -1.0), Err(ArtError::InvalidScale(-1.0)));
        assert!(matches!(
            map_to_glyphs(&lum, f64::NAN),
            Err(ArtError::InvalidScale(_))
        ));
    }

    #[test]
    fn test_map_rejects_empty_map() {
        let lum = GrayImage::new(0, 4);
        assert!(matches!(
            map_to_glyphs(&lum, 0.5),
            Err(ArtError::EmptyImage { .. })
        ));
    }

    #[test]
    fn test_map_only_emits_ramp_glyphs() {
        let lum = GrayImage::from_fn(64, 48, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
        let grid = map_to_glyphs(&lum, 0.75).unwrap();
        assert!(!grid.is_empty());
        assert!(grid.glyphs().all(is_ramp_glyph));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_cell_index_past_u32_range() {
        assert_eq!(cell_index(1, 70_000, 70_000), 4_900_000_001);
        let max = u32::MAX as usize;
        assert_eq!(cell_index(u32::MAX, u32::MAX, u32::MAX), max * (max + 1));
    }

    #[test]
    fn test_grid_rows_and_get() {
        let lum = GrayImage::from_fn(4, 2, |_, y| Luma([if y == 0 { 0 } else { 255 }]));
        let grid = map_to_glyphs(&lum, 1.0).unwrap();
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ["$"; 4]);
        assert_eq!(rows[1], ["."; 4]);
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }
}
