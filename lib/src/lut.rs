//! Glyph ramp lookup
//!
//! The ramp runs from the visually densest glyph to the sparsest, so dark
//! luminance lands on heavy characters and bright luminance on light ones.

/// Number of glyphs in the ramp
pub const RAMP_LEN: usize = 68;

/// Density-ordered glyph ramp, densest first
#[rustfmt::skip]
pub const GLYPH_RAMP: [&str; RAMP_LEN] = [
    "$", "@", "B", "%", "8", "&", "W", "M", "#", "*", "o", "a", "h", "k", "b", "d",
    "p", "q", "w", "m", "Z", "O", "0", "Q", "L", "C", "J", "U", "Y", "X", "z", "c",
    "v", "u", "n", "x", "r", "j", "f", "t", "/", "\\", "|", "(", ")", "1", "{", "}",
    "[", "]", "?", "-", "_", "+", "~", "<", ">", "i", "!", "l", "I", ";", ":", ",",
    "\"", "^", "`", ".",
];

/// Ramp index for a luminance value
///
/// Formula: floor(v * RAMP_LEN / 256), clamped to the last index
#[inline]
pub fn ramp_index(luminance: u8) -> usize {
    (luminance as usize * RAMP_LEN / 256).min(RAMP_LEN - 1)
}

/// Get the glyph for a luminance value
#[inline]
pub fn glyph_for_luminance(luminance: u8) -> &'static str {
    GLYPH_RAMP[ramp_index(luminance)]
}

/// Whether `glyph` is one of the ramp's glyphs
pub fn is_ramp_glyph(glyph: &str) -> bool {
    GLYPH_RAMP.contains(&glyph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ramp_has_unique_single_char_glyphs() {
        let unique: HashSet<_> = GLYPH_RAMP.iter().collect();
        assert_eq!(unique.len(), RAMP_LEN);
        assert!(GLYPH_RAMP.iter().all(|g| g.chars().count() == 1));
    }

    #[test]
    fn test_ramp_ends() {
        assert_eq!(GLYPH_RAMP[0], "$");
        assert_eq!(GLYPH_RAMP[RAMP_LEN - 1], ".");
    }

    #[test]
    fn test_ramp_index_darkest() {
        assert_eq!(ramp_index(0), 0);
        assert_eq!(glyph_for_luminance(0), "$");
    }

    #[test]
    fn test_ramp_index_brightest() {
        // 255 * 68 / 256 = 67.73
        assert_eq!(ramp_index(255), 67);
        assert_eq!(glyph_for_luminance(255), ".");
    }

    #[test]
    fn test_ramp_index_mid() {
        // 128 * 68 / 256 = 34
        assert_eq!(ramp_index(128), 34);
        assert_eq!(glyph_for_luminance(128), "n");
    }

    #[test]
    fn test_ramp_index_is_monotonic() {
        let indices: Vec<usize> = (0..=255u8).map(ramp_index).collect();
        assert!(indices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_is_ramp_glyph() {
        assert!(is_ramp_glyph("$"));
        assert!(is_ramp_glyph("\\"));
        assert!(!is_ramp_glyph(" "));
        assert!(!is_ramp_glyph("$$"));
    }
}
