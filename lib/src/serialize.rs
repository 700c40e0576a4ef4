//! Character grid to text
//!
//! One line per grid row, glyphs separated by a single space, every line
//! newline-terminated. No padding or escaping is applied.

use crate::ascii::CharacterGrid;

/// Render a character grid into a newline-delimited text block
///
/// An empty grid serializes to an empty string.
pub fn serialize(grid: &CharacterGrid) -> String {
    if grid.is_empty() {
        return String::new();
    }

    // Each glyph is followed by either a separator or a newline
    let mut text = String::with_capacity(grid.glyphs().map(|g| g.len() + 1).sum());
    for row in grid.rows() {
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text
}
