//! asciify - image to ASCII art text converter
//!
//! The pipeline reduces a decoded image to luminance, resamples it onto a
//! smaller character grid with aspect-ratio correction, and maps every cell
//! onto a fixed 68-glyph density ramp. It never touches files or sockets:
//! callers hand in a decoded image and get a `String` back.
//!
//! # Example
//! ```no_run
//! use asciify::{process_image, ConversionConfig};
//!
//! let input = image::open("photo.jpg").unwrap();
//! let art = process_image(&input, &ConversionConfig::default()).unwrap();
//! print!("{art}");
//! ```

pub mod ascii;
pub mod config;
pub mod error;
pub mod filters;
pub mod lut;
pub mod processor;
pub mod serialize;

// Re-export main types for convenience
pub use ascii::{CharacterGrid, map_to_glyphs, output_dimensions};
pub use config::{ConversionConfig, DEFAULT_SCALE};
pub use error::{ArtError, Result};
pub use filters::{LuminanceMap, reduce};
pub use lut::GLYPH_RAMP;
pub use processor::{process_image, process_images};
pub use serialize::serialize;
