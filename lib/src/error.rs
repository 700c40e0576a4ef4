use thiserror::Error;

/// Errors raised by the conversion pipeline
///
/// Both variants are detected before any pixel is touched, so a failed
/// conversion never yields partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArtError {
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
}

pub type Result<T> = std::result::Result<T, ArtError>;
