use crate::error::{ArtError, Result};

/// Scale used when none is configured
pub const DEFAULT_SCALE: f64 = 0.5;

/// Configuration for ASCII art conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionConfig {
    /// Fraction of the source resolution to render, conventionally in (0, 1]
    pub scale: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
        }
    }
}

impl ConversionConfig {
    pub fn with_scale(scale: f64) -> Self {
        Self { scale }
    }

    /// Validates the configuration parameters
    ///
    /// Values above 1 pass validation; the glyph mapper clamps them.
    pub fn validate(&self) -> Result<()> {
        validate_scale(self.scale)
    }
}

pub(crate) fn validate_scale(scale: f64) -> Result<()> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ArtError::InvalidScale(scale));
    }
    Ok(())
}
