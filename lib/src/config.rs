use crate::error::{AsciiError, Result};
use crate::ramp::DensityRamp;

/// Default font size in pixels per em
pub const DEFAULT_FONT_SIZE: u32 = 12;

/// How the alpha channel affects luminosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransparencyPolicy {
    /// Fully transparent pixels read as white
    #[default]
    White,
    /// Alpha is ignored and only RGB is used
    Ignore,
}

/// Configuration for glyph art conversion
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Glyph size
    pub font_size: u32, // pixels per em, default 12

    /// Tint each glyph with its source pixel color instead of black
    pub colored: bool,

    /// Characters from darkest to lightest
    pub ramp: DensityRamp,

    /// Canvas color behind the glyphs
    pub background: [u8; 3], // RGB, default white [255, 255, 255]

    pub transparency: TransparencyPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            colored: false,
            ramp: DensityRamp::default(),
            background: [255, 255, 255],
            transparency: TransparencyPolicy::White,
        }
    }
}

impl RenderConfig {
    /// Validates the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.font_size < 1 {
            return Err(AsciiError::invalid(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        // ramp non-emptiness is enforced by DensityRamp::new
        Ok(())
    }
}
