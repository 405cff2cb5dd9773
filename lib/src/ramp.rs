//! Density ramps
//!
//! A ramp orders characters from the visually heaviest (darkest) to the
//! lightest. Luminosity values in `0..=255` are quantized onto it.

use crate::error::{AsciiError, Result};

/// Default ramp: `@` for pure black down to a space for pure white
pub const DEFAULT_RAMP: &str = "@%#*+=-:. ";

/// Ordered, non-empty character set from darkest to lightest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityRamp {
    chars: Vec<char>,
}

impl DensityRamp {
    /// Build a ramp from a string, darkest character first
    ///
    /// # Errors
    /// `InvalidArgument` if `chars` is empty.
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(AsciiError::invalid("density ramp must not be empty"));
        }
        Ok(Self { chars })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Map a luminosity to a ramp index
    ///
    /// `floor(luminosity * (len - 1) / 255)`: 0 selects the first (darkest)
    /// character and 255 the last (lightest).
    pub fn index_for(&self, luminosity: u8) -> usize {
        let max_index = self.chars.len() - 1;
        (luminosity as usize * max_index / 255).min(max_index)
    }

    /// Character for a luminosity
    pub fn glyph_for(&self, luminosity: u8) -> char {
        self.chars[self.index_for(luminosity)]
    }
}

impl Default for DensityRamp {
    fn default() -> Self {
        Self {
            chars: DEFAULT_RAMP.chars().collect(),
        }
    }
}

impl std::fmt::Display for DensityRamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ramp_rejected() {
        assert!(matches!(DensityRamp::new(""), Err(AsciiError::InvalidArgument(_))));
    }

    #[test]
    fn test_default_ramp() {
        let ramp = DensityRamp::default();
        assert_eq!(ramp.len(), 10);
        assert_eq!(ramp.to_string(), DEFAULT_RAMP);
    }

    const RAMPS: [&str; 4] = ["@", "@ ", DEFAULT_RAMP, "$@B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft"];

    #[test]
    fn test_boundaries_map_to_ends() {
        for text in RAMPS {
            let ramp = DensityRamp::new(text).unwrap();
            assert_eq!(ramp.index_for(0), 0);
            assert_eq!(ramp.index_for(255), ramp.len() - 1);
        }
    }

    #[test]
    fn test_index_monotonic() {
        for text in RAMPS {
            let ramp = DensityRamp::new(text).unwrap();
            let mut previous = 0;
            for lum in 0..=255u8 {
                let index = ramp.index_for(lum);
                assert!(index >= previous, "{text:?}: index dropped at luminosity {lum}");
                assert!(index < ramp.len());
                previous = index;
            }
        }
    }

    #[test]
    fn test_single_char_ramp() {
        let ramp = DensityRamp::new("#").unwrap();
        assert_eq!(ramp.glyph_for(0), '#');
        assert_eq!(ramp.glyph_for(128), '#');
        assert_eq!(ramp.glyph_for(255), '#');
    }

    #[test]
    fn test_mid_luminosity() {
        let ramp = DensityRamp::default();
        // 128 * 9 / 255 = 4.51 -> 4
        assert_eq!(ramp.glyph_for(128), '+');
        assert_eq!(ramp.glyph_for(254), '.');
    }

    #[test]
    fn test_multibyte_chars() {
        let ramp = DensityRamp::new("█▓▒░ ").unwrap();
        assert_eq!(ramp.len(), 5);
        assert_eq!(ramp.glyph_for(0), '█');
        assert_eq!(ramp.glyph_for(255), ' ');
    }
}
