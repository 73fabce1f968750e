//! Tone enhancement factors.

use crate::error::ConfigError;

/// Brightness, contrast and saturation multipliers.
///
/// Each factor is a multiplier where 1.0 means "leave alone". Factors must
/// be finite and non-negative; [`ToneEnhancer::new`](super::ToneEnhancer::new)
/// rejects anything else.
///
/// ```
/// use spectra_dither::EnhanceOptions;
///
/// let options = EnhanceOptions::neutral().saturation(1.3).contrast(1.1);
/// assert_eq!(options.brightness, 1.0);
/// assert!(!options.is_neutral());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhanceOptions {
    /// Scales Oklab lightness.
    pub brightness: f32,
    /// Scales Oklab lightness around the 0.5 midpoint.
    pub contrast: f32,
    /// Scales Oklch chroma; hue is untouched.
    pub saturation: f32,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self::neutral()
    }
}

impl EnhanceOptions {
    /// No enhancement at all.
    pub const fn neutral() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
        }
    }

    /// Tuned for photographs on Spectra 6 panels, whose colors look muted
    /// next to a backlit screen.
    pub const fn photo() -> Self {
        Self {
            brightness: 1.1,
            contrast: 1.0,
            saturation: 1.4,
        }
    }

    #[inline]
    pub fn brightness(mut self, factor: f32) -> Self {
        self.brightness = factor;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f32) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn saturation(mut self, factor: f32) -> Self {
        self.saturation = factor;
        self
    }

    /// True when every factor is exactly 1.0.
    pub fn is_neutral(&self) -> bool {
        self.brightness == 1.0 && self.contrast == 1.0 && self.saturation == 1.0
    }

    /// Check every factor is finite and `>= 0`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }
        Ok(())
    }
}
