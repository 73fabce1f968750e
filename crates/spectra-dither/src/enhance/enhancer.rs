//! Oklab-based tone enhancement.

use crate::canvas::Canvas;
use crate::color::{Oklab, Oklch, Rgb, Rgbf};
use crate::error::ConfigError;

use super::EnhanceOptions;

/// Applies brightness, contrast and saturation to a canvas.
///
/// All three adjustments work on Oklab lightness and chroma rather than on
/// raw RGB channels, so boosting saturation never shifts hue and changing
/// brightness does not wash colors out. Steps run in a fixed order:
///
/// 1. brightness: `L * brightness`
/// 2. contrast: `(L - 0.5) * contrast + 0.5`
/// 3. saturation: `C * saturation`
///
/// When a step darkens a pixel, `a` and `b` shrink by the same ratio as `L`.
/// That scales linear RGB uniformly, so a darkened color stays inside the
/// gamut with its hue intact and brightness 0 is black.
///
/// After each step the pixel goes back to RGB and every channel is clamped
/// to 0..=255 before the next step sees it. A factor of exactly 1.0 skips
/// its step, so neutral options reproduce the input byte for byte.
///
/// ```
/// use spectra_dither::{Canvas, EnhanceOptions, Rgb, ToneEnhancer};
///
/// let canvas = Canvas::new(4, 4, Rgb::new(120, 80, 60));
/// let enhancer = ToneEnhancer::new(EnhanceOptions::neutral()).unwrap();
/// assert_eq!(enhancer.enhance(&canvas), canvas);
///
/// assert!(ToneEnhancer::new(EnhanceOptions::neutral().contrast(-1.0)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ToneEnhancer {
    options: EnhanceOptions,
}

impl ToneEnhancer {
    pub fn new(options: EnhanceOptions) -> Result<Self, ConfigError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &EnhanceOptions {
        &self.options
    }

    /// Enhance every pixel. Output dimensions equal input dimensions.
    pub fn enhance(&self, canvas: &Canvas) -> Canvas {
        if self.options.is_neutral() {
            return canvas.clone();
        }
        tracing::debug!(
            brightness = self.options.brightness,
            contrast = self.options.contrast,
            saturation = self.options.saturation,
            width = canvas.width(),
            height = canvas.height(),
            "Enhancing canvas"
        );
        canvas.map(|&px| self.enhance_pixel(px))
    }

    /// Enhance a single color.
    pub fn enhance_pixel(&self, color: Rgb) -> Rgb {
        let EnhanceOptions {
            brightness,
            contrast,
            saturation,
        } = self.options;

        let mut c = Rgbf::from(color);
        if brightness != 1.0 {
            c = adjust_lightness(c, |l| l * brightness);
        }
        if contrast != 1.0 {
            c = adjust_lightness(c, |l| (l - 0.5) * contrast + 0.5);
        }
        if saturation != 1.0 {
            let lch = Oklch::from(Oklab::from(c)).scale_chroma(saturation);
            c = Rgbf::from(Oklab::from(lch)).clamped();
        }
        c.to_rgb()
    }
}

#[inline]
fn adjust_lightness(c: Rgbf, f: impl FnOnce(f32) -> f32) -> Rgbf {
    let lab = Oklab::from(c);
    let l = f(lab.l);
    let lab = if l < lab.l && lab.l > 0.0 {
        let k = (l / lab.l).max(0.0);
        Oklab::new(l.max(0.0), lab.a * k, lab.b * k)
    } else {
        Oklab::new(l, lab.a, lab.b)
    };
    Rgbf::from(lab).clamped()
}
