//! Oklab perceptual color space
//!
//! Used by the perceptual distance metrics and by tone enhancement, which
//! adjusts lightness and chroma without touching hue.
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use super::linear_rgb::LinearRgb;
use super::rgb::{Rgb, Rgbf};

/// A color in Oklab.
///
/// - `l`: lightness, 0.0 (black) to 1.0 (white) for in-gamut colors
/// - `a`: green (negative) to red (positive)
/// - `b`: blue (negative) to yellow (positive)
///
/// Components are never clamped here.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Oklab {
    #[inline]
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Chroma magnitude, `sqrt(a² + b²)`.
    #[inline]
    pub fn chroma(self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Oklab) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

impl From<LinearRgb> for Oklab {
    /// Uses the 2021-01-25 matrices.
    fn from(rgb: LinearRgb) -> Self {
        let l = 0.4122214708 * rgb.r + 0.5363325363 * rgb.g + 0.0514459929 * rgb.b;
        let m = 0.2119034982 * rgb.r + 0.6806995451 * rgb.g + 0.1073969566 * rgb.b;
        let s = 0.0883024619 * rgb.r + 0.2817188376 * rgb.g + 0.6299787005 * rgb.b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}

impl From<Oklab> for LinearRgb {
    /// Inverse transform. Out-of-gamut input yields channels outside 0..=1.
    fn from(lab: Oklab) -> Self {
        let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
        let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
        let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        LinearRgb {
            r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        }
    }
}

impl From<Rgb> for Oklab {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Oklab::from(LinearRgb::from(rgb))
    }
}

impl From<Rgbf> for Oklab {
    /// Clamps to the RGB gamut before converting.
    #[inline]
    fn from(rgb: Rgbf) -> Self {
        Oklab::from(LinearRgb::from(rgb))
    }
}

impl From<Oklab> for Rgbf {
    /// Clamps to the RGB gamut after converting.
    #[inline]
    fn from(lab: Oklab) -> Self {
        Rgbf::from(LinearRgb::from(lab))
    }
}

/// Polar form of Oklab: lightness, chroma, hue angle in radians.
///
/// Scaling `c` changes saturation while leaving lightness and hue exactly
/// where they were. For achromatic colors the hue is 0.0, which is harmless
/// because any scale of zero chroma stays zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

impl Oklch {
    /// Scale chroma, never below zero.
    #[inline]
    pub fn scale_chroma(self, factor: f32) -> Self {
        Self {
            l: self.l,
            c: (self.c * factor).max(0.0),
            h: self.h,
        }
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        Self {
            l: lab.l,
            c: lab.chroma(),
            h: lab.b.atan2(lab.a),
        }
    }
}

impl From<Oklch> for Oklab {
    fn from(lch: Oklch) -> Self {
        Self::new(lch.l, lch.c * lch.h.cos(), lch.c * lch.h.sin())
    }
}
