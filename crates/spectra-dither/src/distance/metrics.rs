//! Concrete color distance metrics.

use super::ColorDistance;
use crate::color::{LinearRgb, Oklab, Rgbf};

/// Euclidean distance over gamma-encoded 0..=255 channels.
///
/// Works directly on unclamped values, so an error-adjusted target that
/// overshoots the gamut is measured as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RgbEuclidean;

impl ColorDistance for RgbEuclidean {
    type Point = Rgbf;

    #[inline]
    fn project(&self, color: Rgbf) -> Rgbf {
        color
    }

    #[inline]
    fn between(&self, a: &Rgbf, b: &Rgbf) -> f32 {
        let dr = a.r - b.r;
        let dg = a.g - b.g;
        let db = a.b - b.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Euclidean distance over linear-light RGB (0..=1 per channel).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinearRgbEuclidean;

impl ColorDistance for LinearRgbEuclidean {
    type Point = LinearRgb;

    #[inline]
    fn project(&self, color: Rgbf) -> LinearRgb {
        LinearRgb::from(color)
    }

    #[inline]
    fn between(&self, a: &LinearRgb, b: &LinearRgb) -> f32 {
        a.distance_squared(*b).sqrt()
    }
}

/// Euclidean distance in Oklab.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OklabEuclidean;

impl ColorDistance for OklabEuclidean {
    type Point = Oklab;

    #[inline]
    fn project(&self, color: Rgbf) -> Oklab {
        Oklab::from(color)
    }

    #[inline]
    fn between(&self, a: &Oklab, b: &Oklab) -> f32 {
        a.distance_squared(*b).sqrt()
    }
}

/// HyAB distance in Oklab with a chroma coupling term.
///
/// ```text
/// d = kl * |ΔL| + kc * sqrt(Δa² + Δb²) + kchroma * |C₁ - C₂|
/// ```
///
/// HyAB (Abasi et al., 2020) measures lightness with a city-block term so
/// that a light gray is not matched to yellow just because their lightness
/// is close. The chroma coupling term additionally penalizes pairing a
/// near-neutral color with a saturated one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HyAb {
    pub kl: f32,
    pub kc: f32,
    pub kchroma: f32,
}

impl Default for HyAb {
    fn default() -> Self {
        Self {
            kl: 2.0,
            kc: 1.0,
            kchroma: 10.0,
        }
    }
}

impl ColorDistance for HyAb {
    type Point = Oklab;

    #[inline]
    fn project(&self, color: Rgbf) -> Oklab {
        Oklab::from(color)
    }

    #[inline]
    fn between(&self, a: &Oklab, b: &Oklab) -> f32 {
        let dl = (a.l - b.l).abs();
        let da = a.a - b.a;
        let db = a.b - b.b;
        let coupling = (a.chroma() - b.chroma()).abs();
        self.kl * dl + self.kc * (da * da + db * db).sqrt() + self.kchroma * coupling
    }
}
