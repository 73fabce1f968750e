//! Linear-light RGB.

/// A color in linear RGB, channels nominally 0.0..=1.0.
///
/// Light adds linearly in this space, so it is the space where the linear
/// distance metric measures and where Oklab conversion starts. Values
/// outside the nominal range appear after Oklab adjustments push a color
/// out of gamut; converting back to [`Rgbf`](super::Rgbf) clamps them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: LinearRgb) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }
}
