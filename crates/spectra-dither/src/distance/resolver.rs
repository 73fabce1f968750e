//! Nearest palette color lookup.

use super::ColorDistance;
use crate::color::{Rgb, Rgbf};
use crate::palette::Palette;

/// Outcome of resolving one color against a palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Index of the chosen palette entry.
    pub index: u8,
    /// The chosen palette color.
    pub color: Rgb,
    /// `requested - chosen` per channel, in gamma-encoded 0..=255 units.
    pub residual: Rgbf,
    /// Metric distance between the requested color and the chosen entry.
    pub distance: f32,
}

/// Finds the palette entry closest to a color under a metric.
///
/// Palette colors are projected into the metric's space once, at
/// construction. Lookup is a linear scan, which beats anything cleverer for
/// palettes of a few dozen colors. Ties go to the lowest index.
///
/// ```
/// use spectra_dither::{NearestColorResolver, PaletteCatalog, PaletteKind, RgbEuclidean, Rgb, Rgbf};
///
/// let catalog = PaletteCatalog::spectra6();
/// let resolver = NearestColorResolver::new(catalog.palette(PaletteKind::AnchorsOnly), RgbEuclidean);
///
/// let hit = resolver.resolve(Rgbf::new(255.0, 0.0, 0.0));
/// assert_eq!(hit.color, Rgb::new(191, 0, 0));
/// assert_eq!(hit.residual, Rgbf::new(64.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct NearestColorResolver<M: ColorDistance> {
    metric: M,
    colors: Vec<Rgb>,
    points: Vec<M::Point>,
}

impl<M: ColorDistance> NearestColorResolver<M> {
    pub fn new(palette: &Palette, metric: M) -> Self {
        let colors: Vec<Rgb> = palette.colors().collect();
        let points = colors
            .iter()
            .map(|&c| metric.project(Rgbf::from(c)))
            .collect();
        Self {
            metric,
            colors,
            points,
        }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The entry minimizing distance to `color`, with the signed residual.
    ///
    /// `color` may lie outside 0..=255; the residual is taken from the
    /// value as given, never from a clamped copy.
    #[inline]
    pub fn resolve(&self, color: Rgbf) -> Resolution {
        let target = self.metric.project(color);

        let mut best_index = 0;
        let mut best_distance = f32::INFINITY;
        for (i, point) in self.points.iter().enumerate() {
            let d = self.metric.between(&target, point);
            // strict: the first of equally distant entries wins
            if d < best_distance {
                best_distance = d;
                best_index = i;
            }
        }

        let chosen = self.colors[best_index];
        Resolution {
            index: best_index as u8,
            color: chosen,
            residual: color - Rgbf::from(chosen),
            distance: best_distance,
        }
    }

    /// Distance from `color` to palette entry `index`, computed exactly as
    /// [`resolve`](Self::resolve) computes it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn distance_to(&self, color: Rgbf, index: usize) -> f32 {
        self.metric
            .between(&self.metric.project(color), &self.points[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{HyAb, LinearRgbEuclidean, OklabEuclidean, RgbEuclidean};
    use crate::palette::{PaletteCatalog, PaletteKind};

    fn spectra() -> Palette {
        PaletteCatalog::spectra6()
            .palette(PaletteKind::AnchorsOnly)
            .clone()
    }

    #[test]
    fn test_exact_palette_colors_resolve_to_themselves() {
        let palette = spectra();
        let resolver = NearestColorResolver::new(&palette, RgbEuclidean);
        for entry in palette.entries() {
            let hit = resolver.resolve(Rgbf::from(entry.color));
            assert_eq!(hit.index, entry.index);
            assert_eq!(hit.residual, Rgbf::ZERO);
            assert_eq!(hit.distance, 0.0);
        }
    }

    #[test]
    fn test_residual_is_signed_and_unclamped() {
        let resolver = NearestColorResolver::new(&spectra(), RgbEuclidean);
        let hit = resolver.resolve(Rgbf::new(-20.0, -5.0, -1.0));
        assert_eq!(hit.color, Rgb::BLACK);
        assert_eq!(hit.residual, Rgbf::new(-20.0, -5.0, -1.0));

        let hit = resolver.resolve(Rgbf::new(300.0, 300.0, 300.0));
        assert_eq!(hit.color, Rgb::WHITE);
        assert_eq!(hit.residual, Rgbf::new(45.0, 45.0, 45.0));
    }

    #[test]
    fn test_tie_breaks_to_first_entry() {
        let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(100, 0, 0)]).unwrap();
        let resolver = NearestColorResolver::new(&palette, RgbEuclidean);
        let hit = resolver.resolve(Rgbf::new(50.0, 0.0, 0.0));
        assert_eq!(hit.index, 0);

        let reversed = Palette::new(&[Rgb::new(100, 0, 0), Rgb::new(0, 0, 0)]).unwrap();
        let resolver = NearestColorResolver::new(&reversed, RgbEuclidean);
        assert_eq!(resolver.resolve(Rgbf::new(50.0, 0.0, 0.0)).index, 0);
    }

    #[test]
    fn test_every_metric_returns_a_minimum() {
        let palette = PaletteCatalog::spectra6()
            .palette(PaletteKind::Extended)
            .clone();
        let samples = [
            Rgbf::new(12.0, 200.0, 90.0),
            Rgbf::new(240.0, 180.0, 200.0),
            Rgbf::new(128.0, 128.0, 128.0),
            Rgbf::new(-40.0, 280.0, 10.0),
        ];

        fn check<M: ColorDistance>(palette: &Palette, metric: M, samples: &[Rgbf]) {
            let resolver = NearestColorResolver::new(palette, metric);
            for &s in samples {
                let hit = resolver.resolve(s);
                for i in 0..resolver.len() {
                    assert!(
                        resolver.distance_to(s, i) >= hit.distance,
                        "entry {i} beats chosen {} for {s:?}",
                        hit.index
                    );
                }
                assert_eq!(hit.residual, s - Rgbf::from(hit.color));
            }
        }

        check(&palette, RgbEuclidean, &samples);
        check(&palette, LinearRgbEuclidean, &samples);
        check(&palette, OklabEuclidean, &samples);
        check(&palette, HyAb::default(), &samples);
    }

    #[test]
    fn test_hyab_maps_neutral_gray_to_neutral_entry() {
        let palette = PaletteCatalog::spectra6()
            .palette(PaletteKind::Extended)
            .clone();
        let resolver = NearestColorResolver::new(&palette, HyAb::default());
        let hit = resolver.resolve(Rgbf::new(150.0, 150.0, 150.0));
        let [r, g, b] = hit.color.to_bytes();
        assert!(r == g && g == b, "gray resolved to chromatic {:?}", hit.color);
    }
}
