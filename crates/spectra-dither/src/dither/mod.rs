//! Floyd-Steinberg error diffusion onto a fixed palette.
//!
//! Pixels are visited row by row, left to right, top to bottom. Each pixel's
//! target is its canvas color plus the error pushed onto it by earlier
//! pixels; the target is resolved to the nearest palette entry and the
//! residual (target minus chosen color) is spread over the unvisited
//! neighbors:
//!
//! ```text
//!        X   7
//!    3   5   1      (sixteenths)
//! ```
//!
//! Weights that would land outside the canvas are dropped, not
//! redistributed. Error is kept in unclamped `f32` gamma-encoded RGB, so a
//! target may leave 0..=255; the residual is always taken from that
//! unclamped value.
//!
//! Dithering cannot fail: any canvas (even an empty one) and any valid
//! palette produce an image. The output depends only on the canvas, the
//! palette and the metric, never on earlier calls.

mod accumulator;
mod kernel;

pub use accumulator::{AccumulatorMode, ErrorAccumulator, FullFrameErrorBuffer, RollingErrorBuffer};
pub use kernel::{Kernel, FLOYD_STEINBERG};

use crate::canvas::Canvas;
use crate::color::Rgbf;
use crate::distance::{
    ColorDistance, DistanceMetric, HyAb, LinearRgbEuclidean, NearestColorResolver, OklabEuclidean,
    Resolution, RgbEuclidean,
};
use crate::output::QuantizedImage;
use crate::palette::Palette;

/// One resolved pixel, reported to a
/// [`dither_with_observer`](ErrorDiffusionDitherer::dither_with_observer)
/// callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherStep {
    pub x: u32,
    pub y: u32,
    /// Canvas color plus accumulated error, before resolution.
    pub target: Rgbf,
    pub resolution: Resolution,
}

/// Quantizes a canvas to a palette with Floyd-Steinberg diffusion.
///
/// ```
/// use spectra_dither::{Canvas, DistanceMetric, ErrorDiffusionDitherer, PaletteCatalog, PaletteKind, Rgb};
///
/// let catalog = PaletteCatalog::spectra6();
/// let palette = catalog.palette(PaletteKind::AnchorsOnly);
/// let canvas = Canvas::new(10, 10, Rgb::new(255, 0, 0));
///
/// let image = ErrorDiffusionDitherer::new(DistanceMetric::RgbEuclidean).dither(&canvas, palette);
/// assert_eq!(image.indices().len(), 100);
/// assert!(image.colors().all(|c| palette.contains(c)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorDiffusionDitherer {
    metric: DistanceMetric,
    accumulator: AccumulatorMode,
}

impl ErrorDiffusionDitherer {
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            metric,
            accumulator: AccumulatorMode::default(),
        }
    }

    /// Choose how pending error is stored. Output is identical either way.
    pub fn accumulator(mut self, mode: AccumulatorMode) -> Self {
        self.accumulator = mode;
        self
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn dither(&self, canvas: &Canvas, palette: &Palette) -> QuantizedImage {
        self.dither_with_observer(canvas, palette, |_| {})
    }

    /// Like [`dither`](Self::dither), calling `observer` after every pixel
    /// is resolved, in scan order.
    pub fn dither_with_observer<F>(&self, canvas: &Canvas, palette: &Palette, observer: F) -> QuantizedImage
    where
        F: FnMut(&DitherStep),
    {
        tracing::debug!(
            width = canvas.width(),
            height = canvas.height(),
            colors = palette.len(),
            metric = %self.metric,
            accumulator = %self.accumulator,
            "Dithering canvas"
        );
        match self.metric {
            DistanceMetric::RgbEuclidean => self.run(canvas, palette, RgbEuclidean, observer),
            DistanceMetric::LinearRgb => self.run(canvas, palette, LinearRgbEuclidean, observer),
            DistanceMetric::Oklab => self.run(canvas, palette, OklabEuclidean, observer),
            DistanceMetric::HyAb { kl, kc, kchroma } => {
                self.run(canvas, palette, HyAb { kl, kc, kchroma }, observer)
            }
        }
    }

    fn run<M, F>(&self, canvas: &Canvas, palette: &Palette, metric: M, observer: F) -> QuantizedImage
    where
        M: ColorDistance,
        F: FnMut(&DitherStep),
    {
        let resolver = NearestColorResolver::new(palette, metric);
        let width = canvas.width() as usize;
        let height = canvas.height() as usize;
        let indices = match self.accumulator {
            AccumulatorMode::Rolling => {
                let mut errors = RollingErrorBuffer::new(width, FLOYD_STEINBERG.max_dy + 1);
                diffuse(canvas, &resolver, &FLOYD_STEINBERG, &mut errors, observer)
            }
            AccumulatorMode::FullFrame => {
                let mut errors = FullFrameErrorBuffer::new(width, height);
                diffuse(canvas, &resolver, &FLOYD_STEINBERG, &mut errors, observer)
            }
        };
        QuantizedImage::new(indices, canvas.width(), canvas.height(), palette.clone())
    }
}

/// The scan loop shared by every metric and accumulator.
fn diffuse<M, A, F>(
    canvas: &Canvas,
    resolver: &NearestColorResolver<M>,
    kernel: &Kernel,
    errors: &mut A,
    mut observer: F,
) -> Vec<u8>
where
    M: ColorDistance,
    A: ErrorAccumulator,
    F: FnMut(&DitherStep),
{
    let width = canvas.width() as usize;
    let height = canvas.height() as usize;
    let pixels = canvas.pixels();
    let mut indices = vec![0u8; width * height];

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let target = Rgbf::from(pixels[idx]) + errors.accumulated(x);
            let resolution = resolver.resolve(target);
            indices[idx] = resolution.index;

            observer(&DitherStep {
                x: x as u32,
                y: y as u32,
                target,
                resolution,
            });

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                if nx < 0 || nx as usize >= width || y + dy >= height {
                    continue;
                }
                errors.add(nx as usize, dy, resolution.residual * kernel.fraction(weight));
            }
        }
        errors.advance_row();
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::palette::{PaletteCatalog, PaletteKind};

    fn black_white() -> Palette {
        Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap()
    }

    #[test]
    fn test_solid_palette_color_is_exact() {
        let palette = PaletteCatalog::spectra6()
            .palette(PaletteKind::AnchorsOnly)
            .clone();
        for entry in palette.entries() {
            let canvas = Canvas::new(8, 8, entry.color);
            let image = ErrorDiffusionDitherer::default().dither(&canvas, &palette);
            assert!(image.indices().iter().all(|&i| i == entry.index));
        }
    }

    #[test]
    fn test_empty_canvas_gives_empty_image() {
        let image = ErrorDiffusionDitherer::default().dither(&Canvas::new(0, 0, Rgb::BLACK), &black_white());
        assert!(image.indices().is_empty());

        let image = ErrorDiffusionDitherer::default().dither(&Canvas::new(5, 0, Rgb::BLACK), &black_white());
        assert_eq!((image.width(), image.height()), (5, 0));
    }

    #[test]
    fn test_single_pixel_drops_all_error() {
        let image = ErrorDiffusionDitherer::default().dither(&Canvas::new(1, 1, Rgb::new(200, 200, 200)), &black_white());
        assert_eq!(image.indices(), &[1]);
    }

    #[test]
    fn test_error_spreads_with_floyd_steinberg_weights() {
        // 3x2 black canvas with one 64 gray pixel; every pixel resolves
        // to black, so each residual equals its target.
        let mut canvas = Canvas::new(3, 2, Rgb::BLACK);
        canvas.set(1, 0, Rgb::new(64, 64, 64));
        let mut steps = Vec::new();
        ErrorDiffusionDitherer::default().dither_with_observer(&canvas, &black_white(), |s| {
            steps.push(*s)
        });

        let target = |x: u32, y: u32| {
            steps
                .iter()
                .find(|s| s.x == x && s.y == y)
                .map(|s| s.target)
                .unwrap()
        };
        assert_eq!(target(1, 0), Rgbf::new(64.0, 64.0, 64.0));
        assert_eq!(target(2, 0), Rgbf::new(28.0, 28.0, 28.0));
        assert_eq!(target(0, 1), Rgbf::new(12.0, 12.0, 12.0));
        // 64 * 5/16 + 28 * 3/16 + 12 * 7/16
        assert_eq!(target(1, 1), Rgbf::new(30.5, 30.5, 30.5));
        // 64 * 1/16 + 28 * 5/16 + 30.5 * 7/16
        assert_eq!(target(2, 1), Rgbf::new(26.09375, 26.09375, 26.09375));
    }

    #[test]
    fn test_observer_sees_scan_order() {
        let canvas = Canvas::new(4, 3, Rgb::new(90, 90, 90));
        let mut order = Vec::new();
        ErrorDiffusionDitherer::default().dither_with_observer(&canvas, &black_white(), |s| {
            order.push((s.x, s.y))
        });
        let expected: Vec<(u32, u32)> = (0..3).flat_map(|y| (0..4).map(move |x| (x, y))).collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_accumulators_agree() {
        let canvas = Canvas::from_fn(37, 23, |x, y| {
            Rgb::new((x * 7) as u8, (y * 11) as u8, ((x * y) % 256) as u8)
        });
        let palette = PaletteCatalog::spectra6()
            .palette(PaletteKind::Extended)
            .clone();
        for metric in [DistanceMetric::RgbEuclidean, DistanceMetric::Oklab, DistanceMetric::hyab()] {
            let rolling = ErrorDiffusionDitherer::new(metric).dither(&canvas, &palette);
            let full = ErrorDiffusionDitherer::new(metric)
                .accumulator(AccumulatorMode::FullFrame)
                .dither(&canvas, &palette);
            assert_eq!(rolling, full, "metric {metric}");
        }
    }

    #[test]
    fn test_midgray_checkerboards() {
        // 50% gray in gamma space with a black/white palette dithers to
        // roughly half white.
        let canvas = Canvas::new(64, 64, Rgb::new(128, 128, 128));
        let image = ErrorDiffusionDitherer::default().dither(&canvas, &black_white());
        let whites = image.color_histogram()[1] as f32 / (64.0 * 64.0);
        assert!((whites - 0.5).abs() < 0.02, "white ratio {whites}");
    }
}
