//! The full compose -> enhance -> dither chain.

use std::path::Path;
use std::time::Instant;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::compose::{FrameComposer, ResampleFilter};
use crate::dither::{AccumulatorMode, ErrorDiffusionDitherer};
use crate::distance::DistanceMetric;
use crate::enhance::{EnhanceOptions, ToneEnhancer};
use crate::error::{ConfigError, PipelineError};
use crate::output::QuantizedImage;
use crate::palette::{Palette, PaletteCatalog, PaletteKind};
use crate::source::SourceImage;

/// Everything a [`Pipeline`] needs, validated by [`Pipeline::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub width: u32,
    pub height: u32,
    /// Letterbox fill, also used under transparent source pixels.
    pub background: Rgb,
    pub enhance: EnhanceOptions,
    pub palette: Palette,
    pub metric: DistanceMetric,
    pub filter: ResampleFilter,
    pub accumulator: AccumulatorMode,
}

impl Default for PipelineConfig {
    /// 800x480 Spectra 6 panel, white background, no enhancement.
    fn default() -> Self {
        Self {
            width: 800,
            height: 480,
            background: Rgb::WHITE,
            enhance: EnhanceOptions::neutral(),
            palette: PaletteCatalog::spectra6()
                .palette(PaletteKind::AnchorsOnly)
                .clone(),
            metric: DistanceMetric::default(),
            filter: ResampleFilter::default(),
            accumulator: AccumulatorMode::default(),
        }
    }
}

/// Intermediate canvases alongside the final image.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub composed: Canvas,
    pub enhanced: Canvas,
    pub quantized: QuantizedImage,
}

/// A validated, immutable compose -> enhance -> dither chain.
///
/// Build once, run for as many images as needed; runs share nothing
/// mutable, so a `Pipeline` can be used from several threads at once.
///
/// ```
/// use spectra_dither::{Pipeline, PipelineConfig, Rgb, SourceImage};
///
/// let config = PipelineConfig {
///     width: 40,
///     height: 24,
///     ..PipelineConfig::default()
/// };
/// let pipeline = Pipeline::new(config).unwrap();
///
/// let source = SourceImage::from_raw(2, 2, 3, &[255, 0, 0].repeat(4), Rgb::WHITE).unwrap();
/// let image = pipeline.run(&source).unwrap();
/// assert_eq!((image.width(), image.height()), (40, 24));
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    composer: FrameComposer,
    enhancer: ToneEnhancer,
    ditherer: ErrorDiffusionDitherer,
}

impl Pipeline {
    /// Validate `config` and build every stage.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.metric.validate()?;
        let composer =
            FrameComposer::new(config.width, config.height, config.background)?.filter(config.filter);
        let enhancer = ToneEnhancer::new(config.enhance)?;
        let ditherer = ErrorDiffusionDitherer::new(config.metric).accumulator(config.accumulator);
        Ok(Self {
            config,
            composer,
            enhancer,
            ditherer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, source: &SourceImage) -> Result<QuantizedImage, PipelineError> {
        Ok(self.run_with_checkpoints(source)?.quantized)
    }

    /// Run and keep the composed and enhanced canvases.
    pub fn run_with_checkpoints(&self, source: &SourceImage) -> Result<PipelineOutput, PipelineError> {
        let span = tracing::info_span!(
            "pipeline",
            source_width = source.width(),
            source_height = source.height()
        );
        let _guard = span.enter();

        let started = Instant::now();
        let composed = self.composer.compose(source.as_rgb_image())?;
        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Composed canvas");

        let started = Instant::now();
        let enhanced = self.enhancer.enhance(&composed);
        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Enhanced canvas");

        let started = Instant::now();
        let quantized = self.ditherer.dither(&enhanced, &self.config.palette);
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            histogram = ?quantized.color_histogram(),
            "Dithered canvas"
        );

        Ok(PipelineOutput {
            composed,
            enhanced,
            quantized,
        })
    }

    /// Decode `bytes` (PNG, JPEG, BMP) and run.
    pub fn run_encoded(&self, bytes: &[u8]) -> Result<QuantizedImage, PipelineError> {
        let source = SourceImage::decode(bytes, self.config.background)?;
        self.run(&source)
    }

    /// Read and decode an image file and run.
    pub fn run_path(&self, path: impl AsRef<Path>) -> Result<QuantizedImage, PipelineError> {
        let source = SourceImage::open(path, self.config.background)?;
        self.run(&source)
    }
}

/// Build a pipeline from `config` and run it once.
pub fn render(config: PipelineConfig, source: &SourceImage) -> Result<QuantizedImage, PipelineError> {
    Pipeline::new(config)?.run(source)
}
