#![allow(clippy::module_inception, clippy::excessive_precision)]

//! spectra-dither: palette quantization for 6-color Spectra e-ink panels
//!
//! Turns an arbitrary photo into an image that uses only the handful of
//! colors an E Ink Spectra 6 panel can show, while keeping as much of the
//! photo's color as possible.
//!
//! # Quick Start
//!
//! ```
//! use spectra_dither::{EnhanceOptions, Pipeline, PipelineConfig, Rgb, SourceImage};
//!
//! let config = PipelineConfig {
//!     width: 80,
//!     height: 48,
//!     enhance: EnhanceOptions::photo(),
//!     ..PipelineConfig::default()
//! };
//! let pipeline = Pipeline::new(config).unwrap();
//!
//! let pixels = [200u8, 120, 40].repeat(16 * 16);
//! let source = SourceImage::from_raw(16, 16, 3, &pixels, Rgb::WHITE).unwrap();
//! let image = pipeline.run(&source).unwrap();
//!
//! assert_eq!((image.width(), image.height()), (80, 48));
//! assert!(image.colors().all(|c| image.palette().contains(c)));
//! ```
//!
//! # Stages
//!
//! ```text
//! SourceImage                 decoded photo, alpha flattened
//!     |
//!     v  FrameComposer        contain-fit onto the panel, letterboxed
//! Canvas
//!     |
//!     v  ToneEnhancer         brightness / contrast / saturation in Oklab
//! Canvas
//!     |
//!     v  ErrorDiffusionDitherer
//!     |      NearestColorResolver + ColorDistance, PaletteCatalog
//! QuantizedImage              one palette index per pixel
//! ```
//!
//! Each stage is usable on its own; [`Pipeline`] wires them together from a
//! [`PipelineConfig`].
//!
//! # Color matching
//!
//! Quantization error is diffused in gamma-encoded RGB. Which palette entry
//! is "nearest" is decided by a pluggable [`ColorDistance`]: plain RGB
//! Euclidean by default, or linear light, Oklab, or HyAB through
//! [`DistanceMetric`].

pub mod canvas;
pub mod color;
pub mod compose;
pub mod distance;
pub mod dither;
pub mod enhance;
pub mod error;
pub mod output;
pub mod palette;
pub mod pipeline;
pub mod source;

pub use canvas::Canvas;
pub use color::{LinearRgb, Oklab, Oklch, Rgb, Rgbf};
pub use compose::{FrameComposer, ResampleFilter};
pub use distance::{
    ColorDistance, DistanceMetric, HyAb, LinearRgbEuclidean, NearestColorResolver, OklabEuclidean,
    Resolution, RgbEuclidean,
};
pub use dither::{AccumulatorMode, DitherStep, ErrorAccumulator, ErrorDiffusionDitherer};
pub use enhance::{EnhanceOptions, ToneEnhancer};
pub use error::{ConfigError, InputError, ParseOptionError, PipelineError};
pub use output::{ChannelOrder, QuantizedImage};
pub use palette::{Palette, PaletteCatalog, PaletteEntry, PaletteError, PaletteKind, ParseColorError};
pub use pipeline::{render, Pipeline, PipelineConfig, PipelineOutput};
pub use source::{decode_bytes, decode_path, SourceImage};

#[cfg(test)]
mod domain_tests;
