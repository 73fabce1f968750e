//! Pipeline error types.
//!
//! Input problems and configuration problems are kept apart: configuration
//! is rejected when a [`Pipeline`](crate::Pipeline) or one of its stages is
//! built, input is rejected before any canvas exists. Dithering itself
//! cannot fail.

use std::path::PathBuf;

use thiserror::Error;

use crate::palette::PaletteError;

/// The source image cannot be turned into a canvas.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },

    #[error("unsupported channel count {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(u8),

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// A stage was configured with values it cannot work with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} factor must be a finite number >= 0, got {value}")]
    InvalidFactor { name: &'static str, value: f32 },

    #[error("{name} weight must be a finite number >= 0, got {value}")]
    InvalidWeight { name: &'static str, value: f32 },

    #[error("target dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

/// Any failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// An option name (metric, filter, channel order, ...) was not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?} (expected one of: {expected})")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseOptionError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}
