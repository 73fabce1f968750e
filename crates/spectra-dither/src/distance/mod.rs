//! Color distance metrics and nearest-palette-color resolution.
//!
//! Whether quantization should be judged in gamma-encoded RGB, in linear
//! light or perceptually has no universal answer for a six-color panel, so
//! the metric is pluggable. [`RgbEuclidean`] is the default; the others are
//! selected through [`DistanceMetric`].
//!
//! Residuals are always computed in gamma-encoded RGB, whatever the metric.
//! The metric only decides which palette entry wins.

mod metrics;
mod resolver;

use std::fmt;
use std::str::FromStr;

pub use metrics::{HyAb, LinearRgbEuclidean, OklabEuclidean, RgbEuclidean};
pub use resolver::{NearestColorResolver, Resolution};

use crate::color::Rgbf;
use crate::error::{ConfigError, ParseOptionError};

/// A distance between two colors.
///
/// Metrics work in two steps so palette colors can be projected once:
/// [`project`](ColorDistance::project) maps a color into the metric's space
/// and [`between`](ColorDistance::between) measures two projected points.
/// Implementations must be pure and must return non-negative values; equal
/// inputs must give bit-identical results.
pub trait ColorDistance {
    /// The color as represented in this metric's space.
    type Point: Copy;

    fn project(&self, color: Rgbf) -> Self::Point;

    fn between(&self, a: &Self::Point, b: &Self::Point) -> f32;

    /// Distance between two colors.
    fn distance(&self, a: Rgbf, b: Rgbf) -> f32 {
        self.between(&self.project(a), &self.project(b))
    }
}

/// Metric selection, for configuration.
///
/// ```
/// use spectra_dither::DistanceMetric;
///
/// let metric: DistanceMetric = "hyab".parse().unwrap();
/// assert_eq!(metric, DistanceMetric::HyAb { kl: 2.0, kc: 1.0, kchroma: 10.0 });
/// assert_eq!(DistanceMetric::default().to_string(), "rgb");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DistanceMetric {
    /// Euclidean over gamma-encoded RGB.
    #[default]
    RgbEuclidean,
    /// Euclidean over linear-light RGB.
    LinearRgb,
    /// Euclidean in Oklab.
    Oklab,
    /// HyAB with chroma coupling in Oklab.
    HyAb { kl: f32, kc: f32, kchroma: f32 },
}

impl DistanceMetric {
    /// HyAB with the default weights (`kl` 2, `kc` 1, `kchroma` 10).
    pub fn hyab() -> Self {
        let HyAb { kl, kc, kchroma } = HyAb::default();
        Self::HyAb { kl, kc, kchroma }
    }

    /// Reject HyAB weights that would make every distance NaN or negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Self::HyAb { kl, kc, kchroma } = *self {
            for (name, value) in [("kl", kl), ("kc", kc), ("kchroma", kchroma)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidWeight { name, value });
                }
            }
        }
        Ok(())
    }

    /// Distance between two colors under this metric.
    pub fn distance(&self, a: Rgbf, b: Rgbf) -> f32 {
        match *self {
            Self::RgbEuclidean => RgbEuclidean.distance(a, b),
            Self::LinearRgb => LinearRgbEuclidean.distance(a, b),
            Self::Oklab => OklabEuclidean.distance(a, b),
            Self::HyAb { kl, kc, kchroma } => HyAb { kl, kc, kchroma }.distance(a, b),
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" | "rgb-euclidean" => Ok(Self::RgbEuclidean),
            "linear" | "linear-rgb" => Ok(Self::LinearRgb),
            "oklab" => Ok(Self::Oklab),
            "hyab" => Ok(Self::hyab()),
            _ => Err(ParseOptionError::new(
                "distance metric",
                s,
                "rgb, linear-rgb, oklab, hyab",
            )),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RgbEuclidean => "rgb",
            Self::LinearRgb => "linear-rgb",
            Self::Oklab => "oklab",
            Self::HyAb { .. } => "hyab",
        })
    }
}
