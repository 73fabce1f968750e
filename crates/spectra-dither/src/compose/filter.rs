use std::fmt;
use std::str::FromStr;

use image::imageops::FilterType;

use crate::error::ParseOptionError;

/// Resampling filter used when scaling the source onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResampleFilter {
    /// Nearest neighbor. Fast, blocky; fine on memory-starved boards.
    Nearest,
    /// Bilinear.
    Triangle,
    /// Bicubic (Catmull-Rom).
    CatmullRom,
    /// Windowed sinc with three lobes. Sharpest.
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ResampleFilter {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmull-rom" | "bicubic" => Ok(Self::CatmullRom),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(ParseOptionError::new(
                "resample filter",
                s,
                "nearest, triangle, catmull-rom, lanczos3",
            )),
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Nearest => "nearest",
            Self::Triangle => "triangle",
            Self::CatmullRom => "catmull-rom",
            Self::Lanczos3 => "lanczos3",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_names() {
        for filter in [
            ResampleFilter::Nearest,
            ResampleFilter::Triangle,
            ResampleFilter::CatmullRom,
            ResampleFilter::Lanczos3,
        ] {
            assert_eq!(filter.to_string().parse::<ResampleFilter>(), Ok(filter));
        }
        assert_eq!("Lanczos".parse::<ResampleFilter>(), Ok(ResampleFilter::Lanczos3));
        assert_eq!("bicubic".parse::<ResampleFilter>(), Ok(ResampleFilter::CatmullRom));
        assert!("gaussian".parse::<ResampleFilter>().is_err());
    }

    #[test]
    fn test_default_is_lanczos3() {
        assert_eq!(ResampleFilter::default(), ResampleFilter::Lanczos3);
        assert_eq!(FilterType::from(ResampleFilter::default()), FilterType::Lanczos3);
    }
}
