//! Error types for color parsing and palette validation.

use std::num::ParseIntError;

use thiserror::Error;

use crate::color::Rgb;

/// A hex color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    #[error("invalid hex color length (expected 3 or 6 hex digits)")]
    InvalidLength,

    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// A palette definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette cannot be empty")]
    EmptyPalette,

    #[error("duplicate color {color} at index {index}")]
    DuplicateColor { index: usize, color: Rgb },

    #[error("palette has {count} colors, at most 256 are supported")]
    TooManyColors { count: usize },

    #[error("palette index {index} out of range for {len} colors")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid color {value:?}: {source}")]
    ParseColor {
        value: String,
        #[source]
        source: ParseColorError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(PaletteError::EmptyPalette.to_string(), "palette cannot be empty");
        assert_eq!(
            PaletteError::DuplicateColor {
                index: 3,
                color: Rgb::new(191, 0, 0)
            }
            .to_string(),
            "duplicate color #BF0000 at index 3"
        );
        assert_eq!(
            PaletteError::IndexOutOfRange { index: 9, len: 6 }.to_string(),
            "palette index 9 out of range for 6 colors"
        );
        assert_eq!(
            PaletteError::ParseColor {
                value: "#12".into(),
                source: ParseColorError::InvalidLength
            }
            .to_string(),
            "invalid color \"#12\": invalid hex color length (expected 3 or 6 hex digits)"
        );
    }
}
