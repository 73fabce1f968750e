use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;
use crate::error::ParseOptionError;

/// Byte order of the three channels in a hardware buffer.
///
/// Panel controllers do not agree on RGB order, and the right one is
/// usually found by trial. Keep it in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Rbg,
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ChannelOrder {
    pub const ALL: [ChannelOrder; 6] = [
        ChannelOrder::Rgb,
        ChannelOrder::Rbg,
        ChannelOrder::Grb,
        ChannelOrder::Gbr,
        ChannelOrder::Brg,
        ChannelOrder::Bgr,
    ];

    /// The color's bytes in this order.
    #[inline]
    pub fn apply(self, color: Rgb) -> [u8; 3] {
        let Rgb { r, g, b } = color;
        match self {
            Self::Rgb => [r, g, b],
            Self::Rbg => [r, b, g],
            Self::Grb => [g, r, b],
            Self::Gbr => [g, b, r],
            Self::Brg => [b, r, g],
            Self::Bgr => [b, g, r],
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Rbg => "rbg",
            Self::Grb => "grb",
            Self::Gbr => "gbr",
            Self::Brg => "brg",
            Self::Bgr => "bgr",
        }
    }
}

impl FromStr for ChannelOrder {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|order| order.name() == wanted)
            .ok_or_else(|| {
                ParseOptionError::new("channel order", s, "rgb, rbg, grb, gbr, brg, bgr")
            })
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
