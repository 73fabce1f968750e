//! Calibrated palette catalogs.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use super::palette::Palette;
use super::spectra6;
use crate::color::Rgb;
use crate::error::ParseOptionError;

/// Which palette of a catalog to quantize against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    /// Only the physical panel colors.
    #[default]
    AnchorsOnly,
    /// Anchors followed by synthetic shades and grays.
    Extended,
}

impl FromStr for PaletteKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anchors" | "anchors-only" => Ok(Self::AnchorsOnly),
            "extended" => Ok(Self::Extended),
            _ => Err(ParseOptionError::new("palette kind", s, "anchors, extended")),
        }
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AnchorsOnly => "anchors",
            Self::Extended => "extended",
        })
    }
}

/// A named hardware calibration: its anchors and its extended variant.
///
/// Catalogs are immutable once built. A different panel revision gets a
/// different catalog rather than edits to this one.
///
/// ```
/// use spectra_dither::{PaletteCatalog, PaletteKind, Rgb};
///
/// let catalog = PaletteCatalog::spectra6();
/// let anchors = catalog.palette(PaletteKind::AnchorsOnly);
/// assert_eq!(anchors.len(), 6);
/// assert_eq!(anchors.color(2), Rgb::new(191, 0, 0));
///
/// let extended = catalog.palette(PaletteKind::Extended);
/// assert_eq!(extended.anchors(), anchors.entries());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteCatalog {
    name: String,
    anchors: Palette,
    extended: Palette,
}

impl PaletteCatalog {
    /// The calibrated Waveshare 7.3" Spectra 6 colors.
    pub fn spectra6() -> Self {
        Self {
            name: spectra6::NAME.to_string(),
            anchors: Palette::from_trusted(&spectra6::ANCHORS, &[]),
            extended: Palette::from_trusted(&spectra6::ANCHORS, &spectra6::EXTENDED),
        }
    }

    /// A custom calibration, validated as a whole.
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        anchors: &[(S, Rgb)],
        extensions: &[(S, Rgb)],
    ) -> Result<Self, PaletteError> {
        let anchors = Palette::with_names(anchors)?;
        let extended = anchors.extend(extensions)?;
        Ok(Self {
            name: name.into(),
            anchors,
            extended,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn palette(&self, kind: PaletteKind) -> &Palette {
        match kind {
            PaletteKind::AnchorsOnly => &self.anchors,
            PaletteKind::Extended => &self.extended,
        }
    }
}

impl Default for PaletteCatalog {
    fn default() -> Self {
        Self::spectra6()
    }
}
