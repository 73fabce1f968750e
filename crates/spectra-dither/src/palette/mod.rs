//! Palettes and calibrated palette catalogs.

mod catalog;
mod error;
mod palette;
mod spectra6;

pub use catalog::{PaletteCatalog, PaletteKind};
pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, PaletteEntry};
