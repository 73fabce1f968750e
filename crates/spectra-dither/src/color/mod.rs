//! Color types and conversions.
//!
//! - [`Rgb`]: 8-bit sRGB, the currency of images, palettes and the panel
//! - [`Rgbf`]: sRGB on the same 0..=255 scale as unclamped `f32`; dithering
//!   targets and residuals live here
//! - [`LinearRgb`]: linear light
//! - [`Oklab`] / [`Oklch`]: perceptual space for enhancement and matching
//!
//! ```
//! use spectra_dither::{LinearRgb, Oklab, Rgb, Rgbf};
//!
//! let red = Rgb::new(191, 0, 0);
//! let lab = Oklab::from(LinearRgb::from(red));
//! let back = Rgbf::from(lab).to_rgb();
//! assert_eq!(back, red);
//! ```

mod linear_rgb;
mod lut;
mod oklab;
mod rgb;

pub use linear_rgb::LinearRgb;
pub use oklab::{Oklab, Oklch};
pub use rgb::{Rgb, Rgbf};
