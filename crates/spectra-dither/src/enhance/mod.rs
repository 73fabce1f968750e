//! Tone enhancement before quantization.
//!
//! Spectra panels have a narrow gamut, so photos usually look better with
//! a little extra lightness and chroma. See [`ToneEnhancer`] for the exact
//! transform and [`EnhanceOptions::photo`] for the tuned preset.

mod enhancer;
mod options;

pub use enhancer::ToneEnhancer;
pub use options::EnhanceOptions;
