//! Inkframe - photo frames for 6-color Spectra e-ink panels
//!
//! Loads a YAML configuration, runs the `spectra-dither` pipeline and writes
//! PNG previews and raw panel buffers.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
