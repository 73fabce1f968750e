//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use spectra_dither::Palette;

use super::fixtures::DecodedPng;

/// Assert every pixel of a decoded image is a palette color
pub fn assert_palette_closure(image: &DecodedPng, palette: &Palette) {
    let allowed: Vec<[u8; 3]> = palette.colors().map(|c| c.to_bytes()).collect();
    for (i, pixel) in image.pixels().enumerate() {
        assert!(
            allowed.contains(&pixel),
            "pixel {} at ({}, {}) is {:?}, not a palette color",
            i,
            i as u32 % image.width,
            i as u32 / image.width,
            pixel
        );
    }
}

/// Assert a decoded image has the expected size
pub fn assert_dimensions(image: &DecodedPng, width: u32, height: u32) {
    assert_eq!(
        (image.width, image.height),
        (width, height),
        "unexpected image size"
    );
}
