//! Calibration data for the Waveshare 7.3" E Ink Spectra 6 panel.
//!
//! Anchors are measured panel colors, not RGB primaries. Pure (255,0,0)
//! style primaries matched the panel noticeably worse on hardware.

use crate::color::Rgb;

pub(crate) const NAME: &str = "spectra6";

pub(crate) const ANCHORS: [(&str, Rgb); 6] = [
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(191, 0, 0)),
    ("yellow", Rgb::new(255, 243, 56)),
    ("green", Rgb::new(67, 138, 28)),
    ("blue", Rgb::new(100, 64, 255)),
];

/// Synthetic shades appended by the extended palette.
pub(crate) const EXTENDED: [(&str, Rgb); 19] = [
    ("dark red", Rgb::new(96, 0, 0)),
    ("dark yellow", Rgb::new(128, 122, 28)),
    ("dark green", Rgb::new(34, 69, 14)),
    ("dark blue", Rgb::new(50, 32, 128)),
    ("light red", Rgb::new(223, 128, 128)),
    ("light yellow", Rgb::new(255, 249, 156)),
    ("light green", Rgb::new(150, 196, 142)),
    ("light blue", Rgb::new(177, 160, 255)),
    ("muted red", Rgb::new(128, 64, 64)),
    ("ochre", Rgb::new(192, 122, 56)),
    ("leaf green", Rgb::new(100, 180, 64)),
    ("violet", Rgb::new(140, 100, 200)),
    ("gray 32", Rgb::new(32, 32, 32)),
    ("gray 64", Rgb::new(64, 64, 64)),
    ("gray 96", Rgb::new(96, 96, 96)),
    ("gray 128", Rgb::new(128, 128, 128)),
    ("gray 160", Rgb::new(160, 160, 160)),
    ("gray 192", Rgb::new(192, 192, 192)),
    ("gray 224", Rgb::new(224, 224, 224)),
];
