//! The palette-closed result of dithering.

use image::RgbImage;

use crate::color::Rgb;
use crate::palette::Palette;

use super::ChannelOrder;

/// One palette index per pixel, row-major, plus the palette they index.
///
/// The indexed form is canonical; RGB output is computed on demand by
/// looking up palette colors, so every output pixel is a palette entry.
///
/// ```
/// use spectra_dither::{Palette, QuantizedImage, Rgb};
///
/// let palette = Palette::new(&[Rgb::BLACK, Rgb::WHITE]).unwrap();
/// let image = QuantizedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.pixel(1, 0), Rgb::WHITE);
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// assert_eq!(image.color_histogram(), vec![2, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedImage {
    indices: Vec<u8>,
    width: u32,
    height: u32,
    palette: Palette,
}

impl QuantizedImage {
    /// # Panics
    ///
    /// Panics if `indices.len() != width * height` or an index is outside
    /// the palette.
    pub fn new(indices: Vec<u8>, width: u32, height: u32, palette: Palette) -> Self {
        assert_eq!(
            indices.len(),
            width as usize * height as usize,
            "indices length must match {width}x{height}"
        );
        assert!(
            indices.iter().all(|&i| (i as usize) < palette.len()),
            "index outside palette of {} colors",
            palette.len()
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the image.
    #[inline]
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.indices[y as usize * self.width as usize + x as usize]
    }

    /// Color at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        self.palette.color(self.index_at(x, y) as usize)
    }

    /// Row-major colors.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.indices.iter().map(|&i| self.palette.color(i as usize))
    }

    /// `[R, G, B, R, G, B, ...]`, `width * height * 3` bytes.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.to_channel_bytes(ChannelOrder::Rgb)
    }

    /// Three bytes per pixel in the given channel order, ready for a panel
    /// buffer.
    pub fn to_channel_bytes(&self, order: ChannelOrder) -> Vec<u8> {
        let lut: Vec<[u8; 3]> = self.palette.colors().map(|c| order.apply(c)).collect();
        let mut out = Vec::with_capacity(self.indices.len() * 3);
        for &i in &self.indices {
            out.extend_from_slice(&lut[i as usize]);
        }
        out
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_raw(self.width, self.height, self.to_rgb_bytes())
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }

    /// Pixel count per palette index.
    pub fn color_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for &i in &self.indices {
            counts[i as usize] += 1;
        }
        counts
    }
}
