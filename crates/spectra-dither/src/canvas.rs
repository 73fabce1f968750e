//! Fixed-size RGB pixel grid passed between pipeline stages.

use image::RgbImage;

use crate::color::Rgb;
use crate::error::InputError;

/// A `width` x `height` grid of RGB pixels in row-major order.
///
/// Canvases are transient: each stage consumes one and produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// A canvas filled with a single color.
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, InputError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(InputError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a canvas by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let pixels = image.pixels().map(|p| Rgb::from_bytes(p.0)).collect();
        Self {
            width: image.width(),
            height: image.height(),
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixels.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at (x, y), or `None` outside the canvas.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.offset(x, y)])
        } else {
            None
        }
    }

    /// # Panics
    ///
    /// Panics if (x, y) lies outside the canvas.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} canvas",
            self.width,
            self.height
        );
        let offset = self.offset(x, y);
        self.pixels[offset] = color;
    }

    /// Apply `f` to every pixel, keeping dimensions.
    pub fn map(&self, f: impl FnMut(&Rgb) -> Rgb) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(f).collect(),
        }
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        let bytes = self.pixels.iter().flat_map(|p| p.to_bytes()).collect();
        RgbImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
