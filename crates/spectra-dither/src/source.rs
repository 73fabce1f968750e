//! Source image decoding.
//!
//! Everything entering the pipeline is flattened to opaque 8-bit RGB here.
//! Transparent pixels are composited onto the frame's background color so
//! that letterbox borders and transparent regions match.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{DynamicImage, ImageReader, RgbImage, RgbaImage};

use crate::color::Rgb;
use crate::error::InputError;

/// A decoded, opaque RGB image with non-zero area.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    image: RgbImage,
}

impl SourceImage {
    /// Wrap an RGB image. Rejects images with zero width or height.
    pub fn from_rgb_image(image: RgbImage) -> Result<Self, InputError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(InputError::ZeroArea { width, height });
        }
        Ok(Self { image })
    }

    /// Build from an already decoded pixel buffer.
    ///
    /// `channels` is 1 (gray), 3 (RGB) or 4 (RGBA, composited onto
    /// `background`).
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        bytes: &[u8],
        background: Rgb,
    ) -> Result<Self, InputError> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(InputError::UnsupportedChannels(channels));
        }
        if width == 0 || height == 0 {
            return Err(InputError::ZeroArea { width, height });
        }
        let expected = width as usize * height as usize * channels as usize;
        if bytes.len() != expected {
            return Err(InputError::BufferSize {
                expected,
                actual: bytes.len(),
            });
        }

        let rgb: Vec<u8> = match channels {
            1 => bytes.iter().flat_map(|&v| [v, v, v]).collect(),
            3 => bytes.to_vec(),
            _ => bytes
                .chunks_exact(4)
                .flat_map(|px| composite(px, background).to_bytes())
                .collect(),
        };
        let image = RgbImage::from_raw(width, height, rgb).ok_or(InputError::BufferSize {
            expected,
            actual: bytes.len(),
        })?;
        Ok(Self { image })
    }

    /// Decode an encoded image (PNG, JPEG, BMP), sniffing the format.
    pub fn decode(bytes: &[u8], background: Rgb) -> Result<Self, InputError> {
        let decoded = image::load_from_memory(bytes)?;
        Self::from_dynamic(decoded, background)
    }

    /// Read and decode an image file, sniffing the format from its content.
    pub fn open(path: impl AsRef<Path>, background: Rgb) -> Result<Self, InputError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| InputError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let decoded = ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(io_err)?
            .decode()?;
        Self::from_dynamic(decoded, background)
    }

    pub fn from_dynamic(image: DynamicImage, background: Rgb) -> Result<Self, InputError> {
        let rgb = if image.color().has_alpha() {
            flatten(&image.to_rgba8(), background)
        } else {
            image.to_rgb8()
        };
        Self::from_rgb_image(rgb)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_rgb_image(self) -> RgbImage {
        self.image
    }
}

/// Decode encoded bytes into a [`SourceImage`].
pub fn decode_bytes(bytes: &[u8], background: Rgb) -> Result<SourceImage, InputError> {
    SourceImage::decode(bytes, background)
}

/// Decode an image file into a [`SourceImage`].
pub fn decode_path(path: impl AsRef<Path>, background: Rgb) -> Result<SourceImage, InputError> {
    SourceImage::open(path, background)
}

/// Composite an RGBA image onto a solid background.
pub fn flatten(rgba: &RgbaImage, background: Rgb) -> RgbImage {
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        dst.0 = composite(&src.0, background).to_bytes();
    }
    out
}

#[inline]
fn composite(px: &[u8], background: Rgb) -> Rgb {
    let (r, g, b, a) = (px[0], px[1], px[2], px[3]);
    match a {
        255 => Rgb::new(r, g, b),
        0 => background,
        _ => {
            let a = a as u16;
            let blend = |fg: u8, bg: u8| ((fg as u16 * a + bg as u16 * (255 - a)) / 255) as u8;
            Rgb::new(
                blend(r, background.r),
                blend(g, background.g),
                blend(b, background.b),
            )
        }
    }
}
