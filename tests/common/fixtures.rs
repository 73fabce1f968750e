//! Test fixtures: source images and config files written to temp dirs.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use inkframe::rendering::encode_rgb_png;

/// A decoded PNG, expanded to 8-bit RGB
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl DecodedPng {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.rgb.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }
}

/// Write an RGB PNG whose pixels come from `f(x, y)`
pub fn write_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    f: impl Fn(u32, u32) -> [u8; 3],
) -> PathBuf {
    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            rgb.extend_from_slice(&f(x, y));
        }
    }
    let path = dir.join(name);
    std::fs::write(&path, encode_rgb_png(width, height, &rgb).unwrap()).unwrap();
    path
}

/// A small photo-like source: a hue sweep left to right, darkening downwards
pub fn write_photo(dir: &Path, width: u32, height: u32) -> PathBuf {
    write_png(dir, "photo.png", width, height, |x, y| {
        let t = x as f32 / width.max(2) as f32;
        let shade = 1.0 - 0.6 * y as f32 / height.max(2) as f32;
        let r = (255.0 * (1.0 - t) * shade) as u8;
        let g = (200.0 * (1.0 - (2.0 * t - 1.0).abs()) * shade) as u8;
        let b = (255.0 * t * shade) as u8;
        [r, g, b]
    })
}

pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

/// Decode a PNG file, expanding palettes to RGB
pub fn read_png(path: &Path) -> DecodedPng {
    let bytes = std::fs::read(path).unwrap();
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!(
        info.color_type,
        png::ColorType::Rgb,
        "expected an opaque PNG"
    );
    buf.truncate(info.buffer_size());
    DecodedPng {
        width: info.width,
        height: info.height,
        rgb: buf,
    }
}
