//! PNG encoding for quantized frames and RGB snapshots.

use std::io::Cursor;

use spectra_dither::QuantizedImage;

use crate::error::RenderError;

/// Encode a quantized frame as a palette-indexed PNG.
///
/// Bit depth follows the palette size: 6 anchors fit in 4 bits, an extended
/// palette in 8. With `optimize`, the result is re-compressed with oxipng;
/// if that fails the plain encoding is returned.
pub fn encode_indexed_png(image: &QuantizedImage, optimize: bool) -> Result<Vec<u8>, RenderError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(RenderError::PngEncode(format!(
            "cannot encode an empty {}x{} frame",
            image.width(),
            image.height()
        )));
    }
    let palette = image.palette();
    let plte: Vec<u8> = palette.colors().flat_map(|c| c.to_bytes()).collect();
    let (bit_depth, bits) = bit_depth_for(palette.len());

    let packed = if bits == 8 {
        image.indices().to_vec()
    } else {
        pack_nbits(image.indices(), image.width(), bits)
    };

    let png_bytes = encode(
        image.width(),
        image.height(),
        png::ColorType::Indexed,
        bit_depth,
        Some(&plte),
        &packed,
    )?;

    if optimize {
        Ok(optimize_png(png_bytes))
    } else {
        Ok(png_bytes)
    }
}

/// Encode interleaved 8-bit RGB as a truecolor PNG.
pub fn encode_rgb_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(RenderError::PngEncode(format!(
            "expected {expected} RGB bytes for {width}x{height}, got {}",
            rgb.len()
        )));
    }
    encode(
        width,
        height,
        png::ColorType::Rgb,
        png::BitDepth::Eight,
        None,
        rgb,
    )
}

fn encode(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            png_bytes
        }
    }
}

/// Smallest PNG bit depth that can index `colors` palette entries.
fn bit_depth_for(colors: usize) -> (png::BitDepth, u8) {
    match colors {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = indices.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in indices.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &idx) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (idx & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}
