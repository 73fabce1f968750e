//! Gamma-encoded RGB in 8-bit and floating-point form.
//!
//! [`Rgb`] is what images, palettes and the panel speak. [`Rgbf`] carries the
//! same encoding on the same 0..=255 scale but as unclamped `f32`, which is
//! what error diffusion needs: an error-adjusted target may legitimately sit
//! at 300 or -40 until the next palette decision absorbs it.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

use super::linear_rgb::LinearRgb;
use super::lut::{encoded_to_linear, linear_to_encoded, u8_to_linear};
use crate::palette::ParseColorError;

/// An 8-bit-per-channel sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Uppercase `#RRGGBB` form, as used in config files and CLI output.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    ///
    /// Case-insensitive, surrounding whitespace is ignored. The 3-digit
    /// shorthand expands each digit (`#F80` is `#FF8800`).
    ///
    /// ```
    /// use spectra_dither::Rgb;
    ///
    /// let red: Rgb = "#bf0000".parse().unwrap();
    /// assert_eq!(red, Rgb::new(191, 0, 0));
    /// let white: Rgb = "FFF".parse().unwrap();
    /// assert_eq!(white, Rgb::WHITE);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

impl From<Rgb> for LinearRgb {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        LinearRgb::new(u8_to_linear(rgb.r), u8_to_linear(rgb.g), u8_to_linear(rgb.b))
    }
}

/// Gamma-encoded RGB on the 0.0..=255.0 scale, not clamped.
///
/// Used for dithering targets and residuals. Arithmetic is per channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgbf {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgbf {
    pub const ZERO: Rgbf = Rgbf::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Each channel clamped to 0.0..=255.0.
    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 255.0),
            self.g.clamp(0.0, 255.0),
            self.b.clamp(0.0, 255.0),
        )
    }

    /// Round to the nearest 8-bit color, clamping out-of-range channels.
    #[inline]
    pub fn to_rgb(self) -> Rgb {
        let c = self.clamped();
        Rgb::new(
            c.r.round() as u8,
            c.g.round() as u8,
            c.b.round() as u8,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Rgb> for Rgbf {
    #[inline]
    fn from(rgb: Rgb) -> Self {
        Self::new(rgb.r as f32, rgb.g as f32, rgb.b as f32)
    }
}

impl From<[f32; 3]> for Rgbf {
    #[inline]
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgbf> for LinearRgb {
    /// Gamma decode. Out-of-gamut channels are clamped first.
    #[inline]
    fn from(c: Rgbf) -> Self {
        LinearRgb::new(
            encoded_to_linear(c.r / 255.0),
            encoded_to_linear(c.g / 255.0),
            encoded_to_linear(c.b / 255.0),
        )
    }
}

impl From<LinearRgb> for Rgbf {
    /// Gamma encode. Out-of-gamut channels are clamped first, so the
    /// result is always within 0.0..=255.0.
    #[inline]
    fn from(c: LinearRgb) -> Self {
        Self::new(
            linear_to_encoded(c.r) * 255.0,
            linear_to_encoded(c.g) * 255.0,
            linear_to_encoded(c.b) * 255.0,
        )
    }
}

impl Add for Rgbf {
    type Output = Rgbf;

    #[inline]
    fn add(self, rhs: Rgbf) -> Rgbf {
        Rgbf::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Rgbf {
    #[inline]
    fn add_assign(&mut self, rhs: Rgbf) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Sub for Rgbf {
    type Output = Rgbf;

    #[inline]
    fn sub(self, rhs: Rgbf) -> Rgbf {
        Rgbf::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b)
    }
}

impl Mul<f32> for Rgbf {
    type Output = Rgbf;

    #[inline]
    fn mul(self, k: f32) -> Rgbf {
        Rgbf::new(self.r * k, self.g * k, self.b * k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing_6digit() {
        assert_eq!("#FFFFFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!("000000".parse::<Rgb>().unwrap(), Rgb::BLACK);
        assert_eq!("#64 40FF".parse::<Rgb>().ok(), None);
        assert_eq!("#6440ff".parse::<Rgb>().unwrap(), Rgb::new(100, 64, 255));
    }

    #[test]
    fn test_hex_parsing_shorthand() {
        assert_eq!("#f00".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("#ABC".parse::<Rgb>().unwrap(), Rgb::new(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Rgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert!(matches!(
            "#FFFF".parse::<Rgb>(),
            Err(ParseColorError::InvalidLength)
        ));
        assert!(matches!("".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
        assert!(matches!("#".parse::<Rgb>(), Err(ParseColorError::InvalidLength)));
        // multi-byte characters must not split a UTF-8 sequence
        assert!("#ÿÿÿ".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_hex_parsing_whitespace_and_case() {
        let upper: Rgb = "  #ABCDEF ".parse().unwrap();
        let lower: Rgb = "#abcdef".parse().unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Rgb::new(191, 0, 0).to_string(), "#BF0000");
        assert_eq!(Rgb::new(255, 243, 56).to_hex(), "#FFF338");
    }

    #[test]
    fn test_rgbf_rounding_and_clamp() {
        assert_eq!(Rgbf::new(-12.0, 127.5, 300.0).to_rgb(), Rgb::new(0, 128, 255));
        assert_eq!(Rgbf::new(254.4, 0.49, 10.0).to_rgb(), Rgb::new(254, 0, 10));
        let c = Rgbf::new(-1.0, 256.0, 12.5).clamped();
        assert_eq!(c, Rgbf::new(0.0, 255.0, 12.5));
    }

    #[test]
    fn test_rgbf_arithmetic() {
        let a = Rgbf::new(10.0, 20.0, 30.0);
        let b = Rgbf::new(1.0, -2.0, 3.0);
        assert_eq!(a + b, Rgbf::new(11.0, 18.0, 33.0));
        assert_eq!(a - b, Rgbf::new(9.0, 22.0, 27.0));
        assert_eq!(b * 0.5, Rgbf::new(0.5, -1.0, 1.5));
        let mut c = a;
        c += b;
        assert_eq!(c, a + b);
    }

    /// u8 -> linear -> Rgbf -> u8 must be within 1 LSB for every code value.
    #[test]
    fn test_gamma_round_trip_accuracy() {
        for i in 0..=255u8 {
            let linear = LinearRgb::from(Rgb::new(i, i, i));
            let back = Rgbf::from(linear).to_rgb();
            let error = (back.r as i32 - i as i32).abs();
            assert!(error <= 1, "round-trip error {error} for value {i}");
        }
    }

    #[test]
    fn test_known_gamma_values() {
        // sRGB 128 -> linear ~0.2158
        let mid = LinearRgb::from(Rgb::new(128, 128, 128));
        assert!((mid.r - 0.2158).abs() < 0.001, "got {}", mid.r);

        // linear 0.5 -> sRGB ~187.5
        let encoded = Rgbf::from(LinearRgb::new(0.5, 0.5, 0.5));
        assert!((encoded.r - 187.5).abs() < 0.5, "got {}", encoded.r);
    }

    #[test]
    fn test_float_decode_clamps_out_of_gamut() {
        let over = LinearRgb::from(Rgbf::new(400.0, -50.0, 255.0));
        assert!((over.r - 1.0).abs() < 1e-6);
        assert_eq!(over.g, 0.0);
    }
}
