//! Gamma lookup tables generated by build.rs.
//!
//! Inputs outside 0.0..=1.0 are clamped. Error-adjusted colors routinely
//! overshoot the gamut, and every caller that reaches this module wants the
//! nearest in-gamut value.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Exact linear value for an 8-bit channel.
#[inline]
pub fn u8_to_linear(value: u8) -> f32 {
    U8_TO_LINEAR[value as usize]
}

/// Gamma-encoded (0.0..=1.0) to linear light, interpolated.
#[inline]
pub fn encoded_to_linear(encoded: f32) -> f32 {
    sample(&ENCODED_TO_LINEAR, encoded)
}

/// Linear light (0.0..=1.0) to gamma-encoded, interpolated.
#[inline]
pub fn linear_to_encoded(linear: f32) -> f32 {
    sample(&LINEAR_TO_ENCODED, linear)
}

#[inline]
fn sample(table: &[f32; 4096], value: f32) -> f32 {
    // NaN clamps to NaN; map it to black instead of indexing with garbage
    let value = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    let scaled = value * 4095.0;
    let index = scaled as usize;
    if index >= 4095 {
        return table[4095];
    }
    let frac = scaled - index as f32;
    let a = table[index];
    let b = table[index + 1];
    a + (b - a) * frac
}
