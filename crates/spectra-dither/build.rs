use std::env;
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

/// IEC 61966-2-1 decode: gamma-encoded 0..=1 to linear light
fn decode(encoded: f64) -> f64 {
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 encode: linear light to gamma-encoded 0..=1
fn encode(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn write_table(
    out: &mut impl Write,
    doc: &str,
    name: &str,
    len: usize,
    value: impl Fn(usize) -> f64,
) -> Result<()> {
    writeln!(out, "/// {doc}")?;
    writeln!(out, "pub static {name}: [f32; {len}] = [")?;
    for i in 0..len {
        if i > 0 && i % 8 == 0 {
            writeln!(out)?;
        }
        write!(out, "    {:.9},", value(i) as f32)?;
    }
    writeln!(out, "\n];\n")
}

fn main() -> Result<()> {
    let out_dir = env::var_os("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let dest = Path::new(&out_dir).join("gamma_lut.rs");
    let mut out = BufWriter::new(File::create(dest)?);

    // Exact decode for every 8-bit code value; canvases and palettes start here.
    write_table(
        &mut out,
        "Linear light for each 8-bit channel value",
        "U8_TO_LINEAR",
        256,
        |i| decode(i as f64 / 255.0),
    )?;
    // Interpolated tables for error-adjusted values that fall between codes.
    write_table(
        &mut out,
        "Linear light sampled at `index / 4095` of the encoded range",
        "ENCODED_TO_LINEAR",
        4096,
        |i| decode(i as f64 / 4095.0),
    )?;
    write_table(
        &mut out,
        "Encoded value (0..=1) sampled at `index / 4095` of linear light",
        "LINEAR_TO_ENCODED",
        4096,
        |i| encode(i as f64 / 4095.0),
    )?;
    out.flush()?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
