pub mod png_writer;

pub use png_writer::{encode_indexed_png, encode_rgb_png};
