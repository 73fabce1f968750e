//! Fitting arbitrary source images onto the panel's fixed-size canvas.

mod composer;
mod filter;

pub use composer::{contain_size, FrameComposer};
pub use filter::ResampleFilter;
