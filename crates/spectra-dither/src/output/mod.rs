//! Dithered output and its byte encodings.

mod channel_order;
mod quantized;

pub use channel_order::ChannelOrder;
pub use quantized::QuantizedImage;
