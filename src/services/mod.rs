pub mod frame_renderer;

pub use frame_renderer::{ColorUsage, FrameRenderer, RenderSummary, RenderTargets};
