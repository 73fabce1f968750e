use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use spectra_dither::{
    Canvas, ChannelOrder, Pipeline, PipelineError, PipelineOutput, SourceImage,
};

use crate::error::{AppError, RenderError};
use crate::models::AppConfig;
use crate::rendering::{encode_indexed_png, encode_rgb_png};

/// Where a render writes its artifacts
#[derive(Debug, Clone, Default)]
pub struct RenderTargets {
    /// Indexed PNG preview
    pub png: PathBuf,
    /// Raw 3-byte-per-pixel panel buffer in the configured channel order
    pub buffer: Option<PathBuf>,
    /// Directory for composed / enhanced / quantized RGB snapshots
    pub checkpoints: Option<PathBuf>,
}

impl RenderTargets {
    pub fn png(path: impl Into<PathBuf>) -> Self {
        Self {
            png: path.into(),
            ..Default::default()
        }
    }
}

/// Pixel count of one palette color in a rendered frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorUsage {
    pub index: u8,
    pub name: String,
    pub color: String,
    pub pixels: usize,
}

/// What a render produced
#[derive(Debug, Clone, Serialize)]
pub struct RenderSummary {
    pub width: u32,
    pub height: u32,
    pub png_bytes: usize,
    pub files: Vec<PathBuf>,
    pub colors: Vec<ColorUsage>,
    pub elapsed_ms: u64,
}

/// Runs the pipeline and writes its artifacts
pub struct FrameRenderer {
    pipeline: Pipeline,
    channel_order: ChannelOrder,
    optimize: bool,
}

impl FrameRenderer {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let pipeline = Pipeline::new(config.to_pipeline_config()?)?;
        Ok(Self {
            pipeline,
            channel_order: config.channel_order()?,
            optimize: config.output.optimize,
        })
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Render an already decoded image, keeping the intermediate canvases
    pub fn render(&self, source: &SourceImage) -> Result<PipelineOutput, AppError> {
        Ok(self.pipeline.run_with_checkpoints(source)?)
    }

    /// Decode `input`, render it and write every requested artifact
    pub fn render_file(&self, input: &Path, targets: &RenderTargets) -> Result<RenderSummary, AppError> {
        let started = Instant::now();
        let background = self.pipeline.config().background;
        let source = SourceImage::open(input, background).map_err(PipelineError::from)?;
        tracing::info!(
            input = %input.display(),
            width = source.width(),
            height = source.height(),
            "Decoded source image"
        );

        let output = self.render(&source)?;
        let mut files = Vec::new();

        let png = encode_indexed_png(&output.quantized, self.optimize)?;
        write_file(&targets.png, &png)?;
        files.push(targets.png.clone());

        if let Some(path) = &targets.buffer {
            write_file(path, &output.quantized.to_channel_bytes(self.channel_order))?;
            files.push(path.clone());
        }

        if let Some(dir) = &targets.checkpoints {
            files.extend(write_checkpoints(dir, &output)?);
        }

        let quantized = &output.quantized;
        let colors = quantized
            .palette()
            .entries()
            .iter()
            .zip(quantized.color_histogram())
            .map(|(entry, pixels)| ColorUsage {
                index: entry.index,
                name: entry.name.clone(),
                color: entry.color.to_hex(),
                pixels,
            })
            .collect();

        let summary = RenderSummary {
            width: quantized.width(),
            height: quantized.height(),
            png_bytes: png.len(),
            files,
            colors,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };
        tracing::info!(
            output = %targets.png.display(),
            bytes = summary.png_bytes,
            elapsed_ms = summary.elapsed_ms,
            "Rendered frame"
        );
        Ok(summary)
    }
}

fn write_checkpoints(dir: &Path, output: &PipelineOutput) -> Result<Vec<PathBuf>, RenderError> {
    std::fs::create_dir_all(dir).map_err(|source| RenderError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let quantized = &output.quantized;
    let snapshots = [
        ("01-composed.png", canvas_png(&output.composed)?),
        ("02-enhanced.png", canvas_png(&output.enhanced)?),
        (
            "03-quantized.png",
            encode_rgb_png(quantized.width(), quantized.height(), &quantized.to_rgb_bytes())?,
        ),
    ];

    let mut written = Vec::with_capacity(snapshots.len());
    for (name, bytes) in snapshots {
        let path = dir.join(name);
        write_file(&path, &bytes)?;
        tracing::debug!(path = %path.display(), "Wrote checkpoint");
        written.push(path);
    }
    Ok(written)
}

fn canvas_png(canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
    let rgb: Vec<u8> = canvas.pixels().iter().flat_map(|p| p.to_bytes()).collect();
    encode_rgb_png(canvas.width(), canvas.height(), &rgb)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    std::fs::write(path, bytes).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spectra_dither::Rgb;

    fn small_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.display.width = Some(24);
        config.display.height = Some(12);
        config
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = small_config();
        config.output.channel_order = "argb".to_string();
        assert!(matches!(
            FrameRenderer::new(&config),
            Err(AppError::InvalidSetting { .. })
        ));

        let mut config = small_config();
        config.enhance.contrast = -1.0;
        assert!(matches!(FrameRenderer::new(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_render_keeps_checkpoints() {
        let renderer = FrameRenderer::new(&small_config()).unwrap();
        let source = SourceImage::from_raw(4, 4, 3, &[0, 0, 255].repeat(16), Rgb::WHITE).unwrap();
        let output = renderer.render(&source).unwrap();

        assert_eq!((output.composed.width(), output.composed.height()), (24, 12));
        assert_eq!((output.quantized.width(), output.quantized.height()), (24, 12));
        // 4x4 onto 24x12 fills the middle 12 columns; the left border stays white.
        assert_eq!(output.composed.get(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn test_missing_input_is_pipeline_error() {
        let renderer = FrameRenderer::new(&small_config()).unwrap();
        let err = renderer
            .render_file(Path::new("/nonexistent/in.png"), &RenderTargets::png("/tmp/unused.png"))
            .unwrap_err();
        assert!(matches!(err, AppError::Pipeline(_)));
    }
}
