use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkframe::models::{AppConfig, DisplaySpec, CONFIG_ENV, DEFAULT_YAML};
use inkframe::services::{FrameRenderer, RenderTargets};
use spectra_dither::{EnhanceOptions, PaletteKind};

#[derive(Parser)]
#[command(name = "inkframe", version)]
#[command(about = "Inkframe - photo quantization and dithering for 6-color Spectra e-ink frames")]
struct Cli {
    /// Config file (defaults to $INKFRAME_CONFIG, then built-in defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quantize an image for the panel and write a PNG preview
    Render {
        /// Source image (PNG, JPEG or BMP)
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the raw panel buffer (3 bytes per pixel)
        #[arg(long)]
        buffer: Option<PathBuf>,

        /// Also write composed/enhanced/quantized snapshots to this directory
        #[arg(long)]
        checkpoints: Option<PathBuf>,

        /// Print the render summary as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the configured palette
    Palette {
        /// Show the extended palette instead of the anchors
        #[arg(long)]
        extended: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the default config.yaml
    InitConfig {
        /// Destination file
        #[arg(default_value = "config.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Command-line settings that take precedence over the config file
#[derive(Args)]
struct Overrides {
    /// Panel model: spectra6-7in3 or spectra6-13in3
    #[arg(long)]
    model: Option<String>,

    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Letterbox color as hex (e.g. "#FFFFFF")
    #[arg(long)]
    background: Option<String>,

    /// Palette: anchors or extended
    #[arg(long)]
    palette: Option<String>,

    /// Color distance: rgb, linear-rgb, oklab or hyab
    #[arg(long)]
    metric: Option<String>,

    /// Error storage: rolling or full-frame
    #[arg(long)]
    accumulator: Option<String>,

    /// Resampling filter: nearest, triangle, catmull-rom or lanczos3
    #[arg(long)]
    filter: Option<String>,

    /// Use the photo enhancement preset (brightness 1.1, saturation 1.4)
    #[arg(long)]
    photo: bool,

    #[arg(long)]
    brightness: Option<f32>,

    #[arg(long)]
    contrast: Option<f32>,

    #[arg(long)]
    saturation: Option<f32>,

    /// Panel buffer channel order: rgb, rbg, grb, gbr, brg or bgr
    #[arg(long)]
    channel_order: Option<String>,

    /// Re-compress the PNG with oxipng
    #[arg(long)]
    optimize: bool,
}

impl Overrides {
    fn apply(self, config: &mut AppConfig) {
        if let Some(model) = self.model {
            config.display.model = model;
        }
        if self.width.is_some() {
            config.display.width = self.width;
        }
        if self.height.is_some() {
            config.display.height = self.height;
        }
        if let Some(background) = self.background {
            config.display.background = background;
        }
        if let Some(palette) = self.palette {
            config.palette.kind = palette;
        }
        if let Some(metric) = self.metric {
            config.dither.metric = metric;
        }
        if let Some(accumulator) = self.accumulator {
            config.dither.accumulator = accumulator;
        }
        if let Some(filter) = self.filter {
            config.compose.filter = filter;
        }
        if self.photo {
            config.enhance = EnhanceOptions::photo().into();
        }
        if let Some(brightness) = self.brightness {
            config.enhance.brightness = brightness;
        }
        if let Some(contrast) = self.contrast {
            config.enhance.contrast = contrast;
        }
        if let Some(saturation) = self.saturation {
            config.enhance.saturation = saturation;
        }
        if let Some(order) = self.channel_order {
            config.output.channel_order = order;
        }
        if self.optimize {
            config.output.optimize = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inkframe=info,spectra_dither=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Some(Commands::Render {
            input,
            output,
            buffer,
            checkpoints,
            json,
            overrides,
        }) => {
            let targets = RenderTargets {
                png: output,
                buffer,
                checkpoints,
            };
            run_render_command(config_path, &input, &targets, overrides, json)
        }
        Some(Commands::Palette { extended, json }) => {
            run_palette_command(config_path, extended, json)
        }
        Some(Commands::InitConfig { path, force }) => run_init_config_command(&path, force),
        None => run_status_command(config_path),
    }
}

/// Render one image to the requested files
fn run_render_command(
    config_path: Option<&Path>,
    input: &Path,
    targets: &RenderTargets,
    overrides: Overrides,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = AppConfig::resolve(config_path).context("Failed to load configuration")?;
    overrides.apply(&mut config);

    let renderer = FrameRenderer::new(&config).context("Invalid render settings")?;
    let summary = renderer
        .render_file(input, targets)
        .with_context(|| format!("Failed to render {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "Rendered {}x{} frame in {} ms",
        summary.width, summary.height, summary.elapsed_ms
    );
    for file in &summary.files {
        println!("  + {}", file.display());
    }
    println!("\nColors:");
    let total = (summary.width as usize * summary.height as usize).max(1);
    for usage in &summary.colors {
        println!(
            "  {:>3}  {}  {:<14} {:>8} px  {:>5.1}%",
            usage.index,
            usage.color,
            usage.name,
            usage.pixels,
            usage.pixels as f64 * 100.0 / total as f64
        );
    }

    Ok(())
}

/// Print the palette the configuration selects
fn run_palette_command(config_path: Option<&Path>, extended: bool, json: bool) -> anyhow::Result<()> {
    let config = AppConfig::resolve(config_path).context("Failed to load configuration")?;
    let catalog = config.palette_catalog()?;
    let kind = if extended {
        PaletteKind::Extended
    } else {
        config.palette_kind()?
    };
    let palette = catalog.palette(kind);

    if json {
        let entries: Vec<_> = palette
            .entries()
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "index": entry.index,
                    "name": entry.name,
                    "color": entry.color.to_hex(),
                    "anchor": (entry.index as usize) < palette.anchor_count(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Palette {} ({kind}, {} colors)", catalog.name(), palette.len());
    for (i, entry) in palette.entries().iter().enumerate() {
        if i == palette.anchor_count() {
            println!("  --");
        }
        println!("  {:>3}  {}  {}", entry.index, entry.color.to_hex(), entry.name);
    }
    Ok(())
}

/// Write the annotated default configuration
fn run_init_config_command(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_YAML)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Display version and configuration summary
fn run_status_command(config_path: Option<&Path>) -> anyhow::Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Inkframe v{VERSION}");
    println!("Photo quantization for 6-color Spectra e-ink frames\n");

    let env_config = std::env::var(CONFIG_ENV).ok();
    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        env_config.as_deref().unwrap_or("(not set)")
    );

    let config = AppConfig::resolve(config_path).context("Failed to load configuration")?;
    let source = config_path
        .map(|p| p.display().to_string())
        .or(env_config)
        .unwrap_or_else(|| "built-in defaults".to_string());
    let pipeline = config.to_pipeline_config()?;

    println!("\nConfiguration ({source}):");
    println!(
        "  display     = {} ({}x{})",
        config.display.model, pipeline.width, pipeline.height
    );
    println!("  background  = {}", pipeline.background.to_hex());
    println!(
        "  palette     = {} ({} colors)",
        config.palette.kind,
        pipeline.palette.len()
    );
    println!(
        "  enhance     = brightness {}, contrast {}, saturation {}",
        pipeline.enhance.brightness, pipeline.enhance.contrast, pipeline.enhance.saturation
    );
    println!("  metric      = {}", pipeline.metric);
    println!("  accumulator = {}", pipeline.accumulator);
    println!("  filter      = {}", pipeline.filter);
    println!("  channels    = {}", config.channel_order()?);

    println!("\nModels:");
    for spec in DisplaySpec::ALL {
        println!("  {:<15} {}x{}", spec.name, spec.width, spec.height);
    }

    println!("\nRun 'inkframe --help' for commands.");
    Ok(())
}
