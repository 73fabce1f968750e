use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use spectra_dither::{
    ChannelOrder, ConfigError, EnhanceOptions, Palette, PaletteCatalog, PaletteKind,
    PipelineConfig, Rgb,
};

use super::display_spec::DisplaySpec;
use crate::error::AppError;

/// Environment variable naming the config file when `--config` is not given
pub const CONFIG_ENV: &str = "INKFRAME_CONFIG";

/// The annotated default configuration written by `inkframe init-config`
pub const DEFAULT_YAML: &str = include_str!("../../config.yaml");

/// Application configuration loaded from config.yaml
///
/// Option names are kept as strings so that config files and CLI flags go
/// through the same parsing in [`AppConfig::to_pipeline_config`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub palette: PaletteConfig,
    pub enhance: EnhanceConfig,
    pub dither: DitherConfig,
    pub compose: ComposeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Panel model name (see [`DisplaySpec::from_name`])
    pub model: String,

    /// Overrides the model's width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Overrides the model's height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Hex letterbox color
    pub background: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            model: DisplaySpec::default().name.to_string(),
            width: None,
            height: None,
            background: Rgb::WHITE.to_hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// "anchors" or "extended"
    pub kind: String,

    /// Measured panel colors replacing the built-in calibration
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anchors: Vec<NamedColor>,

    /// Synthetic colors appended to `anchors` for the extended palette
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extended: Vec<NamedColor>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            kind: PaletteKind::default().to_string(),
            anchors: Vec::new(),
            extended: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    /// `#RRGGBB` or `#RGB`
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        EnhanceOptions::neutral().into()
    }
}

impl From<EnhanceOptions> for EnhanceConfig {
    fn from(options: EnhanceOptions) -> Self {
        Self {
            brightness: options.brightness,
            contrast: options.contrast,
            saturation: options.saturation,
        }
    }
}

impl From<EnhanceConfig> for EnhanceOptions {
    fn from(config: EnhanceConfig) -> Self {
        EnhanceOptions::neutral()
            .brightness(config.brightness)
            .contrast(config.contrast)
            .saturation(config.saturation)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DitherConfig {
    pub metric: String,
    pub accumulator: String,
}

impl Default for DitherConfig {
    fn default() -> Self {
        let defaults = PipelineConfig::default();
        Self {
            metric: defaults.metric.to_string(),
            accumulator: defaults.accumulator.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    pub filter: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            filter: PipelineConfig::default().filter.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Byte order of the raw frame buffer
    pub channel_order: String,

    /// Re-compress PNG output with oxipng
    pub optimize: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            channel_order: ChannelOrder::default().to_string(),
            optimize: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            model = %config.display.model,
            palette = %config.palette.kind,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `path`, else from `$INKFRAME_CONFIG`, else use defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(env_path) => Self::load(&PathBuf::from(env_path)),
            None => {
                tracing::debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> Result<String, AppError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Panel model with width/height overrides applied
    pub fn display_spec(&self) -> Result<DisplaySpec, AppError> {
        let mut spec = DisplaySpec::from_name(&self.display.model).ok_or_else(|| {
            let known: Vec<_> = DisplaySpec::names().collect();
            AppError::invalid_setting(
                "display.model",
                format!(
                    "unknown model {:?} (expected one of: {})",
                    self.display.model,
                    known.join(", ")
                ),
            )
        })?;
        if let Some(width) = self.display.width {
            spec.width = width;
        }
        if let Some(height) = self.display.height {
            spec.height = height;
        }
        Ok(spec)
    }

    pub fn background(&self) -> Result<Rgb, AppError> {
        parse_setting("display.background", &self.display.background)
    }

    pub fn palette_kind(&self) -> Result<PaletteKind, AppError> {
        parse_setting("palette.kind", &self.palette.kind)
    }

    /// The built-in Spectra 6 catalog, or the calibration given in the file
    pub fn palette_catalog(&self) -> Result<PaletteCatalog, AppError> {
        if self.palette.anchors.is_empty() {
            if !self.palette.extended.is_empty() {
                return Err(AppError::invalid_setting(
                    "palette.extended",
                    "custom extended colors require custom palette.anchors",
                ));
            }
            return Ok(PaletteCatalog::spectra6());
        }

        let anchors = parse_colors("palette.anchors", &self.palette.anchors)?;
        let extended = parse_colors("palette.extended", &self.palette.extended)?;
        PaletteCatalog::new("custom", &anchors, &extended)
            .map_err(|e| AppError::Config(ConfigError::from(e)))
    }

    /// The palette the configured kind selects
    pub fn palette(&self) -> Result<Palette, AppError> {
        let kind = self.palette_kind()?;
        Ok(self.palette_catalog()?.palette(kind).clone())
    }

    pub fn channel_order(&self) -> Result<ChannelOrder, AppError> {
        parse_setting("output.channel_order", &self.output.channel_order)
    }

    /// Turn the file's settings into a core pipeline configuration
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig, AppError> {
        let spec = self.display_spec()?;
        Ok(PipelineConfig {
            width: spec.width,
            height: spec.height,
            background: self.background()?,
            enhance: self.enhance.into(),
            palette: self.palette()?,
            metric: parse_setting("dither.metric", &self.dither.metric)?,
            filter: parse_setting("compose.filter", &self.compose.filter)?,
            accumulator: parse_setting("dither.accumulator", &self.dither.accumulator)?,
        })
    }
}

fn parse_setting<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| AppError::invalid_setting(key, e))
}

fn parse_colors(key: &str, colors: &[NamedColor]) -> Result<Vec<(String, Rgb)>, AppError> {
    colors
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let rgb = parse_setting(&format!("{key}[{i}]"), &entry.color)?;
            Ok((entry.name.clone(), rgb))
        })
        .collect()
}
