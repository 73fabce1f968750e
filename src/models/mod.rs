pub mod config;
pub mod display_spec;

pub use config::{
    AppConfig, ComposeConfig, DisplayConfig, DitherConfig, EnhanceConfig, NamedColor,
    OutputConfig, PaletteConfig, CONFIG_ENV, DEFAULT_YAML,
};
pub use display_spec::DisplaySpec;
