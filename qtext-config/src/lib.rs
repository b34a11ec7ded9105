//! Shared configuration loader for the qtext toolchain.
//!
//! `defaults/qtext.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`QtextConfig`],
//! then hand [`RenderSettings`] to `qtext-babel`.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use qtext_babel::resources::ExternalMathTool;
use qtext_babel::{RenderSettings, StyleDefaults};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/qtext.default.toml");

/// Top-level configuration consumed by qtext applications.
#[derive(Debug, Clone, Deserialize)]
pub struct QtextConfig {
    pub math: MathConfig,
    pub render: RenderConfig,
}

/// External math tool used by the HTML renderers.
#[derive(Debug, Clone, Deserialize)]
pub struct MathConfig {
    pub command: String,
    pub display_flag: String,
}

/// Fallback values for style keys no declaration sets.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub table: TableConfig,
    pub image: ImageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub border: bool,
    pub cell_height: f64,
    pub cell_width: f64,
    pub header_bold: bool,
    pub header_rule: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    pub width: f64,
}

impl From<&RenderConfig> for StyleDefaults {
    fn from(config: &RenderConfig) -> Self {
        StyleDefaults {
            table_border: config.table.border,
            table_cell_height: config.table.cell_height,
            table_cell_width: config.table.cell_width,
            table_header_bold: config.table.header_bold,
            table_header_rule: config.table.header_rule,
            image_width: config.image.width,
        }
    }
}

impl From<&MathConfig> for ExternalMathTool {
    fn from(config: &MathConfig) -> Self {
        ExternalMathTool::new(config.command.clone(), config.display_flag.clone())
    }
}

impl From<&QtextConfig> for RenderSettings {
    fn from(config: &QtextConfig) -> Self {
        RenderSettings {
            style_defaults: (&config.render).into(),
            math_tool: (&config.math).into(),
        }
    }
}

impl From<QtextConfig> for RenderSettings {
    fn from(config: QtextConfig) -> Self {
        (&config).into()
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. `render.table.border`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<QtextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<QtextConfig, ConfigError> {
    Loader::new().build()
}
