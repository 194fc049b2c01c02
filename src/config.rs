//! Render Configuration

use image::{ImageFormat, Rgb};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::compose::DEFAULT_MAX_MAGNITUDE;
use crate::glyph::Palette;

/// Largest glyph side accepted from configuration.
pub const MAX_GLYPH_SIZE: u32 = 4096;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Glyph size must be between 1 and {MAX_GLYPH_SIZE}, got {0}")]
    Size(u32),

    #[error("Maximum magnitude must be positive")]
    ZeroMaximum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_max_magnitude")]
    pub max_magnitude: u64,
    #[serde(default = "default_foreground")]
    pub foreground: [u8; 3],
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_size() -> u32 { 200 }
fn default_max_magnitude() -> u64 { DEFAULT_MAX_MAGNITUDE }
fn default_foreground() -> [u8; 3] { [0, 0, 0] }
fn default_background() -> [u8; 3] { [255, 255, 255] }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            max_magnitude: default_max_magnitude(),
            foreground: default_foreground(),
            background: default_background(),
            format: OutputFormat::default(),
        }
    }
}

impl RenderConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > MAX_GLYPH_SIZE {
            return Err(ConfigError::Size(self.size));
        }
        if self.max_magnitude == 0 {
            return Err(ConfigError::ZeroMaximum);
        }
        Ok(())
    }

    pub fn palette(&self) -> Palette {
        Palette {
            foreground: Rgb(self.foreground),
            background: Rgb(self.background),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Bmp => "image/bmp",
        }
    }
}
