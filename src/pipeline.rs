//! Render Pipeline - Single Entry Point
//!
//! CRITICAL: every render goes through the magnitude bound before any canvas is
//! allocated. No bypass.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use crate::compose::{check_bound, compose, group_digits, NumeralImage};
use crate::config::{ConfigError, RenderConfig};
use crate::error::NumeralError;
use crate::glyph::{describe_group, GlyphInfo};
use crate::hashing::{compute_manifest_hash, compute_request_hash, sha256_hex};
use crate::sign::{annotate_sign, mark_signed};
use crate::ENGINE_VERSION;

/// Progress is logged once per this many exported values.
const EXPORT_PROGRESS_STEP: i64 = 1000;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Numeral(#[from] NumeralError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid export range: start {start} is greater than end {end}")]
    InvalidRange { start: i64, end: i64 },
}

impl PipelineError {
    /// The request itself was bad, as opposed to a failure inside the engine.
    pub fn is_client_error(&self) -> bool {
        match self {
            PipelineError::Numeral(e) => e.is_client_error(),
            PipelineError::InvalidRange { .. } => true,
            _ => false,
        }
    }
}

/// An encoded numeral image plus everything needed to identify it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNumeral {
    pub id: String,
    pub value: i64,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub format: String,
    pub mime_type: String,
    pub size: [u32; 2],
    pub glyphs: Vec<GlyphInfo>,
    pub request_hash: String,
    pub hash: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl RenderedNumeral {
    pub fn data_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub value: i64,
    pub filename: String,
    pub glyph_count: usize,
    pub hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportManifest {
    pub id: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub start: i64,
    pub end: i64,
    pub config: RenderConfig,
    pub files: Vec<ExportedFile>,
    pub manifest_hash: String,
}

/// The render pipeline - bound check, compose, sign, encode.
pub struct RenderPipeline {
    config: RenderConfig,
}

impl RenderPipeline {
    pub fn new(config: RenderConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Describe the glyphs for `n` without allocating any pixels.
    pub fn describe(&self, n: i64) -> Result<Vec<GlyphInfo>, PipelineError> {
        let magnitude = self.checked_magnitude(n)?;
        let mut glyphs = group_digits(magnitude)
            .into_iter()
            .map(describe_group)
            .collect::<Result<Vec<_>, _>>()?;
        mark_signed(&mut glyphs, n);
        Ok(glyphs)
    }

    /// Compose and annotate `n`, leaving the result unencoded.
    pub fn render_image(&self, n: i64) -> Result<NumeralImage, PipelineError> {
        self.checked_magnitude(n)?;
        let palette = self.config.palette();
        let mut image = compose(n, self.config.size, self.config.max_magnitude, &palette)?;
        annotate_sign(&mut image, palette.foreground);
        Ok(image)
    }

    /// Render `n` and encode it in the configured format.
    pub fn render(&self, n: i64) -> Result<RenderedNumeral, PipelineError> {
        let image = self.render_image(n)?;
        let format = self.config.format;
        let data = image.canvas.encode(format.image_format())?;

        Ok(RenderedNumeral {
            id: Uuid::new_v4().to_string(),
            value: n,
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            format: format.extension().to_string(),
            mime_type: format.mime_type().to_string(),
            size: [image.canvas.width(), image.canvas.height()],
            glyphs: image.glyphs,
            request_hash: compute_request_hash(n, &self.config, ENGINE_VERSION)?,
            hash: sha256_hex(&data),
            data,
        })
    }

    /// Render every value in `start..=end` into `dir` and write a manifest.
    pub fn export_range(
        &self,
        start: i64,
        end: i64,
        dir: &Path,
    ) -> Result<ExportManifest, PipelineError> {
        if start > end {
            return Err(PipelineError::InvalidRange { start, end });
        }
        // Both ends bounded, so a batch never stops halfway.
        self.checked_magnitude(start)?;
        self.checked_magnitude(end)?;

        fs::create_dir_all(dir)?;
        let mut files = Vec::new();

        for value in start..=end {
            let rendered = self.render(value)?;
            let filename = export_filename(value, self.config.format.extension());
            fs::write(dir.join(&filename), &rendered.data)?;

            files.push(ExportedFile {
                value,
                filename,
                glyph_count: rendered.glyphs.len(),
                hash: rendered.hash,
            });

            if value % EXPORT_PROGRESS_STEP == 0 {
                tracing::info!(value, "exported {} images", files.len());
            }
        }

        let mut manifest = ExportManifest {
            id: Uuid::new_v4().to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            start,
            end,
            config: self.config.clone(),
            files,
            manifest_hash: String::new(),
        };
        manifest.manifest_hash = compute_manifest_hash(&manifest)?;

        let manifest_path: PathBuf = dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

        tracing::info!(
            count = manifest.files.len(),
            dir = %dir.display(),
            "finished export"
        );
        Ok(manifest)
    }

    fn checked_magnitude(&self, n: i64) -> Result<u64, PipelineError> {
        check_bound(n, self.config.max_magnitude).map_err(|e| {
            tracing::warn!(value = n, max = self.config.max_magnitude, "rejected render request");
            PipelineError::from(e)
        })
    }
}

/// `cistercian_00042.png`; negative values keep their sign in front.
pub fn export_filename(value: i64, extension: &str) -> String {
    format!("cistercian_{:05}.{}", value, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> RenderPipeline {
        RenderPipeline::new(RenderConfig {
            size: 20,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_render_reports_dimensions() {
        let rendered = small().render(99_999).unwrap();
        assert_eq!(rendered.size, [40, 20]);
        assert_eq!(rendered.mime_type, "image/png");
        assert_eq!(rendered.hash, sha256_hex(&rendered.data));
    }

    #[test]
    fn test_describe_matches_render() {
        let pipeline = small();
        let described = pipeline.describe(-12_345).unwrap();
        let rendered = pipeline.render_image(-12_345).unwrap();
        assert_eq!(described, rendered.glyphs);
    }

    #[test]
    fn test_request_hash_covers_palette_and_bound() {
        let base = RenderConfig { size: 50, ..Default::default() };
        let red = RenderConfig { foreground: [255, 0, 0], ..base.clone() };
        let tight = RenderConfig { max_magnitude: 5000, ..base.clone() };

        let plain = RenderPipeline::new(base).unwrap().render(1234).unwrap();
        let recolored = RenderPipeline::new(red).unwrap().render(1234).unwrap();
        let bounded = RenderPipeline::new(tight).unwrap().render(1234).unwrap();

        assert_ne!(plain.hash, recolored.hash);
        assert_ne!(plain.request_hash, recolored.request_hash);
        assert_ne!(plain.request_hash, bounded.request_hash);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig { size: 0, ..Default::default() };
        assert!(matches!(RenderPipeline::new(config), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(42, "png"), "cistercian_00042.png");
        assert_eq!(export_filename(123_456, "bmp"), "cistercian_123456.bmp");
    }

    #[test]
    fn test_client_errors() {
        let err = small().render(i64::MAX).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("9999999999999999"));
    }
}
