//! Cistercian Core - Numeral Glyph Engine
//!
//! # Rendering Rules
//! 1. One Canonical Table (Ones only, the rest by reflection)
//! 2. Four Digits Per Glyph
//! 3. Most Significant Glyph Leftmost
//! 4. Sign On Every Tile
//! 5. Bound Before Allocation

pub mod segments;
pub mod transform;
pub mod canvas;
pub mod glyph;
pub mod compose;
pub mod sign;
pub mod error;
pub mod config;
pub mod hashing;
pub mod pipeline;

pub use segments::{Digit, Point, Quadrant, SegmentTable, StrokeSet};
pub use glyph::{render_group, GlyphInfo, Palette};
pub use compose::{compose, group_digits, NumeralImage, DEFAULT_MAX_MAGNITUDE};
pub use sign::annotate_sign;
pub use error::NumeralError;
pub use config::{OutputFormat, RenderConfig};
pub use pipeline::{ExportManifest, PipelineError, RenderPipeline, RenderedNumeral};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
