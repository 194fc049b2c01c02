//! Normalized-to-pixel mapping.

use crate::segments::{Point, UNIT};

/// Scale by `size / 100`, then shift right by a tile offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransform {
    factor: f32,
    offset_x: f32,
}

impl GlyphTransform {
    pub fn new(size: u32) -> Self {
        Self {
            factor: size as f32 / f32::from(UNIT),
            offset_x: 0.0,
        }
    }

    /// Transform for the tile at `index` in a strip of `size`-wide glyphs.
    pub fn for_tile(size: u32, index: usize) -> Self {
        Self {
            offset_x: size as f32 * index as f32,
            ..Self::new(size)
        }
    }

    pub fn apply(&self, p: Point) -> (f32, f32) {
        (
            f32::from(p.x) * self.factor + self.offset_x,
            f32::from(p.y) * self.factor,
        )
    }

    pub fn apply_all(&self, points: &[Point]) -> Vec<(f32, f32)> {
        points.iter().map(|&p| self.apply(p)).collect()
    }

    /// Stroke width shared by stem, digit strokes and sign: max(1, round(1.5 * size / 100)).
    pub fn stroke_width(&self) -> u32 {
        ((1.5 * self.factor).round() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_offset() {
        let t = GlyphTransform::for_tile(200, 2);
        assert_eq!(t.apply(Point::new(50, 10)), (500.0, 20.0));
        assert_eq!(GlyphTransform::new(100).apply(Point::new(70, 30)), (70.0, 30.0));
    }

    #[test]
    fn test_stroke_width() {
        assert_eq!(GlyphTransform::new(10).stroke_width(), 1);
        assert_eq!(GlyphTransform::new(100).stroke_width(), 2);
        assert_eq!(GlyphTransform::new(200).stroke_width(), 3);
        assert_eq!(GlyphTransform::new(1000).stroke_width(), 15);
    }
}
