//! Digit-Group Renderer
//!
//! Renders one value in 0..=9999 as a single square glyph: the stem plus one
//! stroke set per nonzero positional digit.

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::NumeralError;
use crate::segments::{Digit, Quadrant, SegmentTable, STEM};
use crate::transform::GlyphTransform;

/// Largest value a single glyph can hold.
pub const GROUP_MAX: u32 = 9999;

/// Colors used for every stroke and the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }
}

/// Structural description of one rendered glyph tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphInfo {
    pub value: u16,
    /// Ones, tens, hundreds, thousands.
    pub digits: [u8; 4],
    pub strokes: Vec<(Quadrant, Digit)>,
    #[serde(default)]
    pub signed: bool,
}

/// Split `value` into exactly four positional digits, ones first.
pub fn decompose(value: u32) -> Result<[u8; 4], NumeralError> {
    if value > GROUP_MAX {
        return Err(NumeralError::InvalidDigitGroup(value));
    }
    let mut rest = value;
    let mut digits = [0u8; 4];
    for d in &mut digits {
        *d = (rest % 10) as u8;
        rest /= 10;
    }
    Ok(digits)
}

/// Plan which quadrant strokes a group value needs, without drawing anything.
pub fn describe_group(value: u32) -> Result<GlyphInfo, NumeralError> {
    let digits = decompose(value)?;
    let mut strokes = Vec::with_capacity(4);
    for (quadrant, &d) in Quadrant::ALL.iter().zip(digits.iter()) {
        if d != 0 {
            strokes.push((*quadrant, Digit::new(d)?));
        }
    }
    Ok(GlyphInfo {
        value: value as u16,
        digits,
        strokes,
        signed: false,
    })
}

/// Render `value` onto a fresh `size`x`size` canvas.
pub fn render_group(
    value: u32,
    size: u32,
    palette: &Palette,
) -> Result<(Canvas, GlyphInfo), NumeralError> {
    if size == 0 {
        return Err(NumeralError::InvalidSize(size));
    }
    let info = describe_group(value)?;

    let transform = GlyphTransform::new(size);
    let width = transform.stroke_width();
    let table = SegmentTable::global();

    let mut canvas = Canvas::new(size, size, palette.background);
    canvas.draw_line(&transform.apply_all(&STEM), palette.foreground, width);

    for &(quadrant, digit) in &info.strokes {
        let stroke = table.stroke(quadrant, digit);
        canvas.draw_line(&transform.apply_all(stroke.points()), palette.foreground, width);
    }

    Ok((canvas, info))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrants(info: &GlyphInfo) -> Vec<(Quadrant, u8)> {
        info.strokes.iter().map(|&(q, d)| (q, d.get())).collect()
    }

    #[test]
    fn test_decompose_positional() {
        assert_eq!(decompose(1234).unwrap(), [4, 3, 2, 1]);
        assert_eq!(decompose(7).unwrap(), [7, 0, 0, 0]);
        assert_eq!(decompose(0).unwrap(), [0, 0, 0, 0]);
        assert_eq!(decompose(9999).unwrap(), [9, 9, 9, 9]);
    }

    #[test]
    fn test_decompose_rejects_large_group() {
        assert_eq!(decompose(10_000), Err(NumeralError::InvalidDigitGroup(10_000)));
    }

    #[test]
    fn test_zero_digits_are_skipped() {
        let info = describe_group(1020).unwrap();
        assert_eq!(quadrants(&info), vec![(Quadrant::Tens, 2), (Quadrant::Thousands, 1)]);
    }

    #[test]
    fn test_render_size_zero() {
        let err = render_group(5, 0, &Palette::default()).unwrap_err();
        assert_eq!(err, NumeralError::InvalidSize(0));
    }

    #[test]
    fn test_zero_is_stem_only() {
        let palette = Palette::default();
        let (canvas, info) = render_group(0, 100, &palette).unwrap();
        assert!(info.strokes.is_empty());
        assert_eq!(canvas.pixel(50, 50), Some(palette.foreground));
        assert_eq!(canvas.pixel(60, 10), Some(palette.background));
        assert_eq!(canvas.pixel(40, 90), Some(palette.background));
    }

    #[test]
    fn test_strokes_land_in_their_quadrant() {
        let palette = Palette::default();
        // ones=1 (top right), thousands=1 (bottom left)
        let (canvas, _) = render_group(1001, 100, &palette).unwrap();
        assert_eq!(canvas.pixel(60, 10), Some(palette.foreground));
        assert_eq!(canvas.pixel(40, 90), Some(palette.foreground));
        assert_eq!(canvas.pixel(40, 10), Some(palette.background));
        assert_eq!(canvas.pixel(60, 90), Some(palette.background));
    }
}
