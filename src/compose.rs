//! Number Composer
//!
//! Splits a magnitude into base-10000 groups and tiles their glyphs left to
//! right, most significant first.

use crate::canvas::Canvas;
use crate::error::NumeralError;
use crate::glyph::{render_group, GlyphInfo, Palette};

/// Default bound on |n|: 10^16 - 1, i.e. at most four glyphs.
pub const DEFAULT_MAX_MAGNITUDE: u64 = 9_999_999_999_999_999;

const GROUP_BASE: u64 = 10_000;

/// A composed strip of glyph tiles.
#[derive(Debug, Clone)]
pub struct NumeralImage {
    pub value: i64,
    pub glyph_size: u32,
    pub glyphs: Vec<GlyphInfo>,
    pub canvas: Canvas,
}

impl NumeralImage {
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_negative(&self) -> bool {
        self.value < 0
    }

    /// Rebuild the magnitude from the tile values.
    pub fn magnitude(&self) -> u64 {
        self.glyphs
            .iter()
            .fold(0u64, |acc, g| acc * GROUP_BASE + u64::from(g.value))
    }
}

/// Reject magnitudes above `max`.
pub fn check_bound(n: i64, max: u64) -> Result<u64, NumeralError> {
    let magnitude = n.unsigned_abs();
    if magnitude > max {
        return Err(NumeralError::NumberOutOfRange { value: n, max });
    }
    Ok(magnitude)
}

/// Groups of at most four digits, most significant first. Zero is one group.
pub fn group_digits(magnitude: u64) -> Vec<u32> {
    let mut groups = Vec::new();
    let mut rest = magnitude;
    loop {
        groups.push((rest % GROUP_BASE) as u32);
        rest /= GROUP_BASE;
        if rest == 0 {
            break;
        }
    }
    groups.reverse();
    groups
}

/// Compose the glyph strip for |n|. The sign is left to the annotator.
pub fn compose(
    n: i64,
    size: u32,
    max: u64,
    palette: &Palette,
) -> Result<NumeralImage, NumeralError> {
    if size == 0 {
        return Err(NumeralError::InvalidSize(size));
    }
    let magnitude = check_bound(n, max)?;
    let groups = group_digits(magnitude);

    let width = u32::try_from(groups.len())
        .ok()
        .and_then(|count| count.checked_mul(size))
        .ok_or(NumeralError::InvalidSize(size))?;
    let mut canvas = Canvas::new(width, size, palette.background);
    let mut glyphs = Vec::with_capacity(groups.len());

    for (index, &group) in groups.iter().enumerate() {
        let (tile, info) = render_group(group, size, palette)?;
        canvas.paste(&tile, index as u32 * size, 0);
        glyphs.push(info);
    }

    tracing::debug!(value = n, glyphs = glyphs.len(), size, "composed numeral");

    Ok(NumeralImage {
        value: n,
        glyph_size: size,
        glyphs,
        canvas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), vec![0]);
        assert_eq!(group_digits(9999), vec![9999]);
        assert_eq!(group_digits(10_000), vec![1, 0]);
        assert_eq!(group_digits(12_345_678), vec![1234, 5678]);
        assert_eq!(group_digits(100_020_003), vec![1, 2, 3]);
    }

    #[test]
    fn test_check_bound() {
        assert_eq!(check_bound(-45, 100), Ok(45));
        assert_eq!(
            check_bound(-101, 100),
            Err(NumeralError::NumberOutOfRange { value: -101, max: 100 })
        );
        assert_eq!(check_bound(i64::MIN, u64::MAX), Ok(1u64 << 63));
    }

    #[test]
    fn test_compose_dimensions() {
        let img = compose(123_456_789, 50, DEFAULT_MAX_MAGNITUDE, &Palette::default()).unwrap();
        assert_eq!(img.glyph_count(), 3);
        assert_eq!((img.canvas.width(), img.canvas.height()), (150, 50));
        assert_eq!(img.magnitude(), 123_456_789);
    }
}
