//! Sign Annotator
//!
//! A negative value gets the center stroke on every tile, not just the leading one.

use image::Rgb;

use crate::compose::NumeralImage;
use crate::glyph::GlyphInfo;
use crate::segments::SIGN;
use crate::transform::GlyphTransform;

/// Set `signed` on every tile when `value` is negative, on none otherwise.
pub fn mark_signed(glyphs: &mut [GlyphInfo], value: i64) {
    let negative = value < 0;
    for glyph in glyphs {
        glyph.signed = negative;
    }
}

/// Draw the sign stroke across all tiles when the image encodes a negative value.
pub fn annotate_sign(image: &mut NumeralImage, color: Rgb<u8>) {
    mark_signed(&mut image.glyphs, image.value);
    if !image.is_negative() {
        return;
    }
    let size = image.glyph_size;
    for index in 0..image.glyphs.len() {
        let transform = GlyphTransform::for_tile(size, index);
        image
            .canvas
            .draw_line(&transform.apply_all(&SIGN), color, transform.stroke_width());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{compose, DEFAULT_MAX_MAGNITUDE};
    use crate::glyph::Palette;

    #[test]
    fn test_negative_marks_every_tile() {
        let palette = Palette::default();
        let mut img = compose(-100_000_000, 100, DEFAULT_MAX_MAGNITUDE, &palette).unwrap();
        annotate_sign(&mut img, palette.foreground);
        assert_eq!(img.glyph_count(), 3);
        for (i, glyph) in img.glyphs.iter().enumerate() {
            assert!(glyph.signed);
            let x = i as u32 * 100 + 40;
            assert_eq!(img.canvas.pixel(x, 50), Some(palette.foreground));
        }
    }

    #[test]
    fn test_mark_signed_all_or_none() {
        let mut glyphs: Vec<GlyphInfo> = [1, 0, 9999]
            .into_iter()
            .map(|g| crate::glyph::describe_group(g).unwrap())
            .collect();
        mark_signed(&mut glyphs, -1);
        assert!(glyphs.iter().all(|g| g.signed));
        mark_signed(&mut glyphs, 0);
        assert!(glyphs.iter().all(|g| !g.signed));
    }

    #[test]
    fn test_non_negative_untouched() {
        let palette = Palette::default();
        let mut img = compose(0, 100, DEFAULT_MAX_MAGNITUDE, &palette).unwrap();
        let before = img.canvas.clone();
        annotate_sign(&mut img, palette.foreground);
        assert_eq!(img.canvas, before);
        assert!(!img.glyphs[0].signed);
    }
}
