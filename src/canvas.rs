//! Canvas - in-memory pixel surface
//!
//! Thin layer over `image` buffers and `imageproc` drawing.

use image::{imageops, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point as PixelPoint;
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    buffer: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            buffer: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.buffer.get_pixel_checked(x, y).copied()
    }

    /// Draw connected segments through `points`.
    pub fn draw_line(&mut self, points: &[(f32, f32)], color: Rgb<u8>, width: u32) {
        for pair in points.windows(2) {
            self.draw_segment(pair[0], pair[1], color, width);
        }
    }

    fn draw_segment(&mut self, start: (f32, f32), end: (f32, f32), color: Rgb<u8>, width: u32) {
        if width <= 1 {
            draw_line_segment_mut(&mut self.buffer, start, end, color);
            return;
        }

        let (dx, dy) = (end.0 - start.0, end.1 - start.1);
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return;
        }
        let half = width as f32 / 2.0;
        let (nx, ny) = (-dy / len * half, dx / len * half);

        let corner = |(x, y): (f32, f32), sx: f32| {
            PixelPoint::new((x + nx * sx).round() as i32, (y + ny * sx).round() as i32)
        };
        let quad = [
            corner(start, 1.0),
            corner(end, 1.0),
            corner(end, -1.0),
            corner(start, -1.0),
        ];

        // draw_polygon_mut rejects a closed ring
        if quad[0] == quad[3] {
            draw_line_segment_mut(&mut self.buffer, start, end, color);
        } else {
            draw_polygon_mut(&mut self.buffer, &quad, color);
        }
    }

    /// Blit `tile` with its top-left corner at `(x, y)`.
    pub fn paste(&mut self, tile: &Canvas, x: u32, y: u32) {
        imageops::replace(&mut self.buffer, &tile.buffer, i64::from(x), i64::from(y));
    }

    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Cursor::new(Vec::new());
        self.buffer.write_to(&mut bytes, format)?;
        Ok(bytes.into_inner())
    }
}
