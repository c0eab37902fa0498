use crate::colorizer::Hsba;
use crate::math::{blend_channel, edge_function, point_in_triangle};
use crate::point::Point;
use crate::surface::Surface;
use std::io::Write;

/// Software RGBA surface that rasterizes the mosaic into a pixel buffer
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    fill: [u8; 4],
    /// Outline color, `None` once stroking is disabled
    stroke: Option<[u8; 4]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width as usize;
        let height = height as usize;
        Canvas {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            fill: Hsba::WHITE.to_rgba8(),
            stroke: Some(Hsba::BLACK.to_rgba8()),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw pixel data, row-major RGBA
    pub fn rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(rgba)
    }

    /// Encodes the canvas as an 8-bit RGBA PNG
    pub fn write_png<W: Write>(&self, writer: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(writer, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.pixels)?;
        png_writer.finish()
    }

    fn blend_pixel(&mut self, offset: usize, color: [u8; 4]) {
        let alpha = color[3] as f64 / 255.0;
        for channel in 0..3 {
            self.pixels[offset + channel] =
                blend_channel(self.pixels[offset + channel], color[channel], alpha);
        }
        let dst_alpha = self.pixels[offset + 3] as f64 / 255.0;
        self.pixels[offset + 3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
    }

    /// Draws a line between two points in the pixel buffer using Bresenham's algorithm
    fn draw_line(&mut self, from: Point, to: Point, color: [u8; 4]) {
        let (mut x0, mut y0, x1, y1) = (
            from.x.round() as isize,
            from.y.round() as isize,
            to.x.round() as isize,
            to.y.round() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            if x0 >= 0 && x0 < self.width as isize && y0 >= 0 && y0 < self.height as isize {
                let offset = (y0 as usize * self.width + x0 as usize) * 4;
                self.pixels[offset..offset + 4].copy_from_slice(&color);
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

impl Surface for Canvas {
    fn resize(&mut self, width: u32, height: u32) {
        let (fill, stroke) = (self.fill, self.stroke);
        *self = Canvas::new(width, height);
        self.fill = fill;
        self.stroke = stroke;
    }

    fn background(&mut self, color: Hsba) {
        let rgba = color.to_rgba8();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    fn set_fill(&mut self, color: Hsba) {
        self.fill = color.to_rgba8();
    }

    fn disable_stroke(&mut self) {
        self.stroke = None;
    }

    /// Fills a triangle of either winding, sampling at pixel centers
    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (a, b, c) = (a.as_array(), b.as_array(), c.as_array());

        // Skip degenerate triangles
        if edge_function(&a, &b, &c).abs() < f64::EPSILON {
            return;
        }

        // Compute bounding box of the triangle
        let min_x = a[0].min(b[0]).min(c[0]).floor().max(0.0) as usize;
        let max_x = a[0].max(b[0]).max(c[0]).ceil().min(self.width as f64 - 1.0);
        let min_y = a[1].min(b[1]).min(c[1]).floor().max(0.0) as usize;
        let max_y = a[1].max(b[1]).max(c[1]).ceil().min(self.height as f64 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as usize, max_y as usize);

        let fill = self.fill;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = [x as f64 + 0.5, y as f64 + 0.5];
                if point_in_triangle(p, a, b, c) {
                    self.blend_pixel((y * self.width + x) * 4, fill);
                }
            }
        }

        if let Some(stroke) = self.stroke {
            let (a, b, c) = (
                Point::new(a[0], a[1]),
                Point::new(b[0], b[1]),
                Point::new(c[0], c[1]),
            );
            self.draw_line(a, b, stroke);
            self.draw_line(b, c, stroke);
            self.draw_line(c, a, stroke);
        }
    }
}
