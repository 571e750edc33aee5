//! Framebuffer

use crate::color::Color;
use image::RgbImage;
use std::path::Path;

/// A framebuffer of linear RGB pixels with the origin at the bottom-left
/// corner.
pub struct Framebuffer {
    /// Image width in pixels.
    width: usize,

    /// Image height in pixels.
    height: usize,

    /// Pixels in row-major order, row 0 at the bottom.
    pixels: Vec<Color>,
}

impl Framebuffer {
    /// Creates a black framebuffer.
    ///
    /// * `width`  - Image width in pixels.
    /// * `height` - Image height in pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::black(); width * height],
        }
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }

    /// Sets the pixel at `(x, y)`.
    pub fn set_pixel(&mut self, x: usize, y: usize, c: Color) {
        self.pixels[y * self.width + x] = c;
    }

    /// Returns mutable scanlines, bottom row first. Each slice is one row of
    /// `width` pixels; suitable for handing rows to parallel workers.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, Color> {
        self.pixels.chunks_mut(self.width)
    }

    /// Converts to an 8-bit RGB image, flipping vertically so row 0 ends up
    /// at the bottom of the saved image.
    pub fn to_image(&self) -> RgbImage {
        let mut img = RgbImage::new(self.width as u32, self.height as u32);
        for y in 0..self.height {
            for x in 0..self.width {
                let rgb = self.pixel(x, y).to_rgb8();
                img.put_pixel(x as u32, (self.height - 1 - y) as u32, image::Rgb(rgb));
            }
        }
        img
    }

    /// Saves the framebuffer to an image file; the format is chosen from the
    /// file extension.
    ///
    /// * `path` - Output path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_flip_on_export() {
        let mut fb = Framebuffer::new(2, 2);
        fb.set_pixel(0, 0, Color::white());
        let img = fb.to_image();
        // Bottom-left pixel lands on the last image row.
        assert_eq!(img.get_pixel(0, 1), &image::Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(0, 0), &image::Rgb([0, 0, 0]));
    }
}
