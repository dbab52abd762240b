use image::{DynamicImage, ImageBuffer, Rgb, Rgba};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{
    color::Color,
    color_space::UniformColor,
    interpolation::{InterpolationKeyframe, KeyframeInterpolator, LinearInterpolator},
    pixel_buffer::PixelBuffer,
};

/// Storage format of the render target (and therefore of the read-back pixels).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    Rgb8,
    #[default]
    Rgba8,
    Rgba32F,
}

/// A vertex of a gradient strip. Every vertex is emitted as a top/bottom pair,
/// so only the horizontal position is needed here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripVertex {
    pub x: f32,
    pub uniform: UniformColor,
}

/// Axis-aligned rectangle in pixel units: `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }
}

/**
 * The small slice of a rendering backend needed to draw a swatch. A call to
 * `begin` opens a pass, after which any number of strips and rectangles may be
 * drawn; `end` resolves the pass into the texture, which can then be read back.
 *
 * A sample (pixel center, or sub-pixel position when multisampling) is covered
 * by a shape if it lies inside the half-open extent of that shape.
 */
pub trait RenderBackend {
    fn resolution(&self) -> (u32, u32);

    fn begin(&mut self);

    /// Linearly interpolates the vertex values along x (constant along y), and
    /// converts every interpolated value into a color with `fragment`.
    fn draw_gradient_strip<F>(&mut self, vertices: &[StripVertex], y0: f32, y1: f32, fragment: F)
    where
        F: Fn(&UniformColor) -> Color + Sync;

    fn fill_rect(&mut self, rect: &Rect, color: Color);

    fn end(&mut self);

    /// Replaces the contents of `pixels` with the resolved texture.
    fn read_to_pixels(&self, pixels: &mut PixelBuffer);

    fn texture(&self) -> &DynamicImage;
}

/**
 * CPU implementation of the render backend. Drawing happens into a buffer with
 * `samples_per_pixel` horizontal samples for each pixel, which is averaged down
 * into an `image::DynamicImage` of the requested pixel format on `end()`.
 */
pub struct ImageBackend {
    width: u32,
    height: u32,
    format: PixelFormat,
    samples_per_pixel: usize,
    samples: Vec<Color>,
    texture: DynamicImage,
}

impl ImageBackend {
    pub fn new(width: u32, height: u32, format: PixelFormat, sample_count: u32) -> ImageBackend {
        assert!(width > 0 && height > 0, "render target must not be empty");
        let samples_per_pixel = sample_count.max(1) as usize;
        let pixel_count = (width as usize) * (height as usize);
        let resolved = vec![Color::default(); pixel_count];
        ImageBackend {
            width,
            height,
            format,
            samples_per_pixel,
            samples: vec![Color::default(); pixel_count * samples_per_pixel],
            texture: build_texture(width, height, format, &resolved),
        }
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn samples_per_pixel(&self) -> usize {
        self.samples_per_pixel
    }

    /// Horizontal positions (in pixel units) of every sample within a row.
    fn sample_positions(&self) -> Vec<f32> {
        let step = 1.0 / (self.samples_per_pixel as f32);
        (0..self.width)
            .flat_map(|x| {
                (0..self.samples_per_pixel).map(move |j| (x as f32) + step * ((j as f32) + 0.5))
            })
            .collect()
    }

    /// Index range of the pixel rows whose centers fall within `[y0, y1)`.
    fn covered_rows(&self, y0: f32, y1: f32) -> std::ops::Range<usize> {
        let first = (y0 - 0.5).ceil().clamp(0.0, self.height as f32) as usize;
        let last = (y1 - 0.5).ceil().clamp(0.0, self.height as f32) as usize;
        first..last.max(first)
    }

    fn sample_rows_mut(
        &mut self,
        rows: std::ops::Range<usize>,
    ) -> rayon::slice::ChunksMut<'_, Color> {
        let row_len = (self.width as usize) * self.samples_per_pixel;
        self.samples[rows.start * row_len..rows.end * row_len].par_chunks_mut(row_len)
    }
}

impl RenderBackend for ImageBackend {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn begin(&mut self) {
        self.samples.par_iter_mut().for_each(|s| *s = Color::default());
    }

    fn draw_gradient_strip<F>(&mut self, vertices: &[StripVertex], y0: f32, y1: f32, fragment: F)
    where
        F: Fn(&UniformColor) -> Color + Sync,
    {
        assert!(vertices.len() >= 2, "a gradient strip needs two vertices");
        let x_begin = vertices[0].x;
        let x_end = vertices[vertices.len() - 1].x;
        let span = x_end - x_begin;
        let keyframes = vertices
            .iter()
            .map(|vertex| InterpolationKeyframe {
                input: (vertex.x - x_begin) / span,
                output: vertex.uniform,
            })
            .collect();
        let interpolator = KeyframeInterpolator::new(keyframes, LinearInterpolator);

        // Shade one row of samples, then copy it into every covered row.
        let shaded: Vec<Option<Color>> = self
            .sample_positions()
            .par_iter()
            .map(|&x| {
                if x >= x_begin && x < x_end {
                    Some(fragment(&interpolator.evaluate((x - x_begin) / span)))
                } else {
                    None
                }
            })
            .collect();

        let rows = self.covered_rows(y0, y1);
        self.sample_rows_mut(rows).for_each(|row| {
            for (sample, value) in row.iter_mut().zip(shaded.iter()) {
                if let Some(color) = value {
                    *sample = *color;
                }
            }
        });
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let positions = self.sample_positions();
        let rows = self.covered_rows(rect.y0, rect.y1);
        self.sample_rows_mut(rows).for_each(|row| {
            for (sample, x) in row.iter_mut().zip(positions.iter()) {
                if *x >= rect.x0 && *x < rect.x1 {
                    *sample = color;
                }
            }
        });
    }

    fn end(&mut self) {
        let resolved: Vec<Color> = self
            .samples
            .par_chunks(self.samples_per_pixel)
            .map(Color::mean)
            .collect();
        self.texture = build_texture(self.width, self.height, self.format, &resolved);
    }

    fn read_to_pixels(&self, pixels: &mut PixelBuffer) {
        let mut buffer = PixelBuffer::new(self.width, self.height);
        match &self.texture {
            DynamicImage::ImageRgb8(image) => {
                for (x, y, pixel) in image.enumerate_pixels() {
                    buffer.set(x, y, Color::from_rgb8(pixel.0));
                }
            }
            DynamicImage::ImageRgba8(image) => {
                for (x, y, pixel) in image.enumerate_pixels() {
                    buffer.set(x, y, Color::from_rgba8(pixel.0));
                }
            }
            other => {
                for (x, y, pixel) in other.to_rgba32f().enumerate_pixels() {
                    let [r, g, b, a] = pixel.0;
                    buffer.set(x, y, Color::with_alpha(r, g, b, a));
                }
            }
        }
        *pixels = buffer;
    }

    fn texture(&self) -> &DynamicImage {
        &self.texture
    }
}

fn build_texture(width: u32, height: u32, format: PixelFormat, pixels: &[Color]) -> DynamicImage {
    let at = |x: u32, y: u32| pixels[(y as usize) * (width as usize) + (x as usize)];
    match format {
        PixelFormat::Rgb8 => DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb(at(x, y).to_rgb8())
        })),
        PixelFormat::Rgba8 => {
            DynamicImage::ImageRgba8(ImageBuffer::from_fn(width, height, |x, y| {
                Rgba(at(x, y).to_rgba8())
            }))
        }
        PixelFormat::Rgba32F => {
            DynamicImage::ImageRgba32F(ImageBuffer::from_fn(width, height, |x, y| {
                let color = at(x, y);
                Rgba([color.r, color.g, color.b, color.a])
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::GenericImageView;
    use nalgebra::Vector3;

    fn read_back(backend: &ImageBackend) -> PixelBuffer {
        let mut pixels = PixelBuffer::default();
        backend.read_to_pixels(&mut pixels);
        pixels
    }

    #[test]
    fn test_fill_rect_uses_pixel_centers() {
        let mut backend = ImageBackend::new(4, 4, PixelFormat::Rgba8, 0);
        backend.begin();
        // Covers the centers of columns 1 and 2, and of row 1 only.
        backend.fill_rect(
            &Rect {
                x0: 0.6,
                y0: 0.6,
                x1: 2.6,
                y1: 2.0,
            },
            Color::WHITE,
        );
        backend.end();

        let pixels = read_back(&backend);
        for y in 0..4 {
            for x in 0..4 {
                let expected = if y == 1 && (x == 1 || x == 2) {
                    Color::WHITE
                } else {
                    Color::BLACK
                };
                assert_eq!(pixels.get(x, y), Some(expected), "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_begin_clears_previous_pass() {
        let mut backend = ImageBackend::new(2, 2, PixelFormat::Rgb8, 0);
        backend.begin();
        backend.fill_rect(&Rect::new(0.0, 0.0, 2.0, 2.0), Color::WHITE);
        backend.end();
        backend.begin();
        backend.end();
        assert_eq!(read_back(&backend).get(1, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_multisampling_blends_partial_coverage() {
        let mut backend = ImageBackend::new(2, 1, PixelFormat::Rgba32F, 4);
        backend.begin();
        backend.fill_rect(&Rect::new(0.0, 0.0, 1.5, 1.0), Color::WHITE);
        backend.end();

        let pixels = read_back(&backend);
        assert_relative_eq!(pixels.get(0, 0).unwrap().r, 1.0);
        assert_relative_eq!(pixels.get(1, 0).unwrap().r, 0.5);
    }

    #[test]
    fn test_gradient_strip_interpolates_along_x() {
        let mut backend = ImageBackend::new(4, 2, PixelFormat::Rgba32F, 0);
        let vertices = [
            StripVertex {
                x: 0.0,
                uniform: Vector3::new(0.0, 0.0, 0.0),
            },
            StripVertex {
                x: 4.0,
                uniform: Vector3::new(1.0, 1.0, 1.0),
            },
        ];
        backend.begin();
        // Identity fragment, so the stored value is the interpolated attribute.
        backend.draw_gradient_strip(&vertices, 0.0, 2.0, |u| Color::new(u[0], u[1], u[2]));
        backend.end();

        let pixels = read_back(&backend);
        for y in 0..2 {
            for x in 0..4 {
                let expected = ((x as f32) + 0.5) / 4.0;
                assert_relative_eq!(pixels.get(x, y).unwrap().g, expected, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_texture_matches_pixel_format() {
        let backend = ImageBackend::new(3, 2, PixelFormat::Rgb8, 0);
        assert!(matches!(backend.texture(), DynamicImage::ImageRgb8(_)));
        assert_eq!(backend.texture().width(), 3);
        assert_eq!(backend.texture().height(), 2);

        let backend = ImageBackend::new(3, 2, PixelFormat::Rgba32F, 0);
        assert!(matches!(backend.texture(), DynamicImage::ImageRgba32F(_)));
    }
}
