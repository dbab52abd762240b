use image::DynamicImage;

use crate::core::{
    color::Color,
    error::SwatchError,
    pixel_buffer::PixelBuffer,
    rasterizer,
    render_backend::{ImageBackend, PixelFormat, RenderBackend},
    sampler,
    swatch_model::{Row, SwatchModel},
};

/**
 * A perceptually-uniform color swatch: a stack of gradient and palette rows,
 * rendered into a texture that can be displayed, saved, or point-sampled.
 *
 * Usage follows a simple lifecycle: `setup` the render target, append rows and
 * colors, then call `create_swatch` (as often as needed) to regenerate the
 * texture and pixel buffer from the current rows. Sampling is only valid after
 * the first `create_swatch`.
 */
pub struct Swatch<B: RenderBackend = ImageBackend> {
    width: f32,
    height: f32,
    model: SwatchModel,
    backend: B,
    pixels: PixelBuffer,
    rasterized_row_count: Option<usize>,
}

impl Swatch<ImageBackend> {
    /// Allocates the render target. Dimensions are truncated to whole pixels.
    /// A `sample_count` above one enables horizontal multisampling.
    pub fn setup(
        width: f32,
        height: f32,
        pixel_format: PixelFormat,
        sample_count: u32,
    ) -> Result<Swatch<ImageBackend>, SwatchError> {
        let (pixel_width, pixel_height) = pixel_resolution(width, height)?;
        let backend = ImageBackend::new(pixel_width, pixel_height, pixel_format, sample_count);
        log::debug!(
            "allocated a {} x {} {:?} render target with {} samples per pixel",
            pixel_width,
            pixel_height,
            backend.format(),
            backend.samples_per_pixel()
        );
        Ok(Swatch::with_backend(width, height, backend))
    }
}

impl<B: RenderBackend> Swatch<B> {
    pub fn with_backend(width: f32, height: f32, backend: B) -> Swatch<B> {
        Swatch {
            width,
            height,
            model: SwatchModel::new(),
            backend,
            pixels: PixelBuffer::default(),
            rasterized_row_count: None,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.backend.resolution()
    }

    pub fn rows(&self) -> &[Row] {
        self.model.rows()
    }

    pub fn model(&self) -> &SwatchModel {
        &self.model
    }

    /// Append `color` to the end of an existing row.
    pub fn add_color(&mut self, color: Color, row_index: usize) -> Result<(), SwatchError> {
        self.model.add_color(color, row_index)
    }

    /// Append a list of colors to the end of an existing row.
    pub fn add_colors(&mut self, colors: &[Color], row_index: usize) -> Result<(), SwatchError> {
        self.model.add_colors(colors, row_index)
    }

    /// Add an empty palette row; returns its row index.
    pub fn add_palette(&mut self) -> usize {
        self.model.add_palette()
    }

    /// Add an empty gradient row; returns its row index.
    pub fn add_gradient(&mut self) -> usize {
        self.model.add_gradient()
    }

    pub fn add_palette_with(&mut self, colors: &[Color]) -> usize {
        self.model.add_palette_with(colors)
    }

    pub fn add_gradient_with(&mut self, colors: &[Color]) -> usize {
        self.model.add_gradient_with(colors)
    }

    /// Rasterizes every row, then reads the result back into the pixel buffer.
    /// On error, neither the texture nor the pixel buffer is modified.
    pub fn create_swatch(&mut self) -> Result<(), SwatchError> {
        rasterizer::rasterize(&self.model, &mut self.backend)?;
        self.backend.read_to_pixels(&mut self.pixels);
        self.rasterized_row_count = Some(self.model.row_count());
        Ok(())
    }

    pub fn is_rasterized(&self) -> bool {
        self.rasterized_row_count.is_some()
    }

    /// Color at normalized position `val` (on [0,1]) along row `row_index`, as of
    /// the last `create_swatch`. Rows appended since then cannot be sampled yet.
    pub fn sample(&self, val: f32, row_index: usize) -> Result<Color, SwatchError> {
        let row_count = self
            .rasterized_row_count
            .ok_or(SwatchError::NotRasterized)?;
        sampler::sample(&self.pixels, val, row_index, row_count)
    }

    pub fn pixels(&self) -> Result<&PixelBuffer, SwatchError> {
        if self.is_rasterized() {
            Ok(&self.pixels)
        } else {
            Err(SwatchError::NotRasterized)
        }
    }

    /// Borrow the rendered texture, e.g. to display it or save it to a file.
    pub fn texture(&self) -> &DynamicImage {
        self.backend.texture()
    }

    /**
     * Copies the swatch into an RGBA8 `screen` buffer (`screen_width` pixels per
     * row), with the swatch's top-left corner at the screen's origin. Anything
     * that does not fit on the screen is clipped.
     */
    pub fn draw(&self, screen: &mut [u8], screen_width: u32) -> Result<(), SwatchError> {
        if !self.is_rasterized() {
            return Err(SwatchError::NotRasterized);
        }
        if screen_width == 0 {
            return Ok(());
        }
        let stride = 4 * (screen_width as usize);
        let screen_height = (screen.len() / stride) as u32;
        let (width, height) = self.resolution();
        let copy_width = width.min(screen_width);
        for y in 0..height.min(screen_height) {
            let offset = (y as usize) * stride;
            let row = self.pixels.row(y);
            for (x, color) in row.iter().take(copy_width as usize).enumerate() {
                let begin = offset + 4 * x;
                screen[begin..begin + 4].copy_from_slice(&color.to_rgba8());
            }
        }
        Ok(())
    }
}

fn pixel_resolution(width: f32, height: f32) -> Result<(u32, u32), SwatchError> {
    let invalid = SwatchError::InvalidDimensions { width, height };
    if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
        return Err(invalid);
    }
    if width > (u32::MAX as f32) || height > (u32::MAX as f32) {
        return Err(invalid);
    }
    Ok((width as u32, height as u32))
}
