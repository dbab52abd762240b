use crate::core::{
    color::Color, error::SwatchError, pixel_buffer::PixelBuffer, rasterizer::row_top,
};

/// Maps a normalized horizontal position to a pixel column: `floor(val * width)`.
/// The right edge (`val == 1.0`) maps to the last column rather than one past it.
/// Values outside of [0,1] clamp to the nearest edge, and non-finite values map to 0.
pub fn sample_column(val: f32, width: u32) -> u32 {
    assert!(width > 0, "cannot sample an empty image");
    if !val.is_finite() || val <= 0.0 {
        return 0;
    }
    let x = (val * (width as f32)).floor();
    (x as u32).min(width - 1)
}

/// Pixel address `(x, y)` for a sample. The row maps to the top pixel row of its band.
pub fn sample_pixel(
    val: f32,
    row_index: usize,
    row_count: usize,
    resolution: (u32, u32),
) -> Result<(u32, u32), SwatchError> {
    if row_index >= row_count {
        return Err(SwatchError::IndexError {
            index: row_index,
            row_count,
        });
    }
    let (width, height) = resolution;
    if width == 0 || height == 0 {
        return Err(SwatchError::NotRasterized);
    }
    let x = sample_column(val, width);
    let y = row_top(row_index, height, row_count).min(height - 1);
    Ok((x, y))
}

/// Reads the color at `val` along row `row_index` of a rasterized swatch with `row_count` rows.
pub fn sample(
    pixels: &PixelBuffer,
    val: f32,
    row_index: usize,
    row_count: usize,
) -> Result<Color, SwatchError> {
    let (x, y) = sample_pixel(
        val,
        row_index,
        row_count,
        (pixels.width(), pixels.height()),
    )?;
    pixels.get(x, y).ok_or(SwatchError::NotRasterized)
}
