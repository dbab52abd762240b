use crate::core::{
    color_space::{to_display, to_uniform},
    error::SwatchError,
    render_backend::{Rect, RenderBackend, StripVertex},
    swatch_model::{Row, RowMode, SwatchModel},
};

/// Range of pixel rows `[y0, y1)` assigned to a single swatch row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    pub y0: u32,
    pub y1: u32,
}

impl RowBand {
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// First pixel row of swatch row `row_index`: `floor(row_index * height / row_count)`.
/// Evaluated in integer arithmetic, so it is exact for any resolution.
pub fn row_top(row_index: usize, pixel_height: u32, row_count: usize) -> u32 {
    assert!(row_count > 0, "row_count must be positive");
    ((row_index as u64) * (pixel_height as u64) / (row_count as u64)) as u32
}

/**
 * Splits `pixel_height` into `row_count` bands, top to bottom. Each band ends
 * where the next one starts, so the band heights always sum to `pixel_height`.
 * Bands have equal height up to rounding, and are empty if there are more rows
 * than pixels.
 */
pub fn row_bands(pixel_height: u32, row_count: usize) -> Result<Vec<RowBand>, SwatchError> {
    if row_count == 0 {
        return Err(SwatchError::DivisionByZeroError);
    }
    Ok((0..row_count)
        .map(|row| RowBand {
            y0: row_top(row, pixel_height, row_count),
            y1: row_top(row + 1, pixel_height, row_count),
        })
        .collect())
}

/// A strip with one vertex per color, evenly spaced from `x = 0` to `x = width`,
/// each carrying its color in the uniform space.
pub fn gradient_vertices(row: &Row, width: f32) -> Vec<StripVertex> {
    let n = row.colors.len();
    assert!(n >= 2, "a gradient strip needs at least two colors");
    let vert_dist = width / ((n - 1) as f32);
    row.colors
        .iter()
        .enumerate()
        .map(|(i, color)| StripVertex {
            x: if i + 1 == n {
                width
            } else {
                vert_dist * (i as f32)
            },
            uniform: to_uniform(color),
        })
        .collect()
}

/// Checks the whole model up front, so that a failure never leaves a partially drawn target.
pub fn validate(model: &SwatchModel) -> Result<(), SwatchError> {
    if model.row_count() == 0 {
        return Err(SwatchError::DivisionByZeroError);
    }
    for (index, row) in model.rows().iter().enumerate() {
        if row.colors.is_empty() {
            return Err(SwatchError::InvalidRowError {
                row: index,
                mode: row.mode,
            });
        }
    }
    Ok(())
}

/**
 * Draws every row of the model into the backend, as a single render pass.
 *
 * Gradient rows are interpolated in the uniform space: each color stop is
 * converted once, the backend interpolates between neighboring stops, and each
 * fragment is converted back to display space. A gradient with a single color
 * has nothing to interpolate, so it is filled like a one-block palette.
 *
 * Palette rows are split into equal blocks, drawn as flat rectangles.
 */
pub fn rasterize<B: RenderBackend>(model: &SwatchModel, backend: &mut B) -> Result<(), SwatchError> {
    validate(model)?;
    let (pixel_width, pixel_height) = backend.resolution();
    let width = pixel_width as f32;
    let bands = row_bands(pixel_height, model.row_count())?;

    backend.begin();
    for (row, band) in model.rows().iter().zip(bands.iter()) {
        let y0 = band.y0 as f32;
        let y1 = band.y1 as f32;
        match row.mode {
            RowMode::Gradient if row.colors.len() >= 2 => {
                let vertices = gradient_vertices(row, width);
                backend.draw_gradient_strip(&vertices, y0, y1, to_display);
            }
            RowMode::Gradient | RowMode::Palette => {
                let n = row.colors.len();
                let block_width = width / (n as f32);
                for (i, color) in row.colors.iter().enumerate() {
                    let x1 = if i + 1 == n {
                        width
                    } else {
                        block_width * ((i + 1) as f32)
                    };
                    let rect = Rect {
                        x0: block_width * (i as f32),
                        y0,
                        x1,
                        y1,
                    };
                    backend.fill_rect(&rect, *color);
                }
            }
        }
    }
    backend.end();

    log::debug!(
        "rasterized {} rows into a {} x {} target",
        model.row_count(),
        pixel_width,
        pixel_height
    );
    Ok(())
}
