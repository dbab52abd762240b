use thiserror::Error;

use crate::core::swatch_model::RowMode;

/// Everything that can go wrong while building, rasterizing, or sampling a swatch.
/// All of these are raised by the call that triggers them, before any pixel
/// data is modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SwatchError {
    #[error("row index {index} is out of bounds for a swatch with {row_count} rows")]
    IndexError { index: usize, row_count: usize },

    #[error("row {row} ({mode:?}) has no colors")]
    InvalidRowError { row: usize, mode: RowMode },

    #[error("cannot rasterize a swatch with zero rows (row height would divide by zero)")]
    DivisionByZeroError,

    #[error("the swatch has not been rasterized yet; call `create_swatch()` first")]
    NotRasterized,

    #[error("invalid swatch dimensions: {width} x {height}")]
    InvalidDimensions { width: f32, height: f32 },
}
