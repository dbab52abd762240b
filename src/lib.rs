pub mod cli;
pub mod core;

pub use crate::core::{
    color::Color,
    color_space::{to_display, to_uniform, UniformColor},
    error::SwatchError,
    render_backend::{ImageBackend, PixelFormat, RenderBackend},
    swatch::Swatch,
    swatch_model::{Row, RowMode},
};
