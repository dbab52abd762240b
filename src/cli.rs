pub mod args;
pub mod color_swatch;
pub mod sample;
