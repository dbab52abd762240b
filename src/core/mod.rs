pub mod color;
pub mod color_space;
pub mod error;
pub mod file_io;
pub mod interpolation;
pub mod logging;
pub mod pixel_buffer;
pub mod rasterizer;
pub mod render_backend;
pub mod sampler;
pub mod swatch;
pub mod swatch_model;
