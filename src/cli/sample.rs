use crate::{
    cli::color_swatch::{build_swatch, SwatchParams},
    core::color::Color,
};

/// Rasterizes the swatch described by the parameter file and samples a single point.
pub fn sample_color_swatch(
    params_path: &str,
    value: f32,
    row: usize,
) -> Result<Color, Box<dyn std::error::Error>> {
    let params = SwatchParams::from_file(params_path)?;
    let swatch = build_swatch(&params)?;
    let color = swatch.sample(value, row)?;
    log::debug!("sampled row {} at {} from {}", row, value, params_path);
    Ok(color)
}

/// Single line summary of a sampled color, as printed by the `sample` command.
pub fn describe_sample(color: &Color) -> String {
    let [r, g, b] = color.to_rgb8();
    format!("rgb({}, {}, {})  {}", r, g, b, color.hex_string())
}
