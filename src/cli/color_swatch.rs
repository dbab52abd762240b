use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::core::{
    color::Color,
    error::SwatchError,
    file_io::FilePrefix,
    render_backend::PixelFormat,
    swatch::Swatch,
    swatch_model::RowMode,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RowParams {
    pub mode: RowMode,
    pub colors: Vec<[u8; 3]>, // [R, G, B], left to right
}

/// Parameter file for a swatch. Rows are stacked top to bottom in file order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SwatchParams {
    pub resolution: (f32, f32), // (width, height)
    #[serde(default)]
    pub pixel_format: PixelFormat,
    #[serde(default)]
    pub sample_count: u32,
    pub rows: Vec<RowParams>,
}

impl SwatchParams {
    pub fn from_file(params_path: &str) -> Result<SwatchParams, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(params_path)
            .map_err(|err| format!("unable to read param file `{}`: {}", params_path, err))?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Builds and rasterizes the swatch described by `params`.
pub fn build_swatch(params: &SwatchParams) -> Result<Swatch, SwatchError> {
    let mut swatch = Swatch::setup(
        params.resolution.0,
        params.resolution.1,
        params.pixel_format,
        params.sample_count,
    )?;
    for row in params.rows.iter() {
        let colors: Vec<Color> = row.colors.iter().copied().map(Color::from_rgb8).collect();
        match row.mode {
            RowMode::Gradient => swatch.add_gradient_with(&colors),
            RowMode::Palette => swatch.add_palette_with(&colors),
        };
    }
    swatch.create_swatch()?;
    Ok(swatch)
}

/// PNG has no floating point storage, so float textures are quantized before saving.
pub fn save_texture(texture: &DynamicImage, path: &std::path::Path) -> image::ImageResult<()> {
    match texture {
        DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba8(texture.to_rgba8()).save(path),
        _ => texture.save(path),
    }
}

/**
 * Reads a swatch parameter file, rasterizes it, and writes both a copy of the
 * parameters and the rendered swatch (as a PNG) next to each other.
 */
pub fn generate_color_swatch(
    params_path: &str,
    file_prefix: FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = SwatchParams::from_file(params_path)?;
    let swatch = build_swatch(&params)?;

    let params_copy_path = file_prefix.with_suffix(".json");
    std::fs::write(&params_copy_path, serde_json::to_string_pretty(&params)?)?;
    log::info!("Wrote parameter file to: {}", params_copy_path.display());

    let render_path = file_prefix.with_suffix(".png");
    save_texture(swatch.texture(), &render_path)?;
    log::info!("Wrote image file to: {}", render_path.display());
    Ok(())
}
