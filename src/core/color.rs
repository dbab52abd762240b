use serde::{Deserialize, Serialize};

/**
 * Gamma-encoded (display) color, with each channel on [0,1]. The alpha channel
 * is carried along for storage, but it never takes part in the color space
 * conversions.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    pub fn from_rgb8(rgb: [u8; 3]) -> Color {
        Color::new(
            channel_from_u8(rgb[0]),
            channel_from_u8(rgb[1]),
            channel_from_u8(rgb[2]),
        )
    }

    pub fn from_rgba8(rgba: [u8; 4]) -> Color {
        Color::with_alpha(
            channel_from_u8(rgba[0]),
            channel_from_u8(rgba[1]),
            channel_from_u8(rgba[2]),
            channel_from_u8(rgba[3]),
        )
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
        ]
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    pub fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Lower-case `#rrggbb` string, used when printing samples on the command line.
    pub fn hex_string(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Channel-wise average, used to resolve multisampled pixels.
    pub fn mean(colors: &[Color]) -> Color {
        assert!(!colors.is_empty(), "cannot average an empty set of colors");
        let scale = 1.0 / (colors.len() as f32);
        let mut sum = [0.0f32; 4];
        for color in colors {
            sum[0] += color.r;
            sum[1] += color.g;
            sum[2] += color.b;
            sum[3] += color.a;
        }
        Color::with_alpha(sum[0] * scale, sum[1] * scale, sum[2] * scale, sum[3] * scale)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Color::from_rgb8(rgb)
    }
}

fn channel_from_u8(value: u8) -> f32 {
    (value as f32) / 255.0
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rgb8_conversion_is_exact_for_every_level() {
        for level in 0..=255u8 {
            let color = Color::from_rgb8([level, 255 - level, level / 2]);
            assert_eq!(color.to_rgb8(), [level, 255 - level, level / 2]);
        }
    }

    #[test]
    fn test_quantization_clamps_out_of_range_channels() {
        let color = Color::with_alpha(-0.5, 1.7, 0.5, 2.0);
        assert_eq!(color.to_rgba8(), [0, 255, 128, 255]);
    }

    #[test]
    fn test_hex_string() {
        assert_eq!(Color::from_rgb8([255, 0, 16]).hex_string(), "#ff0010");
    }

    #[test]
    fn test_mean() {
        let mean = Color::mean(&[Color::BLACK, Color::WHITE]);
        assert_relative_eq!(mean.r, 0.5);
        assert_relative_eq!(mean.g, 0.5);
        assert_relative_eq!(mean.b, 0.5);
        assert_relative_eq!(mean.a, 1.0);
    }

    #[test]
    fn test_deserialize_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r": 0.1, "g": 0.2, "b": 0.3}"#).unwrap();
        assert_eq!(color, Color::new(0.1, 0.2, 0.3));
    }
}
