//! Conversion between gamma-encoded RGB and a normalized CIE L*a*b* space.
//!
//! Gradients are interpolated in the "uniform" space produced here. Linear
//! interpolation of gamma-encoded RGB gives muddy, desaturated midpoints, while
//! equal steps in L*a*b* look roughly equal to the eye. The final stage packs
//! L*a*b* into [0,1] on every axis so that it can be interpolated (and stored)
//! exactly like an ordinary color.

use nalgebra::{Matrix3, Vector3};

use crate::core::color::Color;

/// Normalized L*a*b*: `(L/100, 0.5 + 0.5 a/127, 0.5 + 0.5 b/127)`.
pub type UniformColor = Vector3<f32>;

/// D65 reference white, in the same units as `linear_rgb_to_xyz`.
pub const REFERENCE_WHITE: [f32; 3] = [95.047, 100.0, 108.883];

const SRGB_DECODE_THRESHOLD: f32 = 0.04045;
const SRGB_ENCODE_THRESHOLD: f32 = 0.0031308;
const LAB_FORWARD_THRESHOLD: f32 = 0.008856;
const LAB_INVERSE_THRESHOLD: f32 = 0.206897;
const LAB_LINEAR_SLOPE: f32 = 7.787;
const LAB_LINEAR_OFFSET: f32 = 16.0 / 116.0;
const AB_RANGE: f32 = 127.0;

fn rgb_to_xyz_matrix() -> Matrix3<f32> {
    Matrix3::new(
        0.4124, 0.3576, 0.1805, //
        0.2126, 0.7152, 0.0722, //
        0.0193, 0.1192, 0.9505,
    )
}

fn xyz_to_rgb_matrix() -> Matrix3<f32> {
    Matrix3::new(
        3.2406, -1.5372, -0.4986, //
        -0.9689, 1.8758, 0.0415, //
        0.0557, -0.2040, 1.0570,
    )
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c > SRGB_DECODE_THRESHOLD {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

pub fn linear_to_srgb(c: f32) -> f32 {
    if c > SRGB_ENCODE_THRESHOLD {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * c
    }
}

/// Linear RGB on [0,1] to XYZ on [0,~100].
pub fn linear_rgb_to_xyz(linear: &Vector3<f32>) -> Vector3<f32> {
    rgb_to_xyz_matrix() * *linear * 100.0
}

pub fn xyz_to_linear_rgb(xyz: &Vector3<f32>) -> Vector3<f32> {
    xyz_to_rgb_matrix() * (*xyz / 100.0)
}

fn lab_forward(t: f32) -> f32 {
    if t > LAB_FORWARD_THRESHOLD {
        t.cbrt()
    } else {
        LAB_LINEAR_SLOPE * t + LAB_LINEAR_OFFSET
    }
}

fn lab_inverse(t: f32) -> f32 {
    if t > LAB_INVERSE_THRESHOLD {
        t * t * t
    } else {
        (t - LAB_LINEAR_OFFSET) / LAB_LINEAR_SLOPE
    }
}

/// XYZ to un-normalized L*a*b* (`L` on [0,100], `a` and `b` roughly on [-127,127]).
pub fn xyz_to_lab(xyz: &Vector3<f32>) -> Vector3<f32> {
    let fx = lab_forward(xyz[0] / REFERENCE_WHITE[0]);
    let fy = lab_forward(xyz[1] / REFERENCE_WHITE[1]);
    let fz = lab_forward(xyz[2] / REFERENCE_WHITE[2]);
    Vector3::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

pub fn lab_to_xyz(lab: &Vector3<f32>) -> Vector3<f32> {
    let fy = (lab[0] + 16.0) / 116.0;
    let fx = lab[1] / 500.0 + fy;
    let fz = fy - lab[2] / 200.0;
    Vector3::new(
        REFERENCE_WHITE[0] * lab_inverse(fx),
        REFERENCE_WHITE[1] * lab_inverse(fy),
        REFERENCE_WHITE[2] * lab_inverse(fz),
    )
}

pub fn normalize_lab(lab: &Vector3<f32>) -> UniformColor {
    Vector3::new(
        lab[0] / 100.0,
        0.5 + 0.5 * (lab[1] / AB_RANGE),
        0.5 + 0.5 * (lab[2] / AB_RANGE),
    )
}

pub fn denormalize_lab(uniform: &UniformColor) -> Vector3<f32> {
    Vector3::new(
        100.0 * uniform[0],
        2.0 * AB_RANGE * (uniform[1] - 0.5),
        2.0 * AB_RANGE * (uniform[2] - 0.5),
    )
}

/// Display color to the normalized uniform space. Alpha is ignored.
pub fn to_uniform(color: &Color) -> UniformColor {
    let linear = Vector3::new(
        srgb_to_linear(color.r),
        srgb_to_linear(color.g),
        srgb_to_linear(color.b),
    );
    normalize_lab(&xyz_to_lab(&linear_rgb_to_xyz(&linear)))
}

/// Inverse of `to_uniform`, without any gamut mapping. Interpolated uniform
/// values can land outside of the RGB gamut, in which case some channels of
/// the result fall outside of [0,1].
pub fn to_display_unclamped(uniform: &UniformColor) -> Color {
    let linear = xyz_to_linear_rgb(&lab_to_xyz(&denormalize_lab(uniform)));
    Color::new(
        linear_to_srgb(linear[0]),
        linear_to_srgb(linear[1]),
        linear_to_srgb(linear[2]),
    )
}

/// Inverse of `to_uniform`. Out-of-gamut channels are clamped to [0,1], and
/// NaN maps to zero.
pub fn to_display(uniform: &UniformColor) -> Color {
    let raw = to_display_unclamped(uniform);
    Color::new(clamp_unit(raw.r), clamp_unit(raw.g), clamp_unit(raw.b))
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
