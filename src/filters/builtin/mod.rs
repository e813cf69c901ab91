//! Built-in stage implementations.
//!
//! This module contains the stages of the editing pipeline and the scaling
//! step that feeds it.

mod blur;
mod color;
mod transform;

pub use blur::GaussianBlur;
pub use color::{ColorControls, HueAdjust, SepiaTone};
pub use transform::{scale, ScaleFilter, ScaleMode, ScalingOptions};

use image::RgbaImage;
use rayon::prelude::*;

/// Apply a per-pixel colour transform in normalized `[0, 1]` RGB.
///
/// Alpha is copied unchanged. Results are clamped and rounded back to 8 bits.
/// Pixels are independent, so the parallel split never changes the output.
pub(crate) fn map_rgb<F>(input: &RgbaImage, transform: F) -> RgbaImage
where
    F: Fn([f32; 3]) -> [f32; 3] + Sync,
{
    let mut output = input.clone();
    output.par_chunks_mut(4).for_each(|pixel| {
        let rgb = [
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        ];
        let mapped = transform(rgb);
        for (channel, value) in pixel.iter_mut().zip(mapped) {
            *channel = to_u8(value);
        }
    });
    output
}

fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Multiply a row-major 3x3 matrix by an RGB vector.
pub(crate) fn mul3(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}
