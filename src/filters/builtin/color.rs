//! Colour stages: colour controls, hue rotation, sepia tone

use crate::core::error::{RenderError, RenderResult};
use crate::core::params::ParameterName;
use crate::core::stage::{Category, Stage, StageMetadata};
use crate::filters::builtin::{map_rgb, mul3};
use image::RgbaImage;

/// Rec.709 luma weights.
const LUMA: [f32; 3] = [0.2125, 0.7154, 0.0721];

const RGB_TO_YIQ: [[f32; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [0.596, -0.274, -0.322],
    [0.211, -0.523, 0.312],
];

const YIQ_TO_RGB: [[f32; 3]; 3] = [
    [1.0, 0.956, 0.621],
    [1.0, -0.272, -0.647],
    [1.0, -1.106, 1.703],
];

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Adjusts saturation, then brightness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorControls {
    /// Saturation multiplier (1 = unchanged)
    pub saturation: f32,
    /// Offset added to each channel (0 = unchanged)
    pub brightness: f32,
}

impl ColorControls {
    /// Create the stage.
    pub fn new(saturation: f32, brightness: f32) -> Self {
        Self {
            saturation,
            brightness,
        }
    }
}

impl Stage for ColorControls {
    fn metadata(&self) -> StageMetadata {
        StageMetadata::builder("color_controls", "Color Controls")
            .description("Mix each pixel with its luma by the saturation, then add brightness")
            .category(Category::Color)
            .parameter(ParameterName::Saturation)
            .parameter(ParameterName::Brightness)
            .build()
    }

    fn is_passthrough(&self) -> bool {
        self.saturation == 1.0 && self.brightness == 0.0
    }

    fn apply(&self, input: &RgbaImage) -> RenderResult<RgbaImage> {
        let stage = "color_controls";
        if !self.saturation.is_finite() || !self.brightness.is_finite() {
            return Err(RenderError::declined(stage, "saturation and brightness must be finite"));
        }
        if self.saturation < 0.0 {
            return Err(RenderError::declined(stage, "saturation must not be negative"));
        }
        if self.is_passthrough() {
            return Ok(input.clone());
        }

        let (saturation, brightness) = (self.saturation, self.brightness);
        Ok(map_rgb(input, |rgb| {
            let luma = LUMA[0] * rgb[0] + LUMA[1] * rgb[1] + LUMA[2] * rgb[2];
            rgb.map(|c| luma + (c - luma) * saturation + brightness)
        }))
    }
}

/// Rotates hue around the YIQ chroma plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueAdjust {
    /// Rotation in radians
    pub angle: f32,
}

impl HueAdjust {
    /// Create the stage.
    pub fn new(angle: f32) -> Self {
        Self { angle }
    }

    /// Combined RGB -> rotated YIQ -> RGB matrix.
    fn matrix(&self) -> [[f32; 3]; 3] {
        let (sin, cos) = self.angle.sin_cos();
        let rotation = [[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]];
        matmul(&YIQ_TO_RGB, &matmul(&rotation, &RGB_TO_YIQ))
    }
}

fn matmul(a: &[[f32; 3]; 3], b: &[[f32; 3]; 3]) -> [[f32; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

impl Stage for HueAdjust {
    fn metadata(&self) -> StageMetadata {
        StageMetadata::builder("hue_adjust", "Hue Adjust")
            .description("Rotate the hue of every pixel by an angle in radians")
            .category(Category::Color)
            .parameter(ParameterName::HueAngle)
            .build()
    }

    fn is_passthrough(&self) -> bool {
        self.angle == 0.0
    }

    fn apply(&self, input: &RgbaImage) -> RenderResult<RgbaImage> {
        if !self.angle.is_finite() {
            return Err(RenderError::declined("hue_adjust", "angle must be finite"));
        }
        if self.is_passthrough() {
            return Ok(input.clone());
        }

        let matrix = self.matrix();
        Ok(map_rgb(input, |rgb| mul3(&matrix, rgb)))
    }
}

/// Blends toward a sepia palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SepiaTone {
    /// Blend amount in [0, 1]
    pub intensity: f32,
}

impl SepiaTone {
    /// Create the stage.
    pub fn new(intensity: f32) -> Self {
        Self { intensity }
    }
}

impl Stage for SepiaTone {
    fn metadata(&self) -> StageMetadata {
        StageMetadata::builder("sepia_tone", "Sepia Tone")
            .description("Blend the image toward sepia tones")
            .category(Category::Stylize)
            .parameter(ParameterName::SepiaIntensity)
            .build()
    }

    fn is_passthrough(&self) -> bool {
        self.intensity == 0.0
    }

    fn apply(&self, input: &RgbaImage) -> RenderResult<RgbaImage> {
        if !(0.0..=1.0).contains(&self.intensity) {
            return Err(RenderError::declined(
                "sepia_tone",
                format!("intensity {} is outside [0, 1]", self.intensity),
            ));
        }
        if self.is_passthrough() {
            return Ok(input.clone());
        }

        let intensity = self.intensity;
        Ok(map_rgb(input, |rgb| {
            let sepia = mul3(&SEPIA, rgb);
            [
                rgb[0] + (sepia[0] - rgb[0]) * intensity,
                rgb[1] + (sepia[1] - rgb[1]) * intensity,
                rgb[2] + (sepia[2] - rgb[2]) * intensity,
            ]
        }))
    }
}
