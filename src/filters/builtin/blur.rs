//! Gaussian blur stage

use crate::core::error::{RenderError, RenderResult};
use crate::core::params::{ParameterName, MAX_BLUR_RADIUS};
use crate::core::stage::{Category, Stage, StageMetadata};
use image::{ImageBuffer, Rgba, RgbaImage};

/// Radii below this blur by less than a thousandth of a pixel and are treated
/// as zero. Much smaller radii underflow the kernel weights.
pub const MIN_BLUR_RADIUS: f32 = 1e-3;

/// Applies Gaussian blur to an image.
///
/// The radius is the kernel's standard deviation in pixels. Samples past the
/// border are clamped to the edge pixel, so the output keeps the input's
/// extent without dark fringes. Blurring runs at `f32` precision and rounds
/// once, so uniform regions and opaque alpha come out unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBlur {
    /// Standard deviation in pixels
    pub radius: f32,
}

impl GaussianBlur {
    /// Create the stage.
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }
}

impl Stage for GaussianBlur {
    fn metadata(&self) -> StageMetadata {
        StageMetadata::builder("gaussian_blur", "Gaussian Blur")
            .description("Apply a Gaussian blur; radius 0 leaves the image untouched")
            .category(Category::Blur)
            .parameter(ParameterName::BlurRadius)
            .build()
    }

    fn is_passthrough(&self) -> bool {
        (0.0..MIN_BLUR_RADIUS).contains(&self.radius)
    }

    fn apply(&self, input: &RgbaImage) -> RenderResult<RgbaImage> {
        let stage = "gaussian_blur";
        if !self.radius.is_finite() {
            return Err(RenderError::declined(stage, "radius must be finite"));
        }
        if self.radius < 0.0 {
            return Err(RenderError::declined(stage, "radius must not be negative"));
        }
        if self.radius as f64 > MAX_BLUR_RADIUS {
            return Err(RenderError::declined(
                stage,
                format!("radius {} exceeds {}", self.radius, MAX_BLUR_RADIUS),
            ));
        }
        if self.is_passthrough() {
            return Ok(input.clone());
        }

        let (width, height) = input.dimensions();
        let wide: ImageBuffer<Rgba<f32>, Vec<f32>> =
            ImageBuffer::from_fn(width, height, |x, y| Rgba(input.get_pixel(x, y).0.map(f32::from)));
        let blurred = imageproc::filter::gaussian_blur_f32(&wide, self.radius);

        Ok(RgbaImage::from_fn(width, height, |x, y| {
            Rgba(blurred.get_pixel(x, y).0.map(|v| v.round().clamp(0.0, 255.0) as u8))
        }))
    }
}
