//! Image value types that flow through an editing session.
//!
//! Each stage of the session has its own type so the compiler keeps them apart:
//! - [`SourceImage`]: what the user picked, immutable for the session
//! - [`ScaledImage`]: the source resized to the viewport, the pipeline's input
//! - [`RenderedImage`]: the filtered output handed to display and submission

use crate::core::error::{RenderError, RenderResult};
use crate::filters::ScalingOptions;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Largest viewport side, in device pixels, that images are scaled to.
pub const MAX_VIEWPORT_SIDE: u32 = 4096;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Dimensions {
    /// Create new dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Height divided by width, or 1.0 for an empty image.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width == 0 {
            1.0
        } else {
            self.height as f64 / self.width as f64
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An image picked by the user.
///
/// Pixels are normalized to RGBA8 on construction and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Wrap an already decoded image.
    pub fn new(image: DynamicImage) -> Self {
        Self {
            pixels: image.to_rgba8(),
        }
    }

    /// Wrap an RGBA buffer.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode an encoded image (PNG, JPEG, ...).
    ///
    /// This is the only place a [`RenderError::RenderFailed`] originates.
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        image::load_from_memory(bytes)
            .map(Self::new)
            .map_err(|e| RenderError::RenderFailed {
                reason: e.to_string(),
            })
    }

    /// Load and decode an image file.
    pub fn open(path: &Path) -> RenderResult<Self> {
        image::open(path)
            .map(Self::new)
            .map_err(|e| RenderError::RenderFailed {
                reason: format!("{}: {}", path.display(), e),
            })
    }

    /// Pixel data.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Pixel dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.pixels.width(), self.pixels.height())
    }
}

/// The display area the image is shown in.
///
/// Width and height are in points; `scale` converts points to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in points
    pub width: f64,
    /// Height in points
    pub height: f64,
    /// Pixels per point
    pub scale: f64,
}

impl Viewport {
    /// Create a viewport.
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Resize the height so that `height = width * ratio`.
    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.height = self.width * ratio;
        self
    }

    /// Size of the viewport in device pixels.
    pub fn pixel_size(&self) -> Dimensions {
        let to_pixels = |points: f64| -> u32 {
            let px = (points * self.scale).round();
            if px.is_finite() && px > 0.0 {
                px.min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        Dimensions::new(to_pixels(self.width), to_pixels(self.height))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(375.0, 375.0, 2.0)
    }
}

/// A source image resized to the viewport.
///
/// Read-only; produced by [`ScaledImage::from_source`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledImage {
    pixels: RgbaImage,
}

impl ScaledImage {
    /// Resize `source` for display in `viewport`. See [`crate::filters::scale`].
    pub fn from_source(
        source: &SourceImage,
        viewport: &Viewport,
        options: &ScalingOptions,
    ) -> RenderResult<Self> {
        crate::filters::scale(source, viewport, options)
    }

    pub(crate) fn from_pixels(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Pixel data.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Pixel dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.pixels.width(), self.pixels.height())
    }
}

/// Output of the filter pipeline.
///
/// Compares by pixels only: two renders of the same inputs are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedImage {
    pixels: RgbaImage,
}

impl RenderedImage {
    pub(crate) fn from_pixels(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Pixel data.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Pixel dimensions.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.pixels.width(), self.pixels.height())
    }

    /// Height divided by width; used to lay out the post.
    pub fn aspect_ratio(&self) -> f64 {
        self.dimensions().aspect_ratio()
    }

    /// Consume into the underlying buffer.
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    /// Whether the pixels are exactly those of `scaled`.
    pub fn is_identical_to(&self, scaled: &ScaledImage) -> bool {
        self.pixels == *scaled.pixels()
    }
}
