//! Scaling a source image to the viewport

use crate::core::error::{RenderError, RenderResult};
use crate::core::types::{Dimensions, ScaledImage, SourceImage, Viewport, MAX_VIEWPORT_SIDE};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resampling filter used when scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl ScaleFilter {
    fn filter_type(self) -> FilterType {
        match self {
            ScaleFilter::Nearest => FilterType::Nearest,
            ScaleFilter::Triangle => FilterType::Triangle,
            ScaleFilter::CatmullRom => FilterType::CatmullRom,
            ScaleFilter::Gaussian => FilterType::Gaussian,
            ScaleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ScaleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(ScaleFilter::Nearest),
            "triangle" => Ok(ScaleFilter::Triangle),
            "catmullrom" => Ok(ScaleFilter::CatmullRom),
            "gaussian" => Ok(ScaleFilter::Gaussian),
            "lanczos3" => Ok(ScaleFilter::Lanczos3),
            other => Err(format!("unknown scale filter '{}'", other)),
        }
    }
}

impl fmt::Display for ScaleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScaleFilter::Nearest => "nearest",
            ScaleFilter::Triangle => "triangle",
            ScaleFilter::CatmullRom => "catmullrom",
            ScaleFilter::Gaussian => "gaussian",
            ScaleFilter::Lanczos3 => "lanczos3",
        };
        f.write_str(name)
    }
}

/// How the source is fitted into the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Fill the viewport's pixel size exactly
    #[default]
    Stretch,
    /// Keep the source aspect ratio, fitting inside the viewport
    Fit,
}

/// Scaling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingOptions {
    /// Resampling filter
    pub filter: ScaleFilter,
    /// Fitting mode
    pub mode: ScaleMode,
}

/// Resize `source` for display in `viewport`.
///
/// When the target size equals the source size the pixels are copied as-is,
/// so an identity render of a same-size viewport is bit-identical to the
/// source.
pub fn scale(
    source: &SourceImage,
    viewport: &Viewport,
    options: &ScalingOptions,
) -> RenderResult<ScaledImage> {
    let target = viewport.pixel_size();
    if target.is_empty() {
        return Err(RenderError::EmptyViewport {
            width: target.width,
            height: target.height,
        });
    }
    if target.width > MAX_VIEWPORT_SIDE || target.height > MAX_VIEWPORT_SIDE {
        return Err(RenderError::ViewportTooLarge {
            width: target.width,
            height: target.height,
            max: MAX_VIEWPORT_SIDE,
        });
    }

    let src = source.dimensions();
    if src.is_empty() {
        return Err(RenderError::RenderFailed {
            reason: "source image has no pixels".to_string(),
        });
    }

    let target = match options.mode {
        ScaleMode::Stretch => target,
        ScaleMode::Fit => fit_within(src, target),
    };

    if target == src {
        log::debug!("Viewport matches source size {}, skipping resample", src);
        return Ok(ScaledImage::from_pixels(source.pixels().clone()));
    }

    log::debug!("Scaling {} -> {} ({})", src, target, options.filter);
    let resized = image::imageops::resize(
        source.pixels(),
        target.width,
        target.height,
        options.filter.filter_type(),
    );
    Ok(ScaledImage::from_pixels(resized))
}

/// Largest size with the source's aspect ratio that fits inside `bounds`.
fn fit_within(src: Dimensions, bounds: Dimensions) -> Dimensions {
    let aspect = src.width as f64 / src.height as f64;
    let height_for_width = (bounds.width as f64 / aspect).round() as u32;
    if height_for_width <= bounds.height {
        Dimensions::new(bounds.width, height_for_width.max(1))
    } else {
        let width_for_height = (bounds.height as f64 * aspect).round() as u32;
        Dimensions::new(width_for_height.clamp(1, bounds.width), bounds.height)
    }
}
