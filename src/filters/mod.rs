//! Filter module.
//!
//! Contains the built-in stages and the scaling step that prepares the
//! pipeline's input.

pub mod builtin;

pub use builtin::{
    scale, ColorControls, GaussianBlur, HueAdjust, ScaleFilter, ScaleMode, ScalingOptions,
    SepiaTone,
};

use crate::core::params::FilterParameters;
use crate::core::stage::Stage;

/// Build the four pipeline stages for `params`, in their fixed order.
pub fn standard_stages(params: &FilterParameters) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(ColorControls::new(params.saturation, params.brightness)),
        Box::new(GaussianBlur::new(params.blur_radius)),
        Box::new(HueAdjust::new(params.hue_angle)),
        Box::new(SepiaTone::new(params.sepia_intensity)),
    ]
}

/// Metadata of every standard stage, in pipeline order.
pub fn stage_catalog() -> Vec<crate::core::stage::StageMetadata> {
    standard_stages(&FilterParameters::identity())
        .iter()
        .map(|stage| stage.metadata())
        .collect()
}
