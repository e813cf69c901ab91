//! # Photopost - Photo Post Editing Core
//!
//! Photopost is the rendering core of a photo-post editing screen. A user picks
//! an image, adjusts five sliders and submits the result with a title.
//!
//! ## Features
//!
//! - **Fixed Filter Pipeline**: colour controls, Gaussian blur, hue rotation and
//!   sepia, always applied in that order
//! - **Pure Rendering**: output depends only on the scaled image and the
//!   parameters; any stage failure falls back to the unfiltered image
//! - **Explicit Access Flow**: photo library authorization as a state machine
//! - **Validation**: advisory parameter checks that predict fallbacks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use photopost::prelude::*;
//!
//! let source = SourceImage::open(Path::new("input.jpg"))?;
//! let scaled = scale(&source, &Viewport::default(), &ScalingOptions::default())?;
//!
//! let params = FilterParameters::identity()
//!     .with_blur_radius(3.0)
//!     .with_sepia_intensity(0.4);
//!
//! let rendered = FilterPipeline::new().render(&scaled, &params);
//! rendered.pixels().save("output.png")?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: image types, parameters, the stage trait and errors
//! - [`filters`]: the built-in stages and scaling
//! - [`execution`]: the filter pipeline
//! - [`validation`]: multi-stage parameter validation
//! - [`editor`]: the editing session, photo library access and submission
//! - [`config`]: TOML configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod editor;
pub mod execution;
pub mod filters;
pub mod validation;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use photopost::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{
        Dimensions, RenderedImage, ScaledImage, SourceImage, Viewport, MAX_VIEWPORT_SIDE,
    };

    // Parameters
    pub use crate::core::params::{
        Constraint, FilterParameters, ParameterDefinition, ParameterName, ParameterSchema, UiHint,
        MAX_BLUR_RADIUS,
    };

    // Stages
    pub use crate::core::stage::{Category, IntoStages, Stage, StageMetadata};

    // Errors
    pub use crate::core::error::{
        AccessError, ConfigError, MissingField, PhotoPostError, PhotoPostResult, RenderError,
        SubmissionError, ValidationError, ValidationReport, ValidationWarning,
    };

    // Filters
    pub use crate::filters::{
        scale, stage_catalog, standard_stages, ColorControls, GaussianBlur, HueAdjust, ScaleFilter,
        ScaleMode, ScalingOptions, SepiaTone,
    };

    // Execution
    pub use crate::execution::{FilterPipeline, RenderOutput, RenderStats, StageTiming};

    // Validation
    pub use crate::validation::{
        ConstraintValidation, FiniteValidation, SliderRangeValidation, ValidationPipeline,
        ValidationStage,
    };

    // Editor
    pub use crate::editor::{
        acquire_image, validate_post, AccessState, ChooseOutcome, DirectorySubmitter, DisplaySink,
        EditingSession, PhotoLibrary, PickResult, PostManifest, PostSubmitter,
    };

    // Config
    pub use crate::config::EditorConfig;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "photopost");
    }

    #[test]
    fn test_stage_catalog_order() {
        let ids: Vec<_> = stage_catalog().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, ["color_controls", "gaussian_blur", "hue_adjust", "sepia_tone"]);
    }

    #[test]
    fn test_scale_then_render() {
        let source = SourceImage::from_rgba(RgbaImage::from_pixel(40, 20, Rgba([90, 120, 200, 255])));
        let viewport = Viewport::new(10.0, 5.0, 2.0);
        let scaled = scale(&source, &viewport, &ScalingOptions::default()).unwrap();
        assert_eq!(scaled.dimensions(), Dimensions::new(20, 10));

        let params = FilterParameters::identity().with_saturation(0.0);
        let rendered = FilterPipeline::new().render(&scaled, &params);
        assert_eq!(rendered.dimensions(), scaled.dimensions());
        let p = rendered.pixels().get_pixel(3, 3);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }

    #[test]
    fn test_validation_pipeline() {
        let report = ValidationPipeline::default().validate(&FilterParameters::identity());
        assert!(report.can_render());
        assert!(report.errors.is_empty());
    }
}
