//! Validation module for filter parameters.
//!
//! The validation pipeline checks parameters before rendering so a caller can
//! tell the user why the unfiltered image is being shown.

pub mod pipeline;
pub mod stages;

pub use pipeline::ValidationPipeline;
pub use stages::{ConstraintValidation, FiniteValidation, SliderRangeValidation, ValidationStage};
