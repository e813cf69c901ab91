//! Core types and traits for the photopost editing core.
//!
//! This module contains the foundational types of the filter pipeline:
//! - Image value types (source, scaled, rendered) and the viewport
//! - Filter parameters and their schema
//! - The stage trait and stage metadata
//! - Error types

pub mod types;
pub mod params;
pub mod error;
pub mod stage;

// Re-export commonly used types
pub use types::{Dimensions, RenderedImage, ScaledImage, SourceImage, Viewport};
pub use params::{Constraint, FilterParameters, ParameterDefinition, ParameterName, ParameterSchema};
pub use error::{AccessError, PhotoPostError, RenderError, SubmissionError, ValidationError};
pub use stage::{Category, IntoStages, Stage, StageMetadata};
