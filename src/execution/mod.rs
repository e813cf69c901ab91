//! Render execution module.
//!
//! This module runs the filter pipeline over a scaled image.

pub mod engine;

pub use engine::{FilterPipeline, RenderOutput, RenderStats, StageTiming};
