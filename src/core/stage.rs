//! Stage trait and stage metadata.
//!
//! A stage is one operator of the filter pipeline. Unlike a long-lived filter
//! object whose fields are mutated before every render, a stage value *is* its
//! parameters: it is built fresh from [`FilterParameters`] for each render and
//! applying it is a pure function of the input buffer.

use crate::core::error::RenderResult;
use crate::core::params::{FilterParameters, ParameterName};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Category for organizing stages in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Colour adjustments (brightness, saturation, hue)
    Color,
    /// Blur effects
    Blur,
    /// Stylizing tints
    Stylize,
}

impl Category {
    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Color => "Color",
            Category::Blur => "Blur",
            Category::Stylize => "Stylize",
        }
    }
}

/// Metadata describing a stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageMetadata {
    /// Unique identifier (e.g., "gaussian_blur")
    pub id: String,
    /// Human-readable name (e.g., "Gaussian Blur")
    pub name: String,
    /// Category for organization
    pub category: Category,
    /// Detailed description
    pub description: String,
    /// Parameters the stage reads
    pub parameters: Vec<ParameterName>,
}

impl StageMetadata {
    /// Create a new metadata builder.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> StageMetadataBuilder {
        StageMetadataBuilder::new(id, name)
    }
}

/// Builder for StageMetadata.
pub struct StageMetadataBuilder {
    id: String,
    name: String,
    category: Category,
    description: String,
    parameters: Vec<ParameterName>,
}

impl StageMetadataBuilder {
    /// Create a new builder with required fields.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: Category::Color,
            description: String::new(),
            parameters: Vec::new(),
        }
    }

    /// Set the category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a parameter the stage reads.
    pub fn parameter(mut self, name: ParameterName) -> Self {
        self.parameters.push(name);
        self
    }

    /// Build the metadata.
    pub fn build(self) -> StageMetadata {
        StageMetadata {
            id: self.id,
            name: self.name,
            category: self.category,
            description: self.description,
            parameters: self.parameters,
        }
    }
}

/// One operator of the filter pipeline.
///
/// # Contract
///
/// - `apply` reads nothing but `self` and `input`.
/// - The output has the same dimensions as the input. Neighbourhood
///   operations sample clamped to the edge so borders never darken.
/// - A stage that cannot honour its parameters returns
///   [`crate::core::error::RenderError::StageDeclined`] instead of producing a
///   partial result.
pub trait Stage: Send + Sync {
    /// Get the metadata for this stage.
    fn metadata(&self) -> StageMetadata;

    /// Whether applying this stage would return its input unchanged.
    fn is_passthrough(&self) -> bool {
        false
    }

    /// Apply the stage to an RGBA buffer.
    fn apply(&self, input: &RgbaImage) -> RenderResult<RgbaImage>;
}

/// Something that can be decomposed into the pipeline's stages.
pub trait IntoStages {
    /// Build the stages in their fixed order.
    fn stages(&self) -> Vec<Box<dyn Stage>>;
}

impl IntoStages for FilterParameters {
    fn stages(&self) -> Vec<Box<dyn Stage>> {
        crate::filters::standard_stages(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let metadata = StageMetadata::builder("test_stage", "Test Stage")
            .category(Category::Stylize)
            .description("A test stage")
            .parameter(ParameterName::SepiaIntensity)
            .build();

        assert_eq!(metadata.id, "test_stage");
        assert_eq!(metadata.name, "Test Stage");
        assert_eq!(metadata.category, Category::Stylize);
        assert_eq!(metadata.parameters, vec![ParameterName::SepiaIntensity]);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Blur.display_name(), "Blur");
        assert_eq!(Category::Stylize.display_name(), "Stylize");
    }

    #[test]
    fn test_parameters_decompose_into_four_stages() {
        let ids: Vec<_> = FilterParameters::identity()
            .stages()
            .iter()
            .map(|s| s.metadata().id)
            .collect();
        assert_eq!(ids, ["color_controls", "gaussian_blur", "hue_adjust", "sepia_tone"]);
    }
}
