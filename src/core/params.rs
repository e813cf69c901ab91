//! Filter parameters and their schema.
//!
//! [`FilterParameters`] is the value the sliders write and the pipeline reads.
//! The [`ParameterSchema`] describes each slider: default, typical range, hard
//! constraints and how the UI should present it.

use crate::core::error::ValidationError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Largest blur radius the blur stage accepts.
pub const MAX_BLUR_RADIUS: f64 = 100.0;

/// Names of the five parameters, in pipeline order of first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterName {
    Saturation,
    Brightness,
    BlurRadius,
    HueAngle,
    SepiaIntensity,
}

impl ParameterName {
    /// All parameters in pipeline order.
    pub fn all() -> &'static [ParameterName] {
        &[
            ParameterName::Saturation,
            ParameterName::Brightness,
            ParameterName::BlurRadius,
            ParameterName::HueAngle,
            ParameterName::SepiaIntensity,
        ]
    }

    /// The snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterName::Saturation => "saturation",
            ParameterName::Brightness => "brightness",
            ParameterName::BlurRadius => "blur_radius",
            ParameterName::HueAngle => "hue_angle",
            ParameterName::SepiaIntensity => "sepia_intensity",
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "saturation" => Ok(ParameterName::Saturation),
            "brightness" => Ok(ParameterName::Brightness),
            "blur_radius" | "blur" => Ok(ParameterName::BlurRadius),
            "hue_angle" | "hue" => Ok(ParameterName::HueAngle),
            "sepia_intensity" | "sepia" => Ok(ParameterName::SepiaIntensity),
            other => Err(ValidationError::UnknownParameter(other.to_string())),
        }
    }
}

/// The five scalar values driving the filter pipeline.
///
/// Replaced as a whole; single-field edits return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    /// Gaussian blur standard deviation in pixels (>= 0)
    pub blur_radius: f32,
    /// Hue rotation in radians
    pub hue_angle: f32,
    /// Added to each colour channel (-1..1 typical)
    pub brightness: f32,
    /// Colour saturation multiplier (>= 0, 1 = unchanged)
    pub saturation: f32,
    /// Sepia blend amount (0..1)
    pub sepia_intensity: f32,
}

impl FilterParameters {
    /// Parameters under which every stage is a passthrough.
    pub const IDENTITY: FilterParameters = FilterParameters {
        blur_radius: 0.0,
        hue_angle: 0.0,
        brightness: 0.0,
        saturation: 1.0,
        sepia_intensity: 0.0,
    };

    /// Same as [`FilterParameters::IDENTITY`].
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Whether every stage would pass its input through untouched.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Read a parameter by name.
    pub fn get(&self, name: ParameterName) -> f32 {
        match name {
            ParameterName::Saturation => self.saturation,
            ParameterName::Brightness => self.brightness,
            ParameterName::BlurRadius => self.blur_radius,
            ParameterName::HueAngle => self.hue_angle,
            ParameterName::SepiaIntensity => self.sepia_intensity,
        }
    }

    /// Return a copy with one parameter replaced.
    pub fn with(mut self, name: ParameterName, value: f32) -> Self {
        match name {
            ParameterName::Saturation => self.saturation = value,
            ParameterName::Brightness => self.brightness = value,
            ParameterName::BlurRadius => self.blur_radius = value,
            ParameterName::HueAngle => self.hue_angle = value,
            ParameterName::SepiaIntensity => self.sepia_intensity = value,
        }
        self
    }

    /// Replace one parameter in place.
    pub fn set(&mut self, name: ParameterName, value: f32) {
        *self = self.with(name, value);
    }

    /// Return a copy with the blur radius replaced.
    pub fn with_blur_radius(self, value: f32) -> Self {
        self.with(ParameterName::BlurRadius, value)
    }

    /// Return a copy with the hue angle replaced.
    pub fn with_hue_angle(self, value: f32) -> Self {
        self.with(ParameterName::HueAngle, value)
    }

    /// Return a copy with the brightness replaced.
    pub fn with_brightness(self, value: f32) -> Self {
        self.with(ParameterName::Brightness, value)
    }

    /// Return a copy with the saturation replaced.
    pub fn with_saturation(self, value: f32) -> Self {
        self.with(ParameterName::Saturation, value)
    }

    /// Return a copy with the sepia intensity replaced.
    pub fn with_sepia_intensity(self, value: f32) -> Self {
        self.with(ParameterName::SepiaIntensity, value)
    }

    /// Iterate `(name, value)` pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterName, f32)> + '_ {
        ParameterName::all().iter().map(move |&name| (name, self.get(name)))
    }
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// How a parameter should be presented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "widget", content = "options")]
pub enum UiHint {
    /// Slider for numeric values
    Slider {
        /// Whether to use logarithmic scale
        logarithmic: bool,
    },
    /// Angle input (with circular widget)
    Angle,
}

/// Hard constraints a parameter value must satisfy.
///
/// A value that violates one makes the corresponding stage decline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params")]
pub enum Constraint {
    /// Numeric value must be within range [min, max]
    Range { min: f64, max: f64 },
    /// Numeric value must be >= min
    MinValue(f64),
}

impl Constraint {
    /// Validate a value against this constraint.
    pub fn validate(&self, value: f64) -> Result<(), String> {
        match *self {
            Constraint::Range { min, max } => {
                if value < min || value > max {
                    return Err(format!("value must be within [{}, {}]", min, max));
                }
            }
            Constraint::MinValue(min) => {
                if value < min {
                    return Err(format!("value must be >= {}", min));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Range { min, max } => write!(f, "[{}, {}]", min, max),
            Constraint::MinValue(min) => write!(f, ">= {}", min),
        }
    }
}

/// Definition of one slider-driven parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Parameter identifier
    pub name: ParameterName,
    /// Human-readable name
    pub display_name: String,
    /// Description for documentation
    pub description: String,
    /// Value the slider starts at
    pub default_value: f32,
    /// Typical range covered by the slider
    pub slider_min: f64,
    /// Typical range covered by the slider
    pub slider_max: f64,
    /// Hard constraints
    pub constraints: Vec<Constraint>,
    /// UI widget hint
    pub ui_hint: UiHint,
}

impl ParameterDefinition {
    /// Create a new parameter definition with a linear slider.
    pub fn new(name: ParameterName, default_value: f32) -> Self {
        Self {
            display_name: name_to_display(name.as_str()),
            name,
            description: String::new(),
            default_value,
            slider_min: 0.0,
            slider_max: 1.0,
            constraints: Vec::new(),
            ui_hint: UiHint::Slider { logarithmic: false },
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the slider's range.
    pub fn with_slider(mut self, min: f64, max: f64) -> Self {
        self.slider_min = min;
        self.slider_max = max;
        self
    }

    /// Add a constraint.
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Set the UI hint.
    pub fn with_ui_hint(mut self, ui_hint: UiHint) -> Self {
        self.ui_hint = ui_hint;
        self
    }

    /// Whether the value lies on the slider.
    pub fn in_slider_range(&self, value: f32) -> bool {
        let value = value as f64;
        value >= self.slider_min && value <= self.slider_max
    }

    /// Validate a value against finiteness and every hard constraint.
    pub fn validate(&self, value: f32) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                parameter: self.name.to_string(),
            });
        }
        for constraint in &self.constraints {
            constraint
                .validate(value as f64)
                .map_err(|reason| ValidationError::ConstraintViolation {
                    parameter: self.name.to_string(),
                    value: value as f64,
                    constraint: reason,
                })?;
        }
        Ok(())
    }
}

/// Convert snake_case name to Title Case display name.
fn name_to_display(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ordered table of parameter definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSchema {
    definitions: IndexMap<ParameterName, ParameterDefinition>,
}

impl ParameterSchema {
    /// The schema of the five editing sliders.
    pub fn standard() -> Self {
        let definitions = [
            ParameterDefinition::new(ParameterName::Saturation, 1.0)
                .with_description("Colour saturation (0 = grayscale, 1 = original)")
                .with_slider(0.0, 2.0)
                .with_constraint(Constraint::MinValue(0.0)),
            ParameterDefinition::new(ParameterName::Brightness, 0.0)
                .with_description("Brightness offset added to each channel")
                .with_slider(-1.0, 1.0),
            ParameterDefinition::new(ParameterName::BlurRadius, 0.0)
                .with_display_name("Gaussian Blur")
                .with_description("Blur standard deviation in pixels (0 = no blur)")
                .with_slider(0.0, 10.0)
                .with_constraint(Constraint::Range {
                    min: 0.0,
                    max: MAX_BLUR_RADIUS,
                }),
            ParameterDefinition::new(ParameterName::HueAngle, 0.0)
                .with_display_name("Hue")
                .with_description("Hue rotation in radians")
                .with_slider(-PI, PI)
                .with_ui_hint(UiHint::Angle),
            ParameterDefinition::new(ParameterName::SepiaIntensity, 0.0)
                .with_display_name("Sepia")
                .with_description("Blend toward sepia tones (0 = none, 1 = full)")
                .with_slider(0.0, 1.0)
                .with_constraint(Constraint::Range { min: 0.0, max: 1.0 }),
        ];

        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.name, definition))
                .collect(),
        }
    }

    /// Look up a definition.
    pub fn get(&self, name: ParameterName) -> Option<&ParameterDefinition> {
        self.definitions.get(&name)
    }

    /// Iterate definitions in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.definitions.values()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the schema is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// The parameters every slider starts at.
    pub fn defaults(&self) -> FilterParameters {
        self.iter().fold(FilterParameters::IDENTITY, |params, def| {
            params.with(def.name, def.default_value)
        })
    }
}

impl Default for ParameterSchema {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_one_value() {
        let mut params = FilterParameters::identity();
        params.set(ParameterName::SepiaIntensity, 0.25);
        params.set(ParameterName::BlurRadius, 4.0);

        assert_eq!(params.sepia_intensity, 0.25);
        assert_eq!(params.get(ParameterName::BlurRadius), 4.0);
        assert_eq!(params.saturation, 1.0);
        assert_eq!(params, FilterParameters::identity().with_sepia_intensity(0.25).with_blur_radius(4.0));
    }

    #[test]
    fn test_identity_parameters() {
        let params = FilterParameters::default();
        assert!(params.is_identity());
        assert!(!params.with_blur_radius(2.0).is_identity());
    }

    #[test]
    fn test_with_does_not_alias() {
        let original = FilterParameters::identity();
        let edited = original.with_sepia_intensity(0.5);
        assert_eq!(original.sepia_intensity, 0.0);
        assert_eq!(edited.sepia_intensity, 0.5);
    }

    #[test]
    fn test_parameter_name_parsing() {
        assert_eq!("blur".parse::<ParameterName>().unwrap(), ParameterName::BlurRadius);
        assert_eq!(
            "sepia_intensity".parse::<ParameterName>().unwrap(),
            ParameterName::SepiaIntensity
        );
        assert!(matches!(
            "gamma".parse::<ParameterName>(),
            Err(ValidationError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_schema_order_and_defaults() {
        let schema = ParameterSchema::standard();
        let names: Vec<_> = schema.iter().map(|d| d.name).collect();
        assert_eq!(names, ParameterName::all());
        assert!(schema.defaults().is_identity());
        assert_eq!(
            schema.get(ParameterName::HueAngle).unwrap().ui_hint,
            UiHint::Angle
        );
    }

    #[test]
    fn test_definition_validation() {
        let schema = ParameterSchema::standard();
        let blur = schema.get(ParameterName::BlurRadius).unwrap();
        assert!(blur.validate(3.0).is_ok());
        assert!(matches!(
            blur.validate(-1.0),
            Err(ValidationError::ConstraintViolation { .. })
        ));
        assert!(matches!(
            blur.validate(f32::NAN),
            Err(ValidationError::NotFinite { .. })
        ));

        let brightness = schema.get(ParameterName::Brightness).unwrap();
        assert!(brightness.validate(4.0).is_ok());
        assert!(!brightness.in_slider_range(4.0));
    }

    #[test]
    fn test_display_names() {
        let schema = ParameterSchema::standard();
        assert_eq!(schema.get(ParameterName::Saturation).unwrap().display_name, "Saturation");
        assert_eq!(schema.get(ParameterName::BlurRadius).unwrap().display_name, "Gaussian Blur");
    }

    #[test]
    fn test_parameters_toml_roundtrip_with_missing_fields() {
        let params: FilterParameters = toml::from_str("blur_radius = 2.5").unwrap();
        assert_eq!(params.blur_radius, 2.5);
        assert_eq!(params.saturation, 1.0);
    }
}
