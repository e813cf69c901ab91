//! Individual validation stages.
//!
//! Each stage checks for a specific category of problem.

use crate::core::error::{ValidationError, ValidationWarning};
use crate::core::params::{FilterParameters, ParameterSchema};

/// Trait for validation stages.
pub trait ValidationStage: Send + Sync {
    /// Name of this validation stage.
    fn name(&self) -> &str;

    /// Validate the parameters against the schema.
    ///
    /// Returns Ok with warnings, or Err with errors.
    fn validate(
        &self,
        params: &FilterParameters,
        schema: &ParameterSchema,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>>;
}

/// Finiteness validation - NaN and infinities make every stage decline.
pub struct FiniteValidation;

impl ValidationStage for FiniteValidation {
    fn name(&self) -> &str {
        "Finite Validation"
    }

    fn validate(
        &self,
        params: &FilterParameters,
        _schema: &ParameterSchema,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        let errors: Vec<_> = params
            .iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, _)| ValidationError::NotFinite {
                parameter: name.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(Vec::new())
        } else {
            Err(errors)
        }
    }
}

/// Constraint validation - checks hard limits from the schema.
///
/// Non-finite values are left to [`FiniteValidation`].
pub struct ConstraintValidation;

impl ValidationStage for ConstraintValidation {
    fn name(&self) -> &str {
        "Constraint Validation"
    }

    fn validate(
        &self,
        params: &FilterParameters,
        schema: &ParameterSchema,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        let mut errors = Vec::new();

        for definition in schema.iter() {
            let value = params.get(definition.name);
            if !value.is_finite() {
                continue;
            }
            if let Err(error) = definition.validate(value) {
                errors.push(error);
            }
        }

        if errors.is_empty() {
            Ok(Vec::new())
        } else {
            Err(errors)
        }
    }
}

/// Slider range validation - values off the slider are legal but unusual.
pub struct SliderRangeValidation;

impl ValidationStage for SliderRangeValidation {
    fn name(&self) -> &str {
        "Slider Range Validation"
    }

    fn validate(
        &self,
        params: &FilterParameters,
        schema: &ParameterSchema,
    ) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        let warnings = schema
            .iter()
            .filter_map(|definition| {
                let value = params.get(definition.name);
                if !value.is_finite() || definition.in_slider_range(value) {
                    return None;
                }
                Some(ValidationWarning {
                    message: format!(
                        "{} = {} is outside the slider range [{}, {}]",
                        definition.display_name, value, definition.slider_min, definition.slider_max
                    ),
                    parameter: Some(definition.name.to_string()),
                    suggestion: Some(format!(
                        "Values outside [{}, {}] may produce extreme results",
                        definition.slider_min, definition.slider_max
                    )),
                })
            })
            .collect();

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_validation() {
        let schema = ParameterSchema::standard();
        let params = FilterParameters::identity()
            .with_hue_angle(f32::NAN)
            .with_brightness(f32::INFINITY);

        let errors = FiniteValidation.validate(&params, &schema).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(FiniteValidation
            .validate(&FilterParameters::identity(), &schema)
            .is_ok());
    }

    #[test]
    fn test_constraint_validation() {
        let schema = ParameterSchema::standard();
        let params = FilterParameters::identity()
            .with_blur_radius(-2.0)
            .with_saturation(-0.1)
            .with_sepia_intensity(f32::NAN);

        let errors = ConstraintValidation.validate(&params, &schema).unwrap_err();
        let names: Vec<_> = errors.iter().map(|e| e.parameter()).collect();
        assert_eq!(names, ["saturation", "blur_radius"]);
    }

    #[test]
    fn test_slider_range_warnings() {
        let schema = ParameterSchema::standard();
        let params = FilterParameters::identity().with_brightness(1.5).with_blur_radius(20.0);

        let warnings = SliderRangeValidation.validate(&params, &schema).unwrap();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].parameter.as_deref(), Some("brightness"));
    }
}
