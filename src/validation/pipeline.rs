//! Validation pipeline implementation.

use crate::core::error::ValidationReport;
use crate::core::params::{FilterParameters, ParameterSchema};
use crate::validation::stages::{
    ConstraintValidation, FiniteValidation, SliderRangeValidation, ValidationStage,
};

/// Multi-stage parameter validation.
///
/// Advisory only: rendering never requires a passing report, but a failing
/// one predicts that the pipeline will fall back to the unfiltered image.
pub struct ValidationPipeline {
    stages: Vec<Box<dyn ValidationStage>>,
    schema: ParameterSchema,
}

impl ValidationPipeline {
    /// Create a new pipeline with the given stages.
    pub fn new(stages: Vec<Box<dyn ValidationStage>>) -> Self {
        Self {
            stages,
            schema: ParameterSchema::standard(),
        }
    }

    /// Create the default validation pipeline with all standard stages.
    pub fn default_pipeline() -> Self {
        Self::new(vec![
            Box::new(FiniteValidation),
            Box::new(ConstraintValidation),
            Box::new(SliderRangeValidation),
        ])
    }

    /// Create a minimal pipeline (errors only, no slider warnings).
    pub fn minimal_pipeline() -> Self {
        Self::new(vec![Box::new(FiniteValidation), Box::new(ConstraintValidation)])
    }

    /// Add a custom validation stage.
    pub fn add_stage(&mut self, stage: Box<dyn ValidationStage>) {
        self.stages.push(stage);
    }

    /// The schema values are checked against.
    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// Validate parameters through all stages.
    pub fn validate(&self, params: &FilterParameters) -> ValidationReport {
        let mut report = ValidationReport::new();

        for stage in &self.stages {
            match stage.validate(params, &self.schema) {
                Ok(warnings) => {
                    for warning in warnings {
                        report.add_warning(warning);
                    }
                }
                Err(errors) => {
                    log::debug!("{} found {} error(s)", stage.name(), errors.len());
                    for error in errors {
                        report.add_error(error);
                    }
                }
            }
        }

        report
    }

    /// Quick validation - just check if the parameters render without fallback.
    pub fn can_render(&self, params: &FilterParameters) -> bool {
        self.validate(params).can_render()
    }
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
