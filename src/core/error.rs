//! Error types for photopost.
//!
//! Uses thiserror for structured errors with context. Errors are designed to:
//! - Separate user-visible failures (access, submission) from internal ones
//! - Carry enough context to produce a user-facing notice
//! - Convert into the top-level [`PhotoPostError`] with `?`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Top-level error type for photopost.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum PhotoPostError {
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures while acquiring an image from the photo library.
///
/// All of these are terminal for the current attempt and shown to the user
/// as a blocking notice; no retry path is offered.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessError {
    #[error("The photo library is unavailable")]
    ImageUnavailable,

    #[error("Access to the photo library was denied")]
    PermissionDenied,

    #[error("Access to the photo library is restricted on this device")]
    PermissionRestricted,
}

impl AccessError {
    /// Title of the notice shown for this error.
    pub fn notice_title(&self) -> &'static str {
        "Error"
    }

    /// Body of the notice shown for this error.
    pub fn notice_message(&self) -> &'static str {
        match self {
            AccessError::ImageUnavailable => "The photo library is unavailable",
            AccessError::PermissionDenied => {
                "In order to access the photo library, you must allow this application access to it."
            }
            AccessError::PermissionRestricted => {
                "Unable to access the photo library. Your device's restrictions do not allow access."
            }
        }
    }
}

/// Errors produced while preparing or rendering an image.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The source image bytes could not be decoded.
    #[error("Render failed: {reason}")]
    RenderFailed { reason: String },

    /// The viewport has no pixel area to scale into.
    #[error("Viewport {width}x{height} has no pixel area")]
    EmptyViewport { width: u32, height: u32 },

    /// The viewport is larger than images are ever scaled to.
    #[error("Viewport {width}x{height} exceeds {max} pixels per side")]
    ViewportTooLarge { width: u32, height: u32, max: u32 },

    /// A stage refused to produce output for its parameters.
    #[error("Stage '{stage}' declined: {reason}")]
    StageDeclined { stage: String, reason: String },
}

impl RenderError {
    /// Build a [`RenderError::StageDeclined`] for the given stage.
    pub fn declined(stage: &str, reason: impl Into<String>) -> Self {
        RenderError::StageDeclined {
            stage: stage.to_string(),
            reason: reason.into(),
        }
    }
}

/// A field that must be present before a post can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingField {
    Title,
    Image,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::Title => write!(f, "title"),
            MissingField::Image => write!(f, "image"),
        }
    }
}

/// Errors from submitting a post.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    /// The post is incomplete. Recoverable: the user can fix it and retry.
    #[error("Make sure that you add a photo and a caption before posting (missing: {})", join_fields(.missing))]
    ValidationFailed { missing: Vec<MissingField> },

    /// The submission collaborator refused the post.
    #[error("Post was rejected: {0}")]
    Rejected(String),
}

impl SubmissionError {
    /// Check if the user can correct the input and try again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SubmissionError::ValidationFailed { .. })
    }
}

fn join_fields(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from validating filter parameters.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' is not a finite number")]
    NotFinite { parameter: String },

    #[error("Parameter '{parameter}' = {value} violates constraint: {constraint}")]
    ConstraintViolation {
        parameter: String,
        value: f64,
        constraint: String,
    },

    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),
}

impl ValidationError {
    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            ValidationError::NotFinite { parameter } => {
                Some(format!("Set '{}' to a finite number", parameter))
            }
            ValidationError::ConstraintViolation {
                parameter,
                constraint,
                ..
            } => Some(format!("Adjust '{}': {}", parameter, constraint)),
            ValidationError::UnknownParameter(_) => Some(
                "Use one of: blur_radius, hue_angle, brightness, saturation, sepia_intensity"
                    .to_string(),
            ),
        }
    }

    /// Name of the parameter this error refers to.
    pub fn parameter(&self) -> &str {
        match self {
            ValidationError::NotFinite { parameter }
            | ValidationError::ConstraintViolation { parameter, .. } => parameter,
            ValidationError::UnknownParameter(name) => name,
        }
    }
}

/// Errors from loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Result type alias for photopost operations.
pub type PhotoPostResult<T> = Result<T, PhotoPostError>;

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

// ============================================================================
// Validation Report
// ============================================================================

/// Comprehensive validation report for a set of filter parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether validation passed without errors.
    pub success: bool,
    /// List of errors found.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<ValidationWarning>,
}

/// Non-fatal validation warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Warning message.
    pub message: String,
    /// Parameter that triggered the warning, if applicable.
    pub parameter: Option<String>,
    /// Suggestion for addressing the warning.
    pub suggestion: Option<String>,
}

impl ValidationReport {
    /// Create a new empty report (success).
    pub fn new() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.success = false;
        self.errors.push(error);
    }

    /// Add a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Check if the parameters render without falling back to identity.
    pub fn can_render(&self) -> bool {
        self.success
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        if self.success {
            if self.warnings.is_empty() {
                "✓ Parameters are valid".to_string()
            } else {
                format!("✓ Parameters are valid with {} warning(s)", self.warnings.len())
            }
        } else {
            format!(
                "✗ Validation failed with {} error(s); the original image will be shown",
                self.errors.len()
            )
        }
    }

    /// Get detailed error messages with suggestions.
    pub fn detailed_errors(&self) -> Vec<String> {
        self.errors
            .iter()
            .enumerate()
            .map(|(i, error)| {
                let mut msg = format!("{}. {}", i + 1, error);
                if let Some(fix) = error.suggested_fix() {
                    msg.push_str(&format!("\n   → Suggestion: {}", fix));
                }
                msg
            })
            .collect()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_notice_messages() {
        assert!(AccessError::PermissionDenied
            .notice_message()
            .contains("allow this application"));
        assert!(AccessError::PermissionRestricted
            .notice_message()
            .contains("restrictions"));
        assert_eq!(AccessError::ImageUnavailable.notice_title(), "Error");
    }

    #[test]
    fn test_submission_error_lists_missing_fields() {
        let error = SubmissionError::ValidationFailed {
            missing: vec![MissingField::Title, MissingField::Image],
        };
        let message = error.to_string();
        assert!(message.contains("title, image"));
        assert!(error.is_recoverable());
        assert!(!SubmissionError::Rejected("offline".into()).is_recoverable());
    }

    #[test]
    fn test_validation_error_suggestions() {
        let error = ValidationError::NotFinite {
            parameter: "blur_radius".to_string(),
        };
        assert!(error.suggested_fix().unwrap().contains("blur_radius"));
        assert_eq!(error.parameter(), "blur_radius");
    }

    #[test]
    fn test_validation_report() {
        let mut report = ValidationReport::new();
        assert!(report.can_render());

        report.add_error(ValidationError::UnknownParameter("gamma".into()));
        assert!(!report.can_render());
        assert_eq!(report.errors.len(), 1);
        assert!(report.detailed_errors()[0].contains("Suggestion"));
    }

    #[test]
    fn test_errors_convert_to_top_level() {
        fn fails() -> PhotoPostResult<()> {
            Err(AccessError::PermissionDenied)?
        }
        assert!(matches!(
            fails(),
            Err(PhotoPostError::Access(AccessError::PermissionDenied))
        ));
    }
}
