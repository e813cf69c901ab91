//! Editor configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! [viewport]
//! width = 375.0
//! height = 375.0
//! scale = 2.0
//!
//! [scaling]
//! filter = "lanczos3"
//! mode = "stretch"
//!
//! [defaults]
//! blur_radius = 0.0
//! ```
//!
//! Every section and key is optional.

use crate::core::error::ConfigError;
use crate::core::params::FilterParameters;
use crate::core::types::{Viewport, MAX_VIEWPORT_SIDE};
use crate::filters::ScalingOptions;
use crate::validation::ValidationPipeline;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration of an editing session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Display area images are scaled to.
    pub viewport: Viewport,
    /// How images are scaled.
    pub scaling: ScalingOptions,
    /// Slider values of a fresh session.
    pub defaults: FilterParameters,
}

impl EditorConfig {
    /// Read, parse and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
            ("viewport.scale", self.viewport.scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, format!("must be a positive number, got {}", value)));
            }
        }

        let pixels = self.viewport.pixel_size();
        if pixels.width > MAX_VIEWPORT_SIDE || pixels.height > MAX_VIEWPORT_SIDE {
            return Err(invalid(
                "viewport",
                format!("{} pixels exceeds {} per side", pixels, MAX_VIEWPORT_SIDE),
            ));
        }

        let report = ValidationPipeline::minimal_pipeline().validate(&self.defaults);
        if let Some(error) = report.errors.first() {
            return Err(invalid(&format!("defaults.{}", error.parameter()), error.to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ScaleFilter, ScaleMode};
    use std::io::Write;

    #[test]
    fn test_empty_document_is_default() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert!(config.defaults.is_identity());
    }

    #[test]
    fn test_partial_sections() {
        let config = EditorConfig::from_toml_str(
            r#"
            [viewport]
            width = 320.0

            [scaling]
            filter = "triangle"
            mode = "fit"

            [defaults]
            sepia_intensity = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.viewport.width, 320.0);
        assert_eq!(config.viewport.scale, Viewport::default().scale);
        assert_eq!(config.scaling.filter, ScaleFilter::Triangle);
        assert_eq!(config.scaling.mode, ScaleMode::Fit);
        assert_eq!(config.defaults.sepia_intensity, 0.5);
        assert_eq!(config.defaults.saturation, 1.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EditorConfig::from_toml_str("[viewport]\nscale = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "viewport.scale"));

        let err = EditorConfig::from_toml_str("[defaults]\nsepia_intensity = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "defaults.sepia_intensity"));

        let err = EditorConfig::from_toml_str("[viewport]\nwidth = 100000.0\nheight = 100000.0")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "viewport"));

        let err = EditorConfig::from_toml_str("[viewport\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_to_toml_reloads() {
        let mut config = EditorConfig::default();
        config.defaults = config.defaults.with_blur_radius(2.5);
        let text = config.to_toml().unwrap();
        assert_eq!(EditorConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\nhue_angle = 1.0").unwrap();
        let config = EditorConfig::load_from(file.path()).unwrap();
        assert_eq!(config.defaults.hue_angle, 1.0);

        let missing = EditorConfig::load_from(Path::new("/nonexistent/photopost.toml"));
        assert!(matches!(missing, Err(ConfigError::Read(_))));
    }
}
