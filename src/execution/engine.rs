//! Filter pipeline implementation.
//!
//! The pipeline runs the four stages in their fixed order, each consuming the
//! previous stage's output, and falls back to the untouched input when any
//! stage declines.

use crate::core::error::RenderError;
use crate::core::params::FilterParameters;
use crate::core::stage::{IntoStages, Stage};
use crate::core::types::{RenderedImage, ScaledImage};
use std::borrow::Cow;
use std::time::{Duration, Instant};

/// Timing of a single stage.
#[derive(Debug, Clone)]
pub struct StageTiming {
    /// Stage identifier.
    pub stage_id: String,
    /// Time spent in the stage.
    pub duration: Duration,
    /// Whether the stage was skipped as a passthrough.
    pub skipped: bool,
}

/// Render statistics.
#[derive(Debug, Clone, Default)]
pub struct RenderStats {
    /// Total render time.
    pub total_duration: Duration,
    /// Per-stage timings, in pipeline order, up to the first failure.
    pub stages: Vec<StageTiming>,
    /// The stage failure that triggered the identity fallback, if any.
    pub fallback: Option<RenderError>,
}

impl RenderStats {
    /// Whether the output is the untouched input because a stage declined.
    pub fn fell_back(&self) -> bool {
        self.fallback.is_some()
    }

    /// Number of stages that actually ran.
    pub fn stages_applied(&self) -> usize {
        self.stages.iter().filter(|s| !s.skipped).count()
    }
}

/// Result of a render with statistics.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    /// The rendered image.
    pub image: RenderedImage,
    /// Render statistics.
    pub stats: RenderStats,
}

/// The filter pipeline.
///
/// Stateless: every render is a pure function of its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterPipeline;

impl FilterPipeline {
    /// Create a new pipeline.
    pub fn new() -> Self {
        Self
    }

    /// Render `image` under `params`.
    ///
    /// Never fails: if any stage declines, the result is exactly `image`.
    pub fn render(&self, image: &ScaledImage, params: &FilterParameters) -> RenderedImage {
        self.render_with_stats(image, params).image
    }

    /// Render and report per-stage timings.
    pub fn render_with_stats(&self, image: &ScaledImage, params: &FilterParameters) -> RenderOutput {
        log::debug!(
            "Rendering {} with blur={} hue={} brightness={} saturation={} sepia={}",
            image.dimensions(),
            params.blur_radius,
            params.hue_angle,
            params.brightness,
            params.saturation,
            params.sepia_intensity
        );
        self.run_stages(image, &params.stages())
    }

    /// Run an explicit stage list over `image`.
    pub(crate) fn run_stages(&self, image: &ScaledImage, stages: &[Box<dyn Stage>]) -> RenderOutput {
        let start = Instant::now();
        let mut stats = RenderStats::default();
        let mut current = Cow::Borrowed(image.pixels());

        for stage in stages {
            let stage_id = stage.metadata().id;

            if stage.is_passthrough() {
                stats.stages.push(StageTiming {
                    stage_id,
                    duration: Duration::ZERO,
                    skipped: true,
                });
                continue;
            }

            let stage_start = Instant::now();
            match stage.apply(&current) {
                Ok(output) => {
                    let duration = stage_start.elapsed();
                    log::debug!("Stage '{}' finished in {:?}", stage_id, duration);
                    stats.stages.push(StageTiming {
                        stage_id,
                        duration,
                        skipped: false,
                    });
                    current = Cow::Owned(output);
                }
                Err(error) => {
                    log::warn!("{}; showing the unfiltered image", error);
                    stats.fallback = Some(error);
                    stats.total_duration = start.elapsed();
                    return RenderOutput {
                        image: RenderedImage::from_pixels(image.pixels().clone()),
                        stats,
                    };
                }
            }
        }

        stats.total_duration = start.elapsed();
        RenderOutput {
            image: RenderedImage::from_pixels(current.into_owned()),
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::RenderResult;
    use crate::core::stage::{Category, StageMetadata};
    use crate::core::types::{SourceImage, Viewport};
    use crate::filters::{scale, standard_stages, ScalingOptions};
    use image::{Rgba, RgbaImage};
    use proptest::prelude::*;

    /// A stage that always refuses to produce output.
    struct Declining;

    impl Stage for Declining {
        fn metadata(&self) -> StageMetadata {
            StageMetadata::builder("declining", "Declining")
                .category(Category::Stylize)
                .build()
        }

        fn apply(&self, _input: &RgbaImage) -> RenderResult<RgbaImage> {
            Err(RenderError::declined("declining", "forced failure"))
        }
    }

    fn scaled(width: u32, height: u32) -> ScaledImage {
        let source = SourceImage::from_rgba(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 11 % 256) as u8, ((x + y) % 256) as u8, 255])
        }));
        let viewport = Viewport::new(width as f64, height as f64, 1.0);
        scale(&source, &viewport, &ScalingOptions::default()).unwrap()
    }

    fn busy_params() -> FilterParameters {
        FilterParameters {
            blur_radius: 1.5,
            hue_angle: 0.8,
            brightness: 0.1,
            saturation: 1.4,
            sepia_intensity: 0.3,
        }
    }

    #[test]
    fn test_identity_render_is_bit_identical() {
        let image = scaled(400, 300);
        let pipeline = FilterPipeline::new();
        let output = pipeline.render_with_stats(&image, &FilterParameters::identity());

        assert!(output.image.is_identical_to(&image));
        assert_eq!(output.stats.stages.len(), 4);
        assert_eq!(output.stats.stages_applied(), 0);
        assert!(!output.stats.fell_back());
    }

    #[test]
    fn test_render_is_idempotent() {
        let image = scaled(48, 32);
        let pipeline = FilterPipeline::new();
        let first = pipeline.render(&image, &busy_params());
        let second = pipeline.render(&image, &busy_params());

        assert_eq!(first, second);
        assert!(!first.is_identical_to(&image));
    }

    #[test]
    fn test_blur_round_trip_restores_original() {
        let image = scaled(40, 30);
        let pipeline = FilterPipeline::new();
        let blurred = pipeline.render(&image, &FilterParameters::identity().with_blur_radius(5.0));
        assert!(!blurred.is_identical_to(&image));

        let restored = pipeline.render(&image, &FilterParameters::identity().with_blur_radius(0.0));
        assert!(restored.is_identical_to(&image));
    }

    #[test]
    fn test_any_failing_stage_yields_original() {
        let image = scaled(32, 24);
        let pipeline = FilterPipeline::new();

        for position in 0..4 {
            let mut stages = standard_stages(&busy_params());
            stages[position] = Box::new(Declining);

            let output = pipeline.run_stages(&image, &stages);
            assert!(
                output.image.is_identical_to(&image),
                "failure at stage {} leaked a partial render",
                position
            );
            assert!(output.stats.fell_back());
            assert_eq!(output.stats.stages.len(), position);
        }
    }

    #[test]
    fn test_invalid_parameter_falls_back() {
        let image = scaled(16, 16);
        let pipeline = FilterPipeline::new();
        let params = busy_params().with_sepia_intensity(4.0);

        let output = pipeline.render_with_stats(&image, &params);
        assert!(output.image.is_identical_to(&image));
        assert!(matches!(
            output.stats.fallback,
            Some(RenderError::StageDeclined { ref stage, .. }) if stage == "sepia_tone"
        ));
    }

    #[test]
    fn test_stage_order_is_fixed() {
        let image = scaled(8, 8);
        let output = FilterPipeline::new().render_with_stats(&image, &busy_params());
        let ids: Vec<_> = output.stats.stages.iter().map(|s| s.stage_id.as_str()).collect();
        assert_eq!(ids, ["color_controls", "gaussian_blur", "hue_adjust", "sepia_tone"]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_render_is_deterministic(
            width in 1u32..24,
            height in 1u32..24,
            blur in 0.0f32..4.0,
            hue in -3.2f32..3.2,
            brightness in -1.0f32..1.0,
            saturation in 0.0f32..2.0,
            sepia in 0.0f32..1.0,
        ) {
            let image = scaled(width, height);
            let params = FilterParameters {
                blur_radius: blur,
                hue_angle: hue,
                brightness,
                saturation,
                sepia_intensity: sepia,
            };
            let pipeline = FilterPipeline::new();
            let first = pipeline.render(&image, &params);
            let second = pipeline.render(&image, &params);
            prop_assert_eq!(first.dimensions(), image.dimensions());
            prop_assert_eq!(first, second);
        }
    }
}
