//! The editing session.
//!
//! The session is the only place state lives between renders. Every event
//! method recomputes what depends on it by explicit composition:
//! `scale(source, viewport)` then `render(scaled, params)`, and pushes the
//! result to the display.

use crate::config::EditorConfig;
use crate::core::error::{AccessError, SubmissionError};
use crate::core::params::{FilterParameters, ParameterName};
use crate::core::types::{RenderedImage, ScaledImage, SourceImage, Viewport};
use crate::editor::access::{acquire_image, PhotoLibrary};
use crate::editor::post::{validate_post, PostSubmitter};
use crate::execution::FilterPipeline;
use crate::filters::ScalingOptions;

/// Display collaborator.
pub trait DisplaySink {
    /// Show a freshly rendered image laid out at `aspect_ratio` (height / width).
    fn show(&mut self, image: &RenderedImage, aspect_ratio: f64);

    /// Show nothing.
    fn clear(&mut self);
}

/// Outcome of [`EditingSession::choose_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooseOutcome {
    /// A new source image was selected and rendered.
    Selected,
    /// The user closed the picker without choosing.
    Cancelled,
}

/// State of one image-post editing screen.
pub struct EditingSession {
    pipeline: FilterPipeline,
    scaling: ScalingOptions,
    viewport: Viewport,
    params: FilterParameters,
    source: Option<SourceImage>,
    scaled: Option<ScaledImage>,
    rendered: Option<RenderedImage>,
    display: Option<Box<dyn DisplaySink>>,
}

impl EditingSession {
    /// Create an empty session.
    pub fn new(viewport: Viewport, scaling: ScalingOptions) -> Self {
        Self {
            pipeline: FilterPipeline::new(),
            scaling,
            viewport,
            params: FilterParameters::identity(),
            source: None,
            scaled: None,
            rendered: None,
            display: None,
        }
    }

    /// Create an empty session from configuration.
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut session = Self::new(config.viewport, config.scaling);
        session.params = config.defaults;
        session
    }

    /// Attach a display that receives every render.
    pub fn with_display(mut self, display: Box<dyn DisplaySink>) -> Self {
        self.display = Some(display);
        self
    }

    /// Current filter parameters.
    pub fn parameters(&self) -> &FilterParameters {
        &self.params
    }

    /// Current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The selected source image, if any.
    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// The pipeline input, if any.
    pub fn scaled(&self) -> Option<&ScaledImage> {
        self.scaled.as_ref()
    }

    /// The image currently displayed, if any.
    pub fn rendered(&self) -> Option<&RenderedImage> {
        self.rendered.as_ref()
    }

    /// Aspect ratio of the displayed image.
    pub fn aspect_ratio(&self) -> Option<f64> {
        self.rendered.as_ref().map(RenderedImage::aspect_ratio)
    }

    /// Replace the source image.
    pub fn select_image(&mut self, image: SourceImage) {
        log::info!("Selected image {}", image.dimensions());
        self.source = Some(image);
        self.rescale();
    }

    /// Decode and select an encoded image.
    ///
    /// An undecodable image is not an error for the user: the failure is
    /// logged and the session keeps showing what it showed before. Returns
    /// whether the image was selected.
    pub fn select_encoded(&mut self, bytes: &[u8]) -> bool {
        match SourceImage::decode(bytes) {
            Ok(image) => {
                self.select_image(image);
                true
            }
            Err(error) => {
                log::warn!("Ignoring picked image: {}", error);
                false
            }
        }
    }

    /// Drop the source image; the display is cleared.
    pub fn clear_image(&mut self) {
        self.source = None;
        self.rescale();
    }

    /// Change the viewport; the source is rescaled.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.rescale();
    }

    /// Replace all filter parameters.
    pub fn set_parameters(&mut self, params: FilterParameters) {
        self.params = params;
        self.rerender();
    }

    /// Change one slider.
    pub fn update_parameter(&mut self, name: ParameterName, value: f32) {
        self.params.set(name, value);
        self.rerender();
    }

    /// Pick a new image through the photo library.
    ///
    /// Access failures are terminal for this attempt; the caller shows
    /// [`AccessError::notice_message`] to the user.
    pub fn choose_image(&mut self, library: &mut dyn PhotoLibrary) -> Result<ChooseOutcome, AccessError> {
        match acquire_image(library) {
            Ok(Some(image)) => {
                self.select_image(image);
                Ok(ChooseOutcome::Selected)
            }
            Ok(None) => Ok(ChooseOutcome::Cancelled),
            Err(error) => {
                log::warn!("Cannot pick an image: {}", error);
                Err(error)
            }
        }
    }

    /// Submit the displayed image as a post titled `title`.
    ///
    /// The submitter is only called when both a title and an image exist.
    pub fn submit(&self, title: &str, submitter: &mut dyn PostSubmitter) -> Result<(), SubmissionError> {
        let image = validate_post(title, self.rendered.as_ref())?;
        submitter.create_image_post(title.trim(), image, image.aspect_ratio())
    }

    fn rescale(&mut self) {
        self.scaled = match &self.source {
            Some(source) => match ScaledImage::from_source(source, &self.viewport, &self.scaling) {
                Ok(scaled) => Some(scaled),
                Err(error) => {
                    log::warn!("Cannot scale image for display: {}", error);
                    None
                }
            },
            None => None,
        };
        self.rerender();
    }

    fn rerender(&mut self) {
        self.rendered = self
            .scaled
            .as_ref()
            .map(|scaled| self.pipeline.render(scaled, &self.params));

        if let Some(display) = self.display.as_mut() {
            match &self.rendered {
                Some(image) => display.show(image, image.aspect_ratio()),
                None => display.clear(),
            }
        }
    }
}
