//! Post submission.

use crate::core::error::{MissingField, PhotoPostResult, SubmissionError};
use crate::core::types::RenderedImage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Post-submission collaborator.
///
/// Receives the final image exactly as displayed; persistence and upload are
/// its business.
pub trait PostSubmitter {
    /// Create an image post.
    fn create_image_post(
        &mut self,
        title: &str,
        image: &RenderedImage,
        aspect_ratio: f64,
    ) -> Result<(), SubmissionError>;
}

/// Check that a post has both a title and an image.
///
/// A title made only of whitespace counts as missing. Returns the image to post.
pub fn validate_post<'a>(
    title: &str,
    image: Option<&'a RenderedImage>,
) -> Result<&'a RenderedImage, SubmissionError> {
    let mut missing = Vec::new();
    if title.trim().is_empty() {
        missing.push(MissingField::Title);
    }
    if image.is_none() {
        missing.push(MissingField::Image);
    }

    match image {
        Some(image) if missing.is_empty() => Ok(image),
        _ => Err(SubmissionError::ValidationFailed { missing }),
    }
}

/// Manifest written next to each post image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostManifest {
    pub title: String,
    pub image_file: String,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
}

/// Submitter that stores posts as PNG + JSON manifest in a directory.
#[derive(Debug, Clone)]
pub struct DirectorySubmitter {
    root: PathBuf,
}

impl DirectorySubmitter {
    /// Store posts under `root`, creating it on first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory posts are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pick a file stem from the title that is not taken yet.
    fn free_stem(&self, title: &str) -> String {
        let slug: String = title
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect::<String>()
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        let slug = if slug.is_empty() { "post".to_string() } else { slug };

        let mut stem = slug.clone();
        let mut n = 1;
        while self.is_taken(&stem) {
            n += 1;
            stem = format!("{}-{}", slug, n);
        }
        stem
    }

    fn is_taken(&self, stem: &str) -> bool {
        ["json", "png"]
            .iter()
            .any(|ext| self.root.join(format!("{}.{}", stem, ext)).exists())
    }

    fn write(&self, title: &str, image: &RenderedImage, aspect_ratio: f64) -> PhotoPostResult<PathBuf> {
        fs::create_dir_all(&self.root)?;
        let stem = self.free_stem(title);
        let image_file = format!("{}.png", stem);
        image.pixels().save(self.root.join(&image_file))?;

        let dims = image.dimensions();
        let manifest = PostManifest {
            title: title.to_string(),
            image_file,
            width: dims.width,
            height: dims.height,
            aspect_ratio,
        };
        let manifest_path = self.root.join(format!("{}.json", stem));
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(manifest_path)
    }
}

impl PostSubmitter for DirectorySubmitter {
    fn create_image_post(
        &mut self,
        title: &str,
        image: &RenderedImage,
        aspect_ratio: f64,
    ) -> Result<(), SubmissionError> {
        let path = self
            .write(title, image, aspect_ratio)
            .map_err(|e| SubmissionError::Rejected(e.to_string()))?;
        log::info!("Post '{}' written to {}", title, path.display());
        Ok(())
    }
}
