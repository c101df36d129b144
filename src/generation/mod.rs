//! Batch image generation for the generated-images rating workflow.
//!
//! Prompts are rendered one at a time, in order, into `image_<n>.png` files
//! (1-based). The manifest is written only once every prompt has produced an
//! image; any backend failure aborts the batch before a manifest exists.

use std::path::PathBuf;

use image::ImageFormat;
use thiserror::Error;

use crate::rating::ImageEntry;

pub mod backend;
pub mod manifest;

pub use backend::{BackendError, HttpDiffusionBackend, ImageBackend};
pub use manifest::ManifestError;

/// Errors that abort a generation batch.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The backend failed for one prompt.
    #[error("Generation failed for prompt {index} ({prompt:?}): {source}")]
    Backend {
        /// 1-based position of the prompt.
        index: usize,
        prompt: String,
        source: BackendError,
    },
    /// The output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A generated image could not be encoded or written.
    #[error("Failed to save generated image {path}: {source}")]
    SaveImage {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// File name for the image produced by the prompt at 1-based `index`.
pub fn image_file_name(index: usize) -> String {
    format!("image_{index}.png")
}

/// Drives a backend over a prompt list and records the results.
pub struct Generator<B> {
    backend: B,
    output_dir: PathBuf,
    manifest_path: PathBuf,
}

impl<B: ImageBackend> Generator<B> {
    pub fn new(backend: B, output_dir: impl Into<PathBuf>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            output_dir: output_dir.into(),
            manifest_path: manifest_path.into(),
        }
    }

    /// Generate one image per prompt, then write the manifest.
    pub fn generate<S: AsRef<str>>(
        &mut self,
        prompts: &[S],
    ) -> Result<Vec<ImageEntry>, GenerationError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            GenerationError::CreateDir {
                path: self.output_dir.clone(),
                source,
            }
        })?;
        let mut entries = Vec::with_capacity(prompts.len());
        for (offset, prompt) in prompts.iter().enumerate() {
            let index = offset + 1;
            let prompt: &str = prompt.as_ref();
            let image = self.backend.generate(prompt).map_err(|source| {
                tracing::warn!("Generation failed on prompt {index}: {source}");
                GenerationError::Backend {
                    index,
                    prompt: prompt.to_string(),
                    source,
                }
            })?;
            let path = self.output_dir.join(image_file_name(index));
            image
                .save_with_format(&path, ImageFormat::Png)
                .map_err(|source| GenerationError::SaveImage {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!("Generated {} for {prompt:?}", path.display());
            entries.push(ImageEntry::generated(prompt, path));
        }
        manifest::write(&self.manifest_path, &entries)?;
        tracing::info!(
            "Generated {} images into {}",
            entries.len(),
            self.output_dir.display()
        );
        Ok(entries)
    }
}
