use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::*;

/// Settings shared by both rating windows and the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    pub(super) fn normalized(mut self) -> Self {
        self.display.max_image_side = clamp_image_side(self.display.max_image_side);
        self
    }
}

/// Where ledgers, the manifest and generated images live.
///
/// Relative paths resolve against the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Ledger for ratings of user-picked files.
    #[serde(default = "default_file_ledger")]
    pub file_ledger: PathBuf,
    /// Ledger for ratings of generated images.
    #[serde(default = "default_generated_ledger")]
    pub generated_ledger: PathBuf,
    /// Manifest written by the generator and read by the rating window.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
    /// Directory receiving `image_<n>.png` files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            file_ledger: default_file_ledger(),
            generated_ledger: default_generated_ledger(),
            manifest: default_manifest(),
            output_dir: default_output_dir(),
        }
    }
}

/// Diffusion model selection and the batch of prompts to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Pretrained model identifier passed to the inference server.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Compute device the server should run the model on.
    #[serde(default = "default_device")]
    pub device: String,
    /// URL accepting generation requests.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_prompts")]
    pub prompts: Vec<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            device: default_device(),
            endpoint: default_endpoint(),
            prompts: default_prompts(),
        }
    }
}

/// Window and image box sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Side of the square box images are scaled into.
    #[serde(default = "default_max_image_side")]
    pub max_image_side: u32,
    #[serde(default = "default_window_side")]
    pub window_width: f32,
    #[serde(default = "default_window_side")]
    pub window_height: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_image_side: default_max_image_side(),
            window_width: default_window_side(),
            window_height: default_window_side(),
        }
    }
}

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}
