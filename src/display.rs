//! Decode an entry's image and scale it into the display box.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use thiserror::Error;

/// Errors raised while preparing an image for display.
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Failed to open image {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// RGBA pixels already scaled to fit the display box.
#[derive(Clone, Debug)]
pub struct DisplayImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DisplayImage {
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// Largest size that fits `width`x`height` inside a `max_side` square, keeping aspect ratio.
///
/// Small images are scaled up as well as large ones down. Neither side drops below 1.
pub fn fit_within(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_side == 0 {
        return (0, 0);
    }
    let scale = (max_side as f64 / width as f64).min(max_side as f64 / height as f64);
    let fitted = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_side);
    (fitted(width), fitted(height))
}

/// Load `path` and scale it for a `max_side` box.
pub fn load(path: &Path, max_side: u32) -> Result<DisplayImage, DisplayError> {
    let reader = image::ImageReader::open(path).map_err(|source| DisplayError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = reader.with_guessed_format().map_err(|source| DisplayError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = reader.decode().map_err(|source| DisplayError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let (width, height) = fit_within(decoded.width(), decoded.height(), max_side);
    let scaled = if (width, height) == (decoded.width(), decoded.height()) {
        decoded.to_rgba8()
    } else {
        decoded.resize_exact(width, height, FilterType::Triangle).to_rgba8()
    };
    Ok(DisplayImage {
        path: path.to_path_buf(),
        width: scaled.width(),
        height: scaled.height(),
        rgba: scaled.into_raw(),
    })
}
