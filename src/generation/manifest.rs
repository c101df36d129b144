//! Manifest CSV mapping each generated image to its prompt.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::rating::ImageEntry;

/// Errors raised while reading or writing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest (or its temporary sibling) could not be created.
    #[error("Failed to write manifest {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    /// The finished manifest could not be moved into place.
    #[error("Failed to replace manifest {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
    /// The manifest could not be opened.
    #[error("Failed to read manifest {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    /// A row could not be encoded or decoded.
    #[error("Invalid manifest {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Write every entry to `path` in one step.
///
/// Rows go to a temporary file beside the manifest which then replaces it, so
/// readers never observe a half-written manifest.
pub fn write(path: &Path, entries: &[ImageEntry]) -> Result<(), ManifestError> {
    let dir = parent_dir(path);
    let temp = NamedTempFile::new_in(dir).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let map_csv = |source| ManifestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(temp);
    for entry in entries {
        writer.serialize(entry).map_err(map_csv)?;
    }
    let temp = writer.into_inner().map_err(|err| ManifestError::Write {
        path: path.to_path_buf(),
        source: err.into_error(),
    })?;
    temp.persist(path).map_err(|err| ManifestError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    tracing::info!("Wrote manifest {} with {} rows", path.display(), entries.len());
    Ok(())
}

/// Read the whole manifest into memory.
pub fn read(path: &Path) -> Result<Vec<ImageEntry>, ManifestError> {
    let file = File::open(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);
    reader
        .deserialize::<ImageEntry>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| ManifestError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
