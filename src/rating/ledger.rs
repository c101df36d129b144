//! Append-only CSV ledger of ratings.
//!
//! Each save opens the file, appends one encoded row, and closes it again; no
//! rows are cached in memory. A ledger's column layout is fixed by the workflow
//! that writes it. The header goes in when the file is created, or when an
//! earlier first write left it empty. Non-empty files are trusted as-is: their
//! header is never re-read or checked against the layout being appended.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use super::{RatingRecord, prompt_cell};

/// Columns written for ratings of user-picked files.
pub const FILE_COLUMNS: [&str; 2] = ["Image Path", "Quality"];
/// Columns written for ratings of generated images.
pub const GENERATED_COLUMNS: [&str; 3] = ["Prompt", "Image Path", "Quality"];

/// Errors raised while appending to or reading a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger file could not be created or opened.
    #[error("Failed to open ratings ledger {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    /// The encoded row could not be written.
    #[error("Failed to write ratings ledger {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    /// An existing ledger could not be opened for reading.
    #[error("Failed to read ratings ledger {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    /// The row could not be encoded or an existing ledger could not be parsed.
    #[error("Invalid CSV in ratings ledger {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Which columns a ledger holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerLayout {
    /// `Image Path,Quality`
    Files,
    /// `Prompt,Image Path,Quality`; a record without a prompt gets an empty cell.
    Generated,
}

impl LedgerLayout {
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            LedgerLayout::Files => &FILE_COLUMNS,
            LedgerLayout::Generated => &GENERATED_COLUMNS,
        }
    }
}

/// One row read back from a ledger.
///
/// Quality stays textual: ledgers written by older builds may hold free text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LedgerRow {
    #[serde(rename = "Prompt", default, deserialize_with = "prompt_cell")]
    pub prompt: Option<String>,
    #[serde(rename = "Image Path")]
    pub image_path: String,
    #[serde(rename = "Quality")]
    pub quality: String,
}

/// Appends rating records to a single ledger path.
#[derive(Debug, Clone)]
pub struct LedgerWriter {
    path: PathBuf,
    layout: LedgerLayout,
}

impl LedgerWriter {
    pub fn new(path: impl Into<PathBuf>, layout: LedgerLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    pub fn layout(&self) -> LedgerLayout {
        self.layout
    }

    /// Append one record, writing the header first if the ledger has none yet.
    pub fn append(&self, record: &RatingRecord) -> Result<(), LedgerError> {
        append(&self.path, self.layout, record)
    }

    /// Read every data row currently in the ledger.
    pub fn read_rows(&self) -> Result<Vec<LedgerRow>, LedgerError> {
        read_rows(&self.path)
    }
}

/// How `open_for_append` found the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opened {
    /// This call created the file.
    Created,
    /// The file existed but holds nothing, not even a header.
    Empty,
    /// The file already has content.
    Existing,
}

/// Append `record` to the ledger at `path` using `layout`'s columns.
///
/// The header and row are encoded up front and written with a single
/// `write_all`, so a failed encode never touches the file. A file created by
/// this call is removed again if the write fails.
pub fn append(
    path: &Path,
    layout: LedgerLayout,
    record: &RatingRecord,
) -> Result<(), LedgerError> {
    let (mut file, opened) = open_for_append(path)?;
    let bytes = encode(record, layout, opened != Opened::Existing).map_err(|source| {
        LedgerError::Csv {
            path: path.to_path_buf(),
            source,
        }
    })?;
    if let Err(source) = file.write_all(&bytes).and_then(|_| file.flush()) {
        tracing::warn!("Ledger write to {} failed: {source}", path.display());
        if opened == Opened::Created {
            drop(file);
            if let Err(err) = fs::remove_file(path) {
                tracing::warn!("Could not remove partial ledger {}: {err}", path.display());
            }
        }
        return Err(LedgerError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    match opened {
        Opened::Created => tracing::info!("Created ratings ledger {}", path.display()),
        Opened::Empty => tracing::info!("Wrote missing header to {}", path.display()),
        Opened::Existing => {}
    }
    tracing::debug!(
        "Appended rating {} for {} to {}",
        record.quality,
        record.image_path.display(),
        path.display()
    );
    Ok(())
}

/// Read all data rows; a ledger that was never created has no rows.
pub fn read_rows(path: &Path) -> Result<Vec<LedgerRow>, LedgerError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LedgerError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file)
        .deserialize::<LedgerRow>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| LedgerError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn open_for_append(path: &Path) -> Result<(File, Opened), LedgerError> {
    let map_open = |source| LedgerError::Open {
        path: path.to_path_buf(),
        source,
    };
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => Ok((file, Opened::Created)),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            let file = OpenOptions::new().append(true).open(path).map_err(map_open)?;
            let len = file.metadata().map_err(map_open)?.len();
            let opened = if len == 0 {
                Opened::Empty
            } else {
                Opened::Existing
            };
            Ok((file, opened))
        }
        Err(err) => Err(map_open(err)),
    }
}

fn encode(
    record: &RatingRecord,
    layout: LedgerLayout,
    include_header: bool,
) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    if include_header {
        writer.write_record(layout.columns())?;
    }
    let image_path = record.image_path.to_string_lossy();
    let quality = record.quality.to_string();
    match layout {
        LedgerLayout::Generated => {
            let prompt = record.prompt.as_deref().unwrap_or("");
            writer.write_record([prompt, &*image_path, quality.as_str()])?
        }
        LedgerLayout::Files => writer.write_record([&*image_path, quality.as_str()])?,
    }
    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::{ImageEntry, Quality};
    use tempfile::tempdir;

    fn record(path: &str, prompt: Option<&str>, quality: i64) -> RatingRecord {
        let entry = match prompt {
            Some(prompt) => ImageEntry::generated(prompt, path),
            None => ImageEntry::from_path(path),
        };
        RatingRecord::for_entry(&entry, Quality::new(quality).unwrap())
    }

    fn lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn header_written_once_regardless_of_append_count() {
        for count in [0usize, 1, 5] {
            let dir = tempdir().unwrap();
            let path = dir.path().join("ratings.csv");
            let writer = LedgerWriter::new(&path, LedgerLayout::Generated);
            for i in 0..count {
                writer
                    .append(&record(&format!("img_{i}.png"), Some("a prompt"), 5))
                    .unwrap();
            }
            if count == 0 {
                assert!(!path.exists());
                assert!(writer.read_rows().unwrap().is_empty());
                continue;
            }
            let lines = lines(&path);
            assert_eq!(lines.len(), count + 1);
            assert_eq!(lines[0], "Prompt,Image Path,Quality");
            assert_eq!(
                lines.iter().filter(|l| l.starts_with("Prompt,")).count(),
                1
            );
            assert_eq!(writer.read_rows().unwrap().len(), count);
        }
    }

    #[test]
    fn appending_preserves_existing_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.csv");
        for i in 0..3 {
            append(&path, LedgerLayout::Files, &record(&format!("img_{i}.png"), None, i + 1)).unwrap();
        }
        let before = lines(&path);
        append(&path, LedgerLayout::Files, &record("img_new.png", None, 9)).unwrap();
        let after = lines(&path);
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(after.last().unwrap(), "img_new.png,9");
    }

    #[test]
    fn file_ratings_use_two_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image_quality_ratings.csv");
        append(&path, LedgerLayout::Files, &record("/tmp/cat.jpg", None, 7)).unwrap();
        assert_eq!(lines(&path), vec!["Image Path,Quality", "/tmp/cat.jpg,7"]);
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[0].prompt, None);
        assert_eq!(rows[0].quality, "7");
    }

    #[test]
    fn prompts_with_commas_and_quotes_are_escaped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.csv");
        let prompt = "A \"quiet\" lake, at dawn";
        append(&path, LedgerLayout::Generated, &record("image_1.png", Some(prompt), 4)).unwrap();
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].prompt.as_deref(), Some(prompt));
        assert_eq!(rows[0].image_path, "image_1.png");
    }

    #[test]
    fn existing_file_is_trusted_without_new_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.csv");
        std::fs::write(&path, "Image Path,Quality\nold.png,great\n").unwrap();
        append(&path, LedgerLayout::Files, &record("new.png", None, 2)).unwrap();
        assert_eq!(
            lines(&path),
            vec!["Image Path,Quality", "old.png,great", "new.png,2"]
        );
        let rows = read_rows(&path).unwrap();
        assert_eq!(rows[0].quality, "great");
    }

    #[test]
    fn missing_parent_directory_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("ratings.csv");
        let err = append(&path, LedgerLayout::Files, &record("a.png", None, 1)).unwrap_err();
        assert!(matches!(err, LedgerError::Open { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn generated_layout_keeps_three_columns_for_blank_prompts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image_ratings.csv");
        let writer = LedgerWriter::new(&path, LedgerLayout::Generated);
        writer.append(&record("image_1.png", Some(""), 6)).unwrap();
        writer.append(&record("image_2.png", None, 3)).unwrap();
        writer.append(&record("image_3.png", Some("a fox"), 8)).unwrap();

        let rows = writer.read_rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].prompt.as_deref(), Some(""));
        assert_eq!(rows[0].image_path, "image_1.png");
        assert_eq!(rows[0].quality, "6");
        assert_eq!(rows[1].prompt.as_deref(), Some(""));
        assert_eq!(rows[1].quality, "3");
        assert_eq!(rows[2].prompt.as_deref(), Some("a fox"));
    }

    #[test]
    fn files_layout_ignores_prompt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.csv");
        append(&path, LedgerLayout::Files, &record("cat.png", Some("stray"), 5)).unwrap();
        assert_eq!(lines(&path), vec!["Image Path,Quality", "cat.png,5"]);
    }

    #[test]
    fn empty_leftover_file_gets_a_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.csv");
        std::fs::write(&path, b"").unwrap();
        append(&path, LedgerLayout::Files, &record("a.png", None, 4)).unwrap();
        append(&path, LedgerLayout::Files, &record("b.png", None, 5)).unwrap();
        assert_eq!(
            lines(&path),
            vec!["Image Path,Quality", "a.png,4", "b.png,5"]
        );
        assert_eq!(read_rows(&path).unwrap().len(), 2);
    }
}
