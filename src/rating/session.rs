//! Command interface for a rating session.
//!
//! The UI calls `on_load`, `on_save` and `on_next` and renders the returned
//! outcome or error. A refused command leaves the navigator and ledger as they
//! were.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{
    ImageEntry, LedgerError, LedgerWriter, Navigator, RatingRecord, SessionMode, ValidationError,
    validate,
};
use crate::generation::manifest::{self, ManifestError};

/// Result of a command that was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// New entries replaced the session; the first is now current.
    Loaded { count: usize },
    /// The load produced no entries, so the previous session was kept.
    NothingLoaded,
    /// A rating was appended to the ledger.
    Saved(RatingRecord),
    /// The cursor moved to the entry at `position`.
    Advanced { position: usize },
    /// The cursor moved past the last generated image.
    Exhausted,
    /// There is no current image to act on.
    NoImage,
}

/// Why a command was refused.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// One rating workflow: a navigator over entries plus the ledger it writes to.
#[derive(Debug, Clone)]
pub struct RatingSession {
    mode: SessionMode,
    navigator: Navigator,
    ledger: LedgerWriter,
}

impl RatingSession {
    pub fn new(mode: SessionMode, ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            navigator: Navigator::new(mode.navigation_policy()),
            ledger: LedgerWriter::new(ledger_path, mode.ledger_layout()),
        }
    }

    /// Replace the entries being rated.
    pub fn on_load(&mut self, entries: Vec<ImageEntry>) -> Result<CommandOutcome, CommandError> {
        let count = entries.len();
        if !self.navigator.load(entries) {
            return Ok(CommandOutcome::NothingLoaded);
        }
        tracing::info!("Loaded {count} images for rating");
        Ok(CommandOutcome::Loaded { count })
    }

    /// Load the entries listed in a generated-images manifest.
    pub fn on_load_manifest(&mut self, path: &Path) -> Result<CommandOutcome, CommandError> {
        let entries = manifest::read(path)?;
        self.on_load(entries)
    }

    /// Validate `raw_quality` and append a rating for the current image.
    pub fn on_save(&mut self, raw_quality: &str) -> Result<CommandOutcome, CommandError> {
        let quality = self.check(raw_quality)?;
        let Some(entry) = self.navigator.current() else {
            return Ok(CommandOutcome::NoImage);
        };
        let record = RatingRecord::for_entry(entry, quality);
        self.ledger.append(&record)?;
        Ok(CommandOutcome::Saved(record))
    }

    /// Move to the next image, validating the rating first when the mode requires it.
    pub fn on_next(&mut self, raw_quality: &str) -> Result<CommandOutcome, CommandError> {
        if self.mode.gates_advance() {
            self.check(raw_quality)?;
        }
        if self.navigator.current().is_none() {
            return Ok(CommandOutcome::NoImage);
        }
        self.navigator.advance();
        if self.navigator.current().is_none() {
            tracing::info!("Reached the end of {} images", self.navigator.len());
            return Ok(CommandOutcome::Exhausted);
        }
        Ok(CommandOutcome::Advanced {
            position: self.navigator.position(),
        })
    }

    pub fn current(&self) -> Option<&ImageEntry> {
        self.navigator.current()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn ledger(&self) -> &LedgerWriter {
        &self.ledger
    }

    fn check(&self, raw_quality: &str) -> Result<super::Quality, ValidationError> {
        validate(raw_quality).inspect_err(|err| {
            tracing::debug!("Refused rating {raw_quality:?}: {err}");
        })
    }
}
