//! Headless rating core: entries, records, navigation, validation and the ledger.
//!
//! Nothing in here depends on egui; the UI layer drives [`session::RatingSession`]
//! through its command methods and renders whatever they return.

use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};

pub mod ledger;
pub mod navigator;
pub mod session;
pub mod validator;

pub use ledger::{LedgerError, LedgerLayout, LedgerWriter};
pub use navigator::{NavigationPolicy, Navigator};
pub use session::{CommandError, CommandOutcome, RatingSession};
pub use validator::{Quality, ValidationError, validate};

/// One image waiting to be rated.
///
/// The entry only references the image on disk; it does not own the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Prompt that produced the image (generated batches only).
    #[serde(rename = "Prompt", default, deserialize_with = "prompt_cell")]
    pub prompt: Option<String>,
    /// Location of the image to display.
    #[serde(rename = "Image Path")]
    pub image_path: PathBuf,
}

impl ImageEntry {
    /// Entry for a user-picked file with no prompt.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            prompt: None,
            image_path: path.into(),
        }
    }

    /// Entry for a generated image and the prompt behind it.
    pub fn generated(prompt: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            image_path: path.into(),
        }
    }
}

/// Read a `Prompt` cell that is present as text, blank cells included.
///
/// Only a missing `Prompt` column means "no prompt".
pub(crate) fn prompt_cell<'de, D: Deserializer<'de>>(
    cell: D,
) -> Result<Option<String>, D::Error> {
    String::deserialize(cell).map(Some)
}

/// A single rating appended to a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRecord {
    pub image_path: PathBuf,
    pub prompt: Option<String>,
    pub quality: Quality,
}

impl RatingRecord {
    pub fn for_entry(entry: &ImageEntry, quality: Quality) -> Self {
        Self {
            image_path: entry.image_path.clone(),
            prompt: entry.prompt.clone(),
            quality,
        }
    }
}

/// Which of the two rating workflows a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Rate arbitrary user-picked files; navigation wraps around.
    Files,
    /// Rate a generated batch from a manifest; navigation ends after the last image.
    Generated,
}

impl SessionMode {
    pub fn navigation_policy(self) -> NavigationPolicy {
        match self {
            SessionMode::Files => NavigationPolicy::Cyclic,
            SessionMode::Generated => NavigationPolicy::Terminal,
        }
    }

    /// Whether advancing requires a well-formed rating in the quality field.
    pub fn gates_advance(self) -> bool {
        matches!(self, SessionMode::Generated)
    }

    /// Columns of the ledger this workflow writes.
    pub fn ledger_layout(self) -> LedgerLayout {
        match self {
            SessionMode::Files => LedgerLayout::Files,
            SessionMode::Generated => LedgerLayout::Generated,
        }
    }

    pub fn window_title(self) -> &'static str {
        match self {
            SessionMode::Files => "Image Quality Rating",
            SessionMode::Generated => "Image Rating Application",
        }
    }
}
