//! Bridges the rating session to the egui UI state.
//!
//! Every button maps to one controller method. Methods update `ui` (status
//! line, prompt, image, pending notice) and never block; the renderer decides
//! how to present a notice.

use std::path::{Path, PathBuf};

use rfd::FileDialog;

use crate::config::AppConfig;
use crate::display;
use crate::egui_app::state::*;
use crate::egui_app::ui::style::StatusTone;
use crate::rating::{
    CommandError, CommandOutcome, ImageEntry, RatingSession, SessionMode, ValidationError,
};

const INPUT_ERROR_TITLE: &str = "Input Error";
const NO_IMAGE_LOADED: &str = "No image loaded";
const SAVE_SUCCESS: &str = "Quality rating saved successfully.";
const EMPTY_BEFORE_SAVE: &str = "Please enter a quality rating before saving.";
const EMPTY_BEFORE_NEXT: &str = "Please enter a quality rating before proceeding to the next image.";

/// Extensions offered by the image picker's main filter.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "xpm", "jpg", "jpeg"];

/// Which gated command produced a validation failure.
#[derive(Clone, Copy)]
enum Gate {
    Save,
    Next,
}

/// Maintains UI state and forwards user commands to the rating session.
pub struct RatingController {
    pub ui: UiState,
    session: RatingSession,
    max_image_side: u32,
}

impl RatingController {
    /// Build a controller writing to the ledger configured for `mode`.
    pub fn new(mode: SessionMode, config: &AppConfig) -> Self {
        let ledger = match mode {
            SessionMode::Files => config.paths.file_ledger.clone(),
            SessionMode::Generated => config.paths.generated_ledger.clone(),
        };
        Self {
            ui: UiState::default(),
            session: RatingSession::new(mode, ledger),
            max_image_side: config.display.max_image_side,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    pub fn session(&self) -> &RatingSession {
        &self.session
    }

    pub fn max_image_side(&self) -> u32 {
        self.max_image_side
    }

    /// Load a generated-images manifest and show its first entry.
    ///
    /// Errors are returned rather than shown: a missing manifest stops startup.
    pub fn load_manifest(&mut self, path: &Path) -> Result<(), CommandError> {
        let outcome = self.session.on_load_manifest(path)?;
        self.apply_load(outcome);
        Ok(())
    }

    /// Let the user pick image files and load them.
    pub fn load_via_dialog(&mut self) {
        let picked = FileDialog::new()
            .set_title("Select Images")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_files();
        let Some(paths) = picked else {
            return;
        };
        self.load_files(paths);
    }

    /// Replace the session with user-picked files.
    pub fn load_files(&mut self, paths: Vec<PathBuf>) {
        let entries = paths.into_iter().map(ImageEntry::from_path).collect();
        match self.session.on_load(entries) {
            Ok(outcome) => self.apply_load(outcome),
            Err(err) => self.report_error("Load Failed", &err),
        }
    }

    /// Save the rating typed for the current image.
    pub fn save(&mut self) {
        match self.session.on_save(&self.ui.quality_input) {
            Ok(CommandOutcome::Saved(record)) => {
                self.ui.saved_count += 1;
                self.set_status(
                    format!(
                        "Saved quality {} for {}",
                        record.quality,
                        display_name(&record.image_path)
                    ),
                    StatusTone::Info,
                );
                if self.mode() == SessionMode::Generated {
                    self.ui.notice = Some(Notice::new(NoticeLevel::Info, "Success", SAVE_SUCCESS));
                }
            }
            Ok(_) => self.set_status(NO_IMAGE_LOADED, StatusTone::Warning),
            Err(CommandError::Validation(err)) => self.reject(Gate::Save, &err),
            Err(err) => self.report_error("Save Failed", &err),
        }
    }

    /// Advance to the next image.
    pub fn next(&mut self) {
        match self.session.on_next(&self.ui.quality_input) {
            Ok(CommandOutcome::Advanced { .. }) => {
                if self.mode() == SessionMode::Generated {
                    self.ui.quality_input.clear();
                }
                self.refresh_display();
            }
            Ok(CommandOutcome::Exhausted) => {
                self.ui.prompt_label = Some(NO_MORE_IMAGES.into());
                self.clear_image();
                self.ui.progress = None;
                self.set_status(
                    format!("Finished; {} ratings saved", self.ui.saved_count),
                    StatusTone::Idle,
                );
            }
            Ok(_) => self.set_status(NO_IMAGE_LOADED, StatusTone::Warning),
            Err(CommandError::Validation(err)) => self.reject(Gate::Next, &err),
            Err(err) => self.report_error("Next Image", &err),
        }
    }

    /// Remove and return the pending dialog, if any.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.ui.notice.take()
    }

    fn apply_load(&mut self, outcome: CommandOutcome) {
        match outcome {
            CommandOutcome::Loaded { count } => {
                self.ui.quality_input.clear();
                self.refresh_display();
                if self.ui.image.is_some() {
                    self.set_status(format!("Loaded {count} images"), StatusTone::Info);
                }
            }
            _ => self.set_status("No images selected", StatusTone::Idle),
        }
    }

    /// Show the current entry, or blank the image area if it cannot be read.
    fn refresh_display(&mut self) {
        let navigator = self.session.navigator();
        self.ui.progress = Some((navigator.position() + 1, navigator.len()));
        let Some(entry) = self.session.current().cloned() else {
            self.clear_image();
            return;
        };
        if self.mode() == SessionMode::Generated {
            self.ui.prompt_label = Some(entry.prompt.clone().unwrap_or_default());
        }
        match display::load(&entry.image_path, self.max_image_side) {
            Ok(image) => {
                self.ui.image = Some(image);
                self.ui.image_revision += 1;
                self.set_status(
                    format!("Showing {}", display_name(&entry.image_path)),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.clear_image();
                self.set_status(
                    format!("Could not display {}", display_name(&entry.image_path)),
                    StatusTone::Warning,
                );
            }
        }
    }

    fn clear_image(&mut self) {
        if self.ui.image.take().is_some() {
            self.ui.image_revision += 1;
        }
    }

    fn reject(&mut self, gate: Gate, err: &ValidationError) {
        let message = match (gate, err) {
            (Gate::Save, ValidationError::EmptyInput) => EMPTY_BEFORE_SAVE.to_string(),
            (Gate::Next, ValidationError::EmptyInput) => EMPTY_BEFORE_NEXT.to_string(),
            _ => err.to_string(),
        };
        self.set_status(message.clone(), StatusTone::Warning);
        self.ui.notice = Some(Notice::new(NoticeLevel::Warning, INPUT_ERROR_TITLE, message));
    }

    fn report_error(&mut self, title: &str, err: &CommandError) {
        tracing::warn!("{title}: {err}");
        self.set_status(err.to_string(), StatusTone::Error);
        self.ui.notice = Some(Notice::new(NoticeLevel::Error, title, err.to_string()));
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
