//! Shared state types for the egui UI.

use crate::display::DisplayImage;
use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Placeholder shown in the empty quality field.
pub const QUALITY_HINT: &str = "Enter image quality (1-10)";
/// Prompt label text once a generated batch has been fully walked.
pub const NO_MORE_IMAGES: &str = "No more images.";

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    /// Prompt above the image; `None` hides the label entirely.
    pub prompt_label: Option<String>,
    /// Raw text typed into the quality field.
    pub quality_input: String,
    pub image: Option<DisplayImage>,
    /// Bumped whenever `image` changes so the renderer can refresh its texture.
    pub image_revision: u64,
    /// 1-based position and total, when an image is on screen.
    pub progress: Option<(usize, usize)>,
    /// Ratings written during this session.
    pub saved_count: usize,
    /// Message waiting to be shown in a blocking dialog.
    pub notice: Option<Notice>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            prompt_label: None,
            quality_input: String::new(),
            image: None,
            image_revision: 0,
            progress: None,
            saved_count: 0,
            notice: None,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::new("Load images to start rating", StatusTone::Idle)
    }

    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        let (label, color) = style::status_badge(tone);
        Self {
            text: text.into(),
            badge_label: label.into(),
            badge_color: color,
        }
    }
}

/// Severity of a blocking dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message the renderer shows in a modal dialog before accepting more input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}
