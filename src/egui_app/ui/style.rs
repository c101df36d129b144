//! Colours and widget visuals for the rating window.

use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    /// Status bar and text field backgrounds.
    pub bg_primary: Color32,
    /// Main panel.
    pub bg_panel: Color32,
    pub bg_widget: Color32,
    pub outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(14, 15, 18),
        bg_panel: Color32::from_rgb(24, 26, 30),
        bg_widget: Color32::from_rgb(40, 43, 49),
        outline: Color32::from_rgb(58, 62, 70),
        text_primary: Color32::from_rgb(206, 210, 216),
        text_muted: Color32::from_rgb(138, 144, 154),
        accent: Color32::from_rgb(120, 180, 230),
    }
}

/// Dark, square-cornered look applied once at startup.
pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.panel_fill = palette.bg_panel;
    visuals.window_fill = palette.bg_primary;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        square_widget(widget, palette);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent);
}

fn square_widget(widget: &mut WidgetVisuals, palette: Palette) {
    widget.corner_radius = CornerRadius::ZERO;
    widget.bg_fill = palette.bg_widget;
    widget.weak_bg_fill = palette.bg_widget;
    widget.bg_stroke = Stroke::new(1.0, palette.outline);
    widget.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Frame drawn around the image box.
pub fn image_border() -> Stroke {
    Stroke::new(1.0, palette().outline)
}

/// Severity shown by the status bar badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Info,
    Warning,
    Error,
}

pub fn status_badge(tone: StatusTone) -> (&'static str, Color32) {
    match tone {
        StatusTone::Idle => ("Idle", palette().bg_widget),
        StatusTone::Info => ("Info", Color32::from_rgb(96, 170, 128)),
        StatusTone::Warning => ("Warning", Color32::from_rgb(204, 150, 60)),
        StatusTone::Error => ("Error", Color32::from_rgb(196, 72, 60)),
    }
}
