//! egui renderer for the rating window.

pub mod style;

use crate::config::AppConfig;
use crate::egui_app::controller::RatingController;
use crate::egui_app::state::{Notice, NoticeLevel, QUALITY_HINT};
use crate::rating::SessionMode;
use eframe::egui::{
    self, Align, Color32, Frame, Layout, Margin, RichText, Sense, StrokeKind, TextureHandle,
    TextureOptions, Ui, Vec2,
};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

const TEXTURE_NAME: &str = "current_image";

/// Renders the rating window using the shared controller state.
pub struct EguiApp {
    controller: RatingController,
    visuals_set: bool,
    texture: Option<TextureHandle>,
    texture_revision: u64,
}

impl EguiApp {
    /// Build the window for `mode`.
    ///
    /// The generated-images window loads its manifest up front; a failure is
    /// returned so the caller can show it instead of an empty window.
    pub fn new(mode: SessionMode, config: &AppConfig) -> Result<Self, String> {
        let mut controller = RatingController::new(mode, config);
        if mode == SessionMode::Generated {
            controller
                .load_manifest(&config.paths.manifest)
                .map_err(|err| format!("Failed to load generated images: {err}"))?;
        }
        Ok(Self::from_controller(controller))
    }

    pub fn from_controller(controller: RatingController) -> Self {
        Self {
            controller,
            visuals_set: false,
            texture: None,
            texture_revision: 0,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// Rebuild the texture when the controller swapped images.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        if self.texture_revision == self.controller.ui.image_revision {
            return;
        }
        self.texture_revision = self.controller.ui.image_revision;
        self.texture = self.controller.ui.image.as_ref().map(|image| {
            let pixels = egui::ColorImage::from_rgba_unmultiplied(image.size(), &image.rgba);
            ctx.load_texture(TEXTURE_NAME, pixels, TextureOptions::LINEAR)
        });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (badge_rect, _) = ui.allocate_exact_size(Vec2::splat(14.0), Sense::hover());
                    ui.painter()
                        .rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.add_space(6.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("Saved {}", self.controller.ui.saved_count))
                                .color(palette.text_muted),
                        );
                        if let Some((current, total)) = self.controller.ui.progress {
                            ui.label(
                                RichText::new(format!("Image {current}/{total}"))
                                    .color(palette.text_muted),
                            );
                        }
                    });
                });
            });
    }

    fn render_prompt(&self, ui: &mut Ui) {
        if let Some(prompt) = &self.controller.ui.prompt_label {
            ui.label(RichText::new(prompt).size(16.0));
            ui.add_space(6.0);
        }
    }

    fn render_image(&self, ui: &mut Ui) {
        let side = self.controller.max_image_side() as f32;
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        ui.painter()
            .rect_stroke(rect, 0.0, style::image_border(), StrokeKind::Outside);
        let Some(texture) = &self.texture else {
            return;
        };
        let image_rect = egui::Rect::from_center_size(rect.center(), texture.size_vec2());
        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
        ui.painter()
            .image(texture.id(), image_rect, uv, Color32::WHITE);
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        let max_image_side = self.controller.max_image_side();
        ui.add(
            egui::TextEdit::singleline(&mut self.controller.ui.quality_input)
                .hint_text(QUALITY_HINT)
                .desired_width(max_image_side as f32),
        );
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if self.controller.mode() == SessionMode::Files && ui.button("Load Image").clicked() {
                self.controller.load_via_dialog();
            }
            if ui.button("Save Quality").clicked() {
                self.controller.save();
            }
            if ui.button("Next Image").clicked() {
                self.controller.next();
            }
        });
    }

    fn show_pending_notice(&mut self) {
        let Some(notice) = self.controller.take_notice() else {
            return;
        };
        show_notice(&notice);
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.sync_texture(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                self.render_prompt(ui);
                self.render_image(ui);
                ui.add_space(8.0);
                self.render_controls(ui);
            });
        });
        self.show_pending_notice();
        if self.texture_revision != self.controller.ui.image_revision {
            ctx.request_repaint();
        }
    }
}

/// Show a notice in a blocking native dialog.
fn show_notice(notice: &Notice) {
    let level = match notice.level {
        NoticeLevel::Info => MessageLevel::Info,
        NoticeLevel::Warning => MessageLevel::Warning,
        NoticeLevel::Error => MessageLevel::Error,
    };
    MessageDialog::new()
        .set_level(level)
        .set_title(notice.title.as_str())
        .set_description(notice.message.as_str())
        .set_buttons(MessageButtons::Ok)
        .show();
}
