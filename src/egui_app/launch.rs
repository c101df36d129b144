//! Native window startup shared by the rating binaries.

use eframe::egui;

use crate::config::AppConfig;
use crate::egui_app::ui::EguiApp;
use crate::rating::SessionMode;

/// Open the rating window for `mode` and block until it closes.
///
/// Startup failures (such as an unreadable manifest) are shown in place of
/// the rating controls.
pub fn run(mode: SessionMode, config: AppConfig) -> eframe::Result<()> {
    let viewport = egui::ViewportBuilder::default()
        .with_title(mode.window_title())
        .with_inner_size([config.display.window_width, config.display.window_height]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        mode.window_title(),
        native_options,
        Box::new(move |_cc| match EguiApp::new(mode, &config) {
            Ok(app) => Ok(Box::new(app)),
            Err(message) => {
                tracing::error!("{message}");
                Ok(Box::new(LaunchError { message }))
            }
        }),
    )
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start");
                ui.label(&self.message);
            });
        });
    }
}
