//! Loading overlay shown while an activity file parses in the background.

use eframe::egui;

use crate::app::FitViewApp;

impl FitViewApp {
    /// Render a centered spinner with the name of the file being loaded
    pub fn render_loading_overlay(&mut self, ui: &mut egui::Ui, name: &str) {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.4);
                ui.add(egui::Spinner::new().size(32.0));
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(format!("Loading {}...", name))
                        .size(15.0)
                        .color(egui::Color32::GRAY),
                );
            });
        });
    }
}
