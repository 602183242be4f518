//! Menu bar UI components (File, View, Help menus).

use eframe::egui;

use crate::app::FitViewApp;
use crate::state::{LoadingState, SUPPORTED_EXTENSIONS};
use crate::theme::ThemeMode;

impl FitViewApp {
    /// Render the application menu bar
    pub fn render_menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::MenuBar::new().ui(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                ui.set_min_width(200.0);

                let is_loading = matches!(self.loading_state, LoadingState::Loading(_));

                if ui
                    .add_enabled(!is_loading, egui::Button::new("Open Activity..."))
                    .on_hover_text("\u{2318}O")
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Activity Files", SUPPORTED_EXTENSIONS)
                        .pick_file()
                    {
                        self.start_loading_file(path);
                    }
                    ui.close();
                }

                let has_activity = self.activity.is_some();
                if ui
                    .add_enabled(has_activity, egui::Button::new("Close Activity"))
                    .clicked()
                {
                    self.activity = None;
                    self.registry.destroy_all();
                    ui.close();
                }

                ui.separator();

                let has_charts = !self.registry.is_empty();
                if ui
                    .add_enabled(has_charts, egui::Button::new("Export All Charts..."))
                    .clicked()
                {
                    if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                        match self.registry.export_all(&dir, &self.settings) {
                            Ok(written) => {
                                self.show_toast_success(&format!(
                                    "Exported {} chart{}",
                                    written,
                                    if written == 1 { "" } else { "s" }
                                ));
                            }
                            Err(e) => {
                                self.show_toast_error(&format!("Export failed: {:#}", e));
                            }
                        }
                    }
                    ui.close();
                }

                ui.separator();

                if ui.button("Copy Share Link").clicked() {
                    let encoded = self.settings.export_shared();
                    ctx.copy_text(encoded);
                    self.show_toast_success("Chart settings copied to clipboard");
                    ui.close();
                }

                if ui.button("Import Share Link...").clicked() {
                    self.share_import_open = true;
                    self.share_import_text.clear();
                    ui.close();
                }

                ui.separator();

                if ui.button("Reset Chart Settings").clicked() {
                    self.settings.reset_all();
                    self.settings_changed();
                    self.show_toast("Chart settings reset to defaults");
                    ui.close();
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                ui.set_min_width(160.0);

                let current = self.theme.resolve(&self.settings);
                for mode in [ThemeMode::Light, ThemeMode::Dark] {
                    if ui
                        .radio(current == mode, format!("{} Theme", mode.name()))
                        .clicked()
                    {
                        self.set_theme(mode, ctx);
                        ui.close();
                    }
                }

                ui.separator();

                if ui.checkbox(&mut self.show_settings, "Settings").clicked() {
                    ui.close();
                }
            });

            // Help menu
            ui.menu_button("Help", |ui| {
                ui.set_min_width(160.0);
                ui.label(format!("FitView v{}", env!("CARGO_PKG_VERSION")));
            });
        });

        if self.share_import_open {
            self.render_share_import_dialog(ctx);
        }
    }

    /// Modal for pasting a shared settings string
    fn render_share_import_dialog(&mut self, ctx: &egui::Context) {
        let mut open = self.share_import_open;
        let mut apply = false;
        let mut cancel = false;

        egui::Window::new("Import Shared Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Paste a share link or settings string:");
                ui.add(
                    egui::TextEdit::multiline(&mut self.share_import_text)
                        .desired_width(320.0)
                        .desired_rows(3),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let has_text = !self.share_import_text.trim().is_empty();
                    if ui.add_enabled(has_text, egui::Button::new("Apply")).clicked() {
                        apply = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if apply {
            let text = self.share_import_text.trim().to_string();
            match self.settings.import_shared(&text) {
                Ok(0) => {
                    self.show_toast_warning("No chart settings found in that string");
                }
                Ok(count) => {
                    self.settings_changed();
                    self.show_toast_success(&format!("Imported {} setting(s)", count));
                }
                Err(e) => {
                    self.show_toast_error(&format!("Invalid settings string: {:#}", e));
                }
            }
            self.share_import_text.clear();
            open = false;
        }
        if cancel {
            self.share_import_text.clear();
            open = false;
        }
        self.share_import_open = open;
    }
}
