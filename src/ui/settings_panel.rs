//! Settings window: chart options, field visibility, field colors and
//! zone colors.
//!
//! Every change persists immediately and schedules a chart rebuild.

use eframe::egui;
use strum::IntoEnumIterator;

use crate::app::FitViewApp;
use crate::settings::{ChartOptionId, OptionKind, SettingsStore};
use crate::theme::ThemeColors;
use crate::zones::{self, ZoneKind};

/// Standard record-derived chart fields with display names
const COLOR_FIELDS: &[(&str, &str)] = &[
    ("speed", "Speed"),
    ("altitude", "Altitude"),
    ("gps_track", "GPS Track"),
    ("power_vs_hr", "Power vs Heart Rate"),
    ("temperature", "Temperature"),
];

const VISIBILITY_FIELDS: &[(&str, &str)] = &[
    ("speed", "Speed"),
    ("altitude", "Altitude"),
    ("gps_track", "GPS Track"),
    ("power_vs_hr", "Power vs Heart Rate"),
    ("temperature", "Temperature"),
    ("events", "Events"),
    ("hr_zones", "Heart Rate Zones"),
    ("power_zones", "Power Zones"),
    ("lap_hr_zones", "Heart Rate Zones by Lap"),
    ("lap_power_zones", "Power Zones by Lap"),
];

impl FitViewApp {
    /// Render the settings window
    pub fn render_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings;
        let mut changed = false;

        let theme = self.theme.colors(&self.settings);

        // Zone counts and developer field names come from the loaded
        // activity; sensible defaults apply with nothing loaded.
        let (hr_zones, power_zones, dev_fields) = match &self.activity {
            Some(loaded) => {
                let session = loaded.activity.sessions.first();
                (
                    session.map_or(5, |s| s.time_in_hr_zone.len().max(1)),
                    session.map_or(5, |s| s.time_in_power_zone.len().max(1)),
                    loaded
                        .activity
                        .developer_fields
                        .iter()
                        .map(|f| f.name.clone())
                        .collect::<Vec<_>>(),
                )
            }
            None => (5, 5, Vec::new()),
        };

        // Only offer visibility toggles for fields the activity carries;
        // with nothing loaded, offer them all.
        let visibility_fields: Vec<(&str, &str)> = VISIBILITY_FIELDS
            .iter()
            .filter(|(key, _)| {
                self.activity
                    .as_ref()
                    .map_or(true, |loaded| loaded.field_available(key))
            })
            .copied()
            .collect();

        let settings = &mut self.settings;

        egui::Window::new("Chart Settings")
            .open(&mut open)
            .default_width(380.0)
            .vscroll(true)
            .show(ctx, |ui| {
                changed |= render_chart_options(ui, settings);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                changed |= render_visibility(ui, settings, &visibility_fields, &dev_fields);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                changed |= render_field_colors(ui, settings, theme, &dev_fields);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                changed |= render_zone_colors(ui, settings, theme, hr_zones, power_zones);

                ui.add_space(12.0);
                ui.separator();
                ui.add_space(8.0);

                if ui.button("Reset All to Defaults").clicked() {
                    settings.reset_all();
                    changed = true;
                }
            });

        self.show_settings = open;
        if changed {
            self.settings_changed();
        }
    }
}

/// Select, toggle and range options from the typed option catalog
fn render_chart_options(ui: &mut egui::Ui, settings: &mut SettingsStore) -> bool {
    let mut changed = false;

    egui::CollapsingHeader::new(egui::RichText::new("Chart Options").strong())
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new("chart_options_grid")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for id in ChartOptionId::iter() {
                        ui.label(id.label());
                        match id.kind() {
                            OptionKind::Select => {
                                let current = settings.option_value(id);
                                let mut selected = current.clone();
                                egui::ComboBox::from_id_salt(id.key_suffix())
                                    .selected_text(&selected)
                                    .width(140.0)
                                    .show_ui(ui, |ui| {
                                        for value in id.allowed_values() {
                                            ui.selectable_value(
                                                &mut selected,
                                                value.to_string(),
                                                *value,
                                            );
                                        }
                                    });
                                if selected != current {
                                    settings.set_option(id, &selected);
                                    changed = true;
                                }
                            }
                            OptionKind::Toggle => {
                                let mut value = settings.bool_option(id);
                                if ui.checkbox(&mut value, "").changed() {
                                    settings.set_bool_option(id, value);
                                    changed = true;
                                }
                            }
                            OptionKind::Range => {
                                let mut value = settings.smoothing();
                                if ui
                                    .add(egui::Slider::new(&mut value, 0..=10))
                                    .changed()
                                {
                                    settings.set_option(id, &value.to_string());
                                    changed = true;
                                }
                            }
                        }
                        ui.end_row();
                    }
                });
        });

    changed
}

/// Per-chart show/hide checkboxes
fn render_visibility(
    ui: &mut egui::Ui,
    settings: &mut SettingsStore,
    fields: &[(&str, &str)],
    dev_fields: &[String],
) -> bool {
    let mut changed = false;

    egui::CollapsingHeader::new(egui::RichText::new("Visible Charts").strong())
        .default_open(false)
        .show(ui, |ui| {
            for (key, label) in fields {
                let mut visible = !settings.field_hidden(key);
                if ui.checkbox(&mut visible, *label).changed() {
                    settings.set_field_hidden(key, !visible);
                    changed = true;
                }
            }
            for name in dev_fields {
                let mut visible = !settings.field_hidden(name);
                if ui.checkbox(&mut visible, name.as_str()).changed() {
                    settings.set_field_hidden(name, !visible);
                    changed = true;
                }
            }
        });

    changed
}

/// Series color pickers, persisted as hex strings
fn render_field_colors(
    ui: &mut egui::Ui,
    settings: &mut SettingsStore,
    theme: &'static ThemeColors,
    dev_fields: &[String],
) -> bool {
    let mut changed = false;

    egui::CollapsingHeader::new(egui::RichText::new("Chart Colors").strong())
        .default_open(false)
        .show(ui, |ui| {
            let mut fields: Vec<(String, String)> = COLOR_FIELDS
                .iter()
                .map(|(k, l)| (k.to_string(), l.to_string()))
                .collect();
            for name in dev_fields {
                fields.push((name.clone(), name.clone()));
            }

            egui::Grid::new("field_colors_grid")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (index, (key, label)) in fields.iter().enumerate() {
                        ui.label(label);
                        let mut rgb = settings
                            .field_color(key)
                            .and_then(zones::parse_hex_color)
                            .unwrap_or(theme.chart[index % theme.chart.len()]);
                        if ui.color_edit_button_srgb(&mut rgb).changed() {
                            settings.set_field_color(key, &zones::format_hex_color(rgb));
                            changed = true;
                        }
                        ui.end_row();
                    }
                });
        });

    changed
}

/// Zone color pickers for heart rate and power bars
fn render_zone_colors(
    ui: &mut egui::Ui,
    settings: &mut SettingsStore,
    theme: &'static ThemeColors,
    hr_zones: usize,
    power_zones: usize,
) -> bool {
    let mut changed = false;

    egui::CollapsingHeader::new(egui::RichText::new("Zone Colors").strong())
        .default_open(false)
        .show(ui, |ui| {
            for (kind, count) in [
                (ZoneKind::HeartRate, hr_zones),
                (ZoneKind::Power, power_zones),
            ] {
                ui.label(egui::RichText::new(kind.label()).strong());
                egui::Grid::new(format!("zone_colors_{}", kind.key_prefix()))
                    .num_columns(2)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        for index in 0..count {
                            ui.label(format!("Zone {}", index + 1));
                            let hex = zones::zone_color(settings, theme, kind, index);
                            let mut rgb = zones::parse_hex_color(&hex)
                                .unwrap_or(theme.chart[index % theme.chart.len()]);
                            if ui.color_edit_button_srgb(&mut rgb).changed() {
                                zones::save_zone_color(
                                    settings,
                                    kind,
                                    index,
                                    &zones::format_hex_color(rgb),
                                );
                                changed = true;
                            }
                            ui.end_row();
                        }
                    });
                if ui
                    .button(format!("Reset {} Colors", kind.label()))
                    .clicked()
                {
                    zones::reset_zone_colors(settings, theme, kind, count);
                    changed = true;
                }
                ui.add_space(8.0);
            }
        });

    changed
}
