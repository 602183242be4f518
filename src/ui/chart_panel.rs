//! Chart painting via egui_plot.
//!
//! Each registry entry paints as a line, bar, or marker plot depending
//! on its kind. Tooltips show the displayed value and the raw value it
//! was converted from.

use eframe::egui;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points, VLine};

use crate::app::FitViewApp;
use crate::charts::config;
use crate::charts::data::ChartKind;
use crate::charts::registry::RenderedChart;
use crate::settings::{ChartStyle, Interpolation};
use crate::state::LoadedActivity;
use crate::theme::ThemeColors;
use crate::units::{format_distance, format_duration, format_time};
use crate::zones;

const CHART_HEIGHT: f32 = 260.0;

impl FitViewApp {
    /// Render the chart list for the loaded activity
    pub fn render_charts(&mut self, ui: &mut egui::Ui) {
        if self.activity.is_none() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Open an activity file to see charts")
                        .size(16.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        if self.registry.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("No chartable data in this activity")
                        .size(16.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        let theme = self.theme.colors(&self.settings);
        let settings = &self.settings;

        egui::ScrollArea::vertical().show(ui, |ui| {
            if let Some(loaded) = &self.activity {
                render_summary(ui, loaded);
                ui.separator();
            }
            for chart in self.registry.charts() {
                if chart.config.show_title {
                    ui.add_space(8.0);
                    ui.heading(&chart.config.title);
                }
                render_chart(ui, chart, settings, theme);
                ui.add_space(12.0);
                ui.separator();
            }
        });
    }
}

/// Bars for one zone array, colored through the zone resolver.
///
/// `lap_x = None` spreads zones along the x axis; `Some(x)` stacks them
/// at a single lap position.
fn zone_bars(
    times: &[f64],
    lap_x: Option<f64>,
    fallback: [u8; 3],
    settings: &crate::settings::SettingsStore,
    theme: &'static ThemeColors,
    kind: zones::ZoneKind,
) -> Vec<Bar> {
    let mut entries = zones::zone_entries(times);
    zones::resolve_entry_colors(&mut entries, settings, theme, kind);

    let mut base = 0.0;
    entries
        .iter()
        .map(|entry| {
            let rgb = entry
                .color
                .as_deref()
                .and_then(zones::parse_hex_color)
                .unwrap_or(fallback);
            let bar = match lap_x {
                Some(x) => {
                    let bar = Bar::new(x, entry.time)
                        .base_offset(base)
                        .name(format!("Lap {} {}", x as i64, entry.label));
                    base += entry.time;
                    bar
                }
                None => Bar::new(entry.zone as f64, entry.time).name(entry.label.clone()),
            };
            bar.width(0.6)
                .fill(egui::Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        })
        .collect()
}

/// Duplicate each point's y across to the next x, producing a stair line
fn stepped(points: &[crate::charts::data::ChartPoint]) -> PlotPoints {
    let mut out = Vec::with_capacity(points.len() * 2);
    for pair in points.windows(2) {
        out.push([pair[0].x, pair[0].y]);
        out.push([pair[1].x, pair[0].y]);
    }
    if let Some(last) = points.last() {
        out.push([last.x, last.y]);
    }
    out.into_iter().collect()
}

/// One-line activity summary above the chart list
fn render_summary(ui: &mut egui::Ui, loaded: &LoadedActivity) {
    let activity = &loaded.activity;
    let mut parts = vec![loaded.name.clone()];

    let distance = activity
        .sessions
        .first()
        .and_then(|s| s.total_distance)
        .or_else(|| activity.records.iter().rev().find_map(|r| r.distance));
    if let Some(meters) = distance {
        let formatted = format_distance(meters);
        if !formatted.is_empty() {
            parts.push(formatted);
        }
    }

    if let Some((start, end)) = activity.time_range() {
        let span = end - start;
        // Coarse duration when the span is clean, clock-style otherwise
        let formatted = format_duration(span).unwrap_or_else(|_| format_time(span));
        parts.push(formatted);
    }

    ui.add_space(4.0);
    ui.label(egui::RichText::new(parts.join("  ·  ")).size(14.0).strong());
    ui.add_space(4.0);
}

fn render_chart(
    ui: &mut egui::Ui,
    chart: &RenderedChart,
    settings: &crate::settings::SettingsStore,
    theme: &'static ThemeColors,
) {
    let cfg = chart.config.clone();
    let color = egui::Color32::from_rgb(cfg.color[0], cfg.color[1], cfg.color[2]);

    let mut plot = Plot::new(format!("chart_{}", chart.kind.field_key()))
        .height(CHART_HEIGHT)
        .show_grid(cfg.show_grid)
        .x_axis_label(cfg.x_label.clone())
        .y_axis_label(cfg.y_label.clone());

    if cfg.show_legend {
        plot = plot.legend(egui_plot::Legend::default());
    }
    // GPS tracks keep latitude and longitude to scale
    if matches!(chart.kind, ChartKind::GpsTrack) {
        plot = plot.data_aspect(1.0);
    }

    let tooltip_cfg = cfg.clone();
    plot = plot.label_formatter(move |_name, value| tooltip_cfg.tooltip(value.x, value.y));

    plot.show(ui, |plot_ui| {
        match &chart.kind {
            ChartKind::ZoneBars(zone_kind) => {
                let times: Vec<f64> = chart.points.iter().map(|p| p.y).collect();
                let bars = zone_bars(&times, None, cfg.color, settings, theme, *zone_kind);
                plot_ui.bar_chart(BarChart::new(cfg.title.clone(), bars));
                return;
            }
            ChartKind::LapZoneBars(zone_kind) => {
                // Points arrive lap by lap; each lap stacks at its own x
                let mut bars = Vec::new();
                let mut start = 0;
                while start < chart.points.len() {
                    let lap_x = chart.points[start].x;
                    let end = start
                        + chart.points[start..]
                            .iter()
                            .take_while(|p| p.x == lap_x)
                            .count();
                    let times: Vec<f64> =
                        chart.points[start..end].iter().map(|p| p.y).collect();
                    bars.extend(zone_bars(
                        &times,
                        Some(lap_x),
                        cfg.color,
                        settings,
                        theme,
                        *zone_kind,
                    ));
                    start = end;
                }
                plot_ui.bar_chart(BarChart::new(cfg.title.clone(), bars));
                return;
            }
            _ => {}
        }

        if config::is_marker_chart(&chart.kind) {
            for (i, p) in chart.points.iter().enumerate() {
                let name = chart
                    .labels
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| "event".to_string());
                plot_ui.vline(VLine::new(name, p.x).color(color).width(2.0));
            }
        } else if cfg.style == ChartStyle::Bar {
            let bars: Vec<Bar> = chart
                .points
                .iter()
                .map(|p| Bar::new(p.x, p.y).fill(color))
                .collect();
            plot_ui.bar_chart(BarChart::new(cfg.title.clone(), bars));
        } else {
            let series: PlotPoints = match cfg.interpolation {
                Interpolation::Step => stepped(&chart.points),
                _ => chart.points.iter().map(|p| [p.x, p.y]).collect(),
            };
            let mut line = Line::new(cfg.title.clone(), series).color(color).width(1.5);
            if cfg.show_fill || cfg.style == ChartStyle::Area {
                line = line.fill(0.0).fill_alpha(0.15);
            }
            plot_ui.line(line);

            if cfg.show_points {
                let marks: PlotPoints = chart.points.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.points(
                    Points::new(format!("{} points", cfg.title), marks)
                        .color(color)
                        .radius(2.0),
                );
            }
        }
    });
}
