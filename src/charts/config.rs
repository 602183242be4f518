//! Declarative chart configuration built from a prepared series.

use anyhow::bail;

use crate::charts::data::{AxisUnits, ChartKind, PreparedChart};
use crate::settings::{ChartOptionId, ChartStyle, Interpolation, SettingsStore};
use crate::theme::ThemeColors;
use crate::zones::parse_hex_color;

/// Everything the painter and exporter need to draw one chart
#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Series line/bar color
    pub color: [u8; 3],
    pub show_grid: bool,
    pub show_legend: bool,
    pub show_title: bool,
    pub show_points: bool,
    pub show_fill: bool,
    /// Line/bar/area style for record-derived series
    pub style: ChartStyle,
    pub interpolation: Interpolation,
    pub x_axis: AxisUnits,
    pub y_axis: AxisUnits,
}

impl ChartConfig {
    /// Tooltip text for a plotted point: the displayed value plus the
    /// raw value reverse-converted from it. Display and tooltip use
    /// different directions of the same conversion on purpose, so a raw
    /// value is never converted twice.
    pub fn tooltip(&self, x: f64, y: f64) -> String {
        let mut text = format!(
            "{}: {:.2} {}\n{}: {:.2} {}",
            self.x_label_base(),
            x,
            self.x_axis.symbol(),
            self.y_label_base(),
            y,
            self.y_axis.symbol(),
        );
        let raw_x = self.x_axis.to_raw(x);
        let raw_y = self.y_axis.to_raw(y);
        if raw_x != x || raw_y != y {
            text.push_str(&format!("\nraw: {:.2}, {:.2}", raw_x, raw_y));
        }
        text
    }

    fn x_label_base(&self) -> &str {
        self.x_label
            .split(" (")
            .next()
            .unwrap_or(&self.x_label)
    }

    fn y_label_base(&self) -> &str {
        self.y_label
            .split(" (")
            .next()
            .unwrap_or(&self.y_label)
    }
}

/// Build the config for a prepared chart.
///
/// Failures here are caught per chart by the registry; one bad chart
/// never aborts its siblings.
pub fn build(
    prepared: &PreparedChart,
    index: usize,
    settings: &SettingsStore,
    theme: &ThemeColors,
) -> anyhow::Result<ChartConfig> {
    if prepared.points.is_empty() {
        bail!("prepared chart has no points");
    }

    // Persisted per-field override wins; invalid strings fall back to
    // the theme palette cycled by chart index.
    let color = settings
        .field_color(prepared.kind.field_key())
        .and_then(parse_hex_color)
        .unwrap_or(theme.chart[index % theme.chart.len()]);

    Ok(ChartConfig {
        title: prepared.kind.title(),
        x_label: prepared.x_axis.label(prepared.x_title),
        y_label: prepared.y_axis.label(prepared.y_title),
        color,
        show_grid: settings.bool_option(ChartOptionId::ShowGrid),
        show_legend: settings.bool_option(ChartOptionId::ShowLegend),
        show_title: settings.bool_option(ChartOptionId::ShowTitle),
        show_points: settings.bool_option(ChartOptionId::ShowPoints),
        show_fill: settings.bool_option(ChartOptionId::ShowFill),
        style: settings.chart_style(),
        interpolation: settings.interpolation(),
        x_axis: prepared.x_axis,
        y_axis: prepared.y_axis,
    })
}

/// True when this chart kind renders as bars rather than a line
pub fn is_bar_chart(kind: &ChartKind) -> bool {
    matches!(kind, ChartKind::ZoneBars(_) | ChartKind::LapZoneBars(_))
}

/// True when this chart kind renders as vertical markers
pub fn is_marker_chart(kind: &ChartKind) -> bool {
    matches!(kind, ChartKind::EventMarkers)
}
