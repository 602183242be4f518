//! Registry of rendered charts: insertion-ordered, bulk destroy, bulk
//! PNG export.

use std::path::Path;

use anyhow::Context;
use image::{Rgba, RgbaImage};
use tracing::warn;

use crate::activity::Activity;
use crate::charts::config::{self, ChartConfig};
use crate::charts::data::{self, ChartKind, ChartPoint};
use crate::settings::{ChartOptionId, SettingsStore};
use crate::theme::{ThemeColors, ThemeMode};

/// One chart held by the registry, ready to paint or export
#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub config: ChartConfig,
    pub points: Vec<ChartPoint>,
    pub labels: Vec<String>,
}

/// Insertion-ordered collection of the charts currently on screen
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: Vec<RenderedChart>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild every chart for an activity.
    ///
    /// A failure in one chart is logged and skipped; siblings still
    /// render. Kinds with no data or hidden by settings are silently
    /// absent.
    pub fn rebuild(
        &mut self,
        activity: &Activity,
        settings: &SettingsStore,
        theme: &ThemeColors,
    ) {
        self.charts.clear();
        for (index, kind) in data::available_kinds(activity).iter().enumerate() {
            let Some(prepared) = data::prepare(kind, activity, settings) else {
                continue;
            };
            match config::build(&prepared, index, settings, theme) {
                Ok(cfg) => self.charts.push(RenderedChart {
                    kind: kind.clone(),
                    config: cfg,
                    points: prepared.points,
                    labels: prepared.labels,
                }),
                Err(e) => {
                    warn!(chart = ?kind, error = %e, "chart failed to build");
                }
            }
        }
    }

    pub fn charts(&self) -> &[RenderedChart] {
        &self.charts
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Drop every chart (file closed, theme rebuild pending)
    pub fn destroy_all(&mut self) {
        self.charts.clear();
    }

    /// Export every chart as a PNG into `dir`.
    ///
    /// Returns the number written; the first failure aborts with an error
    /// the caller surfaces as a single notification.
    pub fn export_all(&self, dir: &Path, settings: &SettingsStore) -> anyhow::Result<usize> {
        let theme = export_theme(settings);
        let mut written = 0;
        for chart in &self.charts {
            let name = format!("{}.png", chart.kind.field_key().replace(' ', "_"));
            let path = dir.join(name);
            render_png(chart, &path, theme)
                .with_context(|| format!("exporting {}", chart.config.title))?;
            written += 1;
        }
        Ok(written)
    }
}

/// Background style used for exported images
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExportBackground {
    Light,
    Dark,
    Transparent,
}

fn export_theme(settings: &SettingsStore) -> ExportBackground {
    match settings.option_value(ChartOptionId::ExportTheme).as_str() {
        "light" => ExportBackground::Light,
        "transparent" => ExportBackground::Transparent,
        "dark" => ExportBackground::Dark,
        // "auto" follows the effective display theme
        _ => match settings.theme_preference().unwrap_or(ThemeMode::Dark) {
            ThemeMode::Light => ExportBackground::Light,
            ThemeMode::Dark => ExportBackground::Dark,
        },
    }
}

/// Rasterize one chart into a PNG file
fn render_png(chart: &RenderedChart, path: &Path, background: ExportBackground) -> anyhow::Result<()> {
    let width = 1280u32;
    let height = 720u32;
    let margin = 60u32;

    let (bg, fg) = match background {
        ExportBackground::Light => (Rgba([248, 249, 250, 255]), Rgba([28, 32, 38, 255])),
        ExportBackground::Dark => (Rgba([24, 26, 30, 255]), Rgba([230, 233, 238, 255])),
        ExportBackground::Transparent => (Rgba([0, 0, 0, 0]), Rgba([128, 128, 128, 255])),
    };

    let mut img = RgbaImage::from_pixel(width, height, bg);

    // Plot area border
    let left = margin;
    let right = width - margin;
    let top = margin;
    let bottom = height - margin;
    for x in left..right {
        img.put_pixel(x, top, fg);
        img.put_pixel(x, bottom, fg);
    }
    for y in top..bottom {
        img.put_pixel(left, y, fg);
        img.put_pixel(right, y, fg);
    }

    let (min_x, max_x, min_y, max_y) = bounds(&chart.points);
    // Bars stand on a zero baseline rather than the data minimum
    let min_y = if config::is_bar_chart(&chart.kind) {
        min_y.min(0.0)
    } else {
        min_y
    };
    let span_x = (max_x - min_x).max(f64::EPSILON);
    let span_y = (max_y - min_y).max(f64::EPSILON);

    let color = chart.config.color;
    let line = Rgba([color[0], color[1], color[2], 255]);

    let project = |p: &ChartPoint| -> (i64, i64) {
        let px = left as f64 + (p.x - min_x) / span_x * (right - left) as f64;
        let py = bottom as f64 - (p.y - min_y) / span_y * (bottom - top) as f64;
        (px as i64, py as i64)
    };

    if config::is_bar_chart(&chart.kind) {
        let half_width = ((right - left) as i64 / (chart.points.len().max(1) as i64 * 4)).max(2);
        let baseline = project(&ChartPoint { x: min_x, y: 0.0 }).1;
        for point in &chart.points {
            let (px, py) = project(point);
            for x in (px - half_width)..=(px + half_width) {
                draw_line(&mut img, (x, py), (x, baseline), line);
            }
        }
    } else {
        let mut prev: Option<(i64, i64)> = None;
        for point in &chart.points {
            let (px, py) = project(point);
            if let Some((x0, y0)) = prev {
                draw_line(&mut img, (x0, y0), (px, py), line);
            } else {
                draw_line(&mut img, (px, py), (px, py), line);
            }
            prev = Some((px, py));
        }
    }

    img.save(path).context("writing PNG")?;
    Ok(())
}

fn bounds(points: &[ChartPoint]) -> (f64, f64, f64, f64) {
    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (min_x, max_x, min_y, max_y)
}

/// Bresenham line draw clipped to the image
fn draw_line(img: &mut RgbaImage, from: (i64, i64), to: (i64, i64), color: Rgba<u8>) {
    let (mut x0, mut y0) = from;
    let (x1, y1) = to;
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 && (x0 as u32) < img.width() && (y0 as u32) < img.height() {
            img.put_pixel(x0 as u32, y0 as u32, color);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
