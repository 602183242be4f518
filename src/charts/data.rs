//! Per-kind chart data preparation: filter, map, convert, decimate.

use tracing::debug;

use crate::activity::Activity;
use crate::settings::{MaxPoints, SettingsStore};
use crate::units::{DistanceUnit, ElevationUnit, SpeedUnit, TemperatureUnit, TimeUnit};
use crate::zones::{self, ZoneKind};

/// A renderable chart variety
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChartKind {
    SpeedVsDistance,
    AltitudeProfile,
    GpsTrack,
    PowerVsHeartRate,
    TemperatureVsTime,
    EventMarkers,
    /// Developer-defined field, addressed by name
    DeveloperField(String),
    /// Whole-activity zone totals (session arrays, lap sums as fallback)
    ZoneBars(ZoneKind),
    /// Stacked per-lap zone breakdown
    LapZoneBars(ZoneKind),
}

impl ChartKind {
    /// Field name used for per-field settings keys (hidden flag, color)
    pub fn field_key(&self) -> &str {
        match self {
            ChartKind::SpeedVsDistance => "speed",
            ChartKind::AltitudeProfile => "altitude",
            ChartKind::GpsTrack => "gps_track",
            ChartKind::PowerVsHeartRate => "power_vs_hr",
            ChartKind::TemperatureVsTime => "temperature",
            ChartKind::EventMarkers => "events",
            ChartKind::DeveloperField(name) => name,
            ChartKind::ZoneBars(ZoneKind::HeartRate) => "hr_zones",
            ChartKind::ZoneBars(ZoneKind::Power) => "power_zones",
            ChartKind::LapZoneBars(ZoneKind::HeartRate) => "lap_hr_zones",
            ChartKind::LapZoneBars(ZoneKind::Power) => "lap_power_zones",
        }
    }

    pub fn title(&self) -> String {
        match self {
            ChartKind::SpeedVsDistance => "Speed".to_string(),
            ChartKind::AltitudeProfile => "Altitude Profile".to_string(),
            ChartKind::GpsTrack => "GPS Track".to_string(),
            ChartKind::PowerVsHeartRate => "Power vs Heart Rate".to_string(),
            ChartKind::TemperatureVsTime => "Temperature".to_string(),
            ChartKind::EventMarkers => "Events".to_string(),
            ChartKind::DeveloperField(name) => name.clone(),
            ChartKind::ZoneBars(kind) => format!("Time in {} Zones", kind.label()),
            ChartKind::LapZoneBars(kind) => format!("{} Zones by Lap", kind.label()),
        }
    }
}

/// One plotted point, already in display units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

/// Conversion applied to one axis, kept so tooltips can re-derive the
/// raw value from a plotted one
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AxisUnits {
    /// Plotted as-is; the unit symbol (possibly empty) is for labels only
    Raw(&'static str),
    Distance(DistanceUnit),
    Speed(SpeedUnit),
    Elevation(ElevationUnit),
    Temperature(TemperatureUnit),
    Time(TimeUnit),
    Degrees,
}

impl AxisUnits {
    pub fn symbol(&self) -> &'static str {
        match self {
            AxisUnits::Raw(symbol) => symbol,
            AxisUnits::Distance(u) => u.symbol(),
            AxisUnits::Speed(u) => u.symbol(),
            AxisUnits::Elevation(u) => u.symbol(),
            AxisUnits::Temperature(u) => u.symbol(),
            AxisUnits::Time(u) => u.symbol(),
            AxisUnits::Degrees => "°",
        }
    }

    /// Reverse-convert a displayed value back to the raw source unit
    pub fn to_raw(&self, value: f64) -> f64 {
        match self {
            AxisUnits::Raw(_) | AxisUnits::Degrees => value,
            AxisUnits::Distance(u) => u.to_meters(value),
            AxisUnits::Speed(u) => u.to_mps(value),
            AxisUnits::Elevation(u) => u.to_meters(value),
            AxisUnits::Temperature(u) => u.to_celsius(value),
            AxisUnits::Time(u) => u.to_seconds(value),
        }
    }

    /// Axis label such as `"Distance (km)"`
    pub fn label(&self, base: &str) -> String {
        let symbol = self.symbol();
        if symbol.is_empty() {
            base.to_string()
        } else {
            format!("{} ({})", base, symbol)
        }
    }
}

/// A filtered, converted, decimated series ready for configuration
#[derive(Clone, Debug)]
pub struct PreparedChart {
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
    /// Per-point labels for marker/bar charts, empty otherwise
    pub labels: Vec<String>,
    pub x_axis: AxisUnits,
    pub y_axis: AxisUnits,
    pub x_title: &'static str,
    pub y_title: &'static str,
}

/// Uniform stride decimation.
///
/// Keeps every `ceil(len / max)`-th point, first point always included,
/// no interpolation. `MaxPoints::All` disables decimation.
pub fn decimate(points: Vec<ChartPoint>, max: MaxPoints) -> Vec<ChartPoint> {
    let limit = match max {
        MaxPoints::All => return points,
        MaxPoints::Limit(n) => n,
    };
    if limit == 0 || points.len() <= limit {
        return points;
    }
    let step = points.len().div_ceil(limit);
    points.into_iter().step_by(step).collect()
}

/// Centered moving average over y values; `window == 0` is a no-op
fn smooth(points: &mut [ChartPoint], window: u32) {
    if window == 0 || points.len() < 3 {
        return;
    }
    let half = window as usize;
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    for (i, point) in points.iter_mut().enumerate() {
        let start = i.saturating_sub(half);
        let end = (i + half + 1).min(ys.len());
        let slice = &ys[start..end];
        point.y = slice.iter().sum::<f64>() / slice.len() as f64;
    }
}

/// Prepare one chart's series from an activity.
///
/// Returns `None` when the field is hidden in settings or no record has
/// the required fields; neither case is an error.
pub fn prepare(
    kind: &ChartKind,
    activity: &Activity,
    settings: &SettingsStore,
) -> Option<PreparedChart> {
    if settings.field_hidden(kind.field_key()) {
        debug!(field = kind.field_key(), "chart hidden by settings");
        return None;
    }

    let mut labels = Vec::new();
    let distance_units = settings.distance_units();
    let speed_units = settings.speed_units();
    let elevation_units = settings.elevation_units();
    let temperature_units = settings.temperature_units();
    let time_units = settings.time_units();

    let (mut points, x_axis, y_axis, x_title, y_title) = match kind {
        ChartKind::SpeedVsDistance => {
            let points: Vec<ChartPoint> = activity
                .records
                .iter()
                .filter_map(|r| {
                    let distance = r.distance?;
                    let speed = r.speed_mps()?;
                    Some(ChartPoint {
                        x: distance_units.convert_from_meters(distance),
                        y: speed_units.convert_from_mps(speed),
                    })
                })
                .collect();
            (
                points,
                AxisUnits::Distance(distance_units),
                AxisUnits::Speed(speed_units),
                "Distance",
                "Speed",
            )
        }
        ChartKind::AltitudeProfile => {
            let points: Vec<ChartPoint> = activity
                .records
                .iter()
                .filter_map(|r| {
                    let distance = r.distance?;
                    let altitude = r.altitude_m()?;
                    Some(ChartPoint {
                        x: distance_units.convert_from_meters(distance),
                        y: elevation_units.convert_from_meters(altitude),
                    })
                })
                .collect();
            (
                points,
                AxisUnits::Distance(distance_units),
                AxisUnits::Elevation(elevation_units),
                "Distance",
                "Altitude",
            )
        }
        ChartKind::GpsTrack => {
            let points: Vec<ChartPoint> = activity
                .records
                .iter()
                .filter_map(|r| {
                    Some(ChartPoint {
                        x: r.longitude_deg()?,
                        y: r.latitude_deg()?,
                    })
                })
                .collect();
            (
                points,
                AxisUnits::Degrees,
                AxisUnits::Degrees,
                "Longitude",
                "Latitude",
            )
        }
        ChartKind::PowerVsHeartRate => {
            let points: Vec<ChartPoint> = activity
                .records
                .iter()
                .filter_map(|r| {
                    Some(ChartPoint {
                        x: r.heart_rate?,
                        y: r.power?,
                    })
                })
                .collect();
            (
                points,
                AxisUnits::Raw("bpm"),
                AxisUnits::Raw("W"),
                "Heart Rate",
                "Power",
            )
        }
        ChartKind::TemperatureVsTime => {
            let points: Vec<ChartPoint> = activity
                .records
                .iter()
                .filter_map(|r| {
                    Some(ChartPoint {
                        x: time_units.convert_from_seconds(r.timestamp?),
                        y: temperature_units.convert_from_celsius(r.temperature?),
                    })
                })
                .collect();
            (
                points,
                AxisUnits::Time(time_units),
                AxisUnits::Temperature(temperature_units),
                "Time",
                "Temperature",
            )
        }
        ChartKind::EventMarkers => {
            let mut points = Vec::new();
            for event in &activity.events {
                let Some(timestamp) = event.timestamp else {
                    continue;
                };
                points.push(ChartPoint {
                    x: time_units.convert_from_seconds(timestamp),
                    y: 0.0,
                });
                labels.push(
                    event
                        .event
                        .clone()
                        .unwrap_or_else(|| "event".to_string()),
                );
            }
            (
                points,
                AxisUnits::Time(time_units),
                AxisUnits::Raw(""),
                "Time",
                "",
            )
        }
        ChartKind::DeveloperField(name) => {
            let field = activity
                .developer_fields
                .iter()
                .find(|f| &f.name == name)?;
            let points: Vec<ChartPoint> = activity
                .records
                .iter()
                .zip(field.values.iter())
                .filter_map(|(record, value)| {
                    Some(ChartPoint {
                        x: time_units.convert_from_seconds(record.timestamp?),
                        y: (*value)?,
                    })
                })
                .collect();
            (
                points,
                AxisUnits::Time(time_units),
                AxisUnits::Raw(""),
                "Time",
                "Value",
            )
        }
        ChartKind::ZoneBars(zone_kind) => {
            // Sessions carry the activity totals; files without session
            // summaries still chart via summed lap arrays
            let times = session_zone_times(activity, *zone_kind)
                .unwrap_or_else(|| lap_zone_totals(activity, *zone_kind));
            let entries = zones::zone_entries(&times);
            let points: Vec<ChartPoint> = entries
                .iter()
                .map(|e| ChartPoint {
                    x: e.zone as f64,
                    y: e.time,
                })
                .collect();
            labels = entries.into_iter().map(|e| e.label).collect();
            (
                points,
                AxisUnits::Raw(""),
                AxisUnits::Raw("s"),
                "Zone",
                "Time",
            )
        }
        ChartKind::LapZoneBars(zone_kind) => {
            let mut points = Vec::new();
            for (lap_index, lap) in activity.laps.iter().enumerate() {
                let times = match zone_kind {
                    ZoneKind::HeartRate => &lap.time_in_hr_zone,
                    ZoneKind::Power => &lap.time_in_power_zone,
                };
                for entry in zones::zone_entries(times) {
                    points.push(ChartPoint {
                        x: (lap_index + 1) as f64,
                        y: entry.time,
                    });
                    labels.push(entry.label);
                }
            }
            (
                points,
                AxisUnits::Raw(""),
                AxisUnits::Raw("s"),
                "Lap",
                "Time",
            )
        }
    };

    let zone_chart = matches!(kind, ChartKind::ZoneBars(_) | ChartKind::LapZoneBars(_));
    if points.is_empty() || zone_chart && points.iter().all(|p| p.y == 0.0) {
        debug!(field = kind.field_key(), "no data for chart, skipping");
        return None;
    }

    // Smoothing and decimation only make sense for record-derived series
    let record_series = !zone_chart && !matches!(kind, ChartKind::EventMarkers);
    if record_series {
        smooth(&mut points, settings.smoothing());
        points = decimate(points, settings.max_points());
    }

    Some(PreparedChart {
        kind: kind.clone(),
        points,
        labels,
        x_axis,
        y_axis,
        x_title,
        y_title,
    })
}

/// First non-empty session time-in-zone array for a kind
fn session_zone_times(activity: &Activity, kind: ZoneKind) -> Option<Vec<f64>> {
    activity
        .sessions
        .iter()
        .map(|s| match kind {
            ZoneKind::HeartRate => &s.time_in_hr_zone,
            ZoneKind::Power => &s.time_in_power_zone,
        })
        .find(|times| !times.is_empty())
        .cloned()
}

/// Elementwise sum of the lap zone arrays
fn lap_zone_totals(activity: &Activity, kind: ZoneKind) -> Vec<f64> {
    let mut totals: Vec<f64> = Vec::new();
    for lap in &activity.laps {
        let times = match kind {
            ZoneKind::HeartRate => &lap.time_in_hr_zone,
            ZoneKind::Power => &lap.time_in_power_zone,
        };
        if times.len() > totals.len() {
            totals.resize(times.len(), 0.0);
        }
        for (total, time) in totals.iter_mut().zip(times) {
            *total += time;
        }
    }
    totals
}

/// The charts a given activity can produce, in display order
pub fn available_kinds(activity: &Activity) -> Vec<ChartKind> {
    let mut kinds = vec![
        ChartKind::SpeedVsDistance,
        ChartKind::AltitudeProfile,
        ChartKind::GpsTrack,
        ChartKind::PowerVsHeartRate,
        ChartKind::TemperatureVsTime,
        ChartKind::EventMarkers,
    ];
    for field in &activity.developer_fields {
        kinds.push(ChartKind::DeveloperField(field.name.clone()));
    }
    kinds.push(ChartKind::ZoneBars(ZoneKind::HeartRate));
    kinds.push(ChartKind::ZoneBars(ZoneKind::Power));
    kinds.push(ChartKind::LapZoneBars(ZoneKind::HeartRate));
    kinds.push(ChartKind::LapZoneBars(ZoneKind::Power));
    kinds
}
