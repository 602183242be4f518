//! Tests for chart data preparation and configuration
//!
//! Tests cover:
//! - Decimation budgets
//! - Unit conversion during preparation
//! - Hidden and empty charts
//! - Tooltip reverse conversion
//! - Per-chart failure isolation in the registry

use fitview::activity::{Activity, Event, Lap, Record, Session};
use fitview::charts::config;
use fitview::charts::data::{decimate, prepare, ChartKind, ChartPoint};
use fitview::charts::registry::ChartRegistry;
use fitview::settings::{ChartOptionId, MaxPoints, SettingsStore};
use fitview::theme::DARK_THEME;
use fitview::zones::ZoneKind;

fn ride(n: usize) -> Activity {
    Activity {
        records: (0..n)
            .map(|i| Record {
                timestamp: Some(i as f64),
                distance: Some(i as f64 * 10.0),
                speed: Some(5.0 + (i % 10) as f64 * 0.1),
                altitude: Some(120.0 + i as f64 * 0.5),
                heart_rate: Some(110.0 + (i % 60) as f64),
                power: Some(180.0 + (i % 40) as f64),
                ..Record::default()
            })
            .collect(),
        sessions: vec![Session {
            time_in_hr_zone: vec![300.0, 900.0, 600.0, 120.0, 30.0],
            time_in_power_zone: vec![600.0, 800.0, 400.0],
            ..Session::default()
        }],
        events: vec![Event {
            timestamp: Some(30.0),
            event: Some("lap".to_string()),
            ..Event::default()
        }],
        ..Activity::default()
    }
}

// ============================================
// Decimation
// ============================================

#[test]
fn test_decimation_respects_budget() {
    let points: Vec<ChartPoint> = (0..1000)
        .map(|i| ChartPoint {
            x: i as f64,
            y: i as f64,
        })
        .collect();
    let decimated = decimate(points, MaxPoints::Limit(250));
    assert!(decimated.len() <= 250);
    assert_eq!(decimated[0].x, 0.0);
}

#[test]
fn test_decimation_below_budget_is_identity() {
    let points: Vec<ChartPoint> = (0..100)
        .map(|i| ChartPoint {
            x: i as f64,
            y: 0.0,
        })
        .collect();
    assert_eq!(decimate(points.clone(), MaxPoints::Limit(250)), points);
}

#[test]
fn test_decimation_all_keeps_everything() {
    let points: Vec<ChartPoint> = (0..5000)
        .map(|i| ChartPoint {
            x: i as f64,
            y: 0.0,
        })
        .collect();
    assert_eq!(decimate(points, MaxPoints::All).len(), 5000);
}

#[test]
fn test_prepare_applies_decimation_budget() {
    let mut settings = SettingsStore::in_memory();
    settings.set_option(ChartOptionId::MaxPoints, "100");
    let prepared = prepare(&ChartKind::SpeedVsDistance, &ride(1000), &settings).unwrap();
    assert!(prepared.points.len() <= 100);
}

// ============================================
// Preparation and Conversion
// ============================================

#[test]
fn test_prepare_converts_units() {
    let settings = SettingsStore::in_memory();
    let prepared = prepare(&ChartKind::SpeedVsDistance, &ride(10), &settings).unwrap();
    // Distance 90 m -> 0.09 km, speed 5.9 m/s -> 21.24 km/h on the last record
    let last = prepared.points.last().unwrap();
    assert!((last.x - 0.09).abs() < 1e-9);
    assert!((last.y - 5.9 * 3.6).abs() < 1e-9);
}

#[test]
fn test_prepare_skips_records_missing_fields() {
    let activity = Activity {
        records: vec![
            Record {
                distance: Some(10.0),
                speed: Some(5.0),
                ..Record::default()
            },
            Record {
                distance: Some(20.0),
                ..Record::default()
            },
            Record {
                speed: Some(6.0),
                ..Record::default()
            },
        ],
        ..Activity::default()
    };
    let settings = SettingsStore::in_memory();
    let prepared = prepare(&ChartKind::SpeedVsDistance, &activity, &settings).unwrap();
    assert_eq!(prepared.points.len(), 1);
}

#[test]
fn test_prepare_empty_series_is_none() {
    let settings = SettingsStore::in_memory();
    let activity = Activity::default();
    assert!(prepare(&ChartKind::SpeedVsDistance, &activity, &settings).is_none());
    assert!(prepare(&ChartKind::GpsTrack, &activity, &settings).is_none());
}

#[test]
fn test_prepare_hidden_field_is_none() {
    let mut settings = SettingsStore::in_memory();
    settings.set_field_hidden("speed", true);
    assert!(prepare(&ChartKind::SpeedVsDistance, &ride(10), &settings).is_none());
}

#[test]
fn test_prepare_converts_temperature() {
    let activity = Activity {
        records: (0..5)
            .map(|i| Record {
                timestamp: Some(i as f64 * 60.0),
                temperature: Some(20.0 + i as f64),
                ..Record::default()
            })
            .collect(),
        ..Activity::default()
    };
    let mut settings = SettingsStore::in_memory();
    settings.set_option(ChartOptionId::TemperatureUnits, "fahrenheit");
    let prepared = prepare(&ChartKind::TemperatureVsTime, &activity, &settings).unwrap();
    // 20 °C on the first record -> 68 °F
    assert_eq!(prepared.points[0].y, 68.0);
}

#[test]
fn test_zone_bars_carry_labels() {
    let settings = SettingsStore::in_memory();
    let prepared = prepare(
        &ChartKind::ZoneBars(ZoneKind::HeartRate),
        &ride(10),
        &settings,
    )
    .unwrap();
    assert_eq!(prepared.points.len(), 5);
    assert_eq!(prepared.labels[0], "Zone 1");
    assert_eq!(prepared.points[0].y, 300.0);
}

#[test]
fn test_zone_bars_fall_back_to_lap_sums() {
    // No session summaries, two laps with hr zone arrays
    let activity = Activity {
        laps: vec![
            Lap {
                time_in_hr_zone: vec![60.0, 120.0, 30.0],
                ..Lap::default()
            },
            Lap {
                time_in_hr_zone: vec![40.0, 80.0],
                ..Lap::default()
            },
        ],
        ..Activity::default()
    };
    let settings = SettingsStore::in_memory();
    let prepared = prepare(
        &ChartKind::ZoneBars(ZoneKind::HeartRate),
        &activity,
        &settings,
    )
    .unwrap();
    assert_eq!(prepared.points.len(), 3);
    assert_eq!(prepared.points[0].y, 100.0);
    assert_eq!(prepared.points[1].y, 200.0);
    assert_eq!(prepared.points[2].y, 30.0);
}

#[test]
fn test_lap_zone_bars_group_by_lap() {
    let activity = Activity {
        laps: vec![
            Lap {
                time_in_power_zone: vec![100.0, 50.0],
                ..Lap::default()
            },
            Lap {
                time_in_power_zone: vec![30.0, 70.0],
                ..Lap::default()
            },
        ],
        ..Activity::default()
    };
    let settings = SettingsStore::in_memory();
    let prepared = prepare(
        &ChartKind::LapZoneBars(ZoneKind::Power),
        &activity,
        &settings,
    )
    .unwrap();
    // Two laps, two zones each; laps are numbered from 1 on the x axis
    assert_eq!(prepared.points.len(), 4);
    assert_eq!(prepared.points[0].x, 1.0);
    assert_eq!(prepared.points[0].y, 100.0);
    assert_eq!(prepared.points[3].x, 2.0);
    assert_eq!(prepared.points[3].y, 70.0);
    assert_eq!(prepared.labels[0], "Zone 1");
}

#[test]
fn test_lap_zone_bars_without_laps_is_none() {
    let settings = SettingsStore::in_memory();
    assert!(prepare(
        &ChartKind::LapZoneBars(ZoneKind::HeartRate),
        &ride(10),
        &settings
    )
    .is_none());
}

// ============================================
// Configuration and Tooltips
// ============================================

#[test]
fn test_config_tooltip_reverses_conversion() {
    let settings = SettingsStore::in_memory();
    let prepared = prepare(&ChartKind::SpeedVsDistance, &ride(10), &settings).unwrap();
    let cfg = config::build(&prepared, 0, &settings, &DARK_THEME).unwrap();

    // 2 km displayed -> 2000 m raw, 36 km/h displayed -> 10 m/s raw
    let tip = cfg.tooltip(2.0, 36.0);
    assert!(tip.contains("2.00 km"));
    assert!(tip.contains("36.00 km/h"));
    assert!(tip.contains("raw: 2000.00, 10.00"));
}

#[test]
fn test_config_empty_points_is_error() {
    let settings = SettingsStore::in_memory();
    let mut prepared = prepare(&ChartKind::SpeedVsDistance, &ride(10), &settings).unwrap();
    prepared.points.clear();
    assert!(config::build(&prepared, 0, &settings, &DARK_THEME).is_err());
}

// ============================================
// Registry
// ============================================

#[test]
fn test_registry_builds_all_available_charts() {
    let mut registry = ChartRegistry::new();
    let settings = SettingsStore::in_memory();
    registry.rebuild(&ride(100), &settings, &DARK_THEME);
    // speed, altitude, power-vs-hr, events, hr zones, power zones
    // (no GPS coordinates in the fixture)
    assert_eq!(registry.len(), 6);
}

#[test]
fn test_registry_hidden_chart_skipped_siblings_survive() {
    let mut registry = ChartRegistry::new();
    let mut settings = SettingsStore::in_memory();
    settings.set_field_hidden("altitude", true);
    registry.rebuild(&ride(100), &settings, &DARK_THEME);
    assert_eq!(registry.len(), 5);
    assert!(registry
        .charts()
        .iter()
        .all(|c| c.kind != ChartKind::AltitudeProfile));
}

#[test]
fn test_registry_includes_lap_zone_charts_when_laps_present() {
    let mut activity = ride(100);
    activity.laps = vec![
        Lap {
            time_in_hr_zone: vec![100.0, 200.0],
            ..Lap::default()
        },
        Lap {
            time_in_hr_zone: vec![150.0, 150.0],
            ..Lap::default()
        },
    ];
    let mut registry = ChartRegistry::new();
    let settings = SettingsStore::in_memory();
    registry.rebuild(&activity, &settings, &DARK_THEME);
    assert!(registry
        .charts()
        .iter()
        .any(|c| c.kind == ChartKind::LapZoneBars(ZoneKind::HeartRate)));
    // No lap power arrays, so no power-by-lap chart
    assert!(registry
        .charts()
        .iter()
        .all(|c| c.kind != ChartKind::LapZoneBars(ZoneKind::Power)));
}

#[test]
fn test_registry_export_writes_one_png_per_chart() {
    let mut registry = ChartRegistry::new();
    let settings = SettingsStore::in_memory();
    registry.rebuild(&ride(100), &settings, &DARK_THEME);

    let dir = tempfile::tempdir().unwrap();
    let written = registry.export_all(dir.path(), &settings).unwrap();
    assert_eq!(written, registry.len());
    assert!(dir.path().join("speed.png").exists());
    assert!(dir.path().join("hr_zones.png").exists());
}
