//! Tests for the unit conversion and formatting system
//!
//! Tests cover:
//! - Conversion functions and their tooltip inverses
//! - Roundtrip accuracy
//! - Edge cases (negative values, non-finite values)
//! - Display formatting

use fitview::units::{
    format_distance, format_duration, format_time, DistanceUnit, ElevationUnit, SpeedUnit,
    TemperatureUnit, TimeUnit, UnitError,
};

// ============================================
// Distance Conversion Tests
// ============================================

#[test]
fn test_distance_metric() {
    assert_eq!(DistanceUnit::Meters.convert_from_meters(1500.0), 1500.0);
    assert_eq!(DistanceUnit::Kilometers.convert_from_meters(1500.0), 1.5);
}

#[test]
fn test_distance_imperial() {
    assert!((DistanceUnit::Miles.convert_from_meters(1609.344) - 1.0).abs() < 1e-9);
    assert!((DistanceUnit::Feet.convert_from_meters(100.0) - 328.084).abs() < 1e-3);
}

#[test]
fn test_distance_roundtrip_all_units() {
    let distances = [0.0, 0.5, 42.195, 1000.0, 21_097.5, 160_934.4];
    let units = [
        DistanceUnit::Meters,
        DistanceUnit::Kilometers,
        DistanceUnit::Feet,
        DistanceUnit::Miles,
    ];
    for &meters in &distances {
        for &unit in &units {
            let back = unit.to_meters(unit.convert_from_meters(meters));
            assert!(
                (back - meters).abs() < 1e-6,
                "{:?} failed to roundtrip {}",
                unit,
                meters
            );
        }
    }
}

#[test]
fn test_distance_symbols() {
    assert_eq!(DistanceUnit::Meters.symbol(), "m");
    assert_eq!(DistanceUnit::Kilometers.symbol(), "km");
    assert_eq!(DistanceUnit::Feet.symbol(), "ft");
    assert_eq!(DistanceUnit::Miles.symbol(), "mi");
}

#[test]
fn test_distance_storage_roundtrip() {
    for unit in [
        DistanceUnit::Meters,
        DistanceUnit::Kilometers,
        DistanceUnit::Feet,
        DistanceUnit::Miles,
    ] {
        assert_eq!(DistanceUnit::from_storage(unit.storage_value()), Some(unit));
    }
    assert_eq!(DistanceUnit::from_storage("furlongs"), None);
}

// ============================================
// Speed Conversion Tests
// ============================================

#[test]
fn test_speed_kmh() {
    assert!((SpeedUnit::KilometersPerHour.convert_from_mps(10.0) - 36.0).abs() < 1e-9);
}

#[test]
fn test_speed_mph() {
    assert!((SpeedUnit::MilesPerHour.convert_from_mps(10.0) - 22.36936).abs() < 1e-6);
}

#[test]
fn test_speed_tooltip_inverse() {
    for unit in [
        SpeedUnit::MetersPerSecond,
        SpeedUnit::KilometersPerHour,
        SpeedUnit::MilesPerHour,
    ] {
        let displayed = unit.convert_from_mps(8.33);
        assert!((unit.to_mps(displayed) - 8.33).abs() < 1e-9);
    }
}

// ============================================
// Elevation and Temperature Tests
// ============================================

#[test]
fn test_elevation_feet() {
    assert!((ElevationUnit::Feet.convert_from_meters(1000.0) - 3280.84).abs() < 1e-2);
    assert_eq!(ElevationUnit::Meters.convert_from_meters(1000.0), 1000.0);
}

#[test]
fn test_temperature_fahrenheit() {
    assert_eq!(TemperatureUnit::Fahrenheit.convert_from_celsius(0.0), 32.0);
    assert_eq!(TemperatureUnit::Fahrenheit.convert_from_celsius(100.0), 212.0);
    // -40 is the same in both scales
    assert!((TemperatureUnit::Fahrenheit.convert_from_celsius(-40.0) - (-40.0)).abs() < 1e-9);
}

#[test]
fn test_temperature_inverse() {
    let f = TemperatureUnit::Fahrenheit.convert_from_celsius(23.5);
    assert!((TemperatureUnit::Fahrenheit.to_celsius(f) - 23.5).abs() < 1e-9);
}

// ============================================
// Time Axis Tests
// ============================================

#[test]
fn test_time_axis_units() {
    assert_eq!(TimeUnit::Minutes.convert_from_seconds(90.0), 1.5);
    assert_eq!(TimeUnit::Hours.convert_from_seconds(5400.0), 1.5);
    assert_eq!(TimeUnit::Seconds.convert_from_seconds(90.0), 90.0);
}

// ============================================
// Non-finite Handling
// ============================================

#[test]
fn test_non_finite_values_pass_through() {
    assert!(DistanceUnit::Miles.convert_from_meters(f64::NAN).is_nan());
    assert_eq!(
        SpeedUnit::KilometersPerHour.convert_from_mps(f64::INFINITY),
        f64::INFINITY
    );
    assert_eq!(
        TemperatureUnit::Fahrenheit.convert_from_celsius(f64::NEG_INFINITY),
        f64::NEG_INFINITY
    );
}

// ============================================
// Formatting Tests
// ============================================

#[test]
fn test_format_duration_zero() {
    assert_eq!(format_duration(0.0).unwrap(), "0 sec");
}

#[test]
fn test_format_duration_minutes() {
    assert_eq!(format_duration(65.0).unwrap(), "1 min 5 sec");
}

#[test]
fn test_format_duration_hours() {
    assert_eq!(format_duration(3661.0).unwrap(), "1 hr 1 min");
}

#[test]
fn test_format_duration_fractional_is_error() {
    assert_eq!(
        format_duration(1.5),
        Err(UnitError::NonIntegralDuration(1.5))
    );
}

#[test]
fn test_format_duration_negative_is_error() {
    assert_eq!(
        format_duration(-1.0),
        Err(UnitError::NegativeDuration(-1.0))
    );
}

#[test]
fn test_format_distance_dual_units() {
    assert_eq!(format_distance(1000.0), "1.00 km / 0.62 mi");
    assert_eq!(format_distance(42195.0), "42.20 km / 26.22 mi");
}

#[test]
fn test_format_distance_invalid_is_empty() {
    assert_eq!(format_distance(-5.0), "");
    assert_eq!(format_distance(f64::NAN), "");
    assert_eq!(format_distance(f64::INFINITY), "");
}

#[test]
fn test_format_time_clock_style() {
    assert_eq!(format_time(3661.0), "1:01:01");
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(5.25), "5.2s");
    assert_eq!(format_time(-65.0), "-1:05");
}
