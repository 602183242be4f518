//! Unit preference types and conversion utilities.
//!
//! This module provides user-configurable unit preferences for displaying
//! activity data in various measurement systems (metric, imperial, etc.).
//! Conversions never panic: non-finite input is passed through unchanged
//! with a logged warning.

use strum::EnumIter;
use thiserror::Error;
use tracing::warn;

/// Errors produced by the formatting helpers.
#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    /// `format_duration` only accepts whole, non-negative seconds.
    #[error("duration must be a whole number of seconds, got {0}")]
    NonIntegralDuration(f64),
    /// Negative durations have no display form.
    #[error("duration must be non-negative, got {0}")]
    NegativeDuration(f64),
}

/// Guard for conversion inputs: non-finite values pass through unchanged.
fn checked(value: f64, convert: impl FnOnce(f64) -> f64) -> f64 {
    if value.is_finite() {
        convert(value)
    } else {
        warn!(value, "non-finite value passed to unit conversion");
        value
    }
}

/// Distance unit preference (canonical source unit: meters)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter)]
pub enum DistanceUnit {
    Meters,
    #[default]
    Kilometers,
    Feet,
    Miles,
}

impl DistanceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Feet => "ft",
            DistanceUnit::Miles => "mi",
        }
    }

    /// Value stored in the settings file for this unit
    pub fn storage_value(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "meters",
            DistanceUnit::Kilometers => "kilometers",
            DistanceUnit::Feet => "feet",
            DistanceUnit::Miles => "miles",
        }
    }

    pub fn from_storage(value: &str) -> Option<Self> {
        match value {
            "meters" => Some(DistanceUnit::Meters),
            "kilometers" => Some(DistanceUnit::Kilometers),
            "feet" => Some(DistanceUnit::Feet),
            "miles" => Some(DistanceUnit::Miles),
            _ => None,
        }
    }

    /// Convert from meters to the selected unit
    pub fn convert_from_meters(&self, meters: f64) -> f64 {
        checked(meters, |m| match self {
            DistanceUnit::Meters => m,
            DistanceUnit::Kilometers => m / 1000.0,
            DistanceUnit::Feet => m * 3.28084,
            DistanceUnit::Miles => m / 1609.344,
        })
    }

    /// Convert a displayed value back to meters (used by chart tooltips)
    pub fn to_meters(&self, value: f64) -> f64 {
        checked(value, |v| match self {
            DistanceUnit::Meters => v,
            DistanceUnit::Kilometers => v * 1000.0,
            DistanceUnit::Feet => v / 3.28084,
            DistanceUnit::Miles => v * 1609.344,
        })
    }
}

/// Elevation unit preference (canonical source unit: meters)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElevationUnit {
    #[default]
    Meters,
    Feet,
}

impl ElevationUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            ElevationUnit::Meters => "m",
            ElevationUnit::Feet => "ft",
        }
    }

    pub fn convert_from_meters(&self, meters: f64) -> f64 {
        checked(meters, |m| match self {
            ElevationUnit::Meters => m,
            ElevationUnit::Feet => m * 3.28084,
        })
    }

    pub fn to_meters(&self, value: f64) -> f64 {
        checked(value, |v| match self {
            ElevationUnit::Meters => v,
            ElevationUnit::Feet => v / 3.28084,
        })
    }
}

/// Speed unit preference (canonical source unit: meters per second)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter)]
pub enum SpeedUnit {
    MetersPerSecond,
    #[default]
    KilometersPerHour,
    MilesPerHour,
}

impl SpeedUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            SpeedUnit::MetersPerSecond => "m/s",
            SpeedUnit::KilometersPerHour => "km/h",
            SpeedUnit::MilesPerHour => "mph",
        }
    }

    /// Convert from m/s to the selected unit
    pub fn convert_from_mps(&self, mps: f64) -> f64 {
        checked(mps, |v| match self {
            SpeedUnit::MetersPerSecond => v,
            SpeedUnit::KilometersPerHour => v * 3.6,
            SpeedUnit::MilesPerHour => v * 2.236936,
        })
    }

    /// Convert a displayed value back to m/s (used by chart tooltips)
    pub fn to_mps(&self, value: f64) -> f64 {
        checked(value, |v| match self {
            SpeedUnit::MetersPerSecond => v,
            SpeedUnit::KilometersPerHour => v / 3.6,
            SpeedUnit::MilesPerHour => v / 2.236936,
        })
    }
}

/// Temperature unit preference (canonical source unit: Celsius)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn storage_value(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub fn from_storage(value: &str) -> Option<Self> {
        match value {
            "celsius" => Some(TemperatureUnit::Celsius),
            "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            _ => None,
        }
    }

    /// Convert from Celsius to the selected unit
    pub fn convert_from_celsius(&self, celsius: f64) -> f64 {
        checked(celsius, |c| match self {
            TemperatureUnit::Celsius => c,
            TemperatureUnit::Fahrenheit => c * 9.0 / 5.0 + 32.0,
        })
    }

    pub fn to_celsius(&self, value: f64) -> f64 {
        checked(value, |v| match self {
            TemperatureUnit::Celsius => v,
            TemperatureUnit::Fahrenheit => (v - 32.0) * 5.0 / 9.0,
        })
    }
}

/// Time axis unit preference (canonical source unit: seconds)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter)]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
    Hours,
}

impl TimeUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "min",
            TimeUnit::Hours => "h",
        }
    }

    pub fn storage_value(&self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
        }
    }

    pub fn from_storage(value: &str) -> Option<Self> {
        match value {
            "seconds" => Some(TimeUnit::Seconds),
            "minutes" => Some(TimeUnit::Minutes),
            "hours" => Some(TimeUnit::Hours),
            _ => None,
        }
    }

    /// Convert from seconds to the selected unit
    pub fn convert_from_seconds(&self, seconds: f64) -> f64 {
        checked(seconds, |s| match self {
            TimeUnit::Seconds => s,
            TimeUnit::Minutes => s / 60.0,
            TimeUnit::Hours => s / 3600.0,
        })
    }

    pub fn to_seconds(&self, value: f64) -> f64 {
        checked(value, |v| match self {
            TimeUnit::Seconds => v,
            TimeUnit::Minutes => v * 60.0,
            TimeUnit::Hours => v * 3600.0,
        })
    }
}

/// Format a duration as a coarse human-readable string.
///
/// `0` → `"0 sec"`, `65` → `"1 min 5 sec"`, `3661` → `"1 hr 1 min"`.
/// Unlike the other formatters this one is strict: non-integral or
/// negative input is an error rather than an empty string.
pub fn format_duration(seconds: f64) -> Result<String, UnitError> {
    if !seconds.is_finite() || seconds.fract() != 0.0 {
        return Err(UnitError::NonIntegralDuration(seconds));
    }
    if seconds < 0.0 {
        return Err(UnitError::NegativeDuration(seconds));
    }

    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    Ok(if hours > 0 {
        format!("{} hr {} min", hours, minutes)
    } else if minutes > 0 {
        format!("{} min {} sec", minutes, secs)
    } else {
        format!("{} sec", secs)
    })
}

/// Format a distance in meters as a dual metric/imperial string.
///
/// `1000` → `"1.00 km / 0.62 mi"`. Negative or non-finite input yields
/// an empty string.
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() || meters < 0.0 {
        warn!(meters, "invalid distance passed to format_distance");
        return String::new();
    }
    format!("{:.2} km / {:.2} mi", meters / 1000.0, meters / 1609.344)
}

/// Format time in seconds to a clock-style string (h:mm:ss, m:ss or s.x)
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        warn!(seconds, "invalid time passed to format_time");
        return String::new();
    }

    let total_seconds = seconds.abs();
    let hours = (total_seconds / 3600.0).floor() as u32;
    let minutes = ((total_seconds % 3600.0) / 60.0).floor() as u32;
    let secs = (total_seconds % 60.0).floor() as u32;

    let sign = if seconds < 0.0 { "-" } else { "" };

    if hours > 0 {
        format!("{}{}:{:02}:{:02}", sign, hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}{}:{:02}", sign, minutes, secs)
    } else {
        format!("{}{:.1}s", sign, total_seconds % 60.0)
    }
}
