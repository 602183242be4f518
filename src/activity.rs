//! Parsed activity data model.
//!
//! FIT decoding happens upstream: the viewer consumes activities already
//! exported as JSON by the parser, so every field here is optional and
//! read-only. GPS coordinates arrive as raw 32-bit semicircle integers
//! and are converted to degrees on access.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Convert a semicircle-encoded coordinate to degrees.
///
/// Semicircles map the full signed 32-bit range onto ±180°.
pub fn semicircles_to_degrees(semicircles: i32) -> f64 {
    semicircles as f64 * 180.0 / 2_147_483_648.0
}

/// One sample row from an activity file. All fields are optional; devices
/// record wildly different subsets.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
    /// Seconds since activity start
    pub timestamp: Option<f64>,
    /// Speed in m/s
    pub speed: Option<f64>,
    /// Higher-precision speed in m/s, preferred over `speed` when present
    pub enhanced_speed: Option<f64>,
    /// Heart rate in bpm
    pub heart_rate: Option<f64>,
    /// Altitude in meters
    pub altitude: Option<f64>,
    /// Higher-precision altitude in meters
    pub enhanced_altitude: Option<f64>,
    /// Power in watts
    pub power: Option<f64>,
    /// Cadence in rpm
    pub cadence: Option<f64>,
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// Cumulative distance in meters
    pub distance: Option<f64>,
    /// Latitude in semicircles
    pub position_lat: Option<i32>,
    /// Longitude in semicircles
    pub position_long: Option<i32>,
    pub resistance: Option<f64>,
    pub flow: Option<f64>,
    pub grit: Option<f64>,
}

impl Record {
    /// Best available speed in m/s
    pub fn speed_mps(&self) -> Option<f64> {
        self.enhanced_speed.or(self.speed)
    }

    /// Best available altitude in meters
    pub fn altitude_m(&self) -> Option<f64> {
        self.enhanced_altitude.or(self.altitude)
    }

    /// Latitude in degrees, if a position was recorded
    pub fn latitude_deg(&self) -> Option<f64> {
        self.position_lat.map(semicircles_to_degrees)
    }

    /// Longitude in degrees, if a position was recorded
    pub fn longitude_deg(&self) -> Option<f64> {
        self.position_long.map(semicircles_to_degrees)
    }
}

/// Per-session summary, including time-in-zone arrays
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Session {
    pub sport: Option<String>,
    pub total_elapsed_time: Option<f64>,
    pub total_distance: Option<f64>,
    /// Seconds spent in each heart-rate zone, index 0 = zone 1
    pub time_in_hr_zone: Vec<f64>,
    /// Seconds spent in each power zone, index 0 = zone 1
    pub time_in_power_zone: Vec<f64>,
}

/// Per-lap summary
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Lap {
    pub total_elapsed_time: Option<f64>,
    pub total_distance: Option<f64>,
    pub time_in_hr_zone: Vec<f64>,
    pub time_in_power_zone: Vec<f64>,
}

/// Device event (start/stop, alerts, laps)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    /// Seconds since activity start
    pub timestamp: Option<f64>,
    pub event: Option<String>,
    pub event_type: Option<String>,
}

/// A developer-defined field: a named series aligned with `records`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeveloperField {
    pub name: String,
    pub units: Option<String>,
    pub values: Vec<Option<f64>>,
}

/// A fully parsed activity as exported by the upstream FIT parser
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Activity {
    pub records: Vec<Record>,
    pub sessions: Vec<Session>,
    pub laps: Vec<Lap>,
    pub events: Vec<Event>,
    pub developer_fields: Vec<DeveloperField>,
}

impl Activity {
    /// Parse an activity from its JSON export
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load an activity JSON file from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Time range covered by the records, as (min, max) seconds
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for t in self.records.iter().filter_map(|r| r.timestamp) {
            range = Some(match range {
                Some((min, max)) => (min.min(t), max.max(t)),
                None => (t, t),
            });
        }
        range
    }
}
