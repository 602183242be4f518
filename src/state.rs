//! Core application state types and constants.

use std::path::PathBuf;
use std::time::Duration;

use crate::activity::Activity;

// ============================================================================
// Constants
// ============================================================================

/// Debounce window applied to theme-change chart rebuilds
pub const THEME_REBUILD_DEBOUNCE: Duration = Duration::from_millis(150);

/// Settle delay between a file finishing loading and the first chart build
pub const POST_LOAD_SETTLE: Duration = Duration::from_millis(100);

/// How long a toast stays on screen
pub const TOAST_DURATION_SECS: u64 = 3;

/// File extensions offered by the open dialog (parser JSON exports)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "fitjson"];

// ============================================================================
// Core Types
// ============================================================================

/// A loaded activity with per-field presence flags precomputed on load
#[derive(Clone)]
pub struct LoadedActivity {
    /// Path to the original file
    pub path: PathBuf,
    /// Display name for the file
    pub name: String,
    /// Parsed activity data
    pub activity: Activity,
    /// True when any record carries GPS coordinates
    pub has_gps: bool,
    pub has_power: bool,
    pub has_heart_rate: bool,
    pub has_altitude: bool,
    pub has_speed: bool,
    pub has_temperature: bool,
}

impl LoadedActivity {
    /// Create a new LoadedActivity, computing field presence flags once
    pub fn new(path: PathBuf, name: String, activity: Activity) -> Self {
        let records = &activity.records;
        let has = |f: &dyn Fn(&crate::activity::Record) -> bool| records.iter().any(f);

        Self {
            has_gps: has(&|r| r.position_lat.is_some() && r.position_long.is_some()),
            has_power: has(&|r| r.power.is_some()),
            has_heart_rate: has(&|r| r.heart_rate.is_some()),
            has_altitude: has(&|r| r.altitude_m().is_some()),
            has_speed: has(&|r| r.speed_mps().is_some()),
            has_temperature: has(&|r| r.temperature.is_some()),
            path,
            name,
            activity,
        }
    }

    /// Whether this activity carries data for a settings field key.
    ///
    /// Unknown keys (developer fields) report true so their controls
    /// always show.
    pub fn field_available(&self, key: &str) -> bool {
        let sessions = &self.activity.sessions;
        let laps = &self.activity.laps;
        match key {
            "speed" => self.has_speed,
            "altitude" => self.has_altitude,
            "gps_track" => self.has_gps,
            "power_vs_hr" => self.has_power && self.has_heart_rate,
            "temperature" => self.has_temperature,
            "events" => !self.activity.events.is_empty(),
            "hr_zones" => {
                sessions.iter().any(|s| !s.time_in_hr_zone.is_empty())
                    || laps.iter().any(|l| !l.time_in_hr_zone.is_empty())
            }
            "power_zones" => {
                sessions.iter().any(|s| !s.time_in_power_zone.is_empty())
                    || laps.iter().any(|l| !l.time_in_power_zone.is_empty())
            }
            "lap_hr_zones" => laps.iter().any(|l| !l.time_in_hr_zone.is_empty()),
            "lap_power_zones" => laps.iter().any(|l| !l.time_in_power_zone.is_empty()),
            _ => true,
        }
    }
}

/// Result from background file loading operation
pub enum LoadResult {
    Success(Box<LoadedActivity>),
    Error(String),
}

/// Current state of file loading
pub enum LoadingState {
    /// No loading in progress
    Idle,
    /// Loading a file (contains filename being loaded)
    Loading(String),
}

/// Severity of a toast notification; styling lives with the renderer
#[derive(Clone, Copy, Default)]
pub enum ToastType {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}
