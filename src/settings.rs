//! Chart option catalog and persisted settings store.
//!
//! Every configurable chart option is a [`ChartOptionId`] with a label,
//! a kind, its allowed values and a static default. Persistence is a flat
//! string key/value map written as JSON under the platform config dir;
//! keys are derived in exactly one place (`ChartOptionId::storage_key`),
//! so a typo'd key cannot exist. Every read falls back to the static
//! default when the stored value is absent or unparsable.

use std::collections::BTreeMap;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value;
use strum::EnumIter;
use tracing::warn;

use crate::theme::ThemeMode;
use crate::units::{DistanceUnit, ElevationUnit, SpeedUnit, TemperatureUnit, TimeUnit};

/// Prefix shared by every chart-related key, kept for compatibility with
/// the settings files written by earlier releases.
pub const KEY_PREFIX: &str = "chartjs_";

/// Widget class of a chart option
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Select,
    Toggle,
    Range,
}

/// Identifier for every configurable chart option
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum ChartOptionId {
    MaxPoints,
    ChartType,
    Interpolation,
    Animation,
    ExportTheme,
    ShowGrid,
    ShowLegend,
    ShowTitle,
    ShowPoints,
    ShowFill,
    Smoothing,
    TimeUnits,
    DistanceUnits,
    TemperatureUnits,
}

impl ChartOptionId {
    /// Key suffix as written by the original settings files
    pub fn key_suffix(&self) -> &'static str {
        match self {
            ChartOptionId::MaxPoints => "maxpoints",
            ChartOptionId::ChartType => "chartType",
            ChartOptionId::Interpolation => "interpolation",
            ChartOptionId::Animation => "animation",
            ChartOptionId::ExportTheme => "exportTheme",
            ChartOptionId::ShowGrid => "showGrid",
            ChartOptionId::ShowLegend => "showLegend",
            ChartOptionId::ShowTitle => "showTitle",
            ChartOptionId::ShowPoints => "showPoints",
            ChartOptionId::ShowFill => "showFill",
            ChartOptionId::Smoothing => "smoothing",
            ChartOptionId::TimeUnits => "timeUnits",
            ChartOptionId::DistanceUnits => "distanceUnits",
            ChartOptionId::TemperatureUnits => "temperatureUnits",
        }
    }

    /// Full storage key, the only place keys are built
    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.key_suffix())
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartOptionId::MaxPoints => "Max points",
            ChartOptionId::ChartType => "Chart type",
            ChartOptionId::Interpolation => "Interpolation",
            ChartOptionId::Animation => "Animation",
            ChartOptionId::ExportTheme => "Export theme",
            ChartOptionId::ShowGrid => "Show grid",
            ChartOptionId::ShowLegend => "Show legend",
            ChartOptionId::ShowTitle => "Show title",
            ChartOptionId::ShowPoints => "Show points",
            ChartOptionId::ShowFill => "Show fill",
            ChartOptionId::Smoothing => "Smoothing",
            ChartOptionId::TimeUnits => "Time units",
            ChartOptionId::DistanceUnits => "Distance units",
            ChartOptionId::TemperatureUnits => "Temperature units",
        }
    }

    pub fn kind(&self) -> OptionKind {
        match self {
            ChartOptionId::MaxPoints
            | ChartOptionId::ChartType
            | ChartOptionId::Interpolation
            | ChartOptionId::Animation
            | ChartOptionId::ExportTheme
            | ChartOptionId::TimeUnits
            | ChartOptionId::DistanceUnits
            | ChartOptionId::TemperatureUnits => OptionKind::Select,
            ChartOptionId::ShowGrid
            | ChartOptionId::ShowLegend
            | ChartOptionId::ShowTitle
            | ChartOptionId::ShowPoints
            | ChartOptionId::ShowFill => OptionKind::Toggle,
            ChartOptionId::Smoothing => OptionKind::Range,
        }
    }

    /// Allowed stored values for select options; empty for toggles/ranges
    pub fn allowed_values(&self) -> &'static [&'static str] {
        match self {
            ChartOptionId::MaxPoints => &["100", "250", "500", "1000", "5000", "all"],
            ChartOptionId::ChartType => &["line", "bar", "area"],
            ChartOptionId::Interpolation => &["linear", "step"],
            ChartOptionId::Animation => &["smooth", "fast", "none"],
            ChartOptionId::ExportTheme => &["auto", "light", "dark", "transparent"],
            ChartOptionId::TimeUnits => &["seconds", "minutes", "hours"],
            ChartOptionId::DistanceUnits => &["meters", "kilometers", "feet", "miles"],
            ChartOptionId::TemperatureUnits => &["celsius", "fahrenheit"],
            _ => &[],
        }
    }

    /// Static default every read falls back to
    pub fn default_value(&self) -> &'static str {
        match self {
            ChartOptionId::MaxPoints => "250",
            ChartOptionId::ChartType => "line",
            ChartOptionId::Interpolation => "linear",
            ChartOptionId::Animation => "smooth",
            ChartOptionId::ExportTheme => "auto",
            ChartOptionId::ShowGrid => "on",
            ChartOptionId::ShowLegend => "on",
            ChartOptionId::ShowTitle => "on",
            ChartOptionId::ShowPoints => "off",
            ChartOptionId::ShowFill => "off",
            ChartOptionId::Smoothing => "0",
            ChartOptionId::TimeUnits => "seconds",
            ChartOptionId::DistanceUnits => "kilometers",
            ChartOptionId::TemperatureUnits => "celsius",
        }
    }
}

/// Rendering style for record-derived series
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChartStyle {
    #[default]
    Line,
    Bar,
    Area,
}

/// Segment shape between plotted points
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
}

/// Decimation budget for chart series
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaxPoints {
    Limit(usize),
    All,
}

/// Unit dimensions a symbol can be requested for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Distance,
    Speed,
    Elevation,
    Temperature,
    Time,
}

/// Persisted key/value settings with typed accessors.
///
/// Storage failure is never fatal: a store that cannot load or save simply
/// behaves as if nothing were persisted.
#[derive(Debug)]
pub struct SettingsStore {
    values: BTreeMap<String, String>,
    /// None for in-memory stores (tests, storage unavailable)
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Get the config directory path for FitView
    pub fn config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("FitView"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("FitView"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::config_dir().map(|p| p.join("fitview"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk, falling back to defaults on any failure
    pub fn load() -> Self {
        let path = Self::settings_path();
        let values = match &path {
            Some(p) if p.exists() => match std::fs::read_to_string(p) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                    warn!(error = %e, "settings file corrupt, using defaults");
                    BTreeMap::new()
                }),
                Err(e) => {
                    warn!(error = %e, "failed to read settings file");
                    BTreeMap::new()
                }
            },
            _ => BTreeMap::new(),
        };
        Self { values, path }
    }

    /// A store that never touches disk (tests, storage unavailable)
    pub fn in_memory() -> Self {
        Self {
            values: BTreeMap::new(),
            path: None,
        }
    }

    /// Save settings to disk. In-memory stores are a no-op.
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(&self.values)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content).map_err(|e| format!("Failed to write settings file: {}", e))
    }

    // ------------------------------------------------------------------
    // Raw access (used by the zone color resolver)
    // ------------------------------------------------------------------

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn remove_raw(&mut self, key: &str) {
        self.values.remove(key);
    }

    // ------------------------------------------------------------------
    // Chart options
    // ------------------------------------------------------------------

    /// Stored value for an option, or its static default
    pub fn option_value(&self, id: ChartOptionId) -> String {
        match self.get_raw(&id.storage_key()) {
            Some(v) => v.to_string(),
            None => id.default_value().to_string(),
        }
    }

    pub fn set_option(&mut self, id: ChartOptionId, value: &str) {
        self.set_raw(&id.storage_key(), value);
    }

    /// Toggle option as a bool. Unknown stored values fall back to the
    /// option default.
    pub fn bool_option(&self, id: ChartOptionId) -> bool {
        let parse = |v: &str| match v {
            "on" | "true" | "1" => Some(true),
            "off" | "false" | "0" => Some(false),
            _ => None,
        };
        match self.get_raw(&id.storage_key()).and_then(parse) {
            Some(b) => b,
            None => parse(id.default_value()).unwrap_or(false),
        }
    }

    pub fn set_bool_option(&mut self, id: ChartOptionId, value: bool) {
        self.set_option(id, if value { "on" } else { "off" });
    }

    /// Decimation budget; `"all"` disables decimation entirely
    pub fn max_points(&self) -> MaxPoints {
        let raw = self.option_value(ChartOptionId::MaxPoints);
        if raw == "all" {
            return MaxPoints::All;
        }
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => MaxPoints::Limit(n),
            _ => {
                warn!(value = %raw, "invalid maxpoints setting, using default");
                MaxPoints::Limit(250)
            }
        }
    }

    /// Rendering style for record-derived series
    pub fn chart_style(&self) -> ChartStyle {
        match self.option_value(ChartOptionId::ChartType).as_str() {
            "bar" => ChartStyle::Bar,
            "area" => ChartStyle::Area,
            _ => ChartStyle::Line,
        }
    }

    /// Segment shape between plotted points. Values persisted by older
    /// builds that are no longer offered read back as linear.
    pub fn interpolation(&self) -> Interpolation {
        match self.option_value(ChartOptionId::Interpolation).as_str() {
            "step" => Interpolation::Step,
            _ => Interpolation::Linear,
        }
    }

    /// Smoothing window, clamped to the 0..=10 range of the option
    pub fn smoothing(&self) -> u32 {
        self.option_value(ChartOptionId::Smoothing)
            .parse::<u32>()
            .map(|n| n.min(10))
            .unwrap_or(0)
    }

    pub fn distance_units(&self) -> DistanceUnit {
        DistanceUnit::from_storage(&self.option_value(ChartOptionId::DistanceUnits))
            .unwrap_or_default()
    }

    pub fn temperature_units(&self) -> TemperatureUnit {
        TemperatureUnit::from_storage(&self.option_value(ChartOptionId::TemperatureUnits))
            .unwrap_or_default()
    }

    pub fn time_units(&self) -> TimeUnit {
        TimeUnit::from_storage(&self.option_value(ChartOptionId::TimeUnits)).unwrap_or_default()
    }

    /// Speed units follow the distance preference: imperial distance
    /// selects mph, everything else km/h.
    pub fn speed_units(&self) -> SpeedUnit {
        match self.distance_units() {
            DistanceUnit::Feet | DistanceUnit::Miles => SpeedUnit::MilesPerHour,
            DistanceUnit::Meters | DistanceUnit::Kilometers => SpeedUnit::KilometersPerHour,
        }
    }

    /// Elevation units likewise follow the distance preference
    pub fn elevation_units(&self) -> ElevationUnit {
        match self.distance_units() {
            DistanceUnit::Feet | DistanceUnit::Miles => ElevationUnit::Feet,
            DistanceUnit::Meters | DistanceUnit::Kilometers => ElevationUnit::Meters,
        }
    }

    /// Display symbol for a unit dimension, reflecting the current
    /// preference without restart
    pub fn unit_symbol(&self, kind: UnitKind) -> &'static str {
        match kind {
            UnitKind::Distance => self.distance_units().symbol(),
            UnitKind::Speed => self.speed_units().symbol(),
            UnitKind::Elevation => self.elevation_units().symbol(),
            UnitKind::Temperature => self.temperature_units().symbol(),
            UnitKind::Time => self.time_units().symbol(),
        }
    }

    // ------------------------------------------------------------------
    // Per-field settings
    // ------------------------------------------------------------------

    fn color_key(field: &str) -> String {
        format!("{}color_{}", KEY_PREFIX, field)
    }

    fn field_key(field: &str) -> String {
        format!("{}field_{}", KEY_PREFIX, field)
    }

    /// Persisted line color override for a field, as `#RRGGBB`
    pub fn field_color(&self, field: &str) -> Option<&str> {
        self.get_raw(&Self::color_key(field))
    }

    pub fn set_field_color(&mut self, field: &str, color: &str) {
        self.set_raw(&Self::color_key(field), color);
    }

    /// Whether a field's chart is suppressed
    pub fn field_hidden(&self, field: &str) -> bool {
        self.get_raw(&Self::field_key(field)) == Some("hidden")
    }

    pub fn set_field_hidden(&mut self, field: &str, hidden: bool) {
        if hidden {
            self.set_raw(&Self::field_key(field), "hidden");
        } else {
            self.remove_raw(&Self::field_key(field));
        }
    }

    // ------------------------------------------------------------------
    // Theme preference (not under the chartjs_ prefix: survives reset)
    // ------------------------------------------------------------------

    pub fn theme_preference(&self) -> Option<ThemeMode> {
        self.get_raw("theme").and_then(ThemeMode::from_storage)
    }

    pub fn set_theme_preference(&mut self, mode: ThemeMode) {
        self.set_raw("theme", mode.storage_value());
    }

    // ------------------------------------------------------------------
    // Reset & shared configuration
    // ------------------------------------------------------------------

    /// Remove every chart-related key. Idempotent: a second reset leaves
    /// the same (empty) persisted state.
    pub fn reset_all(&mut self) {
        self.values.retain(|k, _| !k.starts_with(KEY_PREFIX));
    }

    /// Export the current chart configuration as a base64-encoded JSON
    /// blob suitable for a share link
    pub fn export_shared(&self) -> String {
        let map: BTreeMap<&str, &str> = self
            .values
            .iter()
            .filter(|(k, _)| k.starts_with(KEY_PREFIX))
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        // serializing a string map cannot fail
        let json = serde_json::to_string(&map).unwrap_or_default();
        BASE64.encode(json)
    }

    /// Fan a shared configuration blob out into the persisted keys.
    ///
    /// Keys may be full storage keys or bare option suffixes; string,
    /// number and bool values are accepted. Returns the number of keys
    /// applied.
    pub fn import_shared(&mut self, encoded: &str) -> anyhow::Result<usize> {
        let bytes = BASE64.decode(encoded.trim())?;
        let json: Value = serde_json::from_slice(&bytes)?;
        let Value::Object(map) = json else {
            anyhow::bail!("shared configuration is not a JSON object");
        };

        let mut applied = 0;
        for (key, value) in map {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => if b { "on" } else { "off" }.to_string(),
                other => {
                    warn!(key, ?other, "skipping non-scalar shared config value");
                    continue;
                }
            };
            let full_key = if key.starts_with(KEY_PREFIX) {
                key
            } else {
                format!("{}{}", KEY_PREFIX, key)
            };
            self.set_raw(&full_key, &value);
            applied += 1;
        }
        Ok(applied)
    }
}
