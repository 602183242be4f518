//! Heart-rate and power zone summaries and color resolution.
//!
//! Zone colors resolve to a persisted override when one exists, otherwise
//! to the theme zone palette cycled with modulo. Writes are single-writer
//! last-write-wins; there is no conflict resolution to do.

use serde::{Deserialize, Serialize};

use crate::settings::{SettingsStore, KEY_PREFIX};
use crate::theme::ThemeColors;

/// Which zone dimension a chart or color refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    HeartRate,
    Power,
}

impl ZoneKind {
    /// Short prefix used in storage keys (`chartjs_hr_zone_1_color`)
    pub fn key_prefix(&self) -> &'static str {
        match self {
            ZoneKind::HeartRate => "hr",
            ZoneKind::Power => "power",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ZoneKind::HeartRate => "Heart Rate",
            ZoneKind::Power => "Power",
        }
    }
}

/// Time spent in one intensity zone
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneEntry {
    /// 1-based zone number
    pub zone: u32,
    /// Seconds spent in the zone
    pub time: f64,
    pub label: String,
    /// Resolved display color, `#RRGGBB`
    pub color: Option<String>,
}

/// Build zone entries from a parsed time-in-zone array (index 0 = zone 1)
pub fn zone_entries(times: &[f64]) -> Vec<ZoneEntry> {
    times
        .iter()
        .enumerate()
        .map(|(i, &time)| ZoneEntry {
            zone: i as u32 + 1,
            time,
            label: format!("Zone {}", i + 1),
            color: None,
        })
        .collect()
}

/// Storage key for a zone color; `index` is 0-based, keys are 1-based
pub fn zone_color_key(kind: ZoneKind, index: usize) -> String {
    format!("{}{}_zone_{}_color", KEY_PREFIX, kind.key_prefix(), index + 1)
}

/// Resolve the display color for a zone: persisted override first, then
/// the theme palette cycled with modulo
pub fn zone_color(
    store: &SettingsStore,
    theme: &ThemeColors,
    kind: ZoneKind,
    index: usize,
) -> String {
    match store.get_raw(&zone_color_key(kind, index)) {
        Some(color) => color.to_string(),
        None => theme.zones[index % theme.zones.len()].to_string(),
    }
}

/// Persist a zone color override
pub fn save_zone_color(store: &mut SettingsStore, kind: ZoneKind, index: usize, color: &str) {
    store.set_raw(&zone_color_key(kind, index), color);
}

/// Rewrite zone colors `0..count` back to the theme defaults
pub fn reset_zone_colors(
    store: &mut SettingsStore,
    theme: &ThemeColors,
    kind: ZoneKind,
    count: usize,
) {
    for index in 0..count {
        let default = theme.zones[index % theme.zones.len()];
        store.set_raw(&zone_color_key(kind, index), default);
    }
}

/// Attach resolved colors to a set of zone entries
pub fn resolve_entry_colors(
    entries: &mut [ZoneEntry],
    store: &SettingsStore,
    theme: &ThemeColors,
    kind: ZoneKind,
) {
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.color = Some(zone_color(store, theme, kind, index));
    }
}

/// Parse a `#RRGGBB` color string
pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some([r, g, b])
}

/// Format an RGB triple as `#RRGGBB`
pub fn format_hex_color(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}
