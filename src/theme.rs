//! Theme resolution and color palettes.
//!
//! A single `ThemeStore` owns the effective theme. Resolution always runs
//! through [`ThemeStore::resolve`] with one fallback order: explicit
//! override, persisted preference, OS hint, dark. Consumers watch the
//! generation counter instead of listening for ad hoc events, so there is
//! exactly one source of truth for the current theme.

use crate::settings::SettingsStore;

/// Effective color theme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn storage_value(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn from_storage(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
        }
    }
}

/// Palette derived from the effective theme
pub struct ThemeColors {
    pub background: [u8; 3],
    pub panel: [u8; 3],
    pub foreground: [u8; 3],
    pub grid: [u8; 3],
    pub accent: [u8; 3],
    /// Per-series line colors, cycled with modulo
    pub chart: &'static [[u8; 3]],
    /// Default zone bar colors (zone 1 first), cycled with modulo.
    /// Stored as hex so they compare equal to persisted overrides.
    pub zones: &'static [&'static str],
}

/// Chart line palette for the dark theme
const DARK_CHART_COLORS: &[[u8; 3]] = &[
    [100, 149, 237], // Cornflower blue
    [255, 127, 80],  // Coral
    [144, 238, 144], // Light green
    [253, 193, 73],  // Amber
    [204, 121, 167], // Reddish purple
    [86, 180, 233],  // Sky blue
    [246, 247, 235], // Cream
    [240, 98, 146],  // Pink
];

/// Chart line palette for the light theme
const LIGHT_CHART_COLORS: &[[u8; 3]] = &[
    [71, 108, 155],  // Blue
    [191, 78, 48],   // Rust orange
    [113, 120, 78],  // Olive green
    [135, 30, 28],   // Dark red
    [159, 166, 119], // Sage green
    [0, 114, 178],   // Strong blue
    [213, 94, 0],    // Vermillion
    [120, 81, 169],  // Purple
];

/// Zone ramp: recovery through maximum intensity
const DARK_ZONE_COLORS: &[&str] = &["#8D9BA6", "#4FA3D1", "#5BB26B", "#E8B020", "#D94A38"];
const LIGHT_ZONE_COLORS: &[&str] = &["#6B7A85", "#2E7DB0", "#3C8C4C", "#C08A00", "#B53424"];

pub const DARK_THEME: ThemeColors = ThemeColors {
    background: [24, 26, 30],
    panel: [32, 35, 40],
    foreground: [230, 233, 238],
    grid: [60, 64, 70],
    accent: [100, 149, 237],
    chart: DARK_CHART_COLORS,
    zones: DARK_ZONE_COLORS,
};

pub const LIGHT_THEME: ThemeColors = ThemeColors {
    background: [248, 249, 250],
    panel: [255, 255, 255],
    foreground: [28, 32, 38],
    grid: [210, 214, 220],
    accent: [37, 99, 235],
    chart: LIGHT_CHART_COLORS,
    zones: LIGHT_ZONE_COLORS,
};

impl ThemeColors {
    pub fn for_mode(mode: ThemeMode) -> &'static ThemeColors {
        match mode {
            ThemeMode::Light => &LIGHT_THEME,
            ThemeMode::Dark => &DARK_THEME,
        }
    }
}

/// Owner of the effective theme. All resolution goes through `resolve`.
#[derive(Debug, Default)]
pub struct ThemeStore {
    /// Explicit in-session override (user clicked a theme toggle)
    override_mode: Option<ThemeMode>,
    /// Hint from the windowing system, if it reports one
    system_hint: Option<ThemeMode>,
    /// Bumped on every change; consumers re-derive colors when it moves
    generation: u64,
}

impl ThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the effective theme.
    ///
    /// Fallback order: explicit override, persisted preference, OS hint,
    /// then dark.
    pub fn resolve(&self, settings: &SettingsStore) -> ThemeMode {
        self.override_mode
            .or_else(|| settings.theme_preference())
            .or(self.system_hint)
            .unwrap_or(ThemeMode::Dark)
    }

    /// Colors for the currently effective theme
    pub fn colors(&self, settings: &SettingsStore) -> &'static ThemeColors {
        ThemeColors::for_mode(self.resolve(settings))
    }

    /// Set an explicit override, bumping the generation on change
    pub fn set_override(&mut self, mode: Option<ThemeMode>) {
        if self.override_mode != mode {
            self.override_mode = mode;
            self.generation += 1;
        }
    }

    /// Record the OS-reported theme hint
    pub fn set_system_hint(&mut self, mode: Option<ThemeMode>) {
        if self.system_hint != mode {
            self.system_hint = mode;
            self.generation += 1;
        }
    }

    /// Monotonic change counter, observed by chart/settings consumers
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
