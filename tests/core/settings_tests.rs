//! Tests for chart settings persistence
//!
//! Tests cover:
//! - Defaults and storage key derivation
//! - Unit preference reflection
//! - Reset behavior
//! - Shared configuration export/import

use fitview::settings::{
    ChartOptionId, ChartStyle, Interpolation, MaxPoints, SettingsStore, UnitKind, KEY_PREFIX,
};
use fitview::theme::ThemeMode;
use fitview::units::{DistanceUnit, TemperatureUnit};
use strum::IntoEnumIterator;

// ============================================
// Defaults and Keys
// ============================================

#[test]
fn test_every_option_has_prefixed_key() {
    for id in ChartOptionId::iter() {
        assert!(
            id.storage_key().starts_with(KEY_PREFIX),
            "{:?} key missing prefix",
            id
        );
    }
}

#[test]
fn test_defaults_apply_with_empty_store() {
    let store = SettingsStore::in_memory();
    assert_eq!(store.option_value(ChartOptionId::MaxPoints), "250");
    assert_eq!(store.max_points(), MaxPoints::Limit(250));
    assert!(store.bool_option(ChartOptionId::ShowGrid));
    assert!(!store.bool_option(ChartOptionId::ShowPoints));
    assert_eq!(store.distance_units(), DistanceUnit::Kilometers);
    assert_eq!(store.temperature_units(), TemperatureUnit::Celsius);
}

#[test]
fn test_invalid_stored_values_fall_back() {
    let mut store = SettingsStore::in_memory();
    store.set_option(ChartOptionId::MaxPoints, "not-a-number");
    assert_eq!(store.max_points(), MaxPoints::Limit(250));
    store.set_option(ChartOptionId::DistanceUnits, "leagues");
    assert_eq!(store.distance_units(), DistanceUnit::Kilometers);
}

#[test]
fn test_max_points_all_disables_decimation() {
    let mut store = SettingsStore::in_memory();
    store.set_option(ChartOptionId::MaxPoints, "all");
    assert_eq!(store.max_points(), MaxPoints::All);
}

#[test]
fn test_smoothing_clamped_to_range() {
    let mut store = SettingsStore::in_memory();
    store.set_option(ChartOptionId::Smoothing, "99");
    assert_eq!(store.smoothing(), 10);
    store.set_option(ChartOptionId::Smoothing, "junk");
    assert_eq!(store.smoothing(), 0);
}

#[test]
fn test_chart_style_and_interpolation_parse() {
    let mut store = SettingsStore::in_memory();
    assert_eq!(store.chart_style(), ChartStyle::Line);
    assert_eq!(store.interpolation(), Interpolation::Linear);

    store.set_option(ChartOptionId::ChartType, "area");
    store.set_option(ChartOptionId::Interpolation, "step");
    assert_eq!(store.chart_style(), ChartStyle::Area);
    assert_eq!(store.interpolation(), Interpolation::Step);

    // Unknown values fall back to the defaults
    store.set_option(ChartOptionId::ChartType, "donut");
    assert_eq!(store.chart_style(), ChartStyle::Line);
}

#[test]
fn test_interpolation_catalog_matches_renderer() {
    // Only shapes the painter actually draws are offered
    assert_eq!(
        ChartOptionId::Interpolation.allowed_values(),
        &["linear", "step"]
    );

    // A value persisted by an older build reads back as linear
    let mut store = SettingsStore::in_memory();
    store.set_option(ChartOptionId::Interpolation, "monotone");
    assert_eq!(store.interpolation(), Interpolation::Linear);
}

// ============================================
// Unit Symbol Reflection
// ============================================

#[test]
fn test_unit_symbol_reflects_saved_preference() {
    let mut store = SettingsStore::in_memory();
    assert_eq!(store.unit_symbol(UnitKind::Distance), "km");
    assert_eq!(store.unit_symbol(UnitKind::Speed), "km/h");

    store.set_option(ChartOptionId::DistanceUnits, "miles");
    assert_eq!(store.unit_symbol(UnitKind::Distance), "mi");
    // Speed and elevation follow the distance preference
    assert_eq!(store.unit_symbol(UnitKind::Speed), "mph");
    assert_eq!(store.unit_symbol(UnitKind::Elevation), "ft");
}

#[test]
fn test_temperature_symbol_reflects_preference() {
    let mut store = SettingsStore::in_memory();
    assert_eq!(store.unit_symbol(UnitKind::Temperature), "°C");
    store.set_option(ChartOptionId::TemperatureUnits, "fahrenheit");
    assert_eq!(store.unit_symbol(UnitKind::Temperature), "°F");
}

// ============================================
// Field Colors and Visibility
// ============================================

#[test]
fn test_field_color_persists() {
    let mut store = SettingsStore::in_memory();
    assert_eq!(store.field_color("speed"), None);
    store.set_field_color("speed", "#FF8800");
    assert_eq!(store.field_color("speed"), Some("#FF8800"));
}

#[test]
fn test_field_hidden_toggles() {
    let mut store = SettingsStore::in_memory();
    assert!(!store.field_hidden("altitude"));
    store.set_field_hidden("altitude", true);
    assert!(store.field_hidden("altitude"));
    store.set_field_hidden("altitude", false);
    assert!(!store.field_hidden("altitude"));
}

// ============================================
// Reset
// ============================================

#[test]
fn test_reset_clears_chart_keys_and_is_idempotent() {
    let mut store = SettingsStore::in_memory();
    store.set_option(ChartOptionId::MaxPoints, "500");
    store.set_field_color("speed", "#112233");
    store.set_theme_preference(ThemeMode::Light);

    store.reset_all();
    assert_eq!(store.max_points(), MaxPoints::Limit(250));
    assert_eq!(store.field_color("speed"), None);
    // Theme preference lives outside the chart prefix and survives
    assert_eq!(store.theme_preference(), Some(ThemeMode::Light));

    // A second reset leaves the same state
    store.reset_all();
    assert_eq!(store.max_points(), MaxPoints::Limit(250));
    assert_eq!(store.theme_preference(), Some(ThemeMode::Light));
}

// ============================================
// Shared Configuration
// ============================================

#[test]
fn test_shared_config_roundtrip() {
    let mut source = SettingsStore::in_memory();
    source.set_option(ChartOptionId::MaxPoints, "500");
    source.set_option(ChartOptionId::DistanceUnits, "miles");
    source.set_field_color("speed", "#102030");

    let encoded = source.export_shared();
    let mut target = SettingsStore::in_memory();
    let applied = target.import_shared(&encoded).unwrap();

    assert_eq!(applied, 3);
    assert_eq!(target.option_value(ChartOptionId::MaxPoints), "500");
    assert_eq!(target.distance_units(), DistanceUnit::Miles);
    assert_eq!(target.field_color("speed"), Some("#102030"));
}

#[test]
fn test_shared_config_accepts_bare_suffixes() {
    // {"maxpoints": 500, "showGrid": false}
    let json = r#"{"maxpoints":500,"showGrid":false}"#;
    let encoded = {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(json)
    };

    let mut store = SettingsStore::in_memory();
    let applied = store.import_shared(&encoded).unwrap();
    assert_eq!(applied, 2);
    assert_eq!(store.max_points(), MaxPoints::Limit(500));
    assert!(!store.bool_option(ChartOptionId::ShowGrid));
}

#[test]
fn test_shared_config_rejects_garbage() {
    let mut store = SettingsStore::in_memory();
    assert!(store.import_shared("not base64 at all!!!").is_err());

    let not_object = {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode("[1,2,3]")
    };
    assert!(store.import_shared(&not_object).is_err());
}

#[test]
fn test_in_memory_save_is_noop() {
    let store = SettingsStore::in_memory();
    assert!(store.save().is_ok());
}
