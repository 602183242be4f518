//! FitView - A desktop viewer for FIT activity data
//!
//! This library turns parsed FIT activity data (JSON exports) into
//! interactive charts with persistent user preferences.
//!
//! ## Module Structure
//!
//! - [`activity`] - Parsed activity data model (records, sessions, laps, events)
//! - [`app`] - Main application state and eframe::App implementation
//! - [`charts`] - Chart preparation, configuration and the rendered-chart registry
//! - [`debounce`] - Cancellable one-shot timers polled per frame
//! - [`settings`] - Typed chart options, unit preferences and key-value persistence
//! - [`state`] - Core data types and constants
//! - [`theme`] - Theme resolution and color palettes
//! - [`units`] - Unit preference types and conversion utilities
//! - [`zones`] - Heart-rate and power zone summaries and colors
//! - [`ui`] - User interface components
//!   - `menu` - Menu bar (File, View, Help)
//!   - `chart_panel` - Chart painting via egui_plot
//!   - `settings_panel` - Chart options, visibility and colors
//!   - `toast` - Toast notification system
//!   - `overlay` - Loading overlay for background file loads

pub mod activity;
pub mod app;
pub mod charts;
pub mod debounce;
pub mod settings;
pub mod state;
pub mod theme;
pub mod ui;
pub mod units;
pub mod zones;
