//! UI rendering modules for the FitView application.
//!
//! - `menu` - Menu bar (File, View, Help)
//! - `chart_panel` - Chart painting via egui_plot
//! - `settings_panel` - Chart options, field visibility and zone colors
//! - `toast` - Toast notification system
//! - `overlay` - Loading overlay shown during background file loads

pub mod chart_panel;
pub mod menu;
pub mod overlay;
pub mod settings_panel;
pub mod toast;
