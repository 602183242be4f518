//! FitView - A desktop viewer for FIT activity data
//!
//! FitView is a desktop application for charting activity files recorded
//! by cycling computers and sports watches. Activities are consumed as
//! parsed JSON exports of FIT files.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use fitview::app::FitViewApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("FitView - Activity Viewer")
            .with_app_id("FitView")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "FitView",
        native_options,
        Box::new(|cc| Ok(Box::new(FitViewApp::new(cc)))),
    )
}
