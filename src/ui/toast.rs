//! Toast notifications anchored to the bottom-right corner.
//!
//! One toast at a time; a new message replaces the current one. The
//! toast holds for most of its lifetime and fades out over the final
//! half second.

use std::time::Duration;

use eframe::egui;

use crate::app::FitViewApp;
use crate::state::{ToastType, TOAST_DURATION_SECS};

/// Portion of the lifetime spent fading to transparent
const FADE_WINDOW: Duration = Duration::from_millis(500);

impl ToastType {
    fn fill(self) -> egui::Color32 {
        match self {
            ToastType::Info => egui::Color32::from_rgb(71, 108, 155),
            ToastType::Success => egui::Color32::from_rgb(60, 140, 76),
            ToastType::Warning => egui::Color32::from_rgb(232, 176, 32),
            ToastType::Error => egui::Color32::from_rgb(181, 52, 36),
        }
    }

    fn text(self) -> egui::Color32 {
        match self {
            // Amber needs dark text to stay readable
            ToastType::Warning => egui::Color32::from_rgb(30, 30, 30),
            _ => egui::Color32::WHITE,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastType::Info => "ℹ",
            ToastType::Success => "✔",
            ToastType::Warning => "⚠",
            ToastType::Error => "✘",
        }
    }
}

/// Remaining opacity for a toast, or None once it has expired
fn toast_opacity(elapsed: Duration) -> Option<f32> {
    let lifetime = Duration::from_secs(TOAST_DURATION_SECS);
    let remaining = lifetime.checked_sub(elapsed)?;
    if remaining >= FADE_WINDOW {
        Some(1.0)
    } else {
        Some(remaining.as_secs_f32() / FADE_WINDOW.as_secs_f32())
    }
}

impl FitViewApp {
    pub fn render_toast(&mut self, ctx: &egui::Context) {
        let Some((message, shown_at, toast_type)) = self.toast_message.clone() else {
            return;
        };
        let Some(opacity) = toast_opacity(shown_at.elapsed()) else {
            self.toast_message = None;
            return;
        };
        // Animate the fade without waiting for other input
        if opacity < 1.0 {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        let fill = toast_type.fill().gamma_multiply(opacity);
        let text = toast_type.text().gamma_multiply(opacity);

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-20.0, -20.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(fill)
                    .corner_radius(6)
                    .inner_margin(egui::Margin::symmetric(14, 10))
                    .show(ui, |ui| {
                        ui.set_max_width(400.0);
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(toast_type.icon())
                                    .color(text)
                                    .size(16.0),
                            );
                            ui.label(egui::RichText::new(&message).color(text).size(14.0));
                        });
                    });
            });
    }
}
