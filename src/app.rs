//! Main application state and eframe::App implementation.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Instant;

use eframe::egui;
use tracing::{info, warn};

use crate::activity::Activity;
use crate::charts::registry::ChartRegistry;
use crate::debounce::Debouncer;
use crate::settings::SettingsStore;
use crate::state::{
    LoadResult, LoadedActivity, LoadingState, ToastType, POST_LOAD_SETTLE,
    THEME_REBUILD_DEBOUNCE,
};
use crate::theme::{ThemeMode, ThemeStore};

/// Main application state.
///
/// Everything the renderer layer touches lives here explicitly; there is
/// no global namespace to hang ad hoc state off.
pub struct FitViewApp {
    /// Currently loaded activity, if any
    pub activity: Option<LoadedActivity>,
    /// Persisted chart options, field colors and zone colors
    pub settings: SettingsStore,
    /// Single owner of the effective theme
    pub theme: ThemeStore,
    /// Last theme generation the charts were built against
    theme_generation_seen: u64,
    /// Charts currently on screen
    pub registry: ChartRegistry,
    /// Toast messages for user feedback
    pub toast_message: Option<(String, Instant, ToastType)>,
    /// Channel for receiving loaded activities from the background thread
    load_receiver: Option<Receiver<LoadResult>>,
    /// Current loading state
    pub loading_state: LoadingState,
    /// Coalesces chart rebuilds after theme changes
    theme_debounce: Debouncer,
    /// Short settle delay between load completion and first chart build
    settle_debounce: Debouncer,
    /// Whether the settings panel is open
    pub show_settings: bool,
    /// Whether the share-link import dialog is open
    pub share_import_open: bool,
    /// Text buffer for the share-link import dialog
    pub share_import_text: String,
}

impl Default for FitViewApp {
    fn default() -> Self {
        Self {
            activity: None,
            settings: SettingsStore::load(),
            theme: ThemeStore::new(),
            theme_generation_seen: 0,
            registry: ChartRegistry::new(),
            toast_message: None,
            load_receiver: None,
            loading_state: LoadingState::Idle,
            theme_debounce: Debouncer::new(THEME_REBUILD_DEBOUNCE),
            settle_debounce: Debouncer::new(POST_LOAD_SETTLE),
            show_settings: false,
            share_import_open: false,
            share_import_text: String::new(),
        }
    }
}

impl FitViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();

        // Seed the OS theme hint from the window system, if reported
        let system_hint = match cc.egui_ctx.style().visuals.dark_mode {
            true => Some(ThemeMode::Dark),
            false => Some(ThemeMode::Light),
        };
        app.theme.set_system_hint(system_hint);
        app.theme_generation_seen = app.theme.generation();
        app.apply_visuals(&cc.egui_ctx);
        app
    }

    /// Apply the resolved theme to egui's widget styling
    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let visuals = match self.theme.resolve(&self.settings) {
            ThemeMode::Light => egui::Visuals::light(),
            ThemeMode::Dark => egui::Visuals::dark(),
        };
        ctx.set_visuals(visuals);
    }

    /// Switch theme: persist the preference, restyle, and debounce the
    /// chart rebuild so rapid toggling only rebuilds once
    pub fn set_theme(&mut self, mode: ThemeMode, ctx: &egui::Context) {
        self.theme.set_override(Some(mode));
        self.settings.set_theme_preference(mode);
        if let Err(e) = self.settings.save() {
            self.show_toast_error(&format!("Failed to save settings: {}", e));
        }
        self.apply_visuals(ctx);
        self.theme_debounce.schedule(Instant::now());
    }

    // ------------------------------------------------------------------
    // Toasts
    // ------------------------------------------------------------------

    pub fn show_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now(), ToastType::Info));
    }

    pub fn show_toast_success(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now(), ToastType::Success));
    }

    pub fn show_toast_warning(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now(), ToastType::Warning));
    }

    pub fn show_toast_error(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now(), ToastType::Error));
    }

    // ------------------------------------------------------------------
    // Activity loading
    // ------------------------------------------------------------------

    /// Start loading an activity file in the background
    pub fn start_loading_file(&mut self, path: PathBuf) {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        self.loading_state = LoadingState::Loading(filename.clone());

        let (sender, receiver): (Sender<LoadResult>, Receiver<LoadResult>) = channel();
        self.load_receiver = Some(receiver);

        thread::spawn(move || {
            let result = match Activity::load(&path) {
                Ok(activity) => {
                    LoadResult::Success(Box::new(LoadedActivity::new(path, filename, activity)))
                }
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = sender.send(result);
        });
    }

    /// Check for completed background loads
    fn check_loading_complete(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };

        self.load_receiver = None;
        self.loading_state = LoadingState::Idle;

        match result {
            LoadResult::Success(loaded) => {
                info!(file = %loaded.name, records = loaded.activity.records.len(), "activity loaded");
                self.show_toast_success(&format!("Loaded {}", loaded.name));
                self.activity = Some(*loaded);
                // Let the frame settle before the first chart build
                self.settle_debounce.schedule(Instant::now());
            }
            LoadResult::Error(e) => {
                warn!(error = %e, "activity load failed");
                self.show_toast_error(&format!("Failed to load file: {}", e));
            }
        }
    }

    // ------------------------------------------------------------------
    // Chart lifecycle
    // ------------------------------------------------------------------

    /// Rebuild all charts from the current activity and settings
    pub fn rebuild_charts(&mut self) {
        let Some(loaded) = &self.activity else {
            self.registry.destroy_all();
            return;
        };
        let colors = self.theme.colors(&self.settings);
        self.registry
            .rebuild(&loaded.activity, &self.settings, colors);
        self.theme_generation_seen = self.theme.generation();
    }

    /// Persist settings and schedule a rebuild (used by the settings panel)
    pub fn settings_changed(&mut self) {
        if let Err(e) = self.settings.save() {
            self.show_toast_error(&format!("Failed to save settings: {}", e));
        }
        self.rebuild_charts();
    }

    /// Fire pending debouncers; returns true when a repaint is needed soon
    fn poll_timers(&mut self) -> bool {
        let now = Instant::now();
        let mut fired = false;
        if self.theme_debounce.fire(now) || self.settle_debounce.fire(now) {
            self.rebuild_charts();
            fired = true;
        }
        // Theme changed through some path that skipped the debouncer
        if self.theme.generation() != self.theme_generation_seen && !self.theme_debounce.is_pending()
        {
            self.rebuild_charts();
            fired = true;
        }
        fired || self.theme_debounce.is_pending() || self.settle_debounce.is_pending()
    }
}

impl eframe::App for FitViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_loading_complete();
        if self.poll_timers() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }

        // Keep the UI repainting while a background load is in flight
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui, ctx);
        });

        if self.show_settings {
            self.render_settings_window(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if let LoadingState::Loading(name) = &self.loading_state {
                let name = name.clone();
                self.render_loading_overlay(ui, &name);
            } else {
                self.render_charts(ui);
            }
        });

        self.render_toast(ctx);

        // Handle files dropped onto the window
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            self.start_loading_file(path);
        }
    }
}
