use eframe::egui;

use crate::config::ViewerConfig;
use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LogViewApp {
    pub state: AppState,
}

impl LogViewApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for LogViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panels: menu bar, then filter fields ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });
        egui::TopBottomPanel::top("filter_bar").show(ctx, |ui| {
            panels::filter_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: counts and errors ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Central panel: log grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::log_table(ui, &mut self.state);
        });

        panels::font_window(ctx, &mut self.state);
    }
}
