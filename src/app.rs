use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DataGlanceApp {
    pub state: AppState,
}

impl DataGlanceApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DataGlanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset info + target ----
        egui::SidePanel::left("dataset_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: column cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::column_cards(ui, &self.state);
        });
    }
}
