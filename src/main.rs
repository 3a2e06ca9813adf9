mod analysis;
mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::DataGlanceApp;
use config::SummaryConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::new(SummaryConfig::from_env());
    if let Some(path) = std::env::args_os().nth(1) {
        ui::panels::open_path(&mut state, Path::new(&path));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Data Glance – Column Summaries",
        options,
        Box::new(|_cc| Ok(Box::new(DataGlanceApp::new(state)))),
    )
}
