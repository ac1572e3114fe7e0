mod api;
mod app;
mod color;
mod config;
mod data;
mod jobs;
mod state;
mod ui;

use std::sync::Arc;

use api::HttpBackend;
use app::AtcSmartProApp;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::from_env();
    log::info!("Using classification backend at {}", config.base_url());
    let backend = HttpBackend::new(config.clone())
        .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "ATC Smart Pro",
        options,
        Box::new(|cc| {
            let state = AppState::new(config, Arc::new(backend));
            Ok(Box::new(AtcSmartProApp::new(cc, state)))
        }),
    )
}
