mod app;
mod color;
mod config;
mod dashboard;
mod data;
mod error;
mod state;
mod ui;
mod views;

use anyhow::{anyhow, Context};
use app::EvDashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::discover()?;
    let table = data::load_dataset(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let source = config.data_path.clone();
    let state = AppState::new(config, table, source);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 1000.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "EV Registrations – Washington State",
        options,
        Box::new(|_cc| Ok(Box::new(EvDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
