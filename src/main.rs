mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use env_logger::Env;

use app::BikeShareApp;
use config::Config;
use state::AppState;

pub const TITLE: &str = "London Bike-Share Usage Analysis";

fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();
    log::info!("Loading trips from {}", config.csv_path.display());

    let dataset = data::loader::load_file(&config.csv_path)
        .inspect_err(|e| log::error!("Failed to load file: {e:#}"))?;

    if dataset.is_empty() {
        log::warn!("{} contains no trips", config.csv_path.display());
    } else if let Some((from, to)) = dataset.date_bounds {
        log::info!(
            "Loaded {} trips, {} bike models, {} start stations, {from} to {to}",
            dataset.len(),
            dataset.bike_models.len(),
            dataset.start_stations.len(),
        );
    }

    let state = AppState::new(dataset, config.top_stations, config.preview_rows);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(BikeShareApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
