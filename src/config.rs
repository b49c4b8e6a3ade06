use std::path::PathBuf;

use clap::Parser;

/// London bike-share usage dashboard.
#[derive(Parser, Debug, Clone)]
#[command(name = "bikeshare-dashboard")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Trip export to load (CSV with `MM/DD/YYYY HH:MM` dates)
    #[arg(env = "BIKESHARE_CSV", default_value = "LondonBikeJourneyAug2023.csv")]
    pub csv_path: PathBuf,

    /// Number of stations in the start-station ranking
    #[arg(long, default_value = "10")]
    pub top_stations: usize,

    /// Number of rows in the filtered-data preview
    #[arg(long, default_value = "10")]
    pub preview_rows: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
