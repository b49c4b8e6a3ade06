use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

const OUTPUT_PATH: &str = "sample_trips.csv";
const TRIPS: usize = 20_000;

const STATIONS: [&str; 14] = [
    "Hyde Park Corner, Hyde Park",
    "Waterloo Station 3, Waterloo",
    "Black Lion Gate, Kensington Gardens",
    "Albert Gate, Hyde Park",
    "Wellington Arch, Hyde Park",
    "Belgrove Street , King's Cross",
    "Duke Street Hill, London Bridge",
    "Soho Square , Soho",
    "Storey's Gate, Westminster",
    "Finsbury Circus, Liverpool Street",
    "Holborn Circus, Holborn",
    "Queen Street 1, Bank",
    "Southwark Street, Bankside",
    "Craven Street, Strand",
];

/// One row in the export's column layout.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Number")]
    number: u64,
    #[serde(rename = "Start date")]
    start_date: String,
    #[serde(rename = "Start station number")]
    start_station_number: usize,
    #[serde(rename = "Start station")]
    start_station: &'static str,
    #[serde(rename = "End date")]
    end_date: String,
    #[serde(rename = "End station number")]
    end_station_number: usize,
    #[serde(rename = "End station")]
    end_station: &'static str,
    #[serde(rename = "Bike number")]
    bike_number: u64,
    #[serde(rename = "Bike model")]
    bike_model: &'static str,
    #[serde(rename = "Total duration")]
    total_duration: String,
    #[serde(rename = "Total duration (ms)")]
    total_duration_ms: u64,
}

/// SplitMix64; deterministic so the sample file is reproducible.
struct TripRng(u64);

impl TripRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.unit() * n as f64) as usize % n
    }

    /// Normal sample via Box-Muller.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let r = (-2.0 * self.unit().max(1e-15).ln()).sqrt();
        mean + std_dev * r * (std::f64::consts::TAU * self.unit()).cos()
    }
}

/// Start hour with morning and evening commuter peaks.
fn start_hour(rng: &mut TripRng) -> u32 {
    let hour = match rng.below(10) {
        0..=2 => rng.normal(8.5, 1.0),
        3..=5 => rng.normal(17.5, 1.2),
        _ => rng.normal(13.0, 4.0),
    };
    hour.round().clamp(0.0, 23.0) as u32
}

fn human_duration(ms: u64) -> String {
    let secs = ms / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m}m {s}s")
    } else {
        format!("{m}m {s}s")
    }
}

fn main() -> Result<()> {
    let mut rng = TripRng(42);
    let first_day = NaiveDate::from_ymd_opt(2023, 8, 1).context("invalid first day")?;
    let fmt = "%m/%d/%Y %H:%M";

    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    for i in 0..TRIPS {
        let day = first_day + Duration::days(rng.below(31) as i64);
        let start: NaiveDateTime = day
            .and_hms_opt(start_hour(&mut rng), rng.below(60) as u32, 0)
            .context("invalid start time")?;

        // Log-normal-ish duration centred on ~15 minutes.
        let minutes = rng.normal(2.7, 0.6).exp().clamp(1.0, 180.0);
        let ms = (minutes * 60_000.0).round() as u64;
        let end = start + Duration::milliseconds(ms as i64);

        let from = rng.below(STATIONS.len());
        let to = rng.below(STATIONS.len());
        let ebike = (start.hour() >= 17 && rng.below(3) == 0) || rng.below(5) == 0;

        writer
            .serialize(Row {
                number: 130_000_000 + i as u64,
                start_date: start.format(fmt).to_string(),
                start_station_number: 1000 + from,
                start_station: STATIONS[from],
                end_date: end.format(fmt).to_string(),
                end_station_number: 1000 + to,
                end_station: STATIONS[to],
                bike_number: 50_000 + rng.below(5_000) as u64,
                bike_model: if ebike { "PBSC_EBIKE" } else { "CLASSIC" },
                total_duration: human_duration(ms),
                total_duration_ms: ms,
            })
            .with_context(|| format!("writing row {i}"))?;
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {TRIPS} trips to {OUTPUT_PATH}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = TripRng(7);
        let mut b = TripRng(7);
        let xs: Vec<u64> = (0..5).map(|_| a.next_u64()).collect();
        let ys: Vec<u64> = (0..5).map(|_| b.next_u64()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = TripRng(42);
        for _ in 0..10_000 {
            assert!(rng.below(31) < 31);
            assert!(start_hour(&mut rng) <= 23);
        }
    }

    #[test]
    fn duration_text_matches_export_style() {
        assert_eq!(human_duration(600_000), "10m 0s");
        assert_eq!(human_duration(3_723_000), "1h 2m 3s");
    }
}
