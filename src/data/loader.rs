use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;

use super::model::{TripDataset, TripRecord, DATE_FORMAT};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the trip export from a CSV file.
///
/// Any failure is fatal: a missing file, a missing column, an unparseable
/// date or a non-integer duration aborts the whole load.
pub fn load_file(path: &Path) -> Result<TripDataset> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    load_from_reader(reader)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Columns read from the export. Everything else (`Number`, `Bike number`,
/// station numbers, the human-readable `Total duration`) is ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start date")]
    start_date: String,
    #[serde(rename = "End date")]
    end_date: String,
    #[serde(rename = "Total duration (ms)")]
    duration_ms: String,
    #[serde(rename = "Bike model")]
    bike_model: String,
    #[serde(rename = "Start station")]
    start_station: String,
    #[serde(rename = "End station")]
    end_station: String,
}

fn load_from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<TripDataset> {
    let mut trips = Vec::new();

    for (i, result) in reader.deserialize::<RawTrip>().enumerate() {
        let row_no = i + 1;
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;

        let start = parse_timestamp(&raw.start_date)
            .with_context(|| format!("CSV row {row_no}: invalid 'Start date'"))?;
        let end = parse_timestamp(&raw.end_date)
            .with_context(|| format!("CSV row {row_no}: invalid 'End date'"))?;

        let duration_ms = raw.duration_ms.trim().parse::<u64>().with_context(|| {
            format!("CSV row {row_no}: invalid 'Total duration (ms)' '{}'", raw.duration_ms)
        })?;

        trips.push(TripRecord::new(
            start,
            end,
            duration_ms,
            raw.bike_model,
            raw.start_station,
            raw.end_station,
        ));
    }

    Ok(TripDataset::from_trips(trips))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("'{s}' does not match {DATE_FORMAT}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Number,Start date,Start station number,Start station,End date,End station number,End station,Bike number,Bike model,Total duration,Total duration (ms)";

    fn write_csv(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_parses_dates_and_duration() {
        let file = write_csv(&[
            "1,8/1/2023 00:00,001,\"Hyde Park Corner, Hyde Park\",08/01/2023 00:10,002,Waterloo Station 3,101,CLASSIC,10m 0s,600000",
            "2,08/02/2023 17:45,003,Waterloo Station 3,08/02/2023 17:50,001,\"Hyde Park Corner, Hyde Park\",102,PBSC_EBIKE,5m 0s,300000",
        ]);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.trips[0];
        assert_eq!(first.start.format("%Y-%m-%d %H:%M").to_string(), "2023-08-01 00:00");
        assert_eq!(first.end.format("%Y-%m-%d %H:%M").to_string(), "2023-08-01 00:10");
        assert_eq!(first.duration_ms, 600_000);
        assert_eq!(first.duration_mins, 10.0);
        assert_eq!(first.start_station, "Hyde Park Corner, Hyde Park");

        assert_eq!(ds.trips[1].duration_mins, 5.0);
        assert_eq!(ds.bike_models, vec!["CLASSIC", "PBSC_EBIKE"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_file(&dir.path().join("missing.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_rejects_bad_date() {
        let file = write_csv(&[
            "1,2023-08-01 00:00,001,A,08/01/2023 00:10,002,B,101,CLASSIC,10m 0s,600000",
        ]);

        let err = load_file(file.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 1"), "{msg}");
        assert!(msg.contains("Start date"), "{msg}");
    }

    #[test]
    fn test_load_rejects_missing_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Start date,End date,Bike model,Start station,End station").unwrap();
        writeln!(file, "08/01/2023 00:00,08/01/2023 00:10,CLASSIC,A,B").unwrap();
        file.flush().unwrap();

        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn test_load_rejects_non_integer_duration() {
        let file = write_csv(&[
            "1,08/01/2023 00:00,001,A,08/01/2023 00:10,002,B,101,CLASSIC,10m 0s,600000",
            "2,08/01/2023 01:00,001,A,08/01/2023 01:10,002,B,101,CLASSIC,10m 0s,6.5",
        ]);

        let err = load_file(file.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 2"), "{msg}");
        assert!(msg.contains("Total duration (ms)"), "{msg}");
        assert!(msg.contains("'6.5'"), "{msg}");
    }

    #[test]
    fn test_load_header_only_is_empty() {
        let file = write_csv(&[]);
        let ds = load_file(file.path()).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.date_bounds, None);
    }
}
