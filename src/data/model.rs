use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};

/// Timestamp layout used by both date columns of the export, e.g. `08/01/2023 14:05`.
pub const DATE_FORMAT: &str = "%m/%d/%Y %H:%M";

/// Milliseconds per minute, the divisor for the derived duration column.
pub const MS_PER_MINUTE: f64 = 60_000.0;

// ---------------------------------------------------------------------------
// TripRecord – one row of the export
// ---------------------------------------------------------------------------

/// A single bike rental.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Raw `Total duration (ms)` value.
    pub duration_ms: u64,
    /// Derived: `duration_ms / 60000`.
    pub duration_mins: f64,
    pub bike_model: String,
    pub start_station: String,
    pub end_station: String,
}

impl TripRecord {
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        duration_ms: u64,
        bike_model: impl Into<String>,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            duration_ms,
            duration_mins: duration_ms as f64 / MS_PER_MINUTE,
            bike_model: bike_model.into(),
            start_station: start_station.into(),
            end_station: end_station.into(),
        }
    }

    /// Calendar date of the trip start; what the date-range filter compares.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }
}

// ---------------------------------------------------------------------------
// TripDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed option lists for the sidebar.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct TripDataset {
    /// All trips in file order.
    pub trips: Vec<TripRecord>,
    /// Distinct bike models, first-encounter order.
    pub bike_models: Vec<String>,
    /// Distinct start stations, first-encounter order.
    pub start_stations: Vec<String>,
    /// Distinct end stations, first-encounter order.
    pub end_stations: Vec<String>,
    /// Earliest and latest start date, `None` for an empty file.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl TripDataset {
    /// Build the option lists and date bounds from the loaded trips.
    pub fn from_trips(trips: Vec<TripRecord>) -> Self {
        let bike_models = unique_in_order(trips.iter().map(|t| t.bike_model.as_str()));
        let start_stations = unique_in_order(trips.iter().map(|t| t.start_station.as_str()));
        let end_stations = unique_in_order(trips.iter().map(|t| t.end_station.as_str()));

        let date_bounds = trips
            .iter()
            .map(TripRecord::start_date)
            .fold(None::<(NaiveDate, NaiveDate)>, |acc, d| {
                Some(match acc {
                    None => (d, d),
                    Some((lo, hi)) => (lo.min(d), hi.max(d)),
                })
            });

        TripDataset {
            trips,
            bike_models,
            start_stations,
            end_stations,
            date_bounds,
        }
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Distinct values, keeping the position of each value's first occurrence.
fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn duration_is_derived_from_milliseconds() {
        let trip = TripRecord::new(at("08/01/2023 10:00"), at("08/01/2023 10:10"), 600_000, "CLASSIC", "A", "B");
        assert_eq!(trip.duration_mins, 10.0);

        let odd = TripRecord::new(at("08/01/2023 10:00"), at("08/01/2023 10:00"), 1_234, "CLASSIC", "A", "B");
        assert_eq!(odd.duration_mins, 1_234.0 / 60_000.0);
    }

    #[test]
    fn option_lists_keep_first_encounter_order() {
        let ds = TripDataset::from_trips(vec![
            TripRecord::new(at("08/03/2023 09:00"), at("08/03/2023 09:30"), 1, "PBSC_EBIKE", "Z", "Y"),
            TripRecord::new(at("08/01/2023 09:00"), at("08/01/2023 09:30"), 1, "CLASSIC", "A", "Y"),
            TripRecord::new(at("08/02/2023 09:00"), at("08/02/2023 09:30"), 1, "PBSC_EBIKE", "Z", "B"),
        ]);

        assert_eq!(ds.bike_models, vec!["PBSC_EBIKE", "CLASSIC"]);
        assert_eq!(ds.start_stations, vec!["Z", "A"]);
        assert_eq!(ds.end_stations, vec!["Y", "B"]);
        assert_eq!(
            ds.date_bounds,
            Some((
                NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
                NaiveDate::from_ymd_opt(2023, 8, 3).unwrap()
            ))
        );
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = TripDataset::from_trips(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.date_bounds, None);
    }
}
