use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{TripDataset, TripRecord};

// ---------------------------------------------------------------------------
// Filter predicate: the sidebar selections
// ---------------------------------------------------------------------------

/// Current sidebar selections. An empty set means "no filter" for that field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub bike_models: BTreeSet<String>,
    pub start_stations: BTreeSet<String>,
    pub end_stations: BTreeSet<String>,
    /// Inclusive `(from, to)` bound on the start date.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

/// Initialise a [`FilterState`] that shows everything: no selections and the
/// date range spanning the whole dataset.
pub fn init_filter_state(dataset: &TripDataset) -> FilterState {
    FilterState {
        date_range: dataset.date_bounds,
        ..FilterState::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Start and end stations were both selected and no trip matches both.
    #[error("No trips found for the selected combination of start and end stations.")]
    NoStationMatch,
}

/// Return indices of trips that pass the active filters, in file order.
///
/// Order of application:
/// * bike model
/// * start/end station: conjunctive when both are selected, and an empty
///   result at that point is a [`FilterError::NoStationMatch`]
/// * start-date range, inclusive on both ends
pub fn filtered_indices(
    dataset: &TripDataset,
    filters: &FilterState,
) -> Result<Vec<usize>, FilterError> {
    let trips = &dataset.trips;
    let mut indices: Vec<usize> = (0..trips.len()).collect();

    if !filters.bike_models.is_empty() {
        indices.retain(|&i| filters.bike_models.contains(&trips[i].bike_model));
    }

    let by_start = !filters.start_stations.is_empty();
    let by_end = !filters.end_stations.is_empty();
    match (by_start, by_end) {
        (true, true) => {
            indices.retain(|&i| {
                filters.start_stations.contains(&trips[i].start_station)
                    && filters.end_stations.contains(&trips[i].end_station)
            });
            if indices.is_empty() {
                return Err(FilterError::NoStationMatch);
            }
        }
        (true, false) => {
            indices.retain(|&i| filters.start_stations.contains(&trips[i].start_station));
        }
        (false, true) => {
            indices.retain(|&i| filters.end_stations.contains(&trips[i].end_station));
        }
        (false, false) => {}
    }

    if let Some((from, to)) = filters.date_range {
        indices.retain(|&i| {
            let d = trips[i].start_date();
            from <= d && d <= to
        });
    }

    Ok(indices)
}

// ---------------------------------------------------------------------------
// FilteredView – borrowed subset of the dataset
// ---------------------------------------------------------------------------

/// Read-only view over the trips selected by [`filtered_indices`].
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    dataset: &'a TripDataset,
    indices: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a TripDataset, indices: &'a [usize]) -> Self {
        Self { dataset, indices }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a TripRecord> + 'a {
        let trips: &'a [TripRecord] = &self.dataset.trips;
        let indices: &'a [usize] = self.indices;
        indices.iter().map(move |&i| &trips[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::model::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    pub(crate) fn trip(start: &str, ms: u64, model: &str, from: &str, to: &str) -> TripRecord {
        let start = NaiveDateTime::parse_from_str(start, DATE_FORMAT).unwrap();
        let end = start + chrono::Duration::milliseconds(ms as i64);
        TripRecord::new(start, end, ms, model, from, to)
    }

    /// The three-trip scenario: X→Y, X→Z, Y→X.
    pub(crate) fn scenario() -> TripDataset {
        TripDataset::from_trips(vec![
            trip("08/01/2023 08:00", 600_000, "ModelA", "StationX", "StationY"),
            trip("08/02/2023 09:30", 300_000, "ModelB", "StationX", "StationZ"),
            trip("08/03/2023 18:15", 900_000, "ModelA", "StationY", "StationX"),
        ])
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 8, d).unwrap()
    }

    #[test]
    fn no_selection_is_identity() {
        let ds = scenario();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), Ok(vec![0, 1, 2]));
        assert_eq!(filtered_indices(&ds, &FilterState::default()), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn start_station_alone() {
        let ds = scenario();
        let filters = FilterState {
            start_stations: set(&["StationX"]),
            ..init_filter_state(&ds)
        };
        assert_eq!(filtered_indices(&ds, &filters), Ok(vec![0, 1]));
    }

    #[test]
    fn end_station_alone() {
        let ds = scenario();
        let filters = FilterState {
            end_stations: set(&["StationX", "StationZ"]),
            ..init_filter_state(&ds)
        };
        assert_eq!(filtered_indices(&ds, &filters), Ok(vec![1, 2]));
    }

    #[test]
    fn both_stations_are_conjunctive() {
        let ds = scenario();
        let filters = FilterState {
            start_stations: set(&["StationX"]),
            end_stations: set(&["StationY"]),
            ..init_filter_state(&ds)
        };
        assert_eq!(filtered_indices(&ds, &filters), Ok(vec![0]));
    }

    #[test]
    fn disjoint_station_pair_halts() {
        let ds = scenario();
        let filters = FilterState {
            start_stations: set(&["StationZ"]),
            end_stations: set(&["StationX"]),
            ..init_filter_state(&ds)
        };
        assert_eq!(filtered_indices(&ds, &filters), Err(FilterError::NoStationMatch));
    }

    #[test]
    fn model_filter_runs_before_station_check() {
        let ds = scenario();
        // X→Y exists, but only for ModelA.
        let filters = FilterState {
            bike_models: set(&["ModelB"]),
            start_stations: set(&["StationX"]),
            end_stations: set(&["StationY"]),
            ..init_filter_state(&ds)
        };
        assert_eq!(filtered_indices(&ds, &filters), Err(FilterError::NoStationMatch));
    }

    #[test]
    fn empty_after_date_range_is_not_an_error() {
        let ds = scenario();
        let filters = FilterState {
            start_stations: set(&["StationX"]),
            date_range: Some((date(3), date(3))),
            ..FilterState::default()
        };
        assert_eq!(filtered_indices(&ds, &filters), Ok(vec![]));
    }

    #[test]
    fn date_range_is_inclusive() {
        let ds = scenario();
        let filters = FilterState {
            date_range: Some((date(2), date(3))),
            ..FilterState::default()
        };
        assert_eq!(filtered_indices(&ds, &filters), Ok(vec![1, 2]));
    }

    #[test]
    fn every_result_satisfies_all_predicates() {
        let ds = scenario();
        let filters = FilterState {
            bike_models: set(&["ModelA"]),
            end_stations: set(&["StationY", "StationX"]),
            date_range: Some((date(1), date(2))),
            ..FilterState::default()
        };
        let indices = filtered_indices(&ds, &filters).unwrap();
        assert_eq!(indices, vec![0]);

        for t in FilteredView::new(&ds, &indices).iter() {
            assert!(filters.bike_models.contains(&t.bike_model));
            assert!(filters.end_stations.contains(&t.end_station));
            assert!(t.start_date() >= date(1) && t.start_date() <= date(2));
        }
    }
}
