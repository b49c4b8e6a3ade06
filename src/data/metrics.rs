use std::collections::HashSet;

use super::filter::FilteredView;

// ---------------------------------------------------------------------------
// Summary metrics (top row of the dashboard)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub total_trips: usize,
    /// Mean duration in minutes rounded to 2 decimals; NaN for an empty view.
    pub avg_duration_mins: f64,
    pub bike_models: usize,
}

impl Metrics {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let total_trips = view.len();
        let sum: f64 = view.iter().map(|t| t.duration_mins).sum();
        let mean = if view.is_empty() {
            f64::NAN
        } else {
            sum / total_trips as f64
        };
        let bike_models = view
            .iter()
            .map(|t| t.bike_model.as_str())
            .collect::<HashSet<_>>()
            .len();

        Metrics {
            total_trips,
            avg_duration_mins: round2(mean),
            bike_models,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::scenario;
    use crate::data::filter::{filtered_indices, init_filter_state, FilterState};
    use pretty_assertions::assert_eq;

    #[test]
    fn station_x_scenario() {
        let ds = scenario();
        let mut filters = init_filter_state(&ds);
        filters.start_stations.insert("StationX".into());
        let indices = filtered_indices(&ds, &filters).unwrap();

        let m = Metrics::compute(&FilteredView::new(&ds, &indices));
        assert_eq!(
            m,
            Metrics {
                total_trips: 2,
                avg_duration_mins: 7.5,
                bike_models: 2,
            }
        );
    }

    #[test]
    fn mean_is_rounded_to_two_places() {
        let ds = scenario();
        let indices = filtered_indices(&ds, &FilterState::default()).unwrap();
        let m = Metrics::compute(&FilteredView::new(&ds, &indices));
        // (10 + 5 + 15) / 3
        assert_eq!(m.avg_duration_mins, 10.0);
        assert_eq!(m.bike_models, 2);

        assert_eq!(round2(7.0 / 3.0), 2.33);
    }

    #[test]
    fn empty_view_gives_nan_mean() {
        let ds = scenario();
        let m = Metrics::compute(&FilteredView::new(&ds, &[]));
        assert_eq!(m.total_trips, 0);
        assert_eq!(m.bike_models, 0);
        assert!(m.avg_duration_mins.is_nan());
    }
}
