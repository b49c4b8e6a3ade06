use chrono::NaiveDate;

use crate::color::ColorMap;
use crate::data::aggregate::ChartData;
use crate::data::filter::{filtered_indices, init_filter_state, FilterError, FilterState, FilteredView};
use crate::data::metrics::Metrics;
use crate::data::model::TripDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Result of one filter pass: either everything the dashboard shows, or the
/// condition that halts rendering.
#[derive(Debug, Clone)]
pub enum DashboardView {
    Ready(Dashboard),
    Halted(FilterError),
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Indices of trips passing the current filters.
    pub visible_indices: Vec<usize>,
    pub metrics: Metrics,
    pub charts: ChartData,
}

/// Free-text search boxes above each multi-select.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub bike_model: String,
    pub start_station: String,
    pub end_station: String,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset; immutable for the life of the process.
    pub dataset: TripDataset,

    /// Sidebar selections.
    pub filters: FilterState,

    pub search: SearchState,

    /// Derived from `dataset` + `filters`, rebuilt on every filter change.
    pub view: DashboardView,

    /// Bike model colours, fixed for the whole dataset.
    pub color_map: ColorMap,

    pub top_stations: usize,
    pub preview_rows: usize,
}

impl AppState {
    pub fn new(dataset: TripDataset, top_stations: usize, preview_rows: usize) -> Self {
        let filters = init_filter_state(&dataset);
        let color_map = ColorMap::new(&dataset.bike_models);
        let view = build_view(&dataset, &filters, top_stations);
        Self {
            dataset,
            filters,
            search: SearchState::default(),
            view,
            color_map,
            top_stations,
            preview_rows,
        }
    }

    /// Recompute the filtered view, metrics and charts after a filter change.
    pub fn refilter(&mut self) {
        self.view = build_view(&self.dataset, &self.filters, self.top_stations);
    }

    /// Set the date range, clamped to the dataset's own bounds.
    pub fn set_date_range(&mut self, from: NaiveDate, to: NaiveDate) {
        let range = match self.dataset.date_bounds {
            Some((lo, hi)) => (from.clamp(lo, hi), to.clamp(lo, hi)),
            None => (from, to),
        };
        if self.filters.date_range != Some(range) {
            self.filters.date_range = Some(range);
            self.refilter();
        }
    }

    /// Drop all selections and restore the full date range.
    pub fn reset_filters(&mut self) {
        self.filters = init_filter_state(&self.dataset);
        self.search = SearchState::default();
        self.refilter();
    }

    /// Number of visible trips, 0 when halted.
    pub fn visible_count(&self) -> usize {
        match &self.view {
            DashboardView::Ready(d) => d.visible_indices.len(),
            DashboardView::Halted(_) => 0,
        }
    }
}

fn build_view(dataset: &TripDataset, filters: &FilterState, top_stations: usize) -> DashboardView {
    match filtered_indices(dataset, filters) {
        Ok(visible_indices) => {
            let view = FilteredView::new(dataset, &visible_indices);
            let metrics = Metrics::compute(&view);
            let charts = ChartData::compute(&view, top_stations);
            log::debug!("Filters matched {} of {} trips", view.len(), dataset.len());
            DashboardView::Ready(Dashboard {
                visible_indices,
                metrics,
                charts,
            })
        }
        Err(e) => {
            log::warn!("{e}");
            DashboardView::Halted(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::scenario;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_with_everything_visible() {
        let state = AppState::new(scenario(), 10, 10);
        assert_eq!(state.visible_count(), 3);
        assert!(matches!(state.view, DashboardView::Ready(_)));
    }

    #[test]
    fn halt_then_recover() {
        let mut state = AppState::new(scenario(), 10, 10);
        state.filters.start_stations.insert("StationZ".into());
        state.filters.end_stations.insert("StationX".into());
        state.refilter();
        assert!(matches!(
            state.view,
            DashboardView::Halted(FilterError::NoStationMatch)
        ));
        assert_eq!(state.visible_count(), 0);

        state.filters.start_stations.clear();
        state.refilter();
        assert_eq!(state.visible_count(), 1);

        state.reset_filters();
        assert_eq!(state.visible_count(), 3);
    }

    #[test]
    fn date_range_is_clamped_to_data() {
        let mut state = AppState::new(scenario(), 10, 10);
        let d = |day| NaiveDate::from_ymd_opt(2023, 8, day).unwrap();
        state.set_date_range(d(2), d(31));
        assert_eq!(state.filters.date_range, Some((d(2), d(3))));
        assert_eq!(state.visible_count(), 2);
    }

    #[test]
    fn date_range_outside_data_clamps_both_ends() {
        let mut state = AppState::new(scenario(), 10, 10);
        let d = |month, day| NaiveDate::from_ymd_opt(2023, month, day).unwrap();

        state.set_date_range(d(7, 1), d(9, 30));
        assert_eq!(state.filters.date_range, Some((d(8, 1), d(8, 3))));
        assert_eq!(state.visible_count(), 3);

        // Both picks before the first trip collapse onto the first day.
        state.set_date_range(d(1, 1), d(7, 31));
        assert_eq!(state.filters.date_range, Some((d(8, 1), d(8, 1))));
        assert_eq!(state.visible_count(), 1);

        // Both picks after the last trip collapse onto the last day.
        state.set_date_range(d(12, 1), d(12, 31));
        assert_eq!(state.filters.date_range, Some((d(8, 3), d(8, 3))));
        assert_eq!(state.visible_count(), 1);
    }
}
