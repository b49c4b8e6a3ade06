use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use super::filter::FilteredView;

/// Fixed display order for every weekday-based chart.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Upper bound on scatter points kept per filter pass.
pub const MAX_SCATTER_POINTS: usize = 50_000;

/// Seconds since the Unix epoch, the x coordinate of every time axis.
pub fn plot_secs(ts: NaiveDateTime) -> f64 {
    ts.and_utc().timestamp() as f64
}

/// Trip counts per (weekday, hour); `None` where no trip started.
pub type WeekdayHourMatrix = [[Option<usize>; 24]; 7];

// ---------------------------------------------------------------------------
// Chart datasets
// ---------------------------------------------------------------------------

/// Everything the six charts need, derived from one filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Per bike model: `[start secs, duration mins]` in plot space, thinned
    /// to at most [`MAX_SCATTER_POINTS`] across all models.
    pub duration_scatter: Vec<(String, Vec<[f64; 2]>)>,
    pub top_start_stations: Vec<(String, usize)>,
    pub model_counts: Vec<(String, usize)>,
    pub daily_trips: Vec<(NaiveDate, usize)>,
    /// Monday first.
    pub weekday_trips: [usize; 7],
    pub weekday_hour: WeekdayHourMatrix,
}

impl ChartData {
    pub fn compute(view: &FilteredView<'_>, top_n: usize) -> Self {
        let mut top_start_stations = value_counts(view.iter().map(|t| t.start_station.as_str()));
        top_start_stations.truncate(top_n);

        ChartData {
            duration_scatter: duration_scatter(view, MAX_SCATTER_POINTS),
            top_start_stations,
            model_counts: counts_in_order(view.iter().map(|t| t.bike_model.as_str())),
            daily_trips: daily_trips(view),
            weekday_trips: weekday_trips(view),
            weekday_hour: weekday_hour(view),
        }
    }
}

/// Counts in first-encounter order.
pub fn counts_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for v in values {
        match position.get(v) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(v, counts.len());
                counts.push((v.to_string(), 1));
            }
        }
    }
    counts
}

/// Frequency table sorted by descending count. The sort is stable, so equal
/// counts keep first-encounter order.
pub fn value_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts = counts_in_order(values);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Keeps every `stride`-th trip of the view so the total stays within
/// `max_points`; below the limit every trip is kept.
fn duration_scatter(view: &FilteredView<'_>, max_points: usize) -> Vec<(String, Vec<[f64; 2]>)> {
    let stride = view.len().div_ceil(max_points.max(1)).max(1);
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for t in view.iter().step_by(stride) {
        let i = *position.entry(t.bike_model.as_str()).or_insert_with(|| {
            series.push((t.bike_model.clone(), Vec::new()));
            series.len() - 1
        });
        series[i].1.push([plot_secs(t.start), t.duration_mins]);
    }
    series
}

fn daily_trips(view: &FilteredView<'_>) -> Vec<(NaiveDate, usize)> {
    let mut by_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for t in view.iter() {
        *by_day.entry(t.start_date()).or_default() += 1;
    }
    by_day.into_iter().collect()
}

fn weekday_trips(view: &FilteredView<'_>) -> [usize; 7] {
    let mut counts = [0usize; 7];
    for t in view.iter() {
        counts[t.start.weekday().num_days_from_monday() as usize] += 1;
    }
    counts
}

fn weekday_hour(view: &FilteredView<'_>) -> WeekdayHourMatrix {
    let mut matrix: WeekdayHourMatrix = [[None; 24]; 7];
    for t in view.iter() {
        let row = t.start.weekday().num_days_from_monday() as usize;
        let col = t.start.hour() as usize;
        *matrix[row][col].get_or_insert(0) += 1;
    }
    matrix
}
