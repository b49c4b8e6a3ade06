use chrono::{DateTime, NaiveDate, NaiveTime};
use eframe::egui::{pos2, vec2, Align2, Color32, FontId, Rect, Sense, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{annotation_color, purple_ramp, ColorMap};
use crate::data::aggregate::{plot_secs, weekday_name, ChartData, WeekdayHourMatrix, WEEKDAYS};

const CHART_HEIGHT: f32 = 320.0;
const BAR_COLOR: Color32 = Color32::from_rgb(72, 40, 120);
const MAX_LABEL_CHARS: usize = 28;

// ---------------------------------------------------------------------------
// Time axis helpers
// ---------------------------------------------------------------------------

fn date_secs(date: NaiveDate) -> f64 {
    plot_secs(date.and_time(NaiveTime::MIN))
}

fn format_secs(secs: f64, fmt: &str) -> String {
    DateTime::from_timestamp(secs as i64, 0)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Scatter: duration vs start time
// ---------------------------------------------------------------------------

pub fn duration_scatter(ui: &mut Ui, charts: &ChartData, color_map: &ColorMap) {
    ui.heading("Bike Usage Duration over Time");

    Plot::new("duration_scatter")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Start Date")
        .y_axis_label("Total Duration (mins)")
        .x_axis_formatter(|mark, _range| format_secs(mark.value, "%m/%d %H:%M"))
        .label_formatter(|name, value| {
            format!(
                "{name}\n{}\n{:.2} mins",
                format_secs(value.x, "%Y-%m-%d %H:%M"),
                value.y
            )
        })
        .show(ui, |plot_ui| {
            for (model, points) in &charts.duration_scatter {
                plot_ui.points(
                    Points::new(PlotPoints::new(points.clone()))
                        .name(model)
                        .color(color_map.color_for(model))
                        .radius(2.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Horizontal bar charts
// ---------------------------------------------------------------------------

pub fn top_start_stations(ui: &mut Ui, charts: &ChartData, top_n: usize) {
    ui.heading(format!("Top {top_n} Start Stations"));
    horizontal_bars(
        ui,
        "top_start_stations",
        "Number of Trips",
        "Start Station",
        &charts.top_start_stations,
        |_| BAR_COLOR,
    );
}

pub fn bike_model_usage(ui: &mut Ui, charts: &ChartData, color_map: &ColorMap) {
    ui.heading("Bike Model Usage");
    horizontal_bars(
        ui,
        "bike_model_usage",
        "Count",
        "Bike Model",
        &charts.model_counts,
        |model| color_map.color_for(model),
    );
}

pub fn rentals_by_weekday(ui: &mut Ui, charts: &ChartData) {
    ui.heading("Bike Rentals by Day of the Week");
    let rows: Vec<(String, usize)> = WEEKDAYS
        .iter()
        .zip(charts.weekday_trips)
        .map(|(day, count)| (weekday_name(*day).to_string(), count))
        .collect();
    horizontal_bars(
        ui,
        "rentals_by_weekday",
        "Number of Trips",
        "Day of the Week",
        &rows,
        |_| BAR_COLOR,
    );
}

/// Category labels on the y axis, first row drawn at the top.
fn horizontal_bars(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    y_label: &str,
    rows: &[(String, usize)],
    color: impl Fn(&str) -> Color32,
) {
    let n = rows.len();
    let labels: Vec<String> = rows.iter().rev().map(|(name, _)| shorten(name)).collect();

    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, (name, count))| {
            Bar::new((n - 1 - i) as f64, *count as f64)
                .name(name)
                .width(0.7)
                .fill(color(name))
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .y_axis_formatter(move |mark, _range| {
            let pos = mark.value.round();
            if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
                return String::new();
            }
            labels.get(pos as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name(x_label));
        });
}

fn shorten(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let head: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Line: daily demand
// ---------------------------------------------------------------------------

pub fn daily_demand(ui: &mut Ui, charts: &ChartData) {
    ui.heading("Daily Bike Rental Demands");

    Plot::new("daily_demand")
        .height(CHART_HEIGHT)
        .x_axis_label("Date")
        .y_axis_label("Number of Trips")
        .x_axis_formatter(|mark, _range| format_secs(mark.value, "%m/%d"))
        .label_formatter(|_name, value| {
            format!("{}\n{:.0} trips", format_secs(value.x, "%Y-%m-%d"), value.y)
        })
        .show(ui, |plot_ui| {
            let points: PlotPoints = charts
                .daily_trips
                .iter()
                .map(|&(date, count)| [date_secs(date), count as f64])
                .collect();
            plot_ui.line(Line::new(points).name("Number of Trips").color(BAR_COLOR).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Heat map: weekday × hour
// ---------------------------------------------------------------------------

/// Annotated 7×24 grid. Cells without trips stay blank.
pub fn weekday_hour_heatmap(ui: &mut Ui, matrix: &WeekdayHourMatrix) {
    ui.heading("Bike Rentals by Hour and Day of the Week");

    let max = matrix.iter().flatten().filter_map(|c| *c).max().unwrap_or(0);

    let label_w = 80.0;
    let header_h = 18.0;
    let legend_h = 40.0;
    let cell_w = ((ui.available_width() - label_w) / 24.0).max(14.0);
    let cell_h = 28.0;

    let size = vec2(label_w + cell_w * 24.0, header_h + cell_h * 7.0 + legend_h);
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);

    let font = FontId::proportional(10.0);
    let text_color = ui.visuals().text_color();
    let grid_origin = rect.min + vec2(label_w, header_h);
    let cell_rect = |row: usize, hour: usize| {
        Rect::from_min_size(
            grid_origin + vec2(cell_w * hour as f32, cell_h * row as f32),
            vec2(cell_w, cell_h),
        )
    };

    for hour in 0..24 {
        painter.text(
            pos2(
                grid_origin.x + cell_w * (hour as f32 + 0.5),
                rect.min.y + header_h * 0.5,
            ),
            Align2::CENTER_CENTER,
            hour.to_string(),
            font.clone(),
            text_color,
        );
    }

    for (row, day) in WEEKDAYS.iter().enumerate() {
        painter.text(
            pos2(grid_origin.x - 6.0, cell_rect(row, 0).center().y),
            Align2::RIGHT_CENTER,
            weekday_name(*day),
            font.clone(),
            text_color,
        );

        for (hour, cell) in matrix[row].iter().enumerate() {
            let Some(count) = cell else {
                continue;
            };
            let t = if max == 0 { 0.0 } else { *count as f32 / max as f32 };
            let r = cell_rect(row, hour).shrink(0.5);
            painter.rect_filled(r, 0.0, purple_ramp(t));
            painter.text(
                r.center(),
                Align2::CENTER_CENTER,
                count.to_string(),
                font.clone(),
                annotation_color(t),
            );
        }
    }

    // Colour legend
    let legend_top = grid_origin.y + cell_h * 7.0 + 8.0;
    let legend_w = cell_w * 24.0;
    let steps = 48;
    let step_w = legend_w / steps as f32;
    for i in 0..steps {
        let t = i as f32 / (steps - 1) as f32;
        let r = Rect::from_min_size(
            pos2(grid_origin.x + step_w * i as f32, legend_top),
            vec2(step_w + 0.5, 10.0),
        );
        painter.rect_filled(r, 0.0, purple_ramp(t));
    }
    let legend_text_y = legend_top + 12.0;
    painter.text(
        pos2(grid_origin.x, legend_text_y),
        Align2::LEFT_TOP,
        "0",
        font.clone(),
        text_color,
    );
    painter.text(
        pos2(grid_origin.x + legend_w * 0.5, legend_text_y),
        Align2::CENTER_TOP,
        "Number of Trips",
        font.clone(),
        text_color,
    );
    painter.text(
        pos2(grid_origin.x + legend_w, legend_text_y),
        Align2::RIGHT_TOP,
        max.to_string(),
        font,
        text_color,
    );

    if let Some(pos) = response.hover_pos() {
        let rel = pos - grid_origin;
        if rel.x >= 0.0 && rel.y >= 0.0 {
            let hour = (rel.x / cell_w) as usize;
            let row = (rel.y / cell_h) as usize;
            if hour < 24 && row < 7 {
                let count = matrix[row][hour].map_or_else(|| "-".to_string(), |c| c.to_string());
                response.on_hover_text_at_pointer(format!(
                    "{} {hour:02}:00\n{count} trips",
                    weekday_name(WEEKDAYS[row])
                ));
            }
        }
    }
}
