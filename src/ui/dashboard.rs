use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::metrics::Metrics;
use crate::state::{AppState, DashboardView};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Central panel: metrics, preview and charts
// ---------------------------------------------------------------------------

/// Render the dashboard for the current filter state.
///
/// A station-combination halt replaces everything below the title with the
/// error message; changing the filters brings the dashboard back.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    ui.heading(RichText::new(crate::TITLE).size(26.0).strong());
    ui.add_space(6.0);

    let dashboard = match &state.view {
        DashboardView::Ready(d) => d,
        DashboardView::Halted(e) => {
            egui::Frame::group(ui.style())
                .fill(Color32::from_rgb(255, 235, 235))
                .show(ui, |ui: &mut Ui| {
                    ui.label(RichText::new(e.to_string()).color(Color32::DARK_RED).strong());
                });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metrics_row(ui, &dashboard.metrics);
            ui.separator();

            ui.heading("Filtered Data");
            table::preview(ui, &state.dataset, &dashboard.visible_indices, state.preview_rows);
            ui.separator();

            let charts = &dashboard.charts;
            ui.columns(2, |cols: &mut [Ui]| {
                plot::duration_scatter(&mut cols[0], charts, &state.color_map);
                plot::top_start_stations(&mut cols[1], charts, state.top_stations);
            });
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                plot::bike_model_usage(&mut cols[0], charts, &state.color_map);
                plot::daily_demand(&mut cols[1], charts);
            });
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                plot::rentals_by_weekday(&mut cols[0], charts);
                plot::weekday_hour_heatmap(&mut cols[1], &charts.weekday_hour);
            });
        });
}

fn metrics_row(ui: &mut Ui, metrics: &Metrics) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Trips", metrics.total_trips.to_string());
        metric(
            &mut cols[1],
            "Average Trip Duration (mins)",
            format!("{:.2}", metrics.avg_duration_mins),
        );
        metric(&mut cols[2], "Total Bike Models", metrics.bike_models.to_string());
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).size(30.0).strong());
}
