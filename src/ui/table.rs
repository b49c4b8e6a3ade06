use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;
use crate::data::model::TripDataset;

const COLUMNS: [&str; 7] = [
    "Start date",
    "End date",
    "Total duration (ms)",
    "Total duration (mins)",
    "Bike model",
    "Start station",
    "End station",
];

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// First `rows` trips of the filtered view, in file order.
pub fn preview(ui: &mut Ui, dataset: &TripDataset, visible_indices: &[usize], rows: usize) {
    let view = FilteredView::new(dataset, visible_indices);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .columns(Column::auto().resizable(true), COLUMNS.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for trip in view.iter().take(rows) {
                let cells = [
                    trip.start.format(DISPLAY_FORMAT).to_string(),
                    trip.end.format(DISPLAY_FORMAT).to_string(),
                    trip.duration_ms.to_string(),
                    format!("{:.4}", trip.duration_mins),
                    trip.bike_model.clone(),
                    trip.start_station.clone(),
                    trip.end_station.clone(),
                ];
                body.row(18.0, |mut row| {
                    for cell in cells {
                        row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}
