use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::state::{AppState, DashboardView};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            {
                let AppState {
                    dataset,
                    filters,
                    search,
                    ..
                } = &mut *state;

                changed |= multi_select(
                    ui,
                    "Bike Model",
                    &dataset.bike_models,
                    &mut filters.bike_models,
                    &mut search.bike_model,
                );
                changed |= multi_select(
                    ui,
                    "Start Station",
                    &dataset.start_stations,
                    &mut filters.start_stations,
                    &mut search.start_station,
                );
                changed |= multi_select(
                    ui,
                    "End Station",
                    &dataset.end_stations,
                    &mut filters.end_stations,
                    &mut search.end_station,
                );
            }

            ui.separator();
            date_range_picker(ui, state);

            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });

    if changed {
        state.refilter();
    }
}

/// Searchable checkbox list. Nothing selected means no filter on this field.
/// Returns whether the selection changed.
fn multi_select(
    ui: &mut Ui,
    title: &str,
    options: &[String],
    selected: &mut BTreeSet<String>,
    query: &mut String,
) -> bool {
    let mut changed = false;

    let header_text = if selected.is_empty() {
        format!("{title}  (all)")
    } else {
        format!("{title}  ({}/{})", selected.len(), options.len())
    };

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                ui.add(
                    egui::TextEdit::singleline(query)
                        .hint_text("Search…")
                        .desired_width(140.0),
                );
                if ui.small_button("Clear").clicked() && !selected.is_empty() {
                    selected.clear();
                    changed = true;
                }
            });

            let matching = matching_options(options, query.as_str());
            let row_height = ui.spacing().interact_size.y;
            ScrollArea::vertical()
                .id_salt(format!("{title}_options"))
                .max_height(220.0)
                .show_rows(ui, row_height, matching.len(), |ui: &mut Ui, rows| {
                    for option in &matching[rows] {
                        let mut checked = selected.contains(*option);
                        if ui.checkbox(&mut checked, option.as_str()).changed() {
                            if checked {
                                selected.insert((*option).clone());
                            } else {
                                selected.remove(*option);
                            }
                            changed = true;
                        }
                    }
                });
        });

    changed
}

/// Options containing `query`, case-insensitive. An empty query matches all.
fn matching_options<'a>(options: &'a [String], query: &str) -> Vec<&'a String> {
    let needle = query.trim().to_lowercase();
    options
        .iter()
        .filter(|o| needle.is_empty() || o.to_lowercase().contains(&needle))
        .collect()
}

/// Inclusive start-date range, bounded by the data's first and last day.
fn date_range_picker(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Start Date Range");

    let (Some((mut from, mut to)), Some(_)) = (state.filters.date_range, state.dataset.date_bounds)
    else {
        ui.label("No dates in dataset.");
        return;
    };

    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("From");
        ui.add(DatePickerButton::new(&mut from).id_salt("date_from"));
        ui.end_row();

        ui.label("To");
        ui.add(DatePickerButton::new(&mut to).id_salt("date_to"));
        ui.end_row();
    });

    // The picker itself is unbounded; set_date_range clamps to the data.
    if state.filters.date_range != Some((from, to)) {
        state.set_date_range(from, to);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong(crate::TITLE);

        ui.separator();

        ui.label(format!(
            "{} trips loaded, {} visible",
            state.dataset.len(),
            state.visible_count()
        ));

        if let DashboardView::Halted(e) = &state.view {
            ui.separator();
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
    });
}
