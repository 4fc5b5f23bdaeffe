use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::DATA_PATH;
use crate::data::model::{category_label, CensusTable, ThirdDimension, COLUMN_NAMES};
use crate::data::summary::ColumnSummary;
use crate::state::AppState;

const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Top bar – title/description block and record counts
// ---------------------------------------------------------------------------

pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.heading("Census Scope");
        ui.separator();
        ui.label(
            "Explores how education level relates to income in the adult census data, \
             with a selectable categorical variable as the third axis and color channel.",
        );
    });

    if let Some(table) = state.table {
        ui.label(format!(
            "{} records loaded, {} match the current filters",
            table.len(),
            state.view.len()
        ));
    }
}

// ---------------------------------------------------------------------------
// Left side panel – chart settings and filter widgets
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Chart settings");
    ui.separator();

    let Some(table) = state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label("X axis: education level (education.num)");
            ui.label("Y axis: income (<=50K: 0, >50K: 1)");
            ui.add_space(4.0);

            // ---- Third-dimension selector ----
            ui.strong("Z axis / color");
            let current = state.filters.third_dimension;
            egui::ComboBox::from_id_salt("third_dimension")
                .selected_text(current.column_name())
                .show_ui(ui, |ui: &mut Ui| {
                    for dimension in ThirdDimension::ALL {
                        if ui
                            .selectable_label(current == dimension, dimension.column_name())
                            .clicked()
                        {
                            state.set_third_dimension(dimension);
                        }
                    }
                });

            if let Some(color_map) = &state.color_map {
                egui::CollapsingHeader::new(format!("Legend: {}", color_map.column))
                    .id_salt("legend")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        for (label, color) in color_map.legend_entries() {
                            ui.label(RichText::new(label).color(color));
                        }
                    });
            }

            ui.separator();
            ui.heading("Filters");

            // ---- Education level range ----
            ui.strong("Education level (education.num)");
            let (lo, hi) = table.education_bounds;
            let range = &mut state.filters.education_range;
            let min_changed = ui
                .add(Slider::new(&mut range.0, lo..=hi).text("min"))
                .changed();
            let max_changed = ui
                .add(Slider::new(&mut range.1, lo..=hi).text("max"))
                .changed();
            // Keep the interval well-formed by dragging the other bound along.
            if range.0 > range.1 {
                if min_changed {
                    range.1 = range.0;
                } else if max_changed {
                    range.0 = range.1;
                }
            }

            // ---- Label multi-selects ----
            label_filter(
                ui,
                "education",
                &table.education_levels,
                &mut state.filters.education_levels,
            );
            label_filter(
                ui,
                "income",
                &table.income_labels,
                &mut state.filters.income_labels,
            );
        });

    // Recompute the view after any widget changes.
    state.refilter();
}

/// One collapsible multi-select over a column's distinct labels, with
/// All/None shortcuts. The absent marker is selectable like any label.
fn label_filter(
    ui: &mut Ui,
    column: &str,
    all_values: &BTreeSet<Option<String>>,
    selected: &mut BTreeSet<Option<String>>,
) {
    let header = format!("{column}  ({}/{})", selected.len(), all_values.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(column)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = all_values.clone();
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });

            for value in all_values {
                let mut checked = selected.contains(value);
                if ui
                    .checkbox(&mut checked, category_label(value.as_deref()))
                    .changed()
                {
                    if checked {
                        selected.insert(value.clone());
                    } else {
                        selected.remove(value);
                    }
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Data overview – preview and summary of the filtered view
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, state: &AppState) {
    ui.heading("Data overview");
    preview_table(ui, &state.view);

    ui.add_space(12.0);
    ui.heading("Summary statistics");
    summary_table(ui, &state.summary);
}

/// First rows of the filtered view, all columns in source order.
fn preview_table(ui: &mut Ui, view: &CensusTable) {
    ui.push_id("preview", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), COLUMN_NAMES.len())
            .header(20.0, |mut header| {
                for name in COLUMN_NAMES {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for record in view.records.iter().take(PREVIEW_ROWS) {
                    let cells = record.display_cells();
                    body.row(18.0, |mut row| {
                        for cell in &cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}

fn summary_table(ui: &mut Ui, summaries: &[ColumnSummary]) {
    const HEADERS: [&str; 9] = [
        "column", "count", "mean", "std", "min", "max", "unique", "top", "freq",
    ];

    ui.push_id("summary", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), HEADERS.len())
            .header(20.0, |mut header| {
                for name in HEADERS {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|mut body| {
                for summary in summaries {
                    body.row(18.0, |mut row| match summary {
                        ColumnSummary::Numeric { name, count, stats } => {
                            let stats = *stats;
                            let cell = |v: Option<f64>| {
                                v.map_or_else(|| "–".to_string(), |v| format!("{v:.2}"))
                            };
                            row.col(|ui| {
                                ui.label(*name);
                            });
                            row.col(|ui| {
                                ui.label(count.to_string());
                            });
                            row.col(|ui| {
                                ui.label(cell(stats.map(|s| s.mean)));
                            });
                            row.col(|ui| {
                                ui.label(cell(stats.map(|s| s.std)));
                            });
                            row.col(|ui| {
                                ui.label(cell(stats.map(|s| s.min)));
                            });
                            row.col(|ui| {
                                ui.label(cell(stats.map(|s| s.max)));
                            });
                            for _ in 0..3 {
                                row.col(|ui| {
                                    ui.label("–");
                                });
                            }
                        }
                        ColumnSummary::Categorical {
                            name,
                            count,
                            distinct,
                            mode,
                        } => {
                            row.col(|ui| {
                                ui.label(*name);
                            });
                            row.col(|ui| {
                                ui.label(count.to_string());
                            });
                            for _ in 0..4 {
                                row.col(|ui| {
                                    ui.label("–");
                                });
                            }
                            row.col(|ui| {
                                ui.label(distinct.to_string());
                            });
                            row.col(|ui| {
                                ui.label(mode.as_ref().map_or("–", |(label, _)| label.as_str()));
                            });
                            row.col(|ui| {
                                ui.label(
                                    mode.as_ref()
                                        .map_or_else(|| "–".to_string(), |(_, n)| n.to_string()),
                                );
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Load-failure halt notice
// ---------------------------------------------------------------------------

/// A failed load halts the dashboard: nothing but this notice is rendered.
pub fn load_failure_notice(ui: &mut Ui, message: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Failed to load census data");
        ui.add_space(8.0);
        ui.colored_label(Color32::RED, message);
        ui.add_space(8.0);
        ui.label(format!(
            "Put `{DATA_PATH}` in the working directory (or regenerate it with \
             `cargo run --bin generate_sample`) and restart."
        ));
    });
}
