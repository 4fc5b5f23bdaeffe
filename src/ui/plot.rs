use std::collections::BTreeMap;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, PlotUi, Points, Text};

use crate::data::model::{category_label, display_number, CensusRecord};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// 3D scatter (central panel)
// ---------------------------------------------------------------------------

// The three axes live in a normalized unit cube: x = education level,
// y = derived income, z = the chosen categorical column. The cube is drawn
// with an isometric projection; DEPTH_* is the screen direction of the z
// axis in plot units per unit of depth.
const DEPTH_X: f64 = 0.55;
const DEPTH_Y: f64 = 0.35;

/// Half-width of the deterministic per-record jitter, in normalized units.
/// Separates the many records sharing one lattice position.
const JITTER: f64 = 0.018;

const PLOT_HEIGHT: f32 = 700.0;

/// Squared pick distance for the hover lookup, in plot units.
const PICK_RADIUS_SQ: f64 = 4e-4;

const FRAME_COLOR: Color32 = Color32::from_gray(110);

/// Render the scatter relating education level, income, and the third
/// dimension. An empty filtered view is a recognized state, not an error:
/// the chart is skipped and a notice asks the user to relax the filters.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    let (Some(table), Some(color_map)) = (state.table, state.color_map.as_ref()) else {
        return;
    };

    ui.heading(format!(
        "Education level, income and {} in 3D",
        color_map.column
    ));

    if state.view.is_empty() {
        ui.colored_label(
            Color32::YELLOW,
            "No records match the current filters. Relax the education or income selections to see data.",
        );
        return;
    }

    let dimension = state.filters.third_dimension;
    let categories: Vec<Option<String>> = color_map.categories().cloned().collect();
    let category_index: BTreeMap<Option<&str>, usize> = categories
        .iter()
        .enumerate()
        .map(|(slot, category)| (category.as_deref(), slot))
        .collect();
    let depth_span = categories.len().saturating_sub(1).max(1) as f64;

    let (min_edu, max_edu) = table.education_bounds;
    let edu_span = f64::from(max_edu.saturating_sub(min_edu)).max(1.0);

    // Bucket projected points per category so each category is one series
    // with one legend entry; keep a flat copy for the hover lookup.
    let mut buckets: Vec<Vec<[f64; 2]>> = vec![Vec::new(); categories.len()];
    let mut projected: Vec<([f64; 2], usize)> = Vec::with_capacity(state.view.len());

    for (row, record) in state.view.records.iter().enumerate() {
        let Some(level) = record.education_num else {
            continue;
        };
        let Some(&slot) = category_index.get(&dimension.value_of(record)) else {
            continue;
        };

        let x = f64::from(level.saturating_sub(min_edu)) / edu_span;
        let y = f64::from(record.income_numeric);
        let z = slot as f64 / depth_span;
        let (jx, jy) = jitter(row);
        let point = [x + jx + z * DEPTH_X, y + jy + z * DEPTH_Y];

        buckets[slot].push(point);
        projected.push((point, row));
    }

    let response = Plot::new("census_scatter")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            draw_frame(plot_ui, min_edu, max_edu, color_map.column);

            for (slot, category) in categories.iter().enumerate() {
                let points = std::mem::take(&mut buckets[slot]);
                if points.is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category_label(category.as_deref()))
                        .color(color_map.color_for(category.as_deref()))
                        .radius(1.8),
                );
            }

            hovered_row(plot_ui, &projected)
        });

    if let Some(row) = response.inner {
        response
            .response
            .on_hover_ui_at_pointer(|ui| hover_card(ui, &state.view.records[row]));
    }
}

/// Project a point of the unit cube onto the plot plane.
fn project(x: f64, y: f64, z: f64) -> [f64; 2] {
    [x + z * DEPTH_X, y + z * DEPTH_Y]
}

fn jitter(row: usize) -> (f64, f64) {
    let mut state = row as u64;
    let a = splitmix(&mut state);
    let b = splitmix(&mut state);
    ((a - 0.5) * 2.0 * JITTER, (b - 0.5) * 2.0 * JITTER)
}

/// splitmix64 step mapped onto [0, 1); keeps the jitter stable per row.
fn splitmix(state: &mut u64) -> f64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}

/// Draw the cube frame and axis captions.
fn draw_frame(plot_ui: &mut PlotUi, min_edu: u8, max_edu: u8, depth_label: &str) {
    const EDGES: [((f64, f64, f64), (f64, f64, f64)); 12] = [
        // x edges
        ((0.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
        ((0.0, 1.0, 0.0), (1.0, 1.0, 0.0)),
        ((0.0, 0.0, 1.0), (1.0, 0.0, 1.0)),
        ((0.0, 1.0, 1.0), (1.0, 1.0, 1.0)),
        // y edges
        ((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)),
        ((1.0, 0.0, 0.0), (1.0, 1.0, 0.0)),
        ((0.0, 0.0, 1.0), (0.0, 1.0, 1.0)),
        ((1.0, 0.0, 1.0), (1.0, 1.0, 1.0)),
        // z edges
        ((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)),
        ((1.0, 0.0, 0.0), (1.0, 0.0, 1.0)),
        ((0.0, 1.0, 0.0), (0.0, 1.0, 1.0)),
        ((1.0, 1.0, 0.0), (1.0, 1.0, 1.0)),
    ];

    for ((ax, ay, az), (bx, by, bz)) in EDGES {
        let segment = vec![project(ax, ay, az), project(bx, by, bz)];
        plot_ui.line(
            Line::new(PlotPoints::from(segment))
                .color(FRAME_COLOR)
                .width(0.6),
        );
    }

    caption(plot_ui, project(0.5, -0.10, 0.0), "education.num", 13.0);
    caption(
        plot_ui,
        project(-0.16, 0.5, 0.0),
        "income (<=50K: 0, >50K: 1)",
        13.0,
    );
    caption(plot_ui, project(1.10, -0.06, 0.5), depth_label, 13.0);

    // Scale marks for the two numeric axes.
    caption(plot_ui, project(0.0, -0.04, 0.0), &min_edu.to_string(), 11.0);
    caption(plot_ui, project(1.0, -0.04, 0.0), &max_edu.to_string(), 11.0);
    caption(plot_ui, project(-0.04, 0.0, 0.0), "0", 11.0);
    caption(plot_ui, project(-0.04, 1.0, 0.0), "1", 11.0);
}

fn caption(plot_ui: &mut PlotUi, position: [f64; 2], text: &str, size: f32) {
    plot_ui.text(
        Text::new(
            PlotPoint::new(position[0], position[1]),
            RichText::new(text).size(size),
        )
        .color(FRAME_COLOR),
    );
}

/// Nearest projected point within the pick radius of the pointer.
fn hovered_row(plot_ui: &PlotUi, projected: &[([f64; 2], usize)]) -> Option<usize> {
    let pointer = plot_ui.pointer_coordinate()?;
    let mut best = PICK_RADIUS_SQ;
    let mut row = None;
    for &([x, y], index) in projected {
        let dist = (x - pointer.x).powi(2) + (y - pointer.y).powi(2);
        if dist < best {
            best = dist;
            row = Some(index);
        }
    }
    row
}

/// Tooltip body for the record under the pointer.
fn hover_card(ui: &mut Ui, record: &CensusRecord) {
    ui.strong(category_label(record.education.as_deref()));
    ui.label(format!(
        "education.num: {}",
        display_number(record.education_num)
    ));
    ui.label(format!(
        "income: {}",
        category_label(record.income.as_deref())
    ));
    ui.label(format!("age: {}", display_number(record.age)));
    ui.label(format!(
        "workclass: {}",
        category_label(record.workclass.as_deref())
    ));
    ui.label(format!(
        "marital.status: {}",
        category_label(record.marital_status.as_deref())
    ));
    ui.label(format!(
        "occupation: {}",
        category_label(record.occupation.as_deref())
    ));
    ui.label(format!(
        "hours.per.week: {}",
        display_number(record.hours_per_week)
    ));
    ui.label(format!(
        "native.country: {}",
        category_label(record.native_country.as_deref())
    ));
}
