use log::{debug, error};

use crate::color::ColorMap;
use crate::data::filter::FilterConfig;
use crate::data::loader;
use crate::data::model::{CensusTable, ThirdDimension};
use crate::data::summary::{summarize, ColumnSummary};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// The loaded table, or `None` when the load failed.
    pub table: Option<&'static CensusTable>,
    /// User-facing halt notice for a failed load.
    pub load_error: Option<String>,
    /// Current constraint set, edited by the side panel.
    pub filters: FilterConfig,
    /// Filtered view the current render pass works from.
    pub view: CensusTable,
    /// Per-column statistics of `view`.
    pub summary: Vec<ColumnSummary>,
    /// Colour map for the active third dimension.
    pub color_map: Option<ColorMap>,
    /// Constraints `view` was computed from, for change detection.
    applied: FilterConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Resolve the memoized dataset handle and derive the initial state.
    /// A load failure is terminal for the session: the state carries the
    /// message and no table, and the UI halts on it.
    pub fn new() -> Self {
        match loader::dataset() {
            Ok(table) => {
                let filters = FilterConfig::defaults_for(table);
                let view = table.clone();
                let summary = summarize(&view);
                let mut state = AppState {
                    table: Some(table),
                    load_error: None,
                    applied: filters.clone(),
                    filters,
                    view,
                    summary,
                    color_map: None,
                };
                state.rebuild_color_map();
                state
            }
            Err(e) => {
                error!("census data load failed: {e}");
                AppState {
                    table: None,
                    load_error: Some(e.to_string()),
                    filters: FilterConfig::default(),
                    view: CensusTable::default(),
                    summary: Vec::new(),
                    color_map: None,
                    applied: FilterConfig::default(),
                }
            }
        }
    }

    /// Recompute the filtered view when the row-level constraints changed
    /// since the last pass. Each pass replaces the view wholesale; the
    /// loaded table is never mutated.
    pub fn refilter(&mut self) {
        let Some(table) = self.table else { return };
        if self.filters.same_row_constraints(&self.applied) {
            return;
        }
        self.view = self.filters.apply(table);
        self.summary = summarize(&self.view);
        self.applied = self.filters.clone();
        debug!(
            "filter pass kept {} of {} records",
            self.view.len(),
            table.len()
        );
    }

    /// Switch the third axis and rebuild the colour map for it.
    pub fn set_third_dimension(&mut self, dimension: ThirdDimension) {
        self.filters.third_dimension = dimension;
        self.rebuild_color_map();
    }

    fn rebuild_color_map(&mut self) {
        self.color_map = self.table.map(|table| {
            let dimension = self.filters.third_dimension;
            ColorMap::new(
                dimension.column_name(),
                &table.distinct_categories(dimension),
            )
        });
    }
}
