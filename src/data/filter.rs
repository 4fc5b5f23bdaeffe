use std::collections::BTreeSet;

use super::model::{CensusRecord, CensusTable, ThirdDimension, EDUCATION_NUM_DOMAIN};

// ---------------------------------------------------------------------------
// FilterConfig – the full constraint set for one filter pass
// ---------------------------------------------------------------------------

/// The user-chosen constraints, as one immutable value per pass.
///
/// All row-level constraints combine conjunctively: a record survives only
/// when its education level lies inside the closed range AND its education
/// label is selected AND its income label is selected. The absent marker is
/// a first-class member of the label sets, so defaults reconstruct tables
/// that contain missing labels. `third_dimension` selects the extra axis and
/// color channel of the chart and never filters rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Closed interval on `education.num`, both bounds kept.
    pub education_range: (u8, u8),
    /// Allowed `education` labels.
    pub education_levels: BTreeSet<Option<String>>,
    /// Allowed `income` labels.
    pub income_labels: BTreeSet<Option<String>>,
    /// Categorical column placed on the third axis.
    pub third_dimension: ThirdDimension,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            education_range: EDUCATION_NUM_DOMAIN,
            education_levels: BTreeSet::new(),
            income_labels: BTreeSet::new(),
            third_dimension: ThirdDimension::Race,
        }
    }
}

impl FilterConfig {
    /// Constraints that keep every record of the given table: the observed
    /// education bounds and the full distinct label sets.
    pub fn defaults_for(table: &CensusTable) -> Self {
        FilterConfig {
            education_range: table.education_bounds,
            education_levels: table.education_levels.clone(),
            income_labels: table.income_labels.clone(),
            third_dimension: ThirdDimension::Race,
        }
    }

    /// Row-level predicate. A record with an absent `education.num` fails
    /// the range constraint, mirroring the source data's comparison
    /// semantics for missing numerics.
    pub fn matches(&self, record: &CensusRecord) -> bool {
        let (min, max) = self.education_range;
        record
            .education_num
            .is_some_and(|level| level >= min && level <= max)
            && self.education_levels.contains(&record.education)
            && self.income_labels.contains(&record.income)
    }

    /// Produce the filtered view: a fresh table holding the surviving
    /// records in their original order, values untouched. Never fails; a
    /// constraint set that excludes everything yields an empty table, which
    /// callers treat as a distinct non-error state.
    pub fn apply(&self, table: &CensusTable) -> CensusTable {
        let survivors = table
            .records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        CensusTable::from_records(survivors)
    }

    /// True when the row-level constraints are unchanged; the axis selection
    /// is ignored since it never affects which records survive.
    pub fn same_row_constraints(&self, other: &FilterConfig) -> bool {
        self.education_range == other.education_range
            && self.education_levels == other.education_levels
            && self.income_labels == other.income_labels
    }
}
