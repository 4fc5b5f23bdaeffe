//! Integration tests for the filter pipeline: conjunctive constraints,
//! defaults, and empty-result handling.

use std::collections::BTreeSet;

use census_scope::data::filter::FilterConfig;
use census_scope::data::model::CensusTable;

#[path = "common/mod.rs"]
mod common;

fn education_levels(table: &CensusTable) -> Vec<u8> {
    table
        .records
        .iter()
        .filter_map(|r| r.education_num)
        .collect()
}

fn labels(values: &[&str]) -> BTreeSet<Option<String>> {
    values.iter().map(|v| Some(v.to_string())).collect()
}

#[test]
fn defaults_reconstruct_the_full_table() {
    let table = common::sample_table();

    let config = FilterConfig::defaults_for(&table);

    assert_eq!(config.apply(&table), table);
}

#[test]
fn range_bounds_are_inclusive() {
    let table = common::sample_table();

    let config = FilterConfig {
        education_range: (9, 13),
        ..FilterConfig::defaults_for(&table)
    };
    let view = config.apply(&table);

    assert_eq!(education_levels(&view), vec![9, 12, 13]);
}

#[test]
fn sequential_filters_equal_the_combined_constraint_set() {
    let table = common::sample_table();
    let defaults = FilterConfig::defaults_for(&table);

    let range_only = FilterConfig {
        education_range: (9, 16),
        ..defaults.clone()
    };
    let income_only = FilterConfig {
        income_labels: labels(&[">50K"]),
        ..defaults.clone()
    };
    let combined = FilterConfig {
        education_range: (9, 16),
        income_labels: labels(&[">50K"]),
        ..defaults
    };

    let sequential = income_only.apply(&range_only.apply(&table));

    assert_eq!(sequential, combined.apply(&table));
}

#[test]
fn range_excluding_every_record_yields_an_empty_table() {
    let table = common::sample_table();

    let config = FilterConfig {
        education_range: (17, 17),
        ..FilterConfig::defaults_for(&table)
    };
    let view = config.apply(&table);

    assert!(view.is_empty());
    assert_eq!(view.len(), 0);
}

#[test]
fn empty_income_selection_excludes_every_record() {
    let table = common::sample_table();

    let config = FilterConfig {
        income_labels: BTreeSet::new(),
        ..FilterConfig::defaults_for(&table)
    };

    assert!(config.apply(&table).is_empty());
}

#[test]
fn education_label_selection_filters_by_set_membership() {
    let table = common::sample_table();

    let mut config = FilterConfig::defaults_for(&table);
    config
        .education_levels
        .remove(&Some("HS-grad".to_string()));
    let view = config.apply(&table);

    assert_eq!(view.len(), 4);
    assert!(view
        .records
        .iter()
        .all(|r| r.education.as_deref() != Some("HS-grad")));
}

#[test]
fn absent_labels_are_selectable_like_any_value() {
    let table = CensusTable::from_records(vec![
        common::record(Some(9), None, Some("<=50K")),
        common::record(Some(10), Some("Some-college"), Some("<=50K")),
    ]);

    // Defaults include the absent marker, so nothing is dropped.
    let defaults = FilterConfig::defaults_for(&table);
    assert_eq!(defaults.apply(&table), table);

    // Deselecting the absent marker drops exactly the unlabeled record.
    let mut config = defaults;
    config.education_levels.remove(&None);
    let view = config.apply(&table);
    assert_eq!(view.len(), 1);
    assert_eq!(
        view.records[0].education.as_deref(),
        Some("Some-college")
    );
}

#[test]
fn upper_bracket_subset_comes_back_exactly() {
    let table = common::sample_table();

    let config = FilterConfig {
        education_range: (9, 16),
        income_labels: labels(&[">50K"]),
        ..FilterConfig::defaults_for(&table)
    };
    let view = config.apply(&table);

    assert_eq!(education_levels(&view), vec![9, 13, 16]);
    assert!(view.records.iter().all(|r| r.income_numeric == 1));
    assert!(view
        .records
        .iter()
        .all(|r| r.income.as_deref() == Some(">50K")));
}
