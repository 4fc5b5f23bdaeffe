//! Integration tests for the CSV loader: typing, schema validation,
//! sentinel normalization, and the derived income column.

use std::io::Write;

use census_scope::data::loader::{load_census_csv, LoadError};
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn loads_typed_records_with_derived_income() {
    let (_dir, path) = common::write_census_csv(&common::sample_rows());
    let table = load_census_csv(&path).unwrap();

    assert_eq!(table.len(), 5);

    let first = &table.records[0];
    assert_eq!(first.age, Some(25));
    assert_eq!(first.education.as_deref(), Some("Preschool"));
    assert_eq!(first.education_num, Some(1));
    assert_eq!(first.income.as_deref(), Some("<=50K"));
    assert_eq!(first.income_numeric, 0);

    assert_eq!(table.records[1].income_numeric, 1);
    assert_eq!(table.records[3].capital_gain, Some(7688));

    assert_eq!(table.education_bounds, (1, 16));
    assert_eq!(table.income_labels.len(), 2);
    assert!(table
        .education_levels
        .contains(&Some("HS-grad".to_string())));
}

#[test]
fn missing_file_is_resource_not_found() {
    let dir = TempDir::new().unwrap();

    let err = load_census_csv(&dir.path().join("nope.csv")).unwrap_err();

    assert!(matches!(err, LoadError::ResourceNotFound(_)));
    assert!(err.to_string().contains("not found"));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn missing_required_column_fails_before_any_row_is_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("adult.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    // Header without the income column.
    writeln!(
        file,
        "age,workclass,fnlwgt,education,education.num,marital.status,occupation,\
         relationship,race,sex,capital.gain,capital.loss,hours.per.week,native.country"
    )
    .unwrap();
    writeln!(
        file,
        "25,Private,226802,HS-grad,9,Never-married,Sales,Own-child,White,Male,0,0,40,United-States"
    )
    .unwrap();
    drop(file);

    let err = load_census_csv(&path).unwrap_err();

    assert!(matches!(err, LoadError::LoadFailure(_)));
    assert!(err.to_string().contains("income"));
}

#[test]
fn sentinel_values_normalize_to_absent_in_every_column() {
    let (_dir, path) = common::write_census_csv(&[
        "?,?,189778,HS-grad,9,Never-married, ? ,Own-child,White,Male,0,0,40,?,<=50K",
    ]);
    let table = load_census_csv(&path).unwrap();

    let record = &table.records[0];
    assert_eq!(record.age, None);
    assert_eq!(record.workclass, None);
    // Sentinel with surrounding whitespace still counts as missing.
    assert_eq!(record.occupation, None);
    assert_eq!(record.native_country, None);
    // Regular values are untouched.
    assert_eq!(record.education.as_deref(), Some("HS-grad"));
    assert_eq!(record.sex.as_deref(), Some("Male"));
}

#[test]
fn income_mapping_trims_whitespace_and_defaults_to_zero() {
    let (_dir, path) = common::write_census_csv(&[
        "30,Private,100000,HS-grad,9,Never-married,Sales,Own-child,White,Male,0,0,40,United-States, >50K",
        "31,Private,100000,HS-grad,9,Never-married,Sales,Own-child,White,Male,0,0,40,United-States,<=50K",
        "32,Private,100000,HS-grad,9,Never-married,Sales,Own-child,White,Male,0,0,40,United-States,Unknown",
        "33,Private,100000,HS-grad,9,Never-married,Sales,Own-child,White,Male,0,0,40,United-States,?",
    ]);
    let table = load_census_csv(&path).unwrap();

    // The label keeps its whitespace; only the derivation trims.
    assert_eq!(table.records[0].income.as_deref(), Some(" >50K"));
    assert_eq!(table.records[0].income_numeric, 1);
    assert_eq!(table.records[1].income_numeric, 0);
    // Labels outside the known brackets fall back to 0, absent included.
    assert_eq!(table.records[2].income_numeric, 0);
    assert_eq!(table.records[3].income, None);
    assert_eq!(table.records[3].income_numeric, 0);
}

#[test]
fn malformed_numeric_value_is_a_load_failure() {
    let (_dir, path) = common::write_census_csv(&[
        "25,Private,226802,HS-grad,twelve,Never-married,Sales,Own-child,White,Male,0,0,40,United-States,<=50K",
    ]);

    let err = load_census_csv(&path).unwrap_err();

    assert!(matches!(err, LoadError::LoadFailure(_)));
    assert!(err.to_string().contains("education.num"));
}

#[test]
fn loading_is_idempotent() {
    let (_dir, path) = common::write_census_csv(&common::sample_rows());

    let first = load_census_csv(&path).unwrap();
    let second = load_census_csv(&path).unwrap();

    assert_eq!(first, second);
}
