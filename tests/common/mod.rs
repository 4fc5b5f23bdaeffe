//! Shared fixture helpers for the integration tests.

use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

use census_scope::data::loader::load_census_csv;
use census_scope::data::model::{CensusRecord, CensusTable};

pub const HEADER: &str = "age,workclass,fnlwgt,education,education.num,marital.status,\
occupation,relationship,race,sex,capital.gain,capital.loss,hours.per.week,\
native.country,income";

/// Write a census CSV with the full header and the given data rows into a
/// fresh temporary directory. Keep the `TempDir` alive while the file is
/// in use.
pub fn write_census_csv(rows: &[&str]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("adult.csv");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }

    (temp_dir, path)
}

/// Five records spanning the education scale (1 to 16) and both income
/// brackets.
pub fn sample_rows() -> Vec<&'static str> {
    vec![
        "25,Private,226802,Preschool,1,Never-married,Machine-op-inspct,Own-child,Black,Male,0,0,40,United-States,<=50K",
        "38,Private,89814,HS-grad,9,Married-civ-spouse,Farming-fishing,Husband,White,Male,0,0,50,United-States,>50K",
        "28,Local-gov,336951,Assoc-acdm,12,Married-civ-spouse,Protective-serv,Husband,White,Male,0,0,40,United-States,<=50K",
        "44,Private,160323,Bachelors,13,Married-civ-spouse,Machine-op-inspct,Husband,Black,Male,7688,0,40,United-States,>50K",
        "63,Self-emp-not-inc,104626,Doctorate,16,Married-civ-spouse,Prof-specialty,Husband,White,Male,3103,0,32,United-States,>50K",
    ]
}

/// The sample rows loaded through the real loader.
pub fn sample_table() -> CensusTable {
    let (dir, path) = write_census_csv(&sample_rows());
    let table = load_census_csv(&path).expect("sample CSV loads");
    drop(dir);
    table
}

/// A bare record with just the filterable columns populated.
pub fn record(
    education_num: Option<u8>,
    education: Option<&str>,
    income: Option<&str>,
) -> CensusRecord {
    CensusRecord {
        education_num,
        education: education.map(str::to_string),
        income_numeric: income.map_or(0, |label| u8::from(label.trim() == ">50K")),
        income: income.map(str::to_string),
        ..CensusRecord::default()
    }
}
