use std::fmt;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use super::model::{CensusRecord, CensusTable};

// ---------------------------------------------------------------------------
// Fixed resource
// ---------------------------------------------------------------------------

/// The census CSV is a fixed resource resolved against the working
/// directory, not a runtime parameter.
pub const DATA_PATH: &str = "adult.csv";

/// Literal used by the source data for a missing value.
const MISSING_SENTINEL: &str = "?";

/// Income label of the upper bracket; everything else derives to 0.
const HIGH_INCOME_LABEL: &str = ">50K";

/// Every column the schema requires in the header row.
const REQUIRED_COLUMNS: [&str; 15] = [
    "age",
    "workclass",
    "fnlwgt",
    "education",
    "education.num",
    "marital.status",
    "occupation",
    "relationship",
    "race",
    "sex",
    "capital.gain",
    "capital.loss",
    "hours.per.week",
    "native.country",
    "income",
];

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Load-time failures are fatal: the UI halts and surfaces the message
/// instead of proceeding with partial data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("census data file not found at `{}`; place the adult census CSV there and restart", .0.display())]
    ResourceNotFound(PathBuf),
    #[error("failed to load census data: {0}")]
    LoadFailure(String),
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Raw row shape as read from the CSV. Everything is text at this stage so
/// the sentinel can appear in numeric columns without breaking the parse.
#[derive(Debug, Deserialize)]
struct RawRecord {
    age: String,
    workclass: String,
    fnlwgt: String,
    education: String,
    #[serde(rename = "education.num")]
    education_num: String,
    #[serde(rename = "marital.status")]
    marital_status: String,
    occupation: String,
    relationship: String,
    race: String,
    sex: String,
    #[serde(rename = "capital.gain")]
    capital_gain: String,
    #[serde(rename = "capital.loss")]
    capital_loss: String,
    #[serde(rename = "hours.per.week")]
    hours_per_week: String,
    #[serde(rename = "native.country")]
    native_country: String,
    income: String,
}

/// Parse a census CSV into a typed table.
///
/// The header row is validated against the full required column set before
/// any row is read, every sentinel occurrence is normalized to an absent
/// value, and `income_numeric` is derived per record. Reads the resource
/// once and performs no writes.
pub fn load_census_csv(path: &Path) -> Result<CensusTable, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::ResourceNotFound(path.to_path_buf()),
        _ => LoadError::LoadFailure(format!("cannot open `{}`: {e}", path.display())),
    })?;

    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::LoadFailure(format!("cannot read header row: {e}")))?
        .clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(LoadError::LoadFailure(format!(
                "missing required column `{required}`"
            )));
        }
    }

    let mut records = Vec::new();
    for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
        let row = index + 1;
        let raw = result.map_err(|e| LoadError::LoadFailure(format!("row {row}: {e}")))?;
        records.push(typed_record(raw, row)?);
    }

    Ok(CensusTable::from_records(records))
}

fn typed_record(raw: RawRecord, row: usize) -> Result<CensusRecord, LoadError> {
    let income = normalize(raw.income);
    let income_numeric = income
        .as_deref()
        .map_or(0, |label| u8::from(label.trim() == HIGH_INCOME_LABEL));

    Ok(CensusRecord {
        age: parse_numeric(raw.age, row, "age")?,
        workclass: normalize(raw.workclass),
        fnlwgt: parse_numeric(raw.fnlwgt, row, "fnlwgt")?,
        education: normalize(raw.education),
        education_num: parse_numeric(raw.education_num, row, "education.num")?,
        marital_status: normalize(raw.marital_status),
        occupation: normalize(raw.occupation),
        relationship: normalize(raw.relationship),
        race: normalize(raw.race),
        sex: normalize(raw.sex),
        capital_gain: parse_numeric(raw.capital_gain, row, "capital.gain")?,
        capital_loss: parse_numeric(raw.capital_loss, row, "capital.loss")?,
        hours_per_week: parse_numeric(raw.hours_per_week, row, "hours.per.week")?,
        native_country: normalize(raw.native_country),
        income,
        income_numeric,
    })
}

/// The sentinel is matched modulo surrounding whitespace; any other value is
/// kept verbatim, whitespace included.
fn normalize(field: String) -> Option<String> {
    if field.trim() == MISSING_SENTINEL {
        None
    } else {
        Some(field)
    }
}

fn parse_numeric<T>(field: String, row: usize, column: &str) -> Result<Option<T>, LoadError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match normalize(field) {
        None => Ok(None),
        Some(text) => text
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| LoadError::LoadFailure(format!("row {row}, column `{column}`: {e}"))),
    }
}

// ---------------------------------------------------------------------------
// Memoized process-wide handle
// ---------------------------------------------------------------------------

static DATASET: OnceLock<Result<CensusTable, LoadError>> = OnceLock::new();

/// The loaded census table for this process.
///
/// The first access reads [`DATA_PATH`]; every later access returns the same
/// in-memory table without touching the filesystem. A failed load is just as
/// final: the error is cached and re-surfaced, since the only remedy is to
/// fix the resource and restart. The table lives until process exit and is
/// read-only after construction.
pub fn dataset() -> Result<&'static CensusTable, &'static LoadError> {
    DATASET
        .get_or_init(|| {
            let loaded = load_census_csv(Path::new(DATA_PATH));
            if let Ok(table) = &loaded {
                info!("loaded {} census records from {DATA_PATH}", table.len());
            }
            loaded
        })
        .as_ref()
}
