use std::collections::BTreeMap;

use super::model::{CensusRecord, CensusTable};

// ---------------------------------------------------------------------------
// Per-column summary statistics of a (possibly filtered) table
// ---------------------------------------------------------------------------

/// Moments of a numeric column over its non-missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    pub mean: f64,
    /// Sample standard deviation; 0 for a single value.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Summary of one column. `count` is the number of non-missing values in
/// either variant; the payloads are `None`/empty when nothing is populated,
/// never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSummary {
    Numeric {
        name: &'static str,
        count: usize,
        stats: Option<NumericStats>,
    },
    Categorical {
        name: &'static str,
        count: usize,
        distinct: usize,
        /// Modal value and its frequency.
        mode: Option<(String, usize)>,
    },
}

impl ColumnSummary {
    pub fn name(&self) -> &'static str {
        match self {
            ColumnSummary::Numeric { name, .. } => name,
            ColumnSummary::Categorical { name, .. } => name,
        }
    }
}

/// Summarize every column of the table, in source column order.
pub fn summarize(table: &CensusTable) -> Vec<ColumnSummary> {
    vec![
        numeric(table, "age", |r| r.age.map(f64::from)),
        categorical(table, "workclass", |r| r.workclass.as_deref()),
        numeric(table, "fnlwgt", |r| r.fnlwgt.map(|v| v as f64)),
        categorical(table, "education", |r| r.education.as_deref()),
        numeric(table, "education.num", |r| r.education_num.map(f64::from)),
        categorical(table, "marital.status", |r| r.marital_status.as_deref()),
        categorical(table, "occupation", |r| r.occupation.as_deref()),
        categorical(table, "relationship", |r| r.relationship.as_deref()),
        categorical(table, "race", |r| r.race.as_deref()),
        categorical(table, "sex", |r| r.sex.as_deref()),
        numeric(table, "capital.gain", |r| r.capital_gain.map(f64::from)),
        numeric(table, "capital.loss", |r| r.capital_loss.map(f64::from)),
        numeric(table, "hours.per.week", |r| r.hours_per_week.map(f64::from)),
        categorical(table, "native.country", |r| r.native_country.as_deref()),
        categorical(table, "income", |r| r.income.as_deref()),
        numeric(table, "income_numeric", |r| Some(f64::from(r.income_numeric))),
    ]
}

fn numeric(
    table: &CensusTable,
    name: &'static str,
    value: impl Fn(&CensusRecord) -> Option<f64>,
) -> ColumnSummary {
    let values: Vec<f64> = table.records.iter().filter_map(&value).collect();
    let count = values.len();

    let stats = if values.is_empty() {
        None
    } else {
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = if count < 2 {
            0.0
        } else {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(NumericStats { mean, std, min, max })
    };

    ColumnSummary::Numeric { name, count, stats }
}

fn categorical(
    table: &CensusTable,
    name: &'static str,
    value: impl Fn(&CensusRecord) -> Option<&str>,
) -> ColumnSummary {
    let mut frequencies: BTreeMap<&str, usize> = BTreeMap::new();
    let mut count = 0;
    for record in &table.records {
        if let Some(label) = value(record) {
            count += 1;
            *frequencies.entry(label).or_insert(0) += 1;
        }
    }

    let distinct = frequencies.len();
    let mode = frequencies
        .into_iter()
        .max_by_key(|&(_, n)| n)
        .map(|(label, n)| (label.to_string(), n));

    ColumnSummary::Categorical {
        name,
        count,
        distinct,
        mode,
    }
}
