use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// CensusRecord – one row of the census table
// ---------------------------------------------------------------------------

/// Placeholder shown wherever an absent value has to be rendered.
pub const MISSING_LABEL: &str = "<missing>";

/// Documented domain of `education.num`, used when a table carries no
/// observable values to derive bounds from.
pub const EDUCATION_NUM_DOMAIN: (u8, u8) = (1, 16);

/// Column names in source order, plus the derived `income_numeric` column.
pub const COLUMN_NAMES: [&str; 16] = [
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
    "income_numeric",
];

/// A single, fully typed census record. Every source column may carry the
/// missing-value sentinel, so every source field is an `Option`; the derived
/// `income_numeric` column is total (absent or unknown labels map to 0).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CensusRecord {
    pub age: Option<u32>,
    pub workclass: Option<String>,
    pub fnlwgt: Option<u64>,
    pub education: Option<String>,
    pub education_num: Option<u8>,
    pub marital_status: Option<String>,
    pub occupation: Option<String>,
    pub relationship: Option<String>,
    pub race: Option<String>,
    pub sex: Option<String>,
    pub capital_gain: Option<u32>,
    pub capital_loss: Option<u32>,
    pub hours_per_week: Option<u32>,
    pub native_country: Option<String>,
    pub income: Option<String>,
    pub income_numeric: u8,
}

impl CensusRecord {
    /// Render the record as display cells, in [`COLUMN_NAMES`] order.
    pub fn display_cells(&self) -> [String; 16] {
        [
            display_number(self.age),
            category_label(self.workclass.as_deref()).to_string(),
            display_number(self.fnlwgt),
            category_label(self.education.as_deref()).to_string(),
            display_number(self.education_num),
            category_label(self.marital_status.as_deref()).to_string(),
            category_label(self.occupation.as_deref()).to_string(),
            category_label(self.relationship.as_deref()).to_string(),
            category_label(self.race.as_deref()).to_string(),
            category_label(self.sex.as_deref()).to_string(),
            display_number(self.capital_gain),
            display_number(self.capital_loss),
            display_number(self.hours_per_week),
            category_label(self.native_country.as_deref()).to_string(),
            category_label(self.income.as_deref()).to_string(),
            self.income_numeric.to_string(),
        ]
    }
}

/// Display a categorical value, substituting the missing placeholder.
pub fn category_label(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING_LABEL)
}

/// Display a numeric value, substituting the missing placeholder.
pub fn display_number<T: fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| MISSING_LABEL.to_string(), |v| v.to_string())
}

// ---------------------------------------------------------------------------
// ThirdDimension – the selectable categorical axis
// ---------------------------------------------------------------------------

/// The categorical columns that can be placed on the third axis of the
/// scatter. The same column drives the color channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThirdDimension {
    Race,
    Sex,
    MaritalStatus,
    Workclass,
    Occupation,
    Relationship,
    NativeCountry,
}

impl ThirdDimension {
    pub const ALL: [ThirdDimension; 7] = [
        ThirdDimension::Race,
        ThirdDimension::Sex,
        ThirdDimension::MaritalStatus,
        ThirdDimension::Workclass,
        ThirdDimension::Occupation,
        ThirdDimension::Relationship,
        ThirdDimension::NativeCountry,
    ];

    /// Source column name, as spelled in the CSV header.
    pub fn column_name(self) -> &'static str {
        match self {
            ThirdDimension::Race => "race",
            ThirdDimension::Sex => "sex",
            ThirdDimension::MaritalStatus => "marital.status",
            ThirdDimension::Workclass => "workclass",
            ThirdDimension::Occupation => "occupation",
            ThirdDimension::Relationship => "relationship",
            ThirdDimension::NativeCountry => "native.country",
        }
    }

    /// The record's value for this column.
    pub fn value_of(self, record: &CensusRecord) -> Option<&str> {
        match self {
            ThirdDimension::Race => record.race.as_deref(),
            ThirdDimension::Sex => record.sex.as_deref(),
            ThirdDimension::MaritalStatus => record.marital_status.as_deref(),
            ThirdDimension::Workclass => record.workclass.as_deref(),
            ThirdDimension::Occupation => record.occupation.as_deref(),
            ThirdDimension::Relationship => record.relationship.as_deref(),
            ThirdDimension::NativeCountry => record.native_country.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// CensusTable – the loaded dataset
// ---------------------------------------------------------------------------

/// An ordered collection of records with pre-computed value indices.
/// Immutable once built; filtering produces a fresh table instead of
/// mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusTable {
    /// All records, in source order.
    pub records: Vec<CensusRecord>,
    /// Observed min/max of `education.num`; falls back to the documented
    /// 1–16 domain when no value is present.
    pub education_bounds: (u8, u8),
    /// Distinct `education` labels present, the absent marker included.
    pub education_levels: BTreeSet<Option<String>>,
    /// Distinct `income` labels present, the absent marker included.
    pub income_labels: BTreeSet<Option<String>>,
}

impl Default for CensusTable {
    fn default() -> Self {
        CensusTable::from_records(Vec::new())
    }
}

impl CensusTable {
    /// Build the value indices from the given records.
    pub fn from_records(records: Vec<CensusRecord>) -> Self {
        let mut education_levels = BTreeSet::new();
        let mut income_labels = BTreeSet::new();
        let mut bounds: Option<(u8, u8)> = None;

        for record in &records {
            education_levels.insert(record.education.clone());
            income_labels.insert(record.income.clone());
            if let Some(level) = record.education_num {
                bounds = Some(match bounds {
                    Some((lo, hi)) => (lo.min(level), hi.max(level)),
                    None => (level, level),
                });
            }
        }

        CensusTable {
            records,
            education_bounds: bounds.unwrap_or(EDUCATION_NUM_DOMAIN),
            education_levels,
            income_labels,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct values of the given categorical column, the absent
    /// marker included when it occurs.
    pub fn distinct_categories(&self, dimension: ThirdDimension) -> BTreeSet<Option<String>> {
        self.records
            .iter()
            .map(|r| dimension.value_of(r).map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(education_num: Option<u8>, education: Option<&str>, race: Option<&str>) -> CensusRecord {
        CensusRecord {
            education_num,
            education: education.map(str::to_string),
            race: race.map(str::to_string),
            ..CensusRecord::default()
        }
    }

    #[test]
    fn from_records_builds_value_indices() {
        let table = CensusTable::from_records(vec![
            record(Some(9), Some("HS-grad"), Some("White")),
            record(Some(13), Some("Bachelors"), Some("Black")),
            record(Some(4), None, Some("White")),
        ]);

        assert_eq!(table.education_bounds, (4, 13));
        assert_eq!(table.education_levels.len(), 3);
        assert!(table.education_levels.contains(&None));
        assert!(table
            .education_levels
            .contains(&Some("Bachelors".to_string())));
    }

    #[test]
    fn empty_table_falls_back_to_domain_bounds() {
        let table = CensusTable::from_records(Vec::new());
        assert_eq!(table.education_bounds, EDUCATION_NUM_DOMAIN);
        assert!(table.is_empty());
    }

    #[test]
    fn distinct_categories_follow_the_selected_dimension() {
        let table = CensusTable::from_records(vec![
            record(Some(9), Some("HS-grad"), Some("White")),
            record(Some(13), Some("Bachelors"), Some("Black")),
            record(Some(4), None, None),
        ]);

        let races = table.distinct_categories(ThirdDimension::Race);
        assert_eq!(races.len(), 3);
        assert!(races.contains(&None));

        // A column with no populated values collapses to the absent marker.
        let sexes = table.distinct_categories(ThirdDimension::Sex);
        assert_eq!(sexes.len(), 1);
        assert!(sexes.contains(&None));
    }

    #[test]
    fn display_cells_follow_column_order() {
        let mut sample = record(Some(9), Some("HS-grad"), Some("White"));
        sample.age = Some(38);
        sample.income = Some(">50K".to_string());
        sample.income_numeric = 1;

        let cells = sample.display_cells();
        assert_eq!(cells.len(), COLUMN_NAMES.len());
        assert_eq!(cells[0], "38");
        assert_eq!(cells[1], MISSING_LABEL);
        assert_eq!(cells[4], "9");
        assert_eq!(cells[14], ">50K");
        assert_eq!(cells[15], "1");
    }
}
