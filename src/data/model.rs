use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// A categorical cell that did not match any known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised {column} value '{value}'")]
pub struct ParseCategoryError {
    pub column: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Smoker {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Smoker {
    pub const ALL: [Smoker; 2] = [Smoker::Yes, Smoker::No];

    pub fn as_str(self) -> &'static str {
        match self {
            Smoker::Yes => "yes",
            Smoker::No => "no",
        }
    }
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Smoker {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Smoker::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCategoryError {
                column: "smoker",
                value: s.to_string(),
            })
    }
}

impl FromStr for Sex {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Sex::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCategoryError {
                column: "sex",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Smoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the insurance table
// ---------------------------------------------------------------------------

/// A single policy holder. Field order is the CSV export column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub age: i64,
    pub sex: Sex,
    pub bmi: f64,
    pub smoker: Smoker,
    pub region: String,
    pub charges: f64,
}

/// Categorical column used to split histograms into coloured groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    Sex,
    Smoker,
    Region,
}

impl GroupBy {
    pub const ALL: [GroupBy; 3] = [GroupBy::Sex, GroupBy::Smoker, GroupBy::Region];

    pub fn label(self) -> &'static str {
        match self {
            GroupBy::Sex => "Sex",
            GroupBy::Smoker => "Smoker",
            GroupBy::Region => "Region",
        }
    }
}

/// Table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Age,
    Sex,
    Bmi,
    Smoker,
    Region,
    Charges,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Age,
        Column::Sex,
        Column::Bmi,
        Column::Smoker,
        Column::Region,
        Column::Charges,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::Age => "Age",
            Column::Sex => "Sex",
            Column::Bmi => "BMI",
            Column::Smoker => "Smoker",
            Column::Region => "Region",
            Column::Charges => "Charges",
        }
    }

    /// Order two records by this column alone.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        match self {
            Column::Age => a.age.cmp(&b.age),
            Column::Sex => a.sex.cmp(&b.sex),
            Column::Bmi => a.bmi.total_cmp(&b.bmi),
            Column::Smoker => a.smoker.cmp(&b.smoker),
            Column::Region => a.region.cmp(&b.region),
            Column::Charges => a.charges.total_cmp(&b.charges),
        }
    }
}

impl Record {
    /// The group label of this record under `group`.
    pub fn category(&self, group: GroupBy) -> &str {
        match group {
            GroupBy::Sex => self.sex.as_str(),
            GroupBy::Smoker => self.smoker.as_str(),
            GroupBy::Region => &self.region,
        }
    }

    /// Text shown in the table cell for `column`.
    pub fn cell_text(&self, column: Column) -> String {
        match column {
            Column::Age => self.age.to_string(),
            Column::Sex => self.sex.to_string(),
            Column::Bmi => format!("{:.2}", self.bmi),
            Column::Smoker => self.smoker.to_string(),
            Column::Region => self.region.clone(),
            Column::Charges => format!("{:.2}", self.charges),
        }
    }
}

// ---------------------------------------------------------------------------
// InsuranceDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded rows plus per-column bounds used to size the filter widgets.
#[derive(Debug, Clone, Default)]
pub struct InsuranceDataset {
    pub records: Vec<Record>,
    /// Sorted distinct regions.
    pub regions: BTreeSet<String>,
    /// Observed `(min, max)` of each numeric column; `(0, 0)` when empty.
    pub age_bounds: (i64, i64),
    pub bmi_bounds: (f64, f64),
    pub charges_bounds: (f64, f64),
}

impl InsuranceDataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let regions = records.iter().map(|r| r.region.clone()).collect();

        let age_bounds = records
            .iter()
            .map(|r| r.age)
            .fold(None, |acc: Option<(i64, i64)>, v| match acc {
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
                None => Some((v, v)),
            })
            .unwrap_or((0, 0));

        InsuranceDataset {
            regions,
            age_bounds,
            bmi_bounds: float_bounds(records.iter().map(|r| r.bmi)),
            charges_bounds: float_bounds(records.iter().map(|r| r.charges)),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct labels present in the data for a grouping column.
    pub fn category_labels(&self, group: GroupBy) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|r| r.category(group).to_string())
            .collect()
    }
}

fn float_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .unwrap_or((0.0, 0.0))
}

#[cfg(test)]
pub(crate) fn record(age: i64, bmi: f64, charges: f64, smoker: Smoker, region: &str, sex: Sex) -> Record {
    Record {
        age,
        sex,
        bmi,
        smoker,
        region: region.to_string(),
        charges,
    }
}
