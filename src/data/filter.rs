use std::fmt;

use super::model::{InsuranceDataset, Record, Sex, Smoker};

// ---------------------------------------------------------------------------
// Filter building blocks
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` range. Construction swaps a reversed pair so
/// `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(a: T, b: T) -> Self {
        if b < a {
            Bounds { min: b, max: a }
        } else {
            Bounds { min: a, max: b }
        }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    /// Restore `min <= max` after one end was edited, keeping the edited end.
    pub fn clamp_max_to_min(&mut self) {
        if self.max < self.min {
            self.max = self.min;
        }
    }

    pub fn clamp_min_to_max(&mut self) {
        if self.min > self.max {
            self.min = self.max;
        }
    }
}

/// Equality constraint on a categorical column, or no constraint at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str("All"),
            Choice::Only(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria – the complete predicate driven by the side panel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub age: Bounds<i64>,
    pub bmi: Bounds<f64>,
    pub charges: Bounds<f64>,
    pub smoker: Choice<Smoker>,
    pub region: Choice<String>,
    pub sex: Choice<Sex>,
}

impl Default for FilterCriteria {
    /// Criteria that match any record.
    fn default() -> Self {
        Self {
            age: Bounds::new(i64::MIN, i64::MAX),
            bmi: Bounds::new(f64::NEG_INFINITY, f64::INFINITY),
            charges: Bounds::new(f64::NEG_INFINITY, f64::INFINITY),
            smoker: Choice::All,
            region: Choice::All,
            sex: Choice::All,
        }
    }
}

impl FilterCriteria {
    /// Criteria spanning the whole dataset: every range at the observed
    /// bounds and every choice set to `All`.
    ///
    /// Float bounds are widened to whole numbers so the extreme rows stay
    /// inside the slider range.
    pub fn unrestricted(dataset: &InsuranceDataset) -> Self {
        let (age_lo, age_hi) = dataset.age_bounds;
        let (bmi_lo, bmi_hi) = dataset.bmi_bounds;
        let (charges_lo, charges_hi) = dataset.charges_bounds;
        Self {
            age: Bounds::new(age_lo, age_hi),
            bmi: Bounds::new(bmi_lo.floor(), bmi_hi.ceil()),
            charges: Bounds::new(charges_lo.floor(), charges_hi.ceil()),
            ..Self::default()
        }
    }

    /// Whether `record` satisfies every range and choice.
    pub fn matches(&self, record: &Record) -> bool {
        self.age.contains(record.age)
            && self.bmi.contains(record.bmi)
            && self.charges.contains(record.charges)
            && self.smoker.accepts(&record.smoker)
            && self.region.accepts(&record.region)
            && self.sex.accepts(&record.sex)
    }
}

/// Return the records matching `criteria`, in input order.
pub fn filter(records: &[Record], criteria: &FilterCriteria) -> Vec<Record> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Return indices of records that pass `criteria`, ascending.
pub fn filtered_indices(dataset: &InsuranceDataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}
