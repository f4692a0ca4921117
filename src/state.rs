use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::filter::{filtered_indices, FilterCriteria};
use crate::data::histogram::Histogram;
use crate::data::loader::load_file;
use crate::data::model::{Column, GroupBy, InsuranceDataset, Record};
use crate::data::stats::{summarize, SummaryStatistics};

/// Which view fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    AgeHistogram,
    ChargesHistogram,
    Table,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::AgeHistogram, Tab::ChargesHistogram, Tab::Table];

    pub fn title(self) -> &'static str {
        match self {
            Tab::AgeHistogram => "Ages Hist",
            Tab::ChargesHistogram => "Charges Hist",
            Tab::Table => "Table",
        }
    }
}

/// Message shown in the top bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Table sort order: column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: Column,
    pub ascending: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Everything derived from the criteria is recomputed together in
/// [`AppState::refilter`]; nothing is updated incrementally.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<InsuranceDataset>,

    /// File the dataset came from.
    pub source: Option<PathBuf>,

    /// Active filter criteria.
    pub criteria: FilterCriteria,

    /// Indices of records passing the criteria, in table order (cached).
    pub visible_indices: Vec<usize>,

    /// Charges summary over the visible records.
    pub summary: SummaryStatistics,

    pub age_histogram: Histogram,
    pub charges_histogram: Histogram,

    /// Number of histogram bins.
    pub bins: usize,

    /// Category the histograms are split and coloured by.
    pub group_by: GroupBy,
    pub color_map: Option<ColorMap>,

    pub sort: Option<SortOrder>,
    pub tab: Tab,

    /// Status / error message shown in the UI.
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(bins: usize) -> Self {
        Self {
            dataset: None,
            source: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            summary: SummaryStatistics::default(),
            age_histogram: Histogram::default(),
            charges_histogram: Histogram::default(),
            bins: bins.max(1),
            group_by: GroupBy::default(),
            color_map: None,
            sort: None,
            tab: Tab::default(),
            status: None,
        }
    }

    /// Load `path`, replacing the current dataset. On failure the previous
    /// dataset stays and the error is shown in the status line.
    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(outcome) => {
                log::info!(
                    "Loaded {} records from {} ({} dropped)",
                    outcome.dataset.len(),
                    path.display(),
                    outcome.dropped_rows
                );
                self.set_dataset(outcome.dataset, Some(path.to_path_buf()));
                if outcome.dropped_rows > 0 {
                    self.status = Some(Status::Info(format!(
                        "{} incomplete rows dropped",
                        outcome.dropped_rows
                    )));
                }
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status = Some(Status::Error(format!("{e:#}")));
            }
        }
    }

    /// Ingest a newly loaded dataset, reset filters and colours.
    pub fn set_dataset(&mut self, dataset: InsuranceDataset, source: Option<PathBuf>) {
        self.criteria = FilterCriteria::unrestricted(&dataset);
        self.color_map = Some(ColorMap::new(
            self.group_by,
            &dataset.category_labels(self.group_by),
        ));
        self.dataset = Some(dataset);
        self.source = source;
        self.sort = None;
        self.status = None;
        self.refilter();
    }

    /// Recompute the view, summary and histograms after any criteria change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };

        let mut indices = filtered_indices(ds, &self.criteria);
        if let Some(order) = self.sort {
            indices.sort_by(|&a, &b| {
                let ord = order.column.compare(&ds.records[a], &ds.records[b]);
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }

        let group = self.group_by;
        let visible = indices.iter().map(|&i| &ds.records[i]);
        self.summary = summarize(visible.clone());
        self.age_histogram = Histogram::build(
            visible.clone().map(|r| (r.age as f64, r.category(group))),
            self.bins,
        );
        self.charges_histogram =
            Histogram::build(visible.map(|r| (r.charges, r.category(group))), self.bins);

        log::debug!("{} of {} records match", indices.len(), ds.len());
        self.visible_indices = indices;
    }

    /// Restore criteria that match the whole dataset.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.criteria = FilterCriteria::unrestricted(ds);
            self.refilter();
        }
    }

    /// Switch the histogram grouping column and rebuild colours.
    pub fn set_group_by(&mut self, group: GroupBy) {
        self.group_by = group;
        if let Some(ds) = &self.dataset {
            self.color_map = Some(ColorMap::new(group, &ds.category_labels(group)));
        }
        self.refilter();
    }

    /// Sort the table by `column`; a second click on the same column
    /// reverses the order.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort = Some(match self.sort {
            Some(order) if order.column == column => SortOrder {
                column,
                ascending: !order.ascending,
            },
            _ => SortOrder {
                column,
                ascending: true,
            },
        });
        self.refilter();
    }

    /// Records in the current view, in table order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> {
        let records = self.dataset.as_ref().map(|ds| ds.records.as_slice());
        self.visible_indices
            .iter()
            .filter_map(move |&i| records.and_then(|r| r.get(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{Bounds, Choice};
    use crate::data::model::{record, Sex, Smoker};

    fn loaded() -> AppState {
        let mut state = AppState::new(10);
        state.set_dataset(
            InsuranceDataset::from_records(vec![
                record(25, 22.0, 1000.0, Smoker::No, "north", Sex::Male),
                record(40, 30.0, 5000.0, Smoker::Yes, "south", Sex::Female),
                record(60, 35.5, 3000.0, Smoker::No, "south", Sex::Male),
            ]),
            None,
        );
        state
    }

    #[test]
    fn new_dataset_shows_everything() {
        let state = loaded();
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.summary.count, 3);
        assert_eq!(state.summary.sum, 9000.0);
        assert_eq!(state.summary.median, 3000.0);
        assert_eq!(state.age_histogram.total(), 3);
    }

    #[test]
    fn refilter_updates_derived_values() {
        let mut state = loaded();
        state.criteria.age = Bounds::new(20, 30);
        state.refilter();

        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.summary.mean, 1000.0);
        assert_eq!(state.summary.stdev, 0.0);
        assert_eq!(state.charges_histogram.total(), 1);

        state.criteria.region = Choice::Only("nowhere".to_string());
        state.refilter();
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.summary, SummaryStatistics::default());
        assert!(state.age_histogram.is_empty());

        state.reset_filters();
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn sorting_reorders_but_keeps_rows() {
        let mut state = loaded();
        state.toggle_sort(Column::Charges);
        assert_eq!(state.visible_indices, vec![0, 2, 1]);

        state.toggle_sort(Column::Charges);
        assert_eq!(state.visible_indices, vec![1, 2, 0]);
        let charges: Vec<f64> = state.visible_records().map(|r| r.charges).collect();
        assert_eq!(charges, vec![5000.0, 3000.0, 1000.0]);

        state.criteria.smoker = Choice::Only(Smoker::No);
        state.refilter();
        assert_eq!(state.visible_indices, vec![2, 0]);
    }

    #[test]
    fn group_by_changes_histogram_groups() {
        let mut state = loaded();
        assert_eq!(state.age_histogram.groups().count(), 2);

        state.set_group_by(GroupBy::Region);
        let labels: Vec<&str> = state.age_histogram.groups().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["north", "south"]);
        assert_eq!(state.color_map.as_ref().map(|c| c.group), Some(GroupBy::Region));
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded();
        state.load_path(Path::new("does-not-exist.csv"));
        assert_eq!(state.dataset.as_ref().map(InsuranceDataset::len), Some(3));
        assert!(matches!(state.status, Some(Status::Error(_))));
    }
}
