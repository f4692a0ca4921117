use std::io::Write;

use insurance_dashboard::data::export::write_csv;
use insurance_dashboard::data::filter::{filter, Bounds, Choice, FilterCriteria};
use insurance_dashboard::data::loader::load_file;
use insurance_dashboard::data::model::{Sex, Smoker};
use insurance_dashboard::data::stats::{summarize, SummaryStatistics};
use insurance_dashboard::state::AppState;
use pretty_assertions::assert_eq;

const SAMPLE: &str = "\
age,sex,bmi,children,smoker,region,charges
25,male,22,0,no,north,1000
40,female,30,2,yes,south,5000
";

fn sample_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn filter_and_summarize_loaded_rows() {
    let file = sample_file();
    let dataset = load_file(file.path()).unwrap().dataset;

    let criteria = FilterCriteria {
        age: Bounds::new(20, 30),
        bmi: Bounds::new(0.0, 100.0),
        charges: Bounds::new(0.0, 10000.0),
        smoker: Choice::All,
        region: Choice::All,
        sex: Choice::All,
    };
    let subset = filter(&dataset.records, &criteria);
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].age, 25);
    assert_eq!(subset[0].smoker, Smoker::No);

    assert_eq!(
        summarize(&subset),
        SummaryStatistics {
            count: 1,
            sum: 1000.0,
            mean: 1000.0,
            median: 1000.0,
            stdev: 0.0,
        }
    );
}

#[test]
fn state_round_trip_through_export() {
    let file = sample_file();
    let mut state = AppState::new(20);
    state.load_path(file.path());
    assert_eq!(state.visible_indices.len(), 2);
    assert_eq!(state.summary.sum, 6000.0);
    // sample stdev of {1000, 5000}
    assert!((state.summary.stdev - 2828.427124746190).abs() < 1e-6);

    state.criteria.sex = Choice::Only(Sex::Female);
    state.refilter();
    assert_eq!(state.summary.count, 1);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("female.csv");
    assert_eq!(write_csv(&out, state.visible_records()).unwrap(), 1);

    let exported = load_file(&out).unwrap().dataset;
    assert_eq!(exported.records.len(), 1);
    assert_eq!(exported.records[0].region, "south");
    assert_eq!(exported.records[0].charges, 5000.0);
}
