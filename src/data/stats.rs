use super::model::Record;

/// Summary of the `charges` column over the current view.
///
/// Statistics that are undefined for the given count are reported as `0.0`:
/// everything except `count` for an empty view, and `stdev` for a single row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryStatistics {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n − 1 denominator).
    pub stdev: f64,
}

/// Summarise the charges of `subset`.
pub fn summarize<'a, I>(subset: I) -> SummaryStatistics
where
    I: IntoIterator<Item = &'a Record>,
{
    let charges: Vec<f64> = subset.into_iter().map(|r| r.charges).collect();
    summarize_values(&charges)
}

pub fn summarize_values(values: &[f64]) -> SummaryStatistics {
    let count = values.len();
    if count == 0 {
        return SummaryStatistics::default();
    }

    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let stdev = if count < 2 {
        0.0
    } else {
        let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (squares / (count - 1) as f64).sqrt()
    };

    SummaryStatistics {
        count,
        sum,
        mean,
        median,
        stdev,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{record, Sex, Smoker};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_subset_is_all_zero() {
        let stats = summarize(std::iter::empty());
        assert_eq!(stats, SummaryStatistics::default());
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn single_row_has_zero_stdev() {
        let rows = [record(25, 22.0, 1000.0, Smoker::No, "north", Sex::Male)];
        let stats = summarize(&rows);
        assert_eq!(
            stats,
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
    fn sample_standard_deviation() {
        let stats = summarize_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count, 8);
        assert!(close(stats.sum, 40.0));
        assert!(close(stats.mean, 5.0));
        // population stdev would be exactly 2.0
        assert!(close(stats.stdev, (32.0f64 / 7.0).sqrt()));
    }

    #[test]
    fn median_of_even_count_averages_middle_pair() {
        let stats = summarize_values(&[9.0, 1.0, 3.0, 5.0]);
        assert!(close(stats.median, 4.0));

        let stats = summarize_values(&[9.0, 1.0, 3.0]);
        assert!(close(stats.median, 3.0));
    }
}
