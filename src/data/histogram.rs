use std::collections::BTreeMap;

/// Equal-width histogram of one numeric column, counted per category label.
///
/// Every group holds exactly `bin_count()` counts so the groups can be drawn
/// stacked on top of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    start: f64,
    width: f64,
    bins: usize,
    counts: BTreeMap<String, Vec<usize>>,
}

impl Histogram {
    /// Bin `(value, category)` pairs into `bins` equal-width bins spanning
    /// the observed range. Non-finite values are skipped.
    pub fn build<I, S>(values: I, bins: usize) -> Self
    where
        I: IntoIterator<Item = (f64, S)>,
        S: Into<String>,
    {
        let values: Vec<(f64, String)> = values
            .into_iter()
            .filter(|(v, _)| v.is_finite())
            .map(|(v, s)| (v, s.into()))
            .collect();
        if values.is_empty() {
            return Self::default();
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (v, _)| {
                (lo.min(*v), hi.max(*v))
            });

        let (start, width, bins) = if max > min {
            let bins = bins.max(1);
            (min, (max - min) / bins as f64, bins)
        } else {
            (min - 0.5, 1.0, 1)
        };

        let mut counts: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (value, label) in values {
            let bin = (((value - start) / width).floor() as usize).min(bins - 1);
            counts.entry(label).or_insert_with(|| vec![0; bins])[bin] += 1;
        }

        Histogram {
            start,
            width,
            bins,
            counts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bins == 0
    }

    pub fn bin_count(&self) -> usize {
        self.bins
    }

    pub fn bin_width(&self) -> f64 {
        self.width
    }

    /// `[lo, hi)` edges of bin `i`; the last bin also includes `hi`.
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        let lo = self.start + i as f64 * self.width;
        (lo, lo + self.width)
    }

    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.width
    }

    /// Category labels with their per-bin counts, sorted by label.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.counts
            .iter()
            .map(|(label, counts)| (label.as_str(), counts.as_slice()))
    }

    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.values().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_values_means_no_bins() {
        let h = Histogram::build(Vec::<(f64, &str)>::new(), 10);
        assert!(h.is_empty());
        assert_eq!(h.total(), 0);
        assert_eq!(h.groups().count(), 0);
    }

    #[test]
    fn counts_split_by_category() {
        let values = [
            (0.0, "male"),
            (1.0, "female"),
            (4.9, "male"),
            (5.0, "female"),
            (10.0, "male"),
        ];
        let h = Histogram::build(values, 2);

        assert_eq!(h.bin_count(), 2);
        assert_eq!(h.bin_width(), 5.0);
        assert_eq!(h.total(), 5);

        let groups: Vec<(&str, &[usize])> = h.groups().collect();
        assert_eq!(groups, vec![("female", &[1, 1][..]), ("male", &[2, 1][..])]);
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let h = Histogram::build([(18.0, "a"), (64.0, "a")], 23);
        let (_, counts) = h.groups().next().unwrap();
        assert_eq!(counts[0], 1);
        assert_eq!(counts[22], 1);
        assert_eq!(h.bin_range(22).1, 64.0);
    }

    #[test]
    fn identical_values_get_one_unit_bin() {
        let h = Histogram::build([(30.0, "x"), (30.0, "y")], 20);
        assert_eq!(h.bin_count(), 1);
        assert_eq!(h.bin_center(0), 30.0);
        assert_eq!(h.bin_range(0), (29.5, 30.5));
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn zero_bins_is_clamped_and_nan_skipped() {
        let h = Histogram::build([(1.0, "a"), (f64::NAN, "a"), (3.0, "b")], 0);
        assert_eq!(h.bin_count(), 1);
        assert_eq!(h.total(), 2);
    }
}
