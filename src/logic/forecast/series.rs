//! Date-bucketed counts

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Count per date plus the number of underlying observations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountSeries {
    buckets: BTreeMap<NaiveDate, f64>,
    observations: usize,
}

impl CountSeries {
    /// One observation per date occurrence
    pub fn from_dates<I>(dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut series = Self::default();
        for date in dates {
            *series.buckets.entry(date).or_insert(0.0) += 1.0;
            series.observations += 1;
        }
        series
    }

    /// Pre-aggregated counts; each unit of count is one observation
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, usize)>,
    {
        let mut series = Self::default();
        for (date, count) in counts {
            *series.buckets.entry(date).or_insert(0.0) += count as f64;
            series.observations += count;
        }
        series
    }

    pub fn observations(&self) -> usize {
        self.observations
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.buckets.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.buckets.keys().next_back().copied()
    }

    /// (date, count), oldest first
    pub fn points(&self) -> Vec<(NaiveDate, f64)> {
        self.buckets.iter().map(|(d, c)| (*d, *c)).collect()
    }

    /// Day offsets from the first bucket and the counts
    pub fn design(&self) -> (Vec<f64>, Vec<f64>) {
        let origin = match self.first_date() {
            Some(d) => d,
            None => return (Vec::new(), Vec::new()),
        };
        self.buckets
            .iter()
            .map(|(d, c)| ((*d - origin).num_days() as f64, *c))
            .unzip()
    }

    pub fn mean_count(&self) -> f64 {
        if self.buckets.is_empty() {
            return 0.0;
        }
        self.buckets.values().sum::<f64>() / self.buckets.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_from_dates_buckets() {
        let series = CountSeries::from_dates([d(3), d(1), d(3), d(10)]);
        assert_eq!(series.observations(), 4);
        assert_eq!(series.bucket_count(), 3);
        assert_eq!(series.points(), vec![(d(1), 1.0), (d(3), 2.0), (d(10), 1.0)]);
        assert_eq!(series.design(), (vec![0.0, 2.0, 9.0], vec![1.0, 2.0, 1.0]));
    }

    #[test]
    fn test_from_counts_observations() {
        let series = CountSeries::from_counts([(d(1), 2), (d(2), 5)]);
        assert_eq!(series.observations(), 7);
        assert_eq!(series.mean_count(), 3.5);
        assert_eq!(series.last_date(), Some(d(2)));
    }
}
