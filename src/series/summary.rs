//! Summary statistics over a bucketed series

use super::types::SeriesPoint;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over a series
///
/// Computed over the dense series so that zero-count gaps weigh into the
/// average and minimum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Sum of all counts
    pub total: u64,
    /// Mean count per period, rounded to one decimal place
    pub average: f64,
    /// Largest single-period count
    pub max: u64,
    /// Smallest single-period count
    pub min: u64,
}

impl SeriesSummary {
    /// Compute the summary for a series
    ///
    /// Every field is 0 over an empty series; never NaN, never an error.
    pub fn compute(series: &[SeriesPoint]) -> Self {
        if series.is_empty() {
            return Self {
                total: 0,
                average: 0.0,
                max: 0,
                min: 0,
            };
        }

        let total: u64 = series.iter().map(|p| p.count).sum();
        let max = series.iter().map(|p| p.count).max().unwrap_or(0);
        let min = series.iter().map(|p| p.count).min().unwrap_or(0);
        let average = (total as f64 / series.len() as f64 * 10.0).round() / 10.0;

        Self {
            total,
            average,
            max,
            min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(counts: &[u64]) -> Vec<SeriesPoint> {
        counts
            .iter()
            .enumerate()
            .map(|(i, count)| SeriesPoint::new(format!("2024-01-{:02}", i + 1), *count))
            .collect()
    }

    #[test]
    fn test_summary_basic() {
        let summary = SeriesSummary::compute(&points(&[2, 0, 1]));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.average, 1.0);
        assert_eq!(summary.max, 2);
        assert_eq!(summary.min, 0);
    }

    #[test]
    fn test_summary_average_rounded_to_one_decimal() {
        // 7 events over 3 periods: 2.333... rounds to 2.3
        let summary = SeriesSummary::compute(&points(&[3, 3, 1]));
        assert_eq!(summary.average, 2.3);

        // 5 events over 3 periods: 1.666... rounds to 1.7
        let summary = SeriesSummary::compute(&points(&[2, 2, 1]));
        assert_eq!(summary.average, 1.7);
    }

    #[test]
    fn test_summary_empty_series_is_all_zeros() {
        let summary = SeriesSummary::compute(&[]);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.average, 0.0);
        assert!(!summary.average.is_nan());
        assert_eq!(summary.max, 0);
        assert_eq!(summary.min, 0);
    }

    #[test]
    fn test_summary_single_point() {
        let summary = SeriesSummary::compute(&points(&[5]));

        assert_eq!(summary.total, 5);
        assert_eq!(summary.average, 5.0);
        assert_eq!(summary.max, 5);
        assert_eq!(summary.min, 5);
    }
}
