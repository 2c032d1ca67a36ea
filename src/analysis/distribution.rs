use serde::Serialize;

use crate::{
    error::SurveyorError,
    util::math_utils::{percentile, sorted},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins over the observed range; every bin is half-open except the last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /**
    Bin the present values of a column.

    When every value is equal the range is widened by 0.5 on each side so the
    bins keep a positive width.

    ## Arguments
    * `values` - Present values of the column.
    * `bins` - Number of bins, at least 1.

    ## Returns
    The histogram (empty when `values` is empty), or `InvalidBinCount`.
     */
    pub fn from_values(values: &[f64], bins: usize) -> Result<Self, SurveyorError> {
        if bins == 0 {
            return Err(SurveyorError::InvalidBinCount);
        }
        if values.is_empty() {
            return Ok(Self { bins: Vec::new() });
        }

        let sorted = sorted(values);
        let (mut low, mut high) = (sorted[0], sorted[sorted.len() - 1]);
        if low == high {
            low -= 0.5;
            high += 0.5;
        }

        let width = (high - low) / bins as f64;
        let mut result: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: low + width * i as f64,
                upper: if i + 1 == bins {
                    high
                } else {
                    low + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for value in sorted {
            let index = (((value - low) / width) as usize).min(bins - 1);
            result[index].count += 1;
        }
        Ok(Self { bins: result })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// Quartiles, 1.5 IQR whiskers and outliers of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxplotStats {
    /// `None` when there are no values to draw.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sorted = sorted(values);
        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (fence_low, fence_high) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = sorted
            .iter()
            .copied()
            .filter(|v| *v >= fence_low && *v <= fence_high);
        let whisker_low = inside.clone().next().unwrap_or(q1);
        let whisker_high = inside.last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < fence_low || *v > fence_high)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 5.0, 5.0];
        let histogram = Histogram::from_values(&values, 4).unwrap();
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.total(), values.len());
        // Bins: [1, 2), [2, 3), [3, 4), [4, 5]
        let counts: Vec<usize> = histogram.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 1, 4]);
        assert_eq!(histogram.bins[3].upper, 5.0);
    }

    #[test]
    fn test_histogram_constant_values() {
        let histogram = Histogram::from_values(&[3.0, 3.0], 10).unwrap();
        assert_eq!(histogram.bins[0].lower, 2.5);
        assert_eq!(histogram.bins[9].upper, 3.5);
        assert_eq!(histogram.total(), 2);
        assert_eq!(histogram.bins[5].count, 2);
    }

    #[test]
    fn test_histogram_rejects_zero_bins() {
        assert!(matches!(
            Histogram::from_values(&[1.0], 0),
            Err(SurveyorError::InvalidBinCount)
        ));
    }

    #[test]
    fn test_histogram_empty() {
        let histogram = Histogram::from_values(&[], 10).unwrap();
        assert!(histogram.bins.is_empty());
    }

    #[test]
    fn test_boxplot_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let stats = BoxplotStats::from_values(&values).unwrap();
        // q1 = 2.25, q3 = 4.75, iqr = 2.5, fences = [-1.5, 8.5]
        assert_eq!(stats.q1, 2.25);
        assert_eq!(stats.median, 3.5);
        assert_eq!(stats.q3, 4.75);
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 5.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_boxplot_empty() {
        assert!(BoxplotStats::from_values(&[]).is_none());
    }
}
