use serde::Serialize;
use statrs::statistics::Statistics;

use crate::{
    data::Dataset,
    error::SurveyorError,
    util::math_utils::{median, percentile, sorted},
};

/// Mean, median, sample standard deviation, minimum and maximum of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnSummary {
    /**
    Summarize the present values of a column.

    Every field is `NaN` when `values` is empty, and `std` is `NaN` for a
    single value since the sample standard deviation divides by `n - 1`.
     */
    pub fn from_values(name: &str, values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                name: name.to_string(),
                mean: f64::NAN,
                median: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
            };
        }

        Self {
            name: name.to_string(),
            mean: values.mean(),
            median: median(values),
            std: values.std_dev(),
            min: Statistics::min(values),
            max: Statistics::max(values),
        }
    }
}

/// The count / mean / std / min / quartiles / max profile used for composite scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescribeProfile {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl DescribeProfile {
    pub fn from_values(name: &str, values: &[f64]) -> Self {
        let summary = ColumnSummary::from_values(name, values);
        let sorted = sorted(values);
        Self {
            name: name.to_string(),
            count: values.len(),
            mean: summary.mean,
            std: summary.std,
            min: summary.min,
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: summary.max,
        }
    }
}

/// Five-field summaries for the named numeric columns, in the given order.
pub fn summarize_columns(
    dataset: &Dataset,
    names: &[String],
) -> Result<Vec<ColumnSummary>, SurveyorError> {
    names
        .iter()
        .map(|name| {
            let column = dataset.column(name)?;
            if !column.is_numeric() {
                return Err(SurveyorError::NonNumericColumn(name.clone()));
            }
            Ok(ColumnSummary::from_values(name, &column.present_values()))
        })
        .collect()
}

pub fn describe_columns(
    dataset: &Dataset,
    names: &[String],
) -> Result<Vec<DescribeProfile>, SurveyorError> {
    names
        .iter()
        .map(|name| {
            let values: Vec<f64> = dataset.numeric_values(name)?.iter().flatten().copied().collect();
            Ok(DescribeProfile::from_values(name, &values))
        })
        .collect()
}
