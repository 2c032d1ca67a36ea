use derive_builder::Builder;
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    data::Dataset,
    error::SurveyorError,
    locale::Language,
};

use super::{
    composite::{append_composites, DEFAULT_COMPOSITE_X, DEFAULT_COMPOSITE_Y},
    correlation::{complete_pairs, correlate, Classification, CorrelationMethod, CorrelationResult},
    distribution::{BoxplotStats, Histogram},
    frequency::{display_name, tabulate_group, FrequencyTable},
    partition::VariableGroups,
    summary::{describe_columns, summarize_columns, ColumnSummary, DescribeProfile},
};

pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Caller-owned settings for one analysis run.
///
/// The language only affects rendering; every computed value depends on the
/// dataset and the remaining fields alone.
#[derive(Debug, Clone, PartialEq, Builder, Serialize)]
#[builder(default)]
pub struct AnalysisContext {
    pub language: Language,
    pub method: CorrelationMethod,
    pub histogram_bins: usize,
    #[builder(setter(into))]
    pub composite_x: String,
    #[builder(setter(into))]
    pub composite_y: String,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self {
            language: Language::default(),
            method: CorrelationMethod::default(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            composite_x: DEFAULT_COMPOSITE_X.to_string(),
            composite_y: DEFAULT_COMPOSITE_Y.to_string(),
        }
    }
}

impl AnalysisContext {
    pub fn builder() -> AnalysisContextBuilder {
        AnalysisContextBuilder::default()
    }
}

/// Histogram and boxplot data for one survey item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDistribution {
    pub column: String,
    pub display_name: String,
    pub position: usize,
    pub histogram: Histogram,
    pub boxplot: Option<BoxplotStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub context: AnalysisContext,
    /// The input dataset with both composite columns appended.
    pub dataset: Dataset,
    pub groups: VariableGroups,
    pub summaries: Vec<ColumnSummary>,
    pub composite_profiles: Vec<DescribeProfile>,
    pub x_frequencies: Vec<FrequencyTable>,
    pub y_frequencies: Vec<FrequencyTable>,
    pub x_distributions: Vec<ItemDistribution>,
    pub y_distributions: Vec<ItemDistribution>,
    /// Complete (Composite_X, Composite_Y) pairs used by the correlation.
    pub scatter: Vec<(f64, f64)>,
    pub correlation: CorrelationResult,
    /// `None` when the correlation is undefined.
    pub classification: Option<Classification>,
}

/**
Run every analysis stage on `dataset`.

The input is left untouched; the report carries a copy extended with the
composite columns. Running twice on the same input gives equal reports.

## Arguments
* `dataset` - The loaded survey data.
* `context` - Method, bin count and composite column names.

## Returns
The full report, or `InsufficientNumericColumns` when the dataset has fewer
than two numeric columns. An undefined correlation is reported inside the
result rather than as an error.
 */
#[instrument(skip_all, fields(method = %context.method))]
pub fn run(dataset: &Dataset, context: &AnalysisContext) -> Result<AnalysisReport, SurveyorError> {
    let numeric_columns = dataset.numeric_column_names();
    let groups = VariableGroups::partition(&numeric_columns)?;
    info!(
        x_items = groups.x_vars().len(),
        y_items = groups.y_vars().len(),
        rows = dataset.n_rows(),
        "Running survey analysis"
    );

    let scored = append_composites(dataset, &groups, &context.composite_x, &context.composite_y)?;
    let composites = [context.composite_x.clone(), context.composite_y.clone()];

    let summary_columns: Vec<String> = numeric_columns
        .iter()
        .chain(composites.iter())
        .cloned()
        .collect();
    let summaries = summarize_columns(&scored, &summary_columns)?;
    let composite_profiles = describe_columns(&scored, &composites)?;

    let x_frequencies = tabulate_group(&scored, groups.x_vars())?;
    let y_frequencies = tabulate_group(&scored, groups.y_vars())?;
    let x_distributions = distributions(&scored, groups.x_vars(), context.histogram_bins)?;
    let y_distributions = distributions(&scored, groups.y_vars(), context.histogram_bins)?;

    let composite_x = scored.numeric_values(&context.composite_x)?;
    let composite_y = scored.numeric_values(&context.composite_y)?;
    let (xs, ys) = complete_pairs(composite_x, composite_y);
    let scatter = xs.into_iter().zip(ys).collect();

    let correlation = correlate(composite_x, composite_y, context.method)?;
    let classification = correlation.classify().ok();
    info!(
        r = correlation.coefficient,
        p = correlation.p_value,
        defined = classification.is_some(),
        "Association analysis complete"
    );

    Ok(AnalysisReport {
        context: context.clone(),
        groups,
        summaries,
        composite_profiles,
        x_frequencies,
        y_frequencies,
        x_distributions,
        y_distributions,
        scatter,
        correlation,
        classification,
        dataset: scored,
    })
}

fn distributions(
    dataset: &Dataset,
    columns: &[String],
    bins: usize,
) -> Result<Vec<ItemDistribution>, SurveyorError> {
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values = dataset.column(name)?.present_values();
            Ok(ItemDistribution {
                column: name.clone(),
                display_name: display_name(name).to_string(),
                position: i + 1,
                histogram: Histogram::from_values(&values, bins)?,
                boxplot: BoxplotStats::from_values(&values),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::correlation::{Direction, Strength};

    fn survey() -> Dataset {
        Dataset::builder()
            .add_text("Respondent", &["r1", "r2", "r3", "r4", "r5"])
            .add_complete("Q1", &[1.0, 2.0, 3.0, 4.0, 5.0])
            .add_complete("Q2", &[2.0, 2.0, 3.0, 5.0, 5.0])
            .add_complete("Q3", &[1.0, 3.0, 2.0, 4.0, 5.0])
            .add_complete("Q4", &[2.0, 1.0, 3.0, 5.0, 4.0])
            .build()
            .unwrap()
    }

    #[test]
    fn test_context_builder_defaults() {
        let context = AnalysisContext::builder()
            .method(CorrelationMethod::Spearman)
            .build()
            .unwrap();
        assert_eq!(context.method, CorrelationMethod::Spearman);
        assert_eq!(context.language, Language::English);
        assert_eq!(context.histogram_bins, DEFAULT_HISTOGRAM_BINS);
        assert_eq!(context.composite_x, DEFAULT_COMPOSITE_X);
    }

    #[test]
    fn test_run_produces_every_section() {
        let report = run(&survey(), &AnalysisContext::default()).unwrap();
        assert_eq!(report.dataset.shape(), (5, 7));
        assert_eq!(report.summaries.len(), 6);
        assert_eq!(report.composite_profiles.len(), 2);
        assert_eq!(report.x_frequencies.len(), 2);
        assert_eq!(report.y_distributions.len(), 2);
        assert_eq!(report.scatter.len(), 5);
        assert_eq!(report.scatter[0], (1.5, 1.5));
        let classification = report.classification.unwrap();
        assert_eq!(classification.direction, Direction::Positive);
        assert_eq!(classification.strength, Strength::Strong);
    }

    #[test]
    fn test_run_requires_two_numeric_columns() {
        let dataset = Dataset::builder()
            .add_text("Name", &["a", "b"])
            .add_complete("Q1", &[1.0, 2.0])
            .build()
            .unwrap();
        let result = run(&dataset, &AnalysisContext::default());
        assert!(matches!(
            result,
            Err(SurveyorError::InsufficientNumericColumns { found: 1 })
        ));
    }

    #[test]
    fn test_run_reports_undefined_correlation() {
        let dataset = Dataset::builder()
            .add_complete("Q1", &[3.0, 3.0, 3.0])
            .add_complete("Q2", &[1.0, 2.0, 3.0])
            .build()
            .unwrap();
        let report = run(&dataset, &AnalysisContext::default()).unwrap();
        assert!(!report.correlation.is_defined());
        assert!(report.classification.is_none());
    }
}
