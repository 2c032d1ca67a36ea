use tracing::{debug, instrument};

use crate::{
    data::{Column, Dataset},
    error::SurveyorError,
};

use super::partition::VariableGroups;

pub const DEFAULT_COMPOSITE_X: &str = "Composite_X";
pub const DEFAULT_COMPOSITE_Y: &str = "Composite_Y";

/**
Row-wise mean over the present values of `columns`.

A row where every listed column is missing yields `None`; a row with some
missing cells is averaged over the cells that are present.

## Arguments
* `dataset` - The source dataset.
* `columns` - Names of numeric columns forming one variable group.

## Returns
One composite value per dataset row.
 */
pub fn row_means(dataset: &Dataset, columns: &[String]) -> Result<Vec<Option<f64>>, SurveyorError> {
    let series = columns
        .iter()
        .map(|name| dataset.numeric_values(name))
        .collect::<Result<Vec<_>, _>>()?;

    let means = (0..dataset.n_rows())
        .map(|row| {
            let (sum, count) = series
                .iter()
                .filter_map(|values| values[row])
                .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
            (count > 0).then(|| sum / count as f64)
        })
        .collect();
    Ok(means)
}

/// Returns a new dataset with the X and Y composite scores appended as numeric columns.
#[instrument(skip(dataset, groups))]
pub fn append_composites(
    dataset: &Dataset,
    groups: &VariableGroups,
    x_name: &str,
    y_name: &str,
) -> Result<Dataset, SurveyorError> {
    let composite_x = row_means(dataset, groups.x_vars())?;
    let composite_y = row_means(dataset, groups.y_vars())?;
    debug!(
        x_missing = composite_x.iter().filter(|v| v.is_none()).count(),
        y_missing = composite_y.iter().filter(|v| v.is_none()).count(),
        "Computed composite scores"
    );

    dataset
        .with_column(Column::numeric(x_name, composite_x))?
        .with_column(Column::numeric(y_name, composite_y))
}
