use std::collections::HashSet;

use serde::Serialize;

use crate::error::SurveyorError;

use super::column::Column;

/// An ordered collection of named columns sharing one row count.
///
/// A `Dataset` is never mutated after it is built: [`Dataset::with_column`]
/// returns a new value with the extra column appended.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /**
    Create a dataset from columns, validating that names are unique and every
    column has the same number of rows.

    ## Arguments
    * `columns` - The columns in display order.

    ## Returns
    The dataset, or a `SurveyorError` when the columns are inconsistent.
     */
    pub fn new(columns: Vec<Column>) -> Result<Self, SurveyorError> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name().as_str()) {
                return Err(SurveyorError::DuplicateColumn(column.name().clone()));
            }
            if column.len() != rows {
                return Err(SurveyorError::RowCountMismatch {
                    name: column.name().clone(),
                    expected: rows,
                    got: column.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Result<&Column, SurveyorError> {
        self.columns
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| SurveyorError::ColumnNotFound(name.to_string()))
    }

    /// Names of the numeric columns, in column order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name().clone())
            .collect()
    }

    pub fn numeric_values(&self, name: &str) -> Result<&[Option<f64>], SurveyorError> {
        self.column(name)?
            .as_numeric()
            .ok_or_else(|| SurveyorError::NonNumericColumn(name.to_string()))
    }

    /// Returns a copy of this dataset with `column` appended after the existing columns.
    pub fn with_column(&self, column: Column) -> Result<Self, SurveyorError> {
        let mut columns = self.columns.clone();
        columns.push(column);
        Self::new(columns)
    }
}

#[derive(Default)]
pub struct DatasetBuilder {
    columns: Vec<Column>,
}

impl DatasetBuilder {
    pub fn add_numeric(&mut self, name: &str, values: Vec<Option<f64>>) -> &mut Self {
        self.columns.push(Column::numeric(name, values));
        self
    }

    /// Adds a numeric column with no missing cells.
    pub fn add_complete(&mut self, name: &str, values: &[f64]) -> &mut Self {
        self.add_numeric(name, values.iter().copied().map(Some).collect())
    }

    pub fn add_text(&mut self, name: &str, values: &[&str]) -> &mut Self {
        self.columns.push(Column::text(
            name,
            values.iter().map(|v| Some(v.to_string())).collect(),
        ));
        self
    }

    pub fn build(&mut self) -> Result<Dataset, SurveyorError> {
        Dataset::new(std::mem::take(&mut self.columns))
    }
}
