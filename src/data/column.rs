use getset::Getters;
use serde::Serialize;

/// Cell contents treated as missing when a column is read from a file.
pub const MISSING_MARKERS: [&str; 12] = [
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>", "-",
];

/// The values of a single column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq, Getters, Serialize)]
pub struct Column {
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    /**
    Build a column from raw cell strings, inferring its type.

    The column is numeric when every non-missing cell parses as a finite number.
    A column with no present cells at all is numeric, so an empty survey item
    still takes part in the analysis as an all-missing series.

    ## Arguments
    * `name` - The column header.
    * `cells` - The raw cell text, one entry per row.
     */
    pub fn infer(name: impl Into<String>, cells: Vec<String>) -> Self {
        let parsed: Vec<Option<&str>> = cells
            .iter()
            .map(|cell| {
                let trimmed = cell.trim();
                if MISSING_MARKERS.contains(&trimmed) {
                    None
                } else {
                    Some(trimmed)
                }
            })
            .collect();

        let numbers: Option<Vec<Option<f64>>> = parsed
            .iter()
            .map(|cell| match cell {
                None => Some(None),
                Some(text) => text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .map(Some),
            })
            .collect();

        match numbers {
            Some(values) => Self::numeric(name, values),
            None => Self::text(
                name,
                parsed
                    .into_iter()
                    .map(|cell| cell.map(str::to_string))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    /// Non-missing values of a numeric column in row order. Empty for text columns.
    pub fn present_values(&self) -> Vec<f64> {
        self.as_numeric()
            .map(|values| values.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    /// Number of non-missing cells.
    pub fn count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_some()).count(),
            ColumnData::Text(values) => values.iter().filter(|v| v.is_some()).count(),
        }
    }
}
