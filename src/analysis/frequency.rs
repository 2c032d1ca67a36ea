use serde::Serialize;

use crate::{
    data::Dataset,
    error::SurveyorError,
    util::math_utils::{round_to, sorted},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyRow {
    pub value: f64,
    pub frequency: usize,
    /// Share of the column's non-missing values, rounded to 2 decimals.
    pub percentage: f64,
}

/// Counts of each distinct value of one survey item, ascending by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    pub column: String,
    pub display_name: String,
    /// 1-based position of the item inside its variable group.
    pub position: usize,
    pub total: usize,
    pub rows: Vec<FrequencyRow>,
}

impl FrequencyTable {
    pub fn from_values(column: &str, position: usize, values: &[f64]) -> Self {
        let total = values.len();
        let mut rows: Vec<FrequencyRow> = Vec::new();
        for value in sorted(values) {
            match rows.last_mut() {
                Some(row) if row.value == value => row.frequency += 1,
                _ => rows.push(FrequencyRow {
                    value,
                    frequency: 1,
                    percentage: 0.0,
                }),
            }
        }
        for row in &mut rows {
            row.percentage = round_to(row.frequency as f64 / total as f64 * 100.0, 2);
        }

        Self {
            column: column.to_string(),
            display_name: display_name(column).to_string(),
            position,
            total,
            rows,
        }
    }
}

/// Strips a leading item number: `"3. I sleep badly"` is shown as `"I sleep badly"`.
pub fn display_name(column: &str) -> &str {
    if column.starts_with(|c: char| c.is_ascii_digit()) {
        if let Some((_, rest)) = column.split_once(". ") {
            return rest;
        }
    }
    column
}

/// One frequency table per column of a variable group, numbered from 1.
pub fn tabulate_group(
    dataset: &Dataset,
    columns: &[String],
) -> Result<Vec<FrequencyTable>, SurveyorError> {
    columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let values: Vec<f64> = dataset.numeric_values(name)?.iter().flatten().copied().collect();
            Ok(FrequencyTable::from_values(name, i + 1, &values))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_sorted_by_value_not_frequency() {
        let table = FrequencyTable::from_values("Q1", 1, &[5.0, 1.0, 5.0, 3.0, 5.0, 1.0]);
        let values: Vec<f64> = table.rows.iter().map(|r| r.value).collect();
        let counts: Vec<usize> = table.rows.iter().map(|r| r.frequency).collect();
        assert_eq!(values, vec![1.0, 3.0, 5.0]);
        assert_eq!(counts, vec![2, 1, 3]);
        assert_eq!(table.total, 6);
    }

    #[test]
    fn test_percentages_rounded_to_two_decimals() {
        let table = FrequencyTable::from_values("Q1", 1, &[1.0, 2.0, 2.0]);
        assert_eq!(table.rows[0].percentage, 33.33);
        assert_eq!(table.rows[1].percentage, 66.67);
    }

    #[test]
    fn test_percentage_ties_round_to_even() {
        let mut values = vec![2.0; 31];
        values.push(1.0);
        let table = FrequencyTable::from_values("Q1", 1, &values);
        // 1/32 = 3.125%, 31/32 = 96.875%
        assert_eq!(table.rows[0].percentage, 3.12);
        assert_eq!(table.rows[1].percentage, 96.88);

        let mut values = vec![4.0; 27];
        values.extend([3.0; 5]);
        let table = FrequencyTable::from_values("Q2", 2, &values);
        // 5/32 = 15.625%, 27/32 = 84.375%
        assert_eq!(table.rows[0].percentage, 15.62);
        assert_eq!(table.rows[1].percentage, 84.38);
    }

    #[test]
    fn test_missing_values_excluded_from_total() {
        let dataset = Dataset::builder()
            .add_numeric("Q1", vec![Some(4.0), None, Some(4.0), Some(2.0)])
            .add_numeric("Q2", vec![None, None, None, Some(1.0)])
            .build()
            .unwrap();
        let tables = tabulate_group(&dataset, &dataset.numeric_column_names()).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].total, 3);
        assert_eq!(tables[0].rows[1].percentage, 66.67);
        assert_eq!(tables[1].position, 2);
        assert_eq!(tables[1].rows[0].percentage, 100.0);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("1. I check social media"), "I check social media");
        assert_eq!(display_name("12. Sleep. Often"), "Sleep. Often");
        assert_eq!(display_name("Q1. Mood"), "Q1. Mood");
        assert_eq!(display_name("Age"), "Age");
    }
}
