use getset::Getters;
use serde::Serialize;
use tracing::debug;

use crate::error::SurveyorError;

/// The two halves of the numeric columns: X items first, Y items after.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
#[getset(get = "pub")]
pub struct VariableGroups {
    x_vars: Vec<String>,
    y_vars: Vec<String>,
}

impl VariableGroups {
    /**
    Split numeric column names at `floor(n / 2)`.

    The first half becomes the X group and the remainder the Y group, both in
    their original order, so an odd count leaves Y with one extra item.

    ## Arguments
    * `numeric_columns` - Numeric column names in dataset order.

    ## Returns
    The groups, or `InsufficientNumericColumns` when fewer than two names are given.
     */
    pub fn partition(numeric_columns: &[String]) -> Result<Self, SurveyorError> {
        let n = numeric_columns.len();
        if n < 2 {
            return Err(SurveyorError::InsufficientNumericColumns { found: n });
        }

        let (x, y) = numeric_columns.split_at(n / 2);
        debug!(x = x.len(), y = y.len(), "Partitioned numeric columns");
        Ok(Self {
            x_vars: x.to_vec(),
            y_vars: y.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.x_vars.len() + self.y_vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// X items followed by Y items.
    pub fn items(&self) -> impl Iterator<Item = &String> {
        self.x_vars.iter().chain(self.y_vars.iter())
    }
}
