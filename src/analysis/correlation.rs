use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::{debug, warn};

use crate::{error::SurveyorError, util::math_utils::midranks};

/// Correlation coefficient used by the association analysis.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CorrelationMethod {
    #[default]
    Pearson,
    Spearman,
}

impl FromStr for CorrelationMethod {
    type Err = SurveyorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pearson" => Ok(CorrelationMethod::Pearson),
            "spearman" => Ok(CorrelationMethod::Spearman),
            _ => Err(SurveyorError::ParseMethod(s.to_string())),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CorrelationMethod::Pearson => "Pearson",
            CorrelationMethod::Spearman => "Spearman",
        };
        write!(f, "{}", s)
    }
}

impl TryFrom<String> for CorrelationMethod {
    type Error = SurveyorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CorrelationMethod> for String {
    fn from(method: CorrelationMethod) -> Self {
        method.to_string()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Positive only when `r > 0`; a coefficient of exactly zero counts as negative.
    pub fn of(r: f64) -> Self {
        if r > 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Strength {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
}

/// Exclusive upper bounds on `|r|`, scanned in order; the first bound above `|r|` wins.
pub const STRENGTH_THRESHOLDS: [(f64, Strength); 4] = [
    (0.2, Strength::VeryWeak),
    (0.4, Strength::Weak),
    (0.6, Strength::Moderate),
    (f64::INFINITY, Strength::Strong),
];

impl Strength {
    pub fn of(r: f64) -> Self {
        let magnitude = r.abs();
        STRENGTH_THRESHOLDS
            .iter()
            .find(|(bound, _)| magnitude < *bound)
            .map(|(_, strength)| *strength)
            .unwrap_or(Strength::Strong)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Classification {
    pub direction: Direction,
    pub strength: Strength,
}

/// Coefficient and two-sided p-value between two paired series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub method: CorrelationMethod,
    pub coefficient: f64,
    pub p_value: f64,
    /// Number of complete pairs the coefficient was computed from.
    pub observations: usize,
}

impl CorrelationResult {
    fn undefined(method: CorrelationMethod, observations: usize) -> Self {
        Self {
            method,
            coefficient: f64::NAN,
            p_value: f64::NAN,
            observations,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.coefficient.is_finite() && self.p_value.is_finite()
    }

    /**
    Direction and strength of the association.

    ## Returns
    The classification, or `UndefinedCorrelation` when the coefficient or
    p-value is not finite.
     */
    pub fn classify(&self) -> Result<Classification, SurveyorError> {
        if !self.is_defined() {
            return Err(SurveyorError::UndefinedCorrelation {
                method: self.method,
                observations: self.observations,
            });
        }
        Ok(Classification {
            direction: Direction::of(self.coefficient),
            strength: Strength::of(self.coefficient),
        })
    }
}

/// Keeps the rows where both series have a value.
pub fn complete_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

/**
Correlate two row-aligned series, dropping rows where either value is missing.

Fewer than two complete pairs, or a series whose values are all identical,
gives an undefined (`NaN`) result instead of an error so that callers can
report it alongside the rest of the analysis.

## Arguments
* `x` - First series.
* `y` - Second series, aligned with `x`.
* `method` - Pearson or Spearman.

## Returns
The correlation result, or a `SurveyorError` if the t distribution cannot be built.
 */
pub fn correlate(
    x: &[Option<f64>],
    y: &[Option<f64>],
    method: CorrelationMethod,
) -> Result<CorrelationResult, SurveyorError> {
    let (x, y) = complete_pairs(x, y);
    let n = x.len();

    if n < 2 || is_constant(&x) || is_constant(&y) {
        warn!(%method, observations = n, "Correlation is undefined for this data");
        return Ok(CorrelationResult::undefined(method, n));
    }

    let r = match method {
        CorrelationMethod::Pearson => pearson(&x, &y),
        CorrelationMethod::Spearman => pearson(&midranks(&x), &midranks(&y)),
    };
    let p_value = two_sided_p_value(r, n)?;
    debug!(%method, r, p_value, observations = n, "Computed correlation");

    Ok(CorrelationResult {
        method,
        coefficient: r,
        p_value,
        observations: n,
    })
}

fn is_constant(values: &[f64]) -> bool {
    values.iter().all(|v| *v == values[0])
}

/// Product-moment coefficient of two equal-length, non-constant series.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (sxy, sxx, syy) = x.iter().zip(y).fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (a, b)| {
        let dx = a - mean_x;
        let dy = b - mean_y;
        (sxy + dx * dy, sxx + dx * dx, syy + dy * dy)
    });

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Two-sided p-value of `r` under no association, from Student's t with `n - 2` degrees of freedom.
fn two_sided_p_value(r: f64, n: usize) -> Result<f64, SurveyorError> {
    if n == 2 {
        return Ok(1.0);
    }
    if r.abs() >= 1.0 {
        return Ok(0.0);
    }

    let df = (n - 2) as f64;
    let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();
    let distribution = StudentsT::new(0.0, 1.0, df)?;
    Ok((2.0 * distribution.cdf(-t.abs())).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(Strength::of(0.19), Strength::VeryWeak);
        assert_eq!(Strength::of(0.2), Strength::Weak);
        assert_eq!(Strength::of(0.39), Strength::Weak);
        assert_eq!(Strength::of(0.4), Strength::Moderate);
        assert_eq!(Strength::of(0.59), Strength::Moderate);
        assert_eq!(Strength::of(0.6), Strength::Strong);
        assert_eq!(Strength::of(-0.6), Strength::Strong);
        assert_eq!(Strength::of(1.0), Strength::Strong);
    }

    #[test]
    fn test_zero_coefficient_is_negative_and_very_weak() {
        let result = CorrelationResult {
            method: CorrelationMethod::Pearson,
            coefficient: 0.0,
            p_value: 1.0,
            observations: 10,
        };
        let classification = result.classify().unwrap();
        assert_eq!(classification.direction, Direction::Negative);
        assert_eq!(classification.strength, Strength::VeryWeak);
    }

    #[test]
    fn test_perfect_linear_relationship() {
        let x = complete(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let y = complete(&[2.0, 4.0, 6.0, 8.0, 10.0]);
        let result = correlate(&x, &y, CorrelationMethod::Pearson).unwrap();
        assert!((result.coefficient - 1.0).abs() < 1e-12);
        assert!(result.p_value < 1e-6);
        let classification = result.classify().unwrap();
        assert_eq!(classification.direction, Direction::Positive);
        assert_eq!(classification.strength, Strength::Strong);
    }

    #[test]
    fn test_pearson_reference_values() {
        // r = 8 / sqrt(10 * 10); t = 2.3094 on 3 degrees of freedom
        let x = complete(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let y = complete(&[2.0, 1.0, 4.0, 3.0, 5.0]);
        let result = correlate(&x, &y, CorrelationMethod::Pearson).unwrap();
        assert!((result.coefficient - 0.8).abs() < 1e-12);
        assert!((result.p_value - 0.1040880).abs() < 1e-5);
    }

    #[test]
    fn test_spearman_uses_midranks() {
        // Ranks of x: [1, 2.5, 2.5, 4]; y is monotone in x except for the tie.
        let x = complete(&[1.0, 2.0, 2.0, 3.0]);
        let y = complete(&[10.0, 20.0, 30.0, 40.0]);
        let result = correlate(&x, &y, CorrelationMethod::Spearman).unwrap();
        // pearson([1, 2.5, 2.5, 4], [1, 2, 3, 4]) = 4.5 / sqrt(4.5 * 5)
        let expected = 4.5 / (4.5f64 * 5.0).sqrt();
        assert!((result.coefficient - expected).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_monotone_nonlinear() {
        let x = complete(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let y = complete(&[1.0, 8.0, 27.0, 64.0, 125.0, 216.0]);
        let result = correlate(&x, &y, CorrelationMethod::Spearman).unwrap();
        assert!((result.coefficient - 1.0).abs() < 1e-12);
        assert_eq!(result.p_value, 0.0);
    }

    #[test]
    fn test_negative_relationship() {
        let x = complete(&[1.0, 2.0, 3.0, 4.0]);
        let y = complete(&[4.0, 3.0, 1.0, 2.0]);
        let result = correlate(&x, &y, CorrelationMethod::Pearson).unwrap();
        assert!(result.coefficient < 0.0);
        assert_eq!(result.classify().unwrap().direction, Direction::Negative);
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        let x = complete(&[3.0, 3.0, 3.0, 3.0]);
        let y = complete(&[1.0, 2.0, 3.0, 4.0]);
        for method in [CorrelationMethod::Pearson, CorrelationMethod::Spearman] {
            let result = correlate(&x, &y, method).unwrap();
            assert!(!result.coefficient.is_finite());
            assert!(!result.p_value.is_finite());
            assert!(matches!(
                result.classify(),
                Err(SurveyorError::UndefinedCorrelation { observations: 4, .. })
            ));
        }
    }

    #[test]
    fn test_too_few_pairs_is_undefined() {
        let x = vec![Some(1.0), None, Some(3.0)];
        let y = vec![Some(2.0), Some(5.0), None];
        let result = correlate(&x, &y, CorrelationMethod::Pearson).unwrap();
        assert_eq!(result.observations, 1);
        assert!(!result.is_defined());
    }

    #[test]
    fn test_two_pairs_have_unit_p_value() {
        let x = complete(&[1.0, 2.0]);
        let y = complete(&[3.0, 1.0]);
        let result = correlate(&x, &y, CorrelationMethod::Pearson).unwrap();
        assert!((result.coefficient + 1.0).abs() < 1e-12);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_missing_rows_dropped_pairwise() {
        let (x, y) = complete_pairs(
            &[Some(1.0), None, Some(3.0), Some(4.0)],
            &[Some(2.0), Some(9.0), None, Some(8.0)],
        );
        assert_eq!(x, vec![1.0, 4.0]);
        assert_eq!(y, vec![2.0, 8.0]);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(
            "spearman".parse::<CorrelationMethod>().unwrap(),
            CorrelationMethod::Spearman
        );
        assert_eq!(
            "Pearson".parse::<CorrelationMethod>().unwrap(),
            CorrelationMethod::Pearson
        );
        assert!(matches!(
            "kendall".parse::<CorrelationMethod>(),
            Err(SurveyorError::ParseMethod(_))
        ));
    }
}
