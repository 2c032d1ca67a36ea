use std::cmp::Ordering;

/**
Calculates the median of a slice of f64 values.

## Arguments
- `values`: A slice of finite f64 values.

## Returns
The median of the values, or `f64::NAN` if the slice is empty.
 */
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }

    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Returns an ascending copy of `values`.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/**
Percentile of already sorted data using linear interpolation between the two
nearest ranks, i.e. position `p * (n - 1)`.

## Arguments
- `sorted_values`: Ascending values.
- `p`: Fraction in `[0, 1]`.

## Returns
The interpolated value, or `f64::NAN` for an empty slice.
 */
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }

    let position = p.clamp(0.0, 1.0) * (sorted_values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return sorted_values[lower];
    }

    let weight = position - lower as f64;
    sorted_values[lower] * (1.0 - weight) + sorted_values[upper] * weight
}

/**
Ranks values from 1 to n, giving tied values the mean of the ranks they span.

## Arguments
- `values`: A slice of finite f64 values.

## Returns
The rank of each value, in the original order.
 */
pub fn midranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len()
            && values[order[end]].partial_cmp(&values[order[start]]) == Some(Ordering::Equal)
        {
            end += 1;
        }
        // Positions start..end share the average of ranks start+1..=end.
        let rank = (start + end + 1) as f64 / 2.0;
        for &index in &order[start..end] {
            ranks[index] = rank;
        }
        start = end;
    }
    ranks
}

/// Rounds to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
