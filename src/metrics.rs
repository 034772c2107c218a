//! Scoring helpers.
//!
//! These are small evaluation routines (they do not participate in backprop).
//! Prediction is argmax over the output row; error is squared distance to the
//! one-hot target.

/// Index of the largest value in `row`. Ties resolve to the first maximum.
///
/// Panics if `row` is empty.
#[inline]
pub fn argmax(row: &[f32]) -> usize {
    assert!(!row.is_empty(), "argmax of an empty row");

    let mut best = 0;
    for (i, &v) in row.iter().enumerate().skip(1) {
        if v > row[best] {
            best = i;
        }
    }
    best
}

/// Total squared error of `pred` against the one-hot encoding of `target`.
///
/// Panics unless `target < pred.len()`.
#[inline]
pub fn squared_error(pred: &[f32], target: usize) -> f32 {
    assert!(
        target < pred.len(),
        "target class {target} out of range for {} outputs",
        pred.len()
    );

    let mut sum = 0.0_f32;
    for (j, &y) in pred.iter().enumerate() {
        let t = if j == target { 1.0 } else { 0.0 };
        let diff = y - t;
        sum = diff.mul_add(diff, sum);
    }
    sum
}

/// Fraction of correct predictions.
#[inline]
pub fn accuracy(hits: usize, total: usize) -> f32 {
    assert!(total > 0, "accuracy over zero samples");
    hits as f32 / total as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_picks_the_first_maximum() {
        assert_eq!(argmax(&[0.1, 0.9, 0.3]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
        assert_eq!(argmax(&[2.0]), 0);
    }

    #[test]
    fn squared_error_is_zero_on_a_perfect_one_hot() {
        assert_eq!(squared_error(&[0.0, 1.0, 0.0], 1), 0.0);
    }

    #[test]
    fn squared_error_sums_over_all_outputs() {
        // (0.2)^2 + (0.7 - 1)^2 + (0.1)^2
        let e = squared_error(&[0.2, 0.7, 0.1], 1);
        assert!((e - (0.04 + 0.09 + 0.01)).abs() < 1e-6);
    }

    #[test]
    fn accuracy_is_a_fraction() {
        assert!((accuracy(3, 4) - 0.75).abs() < 1e-6);
    }
}
