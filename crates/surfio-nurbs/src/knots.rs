//! Knot-vector canonicalization.

/// Collapse an expanded knot vector into `(value, multiplicity)` pairs.
///
/// Consecutive values are grouped by exact floating-point equality, so
/// knot values that differ by any amount of rounding stay distinct
/// entries. The input is expected to be non-decreasing already; this is
/// a pure grouping transform and performs no validation. An empty input
/// yields an empty output, and the multiplicities always sum to the
/// input length.
pub fn knot_multiplicities(knots: &[f64]) -> Vec<(f64, usize)> {
    let mut pairs: Vec<(f64, usize)> = Vec::new();
    for &k in knots {
        match pairs.last_mut() {
            Some((value, count)) if *value == k => *count += 1,
            _ => pairs.push((k, 1)),
        }
    }
    pairs
}
