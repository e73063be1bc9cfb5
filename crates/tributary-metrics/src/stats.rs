//! Closed-form statistics shared by the analyzers.
//!
//! Degenerate inputs (zero variance, fewer than two points, empty sets) yield
//! 0 rather than NaN. Mismatched series lengths are caller bugs and panic.

use std::cmp::Ordering;

/// Pearson correlation of two equal-length series.
///
/// # Panics
/// If the series differ in length.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "pearson: series length mismatch");
    let n = a.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean_a = a.iter().sum::<f64>() / nf;
    let mean_b = b.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom < 1e-12 {
        0.0
    } else {
        (cov / denom).clamp(-1.0, 1.0)
    }
}

/// Least-squares slope of `ys` against `0, 1, 2, ...`.
pub fn ols_slope(ys: &[f64]) -> f64 {
    let n = ys.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean_x = (nf - 1.0) / 2.0;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }
    if sxx == 0.0 {
        0.0
    } else {
        sxy / sxx
    }
}

/// Sample median; the mean of the two middle values for even counts.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Shannon entropy (bits) of a probability distribution, normalized by
/// `log2(alphabet)` onto `[0, 1]`. Fewer than two non-zero probabilities
/// yield 0.
pub fn normalized_entropy(probabilities: &[f64], alphabet: usize) -> f64 {
    let nonzero: Vec<f64> = probabilities.iter().copied().filter(|&p| p > 0.0).collect();
    if nonzero.len() < 2 || alphabet < 2 {
        return 0.0;
    }
    let h: f64 = -nonzero.iter().map(|p| p * p.log2()).sum::<f64>();
    (h / (alphabet as f64).log2()).clamp(0.0, 1.0)
}

/// Descending comparison for floats (NaN-safe total order).
pub(crate) fn desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::approx;

    #[test]
    fn pearson_identical_series() {
        let a = [1.0, 0.0, 1.0, 0.0];
        assert!(approx(pearson(&a, &a), 1.0));
    }

    #[test]
    fn pearson_opposite_series() {
        let a = [1.0, 0.0, 1.0, 0.0];
        let b = [0.0, 1.0, 0.0, 1.0];
        assert!(approx(pearson(&a, &b), -1.0));
    }

    #[test]
    fn pearson_symmetric() {
        let a = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        let b = [2.0, 7.0, 1.0, 8.0, 2.0, 8.0];
        assert_eq!(pearson(&a, &b), pearson(&b, &a));
    }

    #[test]
    fn pearson_self_correlation_non_constant() {
        let a = [0.0, 2.0, 5.0, 1.0, 7.0];
        assert!(approx(pearson(&a, &a), 1.0));
    }

    #[test]
    fn pearson_zero_variance_is_zero() {
        let a = [2.0, 2.0, 2.0];
        let b = [1.0, 5.0, 3.0];
        assert_eq!(pearson(&a, &b), 0.0);
        assert_eq!(pearson(&b, &a), 0.0);
    }

    #[test]
    fn pearson_short_series_is_zero() {
        assert_eq!(pearson(&[], &[]), 0.0);
        assert_eq!(pearson(&[1.0], &[4.0]), 0.0);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn pearson_length_mismatch_panics() {
        pearson(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    fn slope_of_line() {
        assert!(approx(ols_slope(&[1.0, 3.0, 5.0, 7.0]), 2.0));
        assert!(approx(ols_slope(&[4.0, 3.0, 2.0]), -1.0));
        assert_eq!(ols_slope(&[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn slope_degenerate() {
        assert_eq!(ols_slope(&[]), 0.0);
        assert_eq!(ols_slope(&[9.0]), 0.0);
    }

    #[test]
    fn median_odd_even_empty() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn entropy_bounds() {
        assert_eq!(normalized_entropy(&[1.0], 5), 0.0);
        assert_eq!(normalized_entropy(&[], 5), 0.0);
        assert!(approx(normalized_entropy(&[0.2; 5], 5), 1.0));
        let h = normalized_entropy(&[0.5, 0.5], 5);
        assert!(h > 0.0 && h < 1.0);
        assert!(approx(h, 1.0 / 5f64.log2()));
    }

    #[test]
    fn desc_orders_large_first() {
        let mut v = vec![0.1, 0.9, 0.5];
        v.sort_by(|a, b| desc(*a, *b));
        assert_eq!(v, vec![0.9, 0.5, 0.1]);
    }
}
