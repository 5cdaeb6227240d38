//! Latitude-weighted means.

/// Weighted mean of `values` over the cells of `rows` where `include` holds
/// and the value is not NaN.
///
/// `values` and `include` are row-major with `nlon` columns; `weights` holds
/// one weight per row. Returns NaN when the selected weights sum to zero.
pub fn weighted_mean(values: &[f64], include: &[bool], weights: &[f64], rows: &[usize], nlon: usize) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for &row in rows {
        let w = weights[row];
        let start = row * nlon;
        for (value, keep) in values[start..start + nlon].iter().zip(&include[start..start + nlon]) {
            if *keep && !value.is_nan() {
                weighted_sum += w * value;
                weight_total += w;
            }
        }
    }
    if weight_total == 0.0 {
        f64::NAN
    } else {
        weighted_sum / weight_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_approx_eq;

    #[test]
    fn test_hand_computed_mean() {
        // Rows at 0 and 60 degrees: weights 1 and 0.5
        let weights = [1.0, 0.5];
        let values = [10.0, 20.0, 30.0, f64::NAN];
        let include = [true, true, true, true];
        // (1*10 + 1*20 + 0.5*30) / (1 + 1 + 0.5) = 45 / 2.5
        assert_approx_eq!(weighted_mean(&values, &include, &weights, &[0, 1], 2), 18.0, 1e-12);
    }

    #[test]
    fn test_rows_and_include_restrict() {
        let weights = [1.0, 0.5];
        let values = [10.0, 20.0, 30.0, 40.0];
        let include = [false, true, true, true];
        assert_approx_eq!(weighted_mean(&values, &include, &weights, &[0], 2), 20.0, 1e-12);
        assert_approx_eq!(weighted_mean(&values, &include, &weights, &[1], 2), 35.0, 1e-12);
    }

    #[test]
    fn test_nothing_selected_is_nan() {
        let values = [1.0, 2.0];
        assert!(weighted_mean(&values, &[false, false], &[1.0], &[0], 2).is_nan());
        assert!(weighted_mean(&values, &[true, true], &[1.0], &[], 2).is_nan());
        assert!(weighted_mean(&[f64::NAN, f64::NAN], &[true, true], &[1.0], &[0], 2).is_nan());
    }

    #[test]
    fn test_zero_weight_rows_are_nan() {
        // A single row at the pole has cos(90) ~ 0
        let weights = [0.0];
        assert!(weighted_mean(&[5.0], &[true], &weights, &[0], 1).is_nan());
    }
}
