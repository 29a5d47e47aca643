/// Standard deviation used in place of a (numerically) zero one.
pub const STD_EPSILON: f64 = 1e-9;

/// Population mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

/// Population standard deviation around `mean`.
pub fn population_std(values: &[f64], mean: f64) -> f64 {
    let var = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / values.len().max(1) as f64;
    var.sqrt()
}

/// Z-score a series with population statistics.
///
/// A series whose elements are all equal (including a single element) has
/// its standard deviation replaced by [`STD_EPSILON`] and maps to all zeros.
/// Any other series keeps its exact standard deviation, however small.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    if let Some(&first) = values.first() {
        if values.iter().all(|&x| x == first) {
            log::warn!("constant series of {} values, substituting std = {STD_EPSILON}", values.len());
            return values.iter().map(|x| (x - first) / STD_EPSILON).collect();
        }
    }
    let m = mean(values);
    let mut s = population_std(values, m);
    if !(s > 0.0) {
        log::warn!("std of {} values underflowed, substituting std = {STD_EPSILON}", values.len());
        s = STD_EPSILON;
    }
    values.iter().map(|x| (x - m) / s).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn zero_mean_unit_variance() {
        let z = standardize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let m = mean(&z);
        assert_abs_diff_eq!(m, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(population_std(&z, m), 1.0, epsilon = 1e-12);
        // mean 5, population std 2
        assert_abs_diff_eq!(z[0], -1.5, epsilon = 1e-12);
    }

    #[test]
    fn constant_series_maps_to_zero() {
        for z in standardize(&[0.1, 0.1, 0.1]) {
            assert_abs_diff_eq!(z, 0.0, epsilon = 1e-6);
        }
        assert_eq!(standardize(&[42.0]), vec![0.0]);
    }

    #[test]
    fn adjacent_floats_are_not_constant() {
        let a = 1e6_f64;
        let b = f64::from_bits(a.to_bits() + 1);
        let c = f64::from_bits(a.to_bits() + 2);
        let z = standardize(&[a, b, c]);
        let expected = (1.5_f64).sqrt();
        assert_abs_diff_eq!(z[0], -expected, epsilon = 1e-9);
        assert_abs_diff_eq!(z[1], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(z[2], expected, epsilon = 1e-9);
    }

    #[test]
    fn empty_series() {
        assert!(standardize(&[]).is_empty());
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn preserves_order_and_length() {
        let z = standardize(&[3.0, 1.0, 2.0]);
        assert_eq!(z.len(), 3);
        assert!(z[0] > z[2] && z[2] > z[1]);
    }

    proptest! {
        #[test]
        fn varying_series_has_zero_mean_unit_std(
            values in prop::collection::vec(-1e6f64..1e6, 2..60)
        ) {
            let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assume!(hi - lo > 1.0);

            let z = standardize(&values);
            prop_assert_eq!(z.len(), values.len());
            let m = mean(&z);
            prop_assert!(m.abs() < 1e-6, "mean {}", m);
            let s = population_std(&z, m);
            prop_assert!((s - 1.0).abs() < 1e-6, "std {}", s);
        }

        #[test]
        fn constant_series_is_all_zero(c in -1e12f64..1e12, n in 1usize..60) {
            let z = standardize(&vec![c; n]);
            prop_assert_eq!(z.len(), n);
            prop_assert!(z.iter().all(|&v| v == 0.0));
        }
    }
}
