use super::detect::FEATURE_COUNT;
use super::weights::WeightVector;

/// Logistic function.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Per-row probability `sigmoid(bias + Σ w_k · z_k[i])`.
///
/// All series must have the same length; the output has that length too.
pub fn score(z: &[Vec<f64>; FEATURE_COUNT], weights: &WeightVector) -> Vec<f64> {
    let n = z[0].len();
    (0..n)
        .map(|i| {
            let logit = z
                .iter()
                .zip(weights.weights)
                .fold(weights.bias, |acc, (zk, wk)| acc + wk * zk[i]);
            sigmoid(logit)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn sigmoid_shape() {
        assert_eq!(sigmoid(0.0), 0.5);
        let xs = [-30.0, -5.0, -0.1, 0.0, 0.1, 5.0, 30.0];
        for pair in xs.windows(2) {
            assert!(sigmoid(pair[0]) < sigmoid(pair[1]));
        }
        for x in xs {
            let p = sigmoid(x);
            assert!(p > 0.0 && p < 1.0);
        }
    }

    #[test]
    fn weighted_sum_per_row() {
        let z = [vec![1.0, -1.0], vec![2.0, 0.0], vec![0.0, 4.0]];
        let w = WeightVector { weights: [0.5, 0.25, 0.25], bias: 0.0 };
        let p = score(&z, &w);
        assert_eq!(p.len(), 2);
        assert_abs_diff_eq!(p[0], sigmoid(1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(p[1], sigmoid(0.5), epsilon = 1e-15);
    }

    #[test]
    fn zero_weights_give_one_half() {
        let z = [vec![3.0, -2.0], vec![1.0, 1.0], vec![0.5, 9.0]];
        let w = WeightVector { weights: [0.0; FEATURE_COUNT], bias: 0.0 };
        assert_eq!(score(&z, &w), vec![0.5, 0.5]);
    }

    proptest! {
        #[test]
        fn sigmoid_is_bounded_and_monotone(a in -700.0f64..700.0, b in -700.0f64..700.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (p_lo, p_hi) = (sigmoid(lo), sigmoid(hi));
            prop_assert!((0.0..=1.0).contains(&p_lo) && (0.0..=1.0).contains(&p_hi));
            prop_assert!(p_lo <= p_hi, "sigmoid({}) = {} > sigmoid({}) = {}", lo, p_lo, hi, p_hi);
        }

        #[test]
        fn sigmoid_is_strictly_inside_unit_interval(x in -30.0f64..30.0) {
            let p = sigmoid(x);
            prop_assert!(p > 0.0 && p < 1.0);
            assert_abs_diff_eq!(p + sigmoid(-x), 1.0, epsilon = 1e-12);
        }
    }
}
