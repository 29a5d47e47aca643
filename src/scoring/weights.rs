use serde::Serialize;

use super::detect::FEATURE_COUNT;
use super::standardize::mean;
use crate::data::model::Table;

/// Linear model coefficients. `bias` is always 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightVector {
    pub weights: [f64; FEATURE_COUNT],
    pub bias: f64,
}

/// Which branch produced a [`WeightVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    /// Pearson correlation against a binary target.
    Correlation,
    /// Column-name keyword heuristic.
    Keyword,
}

/// Name rules for the keyword heuristic: first rule with a matching
/// fragment wins, otherwise [`DEFAULT_KEYWORD_WEIGHT`].
const KEYWORD_RULES: [(&[&str], f64); 3] = [
    (&["depth", "ppm"], 0.5),
    (&["snr"], 0.3),
    (&["radius", "duration", "period"], 0.2),
];

const DEFAULT_KEYWORD_WEIGHT: f64 = 0.1;

/// Derive the feature weights for one scoring run.
///
/// `z` holds the standardized feature series, `names` the matching column
/// names. The correlation branch is used when `target` names a column whose
/// cells are all 0, 1 or missing; anything else falls through to the
/// keyword heuristic.
pub fn estimate_weights(
    z: &[Vec<f64>; FEATURE_COUNT],
    names: [&str; FEATURE_COUNT],
    table: &Table,
    target: Option<&str>,
) -> (WeightVector, WeightSource) {
    if let Some(y) = target.and_then(|t| binary_target(table, t)) {
        let weights = z.each_ref().map(|zi| pearson(zi, &y));
        log::debug!("correlation weights {weights:?}");
        return (WeightVector { weights, bias: 0.0 }, WeightSource::Correlation);
    }

    if let Some(t) = target {
        log::info!("target '{t}' is not binary, using keyword weights");
    }
    let weights = keyword_weights(names);
    log::debug!("keyword weights {weights:?}");
    (WeightVector { weights, bias: 0.0 }, WeightSource::Keyword)
}

/// The target as a 0/1 series, or `None` if any cell is not 0, 1 or missing.
/// Rows without the target key count as missing.
pub fn binary_target(table: &Table, target: &str) -> Option<Vec<f64>> {
    table
        .column(target)
        .map(|cell| cell.map_or(Some(0.0), |v| v.as_binary()))
        .collect()
}

/// Pearson correlation; a zero denominator is treated as 1, giving 0.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let am = mean(a);
    let bm = mean(b);
    let mut num = 0.0;
    let mut den_a = 0.0;
    let mut den_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - am;
        let dy = y - bm;
        num += dx * dy;
        den_a += dx * dx;
        den_b += dy * dy;
    }
    let den = (den_a * den_b).sqrt();
    let den = if den == 0.0 || den.is_nan() { 1.0 } else { den };
    num / den
}

/// Raw keyword score of one column name.
pub fn keyword_score(name: &str) -> f64 {
    let name = name.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| name.contains(f)))
        .map_or(DEFAULT_KEYWORD_WEIGHT, |(_, score)| *score)
}

/// Keyword scores normalized to sum to 1 (raw scores if the sum is 0).
pub fn keyword_weights(names: [&str; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
    let raw = names.map(keyword_score);
    let sum: f64 = raw.iter().sum();
    let sum = if sum == 0.0 { 1.0 } else { sum };
    raw.map(|w| w / sum)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::data::model::{CellValue, Row};

    fn target_table(values: Vec<CellValue>) -> Table {
        let rows = values
            .into_iter()
            .map(|v| Row::from_iter([("label", v)]))
            .collect();
        Table::from_rows(vec!["label".into()], rows)
    }

    #[test]
    fn keyword_rules_in_priority_order() {
        assert_eq!(keyword_score("Transit_Depth"), 0.5);
        assert_eq!(keyword_score("depth_snr"), 0.5);
        assert_eq!(keyword_score("SNR"), 0.3);
        assert_eq!(keyword_score("orbital_period"), 0.2);
        assert_eq!(keyword_score("duration_hours"), 0.2);
        assert_eq!(keyword_score("teff"), 0.1);
    }

    #[test]
    fn keyword_weights_sum_to_one() {
        let w = keyword_weights(["transit_depth", "snr", "period"]);
        assert_abs_diff_eq!(w[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(w[1], 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(w[2], 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn perfect_correlation() {
        let y = [0.0, 1.0, 0.0, 1.0];
        assert_abs_diff_eq!(pearson(&[-1.0, 1.0, -1.0, 1.0], &y), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pearson(&[1.0, -1.0, 1.0, -1.0], &y), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_correlation_is_zero() {
        assert_eq!(pearson(&[0.0, 0.0, 0.0], &[0.0, 1.0, 1.0]), 0.0);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn binary_target_accepts_missing() {
        let t = target_table(vec![
            CellValue::Integer(1),
            CellValue::Null,
            CellValue::Text(String::new()),
            CellValue::Float(0.0),
        ]);
        assert_eq!(binary_target(&t, "label"), Some(vec![1.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn non_binary_target_falls_through() {
        let z = [vec![1.0, -1.0], vec![-1.0, 1.0], vec![0.0, 0.0]];
        for bad in [CellValue::Integer(2), CellValue::Text("CONFIRMED".into()), CellValue::Float(0.5)] {
            let t = target_table(vec![CellValue::Integer(1), bad]);
            let (w, source) = estimate_weights(&z, ["depth_ppm", "snr", "teff"], &t, Some("label"));
            assert_eq!(source, WeightSource::Keyword);
            assert_abs_diff_eq!(w.weights[0], 0.5 / 0.9, epsilon = 1e-12);
            assert_eq!(w.bias, 0.0);
        }
    }

    #[test]
    fn binary_target_uses_correlation() {
        let z = [vec![-1.0, 1.0], vec![1.0, -1.0], vec![0.0, 0.0]];
        let t = target_table(vec![CellValue::Integer(0), CellValue::Integer(1)]);
        let (w, source) = estimate_weights(&z, ["a", "b", "c"], &t, Some("label"));
        assert_eq!(source, WeightSource::Correlation);
        assert_abs_diff_eq!(w.weights[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(w.weights[1], -1.0, epsilon = 1e-12);
        assert_eq!(w.weights[2], 0.0);
    }
}
