use std::fmt;

use serde::Serialize;

/// Classification of a probability or an aggregate confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Planet,
    Candidate,
    #[serde(rename = "fp")]
    FalsePositive,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Planet, Label::Candidate, Label::FalsePositive];

    /// Threshold table, evaluated top to bottom.
    const THRESHOLDS: [(f64, Label); 2] = [(0.70, Label::Planet), (0.40, Label::Candidate)];

    pub fn from_score(p: f64) -> Label {
        Self::THRESHOLDS
            .iter()
            .find(|(min, _)| p >= *min)
            .map_or(Label::FalsePositive, |(_, label)| *label)
    }

    /// Short identifier used in exports.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Planet => "planet",
            Label::Candidate => "candidate",
            Label::FalsePositive => "fp",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Label::Planet => "Planet",
            Label::Candidate => "Candidate planet",
            Label::FalsePositive => "Not a planet",
        };
        f.write_str(text)
    }
}

/// Probability from which a row counts as positive in the aggregate.
const POSITIVE_CUTOFF: f64 = 0.5;
/// Blend of mean probability and positive rate.
const MEAN_WEIGHT: f64 = 0.6;
const POSITIVE_RATE_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowResult {
    pub index: usize,
    pub probability: f64,
    pub label: Label,
}

/// Summary over all rows. `label` is `None` when there were no rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub label: Option<Label>,
    pub confidence: f64,
}

/// Label every probability and derive the aggregate verdict.
///
/// The aggregate label applies the same thresholds to the blended
/// confidence, not a vote over row labels.
pub fn label(probabilities: &[f64]) -> (Vec<RowResult>, Aggregate) {
    let rows = probabilities
        .iter()
        .enumerate()
        .map(|(index, &probability)| RowResult {
            index,
            probability,
            label: Label::from_score(probability),
        })
        .collect();

    if probabilities.is_empty() {
        return (rows, Aggregate { label: None, confidence: 0.0 });
    }

    let n = probabilities.len() as f64;
    let mean = probabilities.iter().sum::<f64>() / n;
    let positives = probabilities.iter().filter(|&&p| p >= POSITIVE_CUTOFF).count();
    let confidence = (MEAN_WEIGHT * mean + POSITIVE_RATE_WEIGHT * (positives as f64 / n)).clamp(0.0, 1.0);

    let aggregate = Aggregate {
        label: Some(Label::from_score(confidence)),
        confidence,
    };
    (rows, aggregate)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn threshold_boundaries() {
        assert_eq!(Label::from_score(0.70), Label::Planet);
        assert_eq!(Label::from_score(0.6999999), Label::Candidate);
        assert_eq!(Label::from_score(0.40), Label::Candidate);
        assert_eq!(Label::from_score(0.3999999), Label::FalsePositive);
        assert_eq!(Label::from_score(1.0), Label::Planet);
        assert_eq!(Label::from_score(0.0), Label::FalsePositive);
    }

    #[test]
    fn aggregate_blends_mean_and_positive_rate() {
        let (rows, agg) = label(&[0.8, 0.8, 0.2, 0.2]);
        assert_abs_diff_eq!(agg.confidence, 0.5, epsilon = 1e-12);
        assert_eq!(agg.label, Some(Label::Candidate));
        let labels: Vec<Label> = rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![Label::Planet, Label::Planet, Label::FalsePositive, Label::FalsePositive]
        );
        assert_eq!(rows[3].index, 3);
    }

    #[test]
    fn aggregate_is_not_a_vote() {
        // Every row is a candidate, the blended confidence is a planet.
        let (rows, agg) = label(&[0.65, 0.65, 0.65]);
        assert!(rows.iter().all(|r| r.label == Label::Candidate));
        assert_abs_diff_eq!(agg.confidence, 0.79, epsilon = 1e-12);
        assert_eq!(agg.label, Some(Label::Planet));
    }

    #[test]
    fn empty_input_has_no_aggregate_label() {
        let (rows, agg) = label(&[]);
        assert!(rows.is_empty());
        assert_eq!(agg, Aggregate { label: None, confidence: 0.0 });
    }

    #[test]
    fn export_names() {
        assert_eq!(serde_json::to_string(&Label::FalsePositive).unwrap(), "\"fp\"");
        assert_eq!(Label::Candidate.as_str(), "candidate");
    }

    proptest! {
        #[test]
        fn aggregate_confidence_stays_in_unit_interval(
            probabilities in prop::collection::vec(0.0f64..=1.0, 1..200)
        ) {
            let (rows, agg) = label(&probabilities);
            prop_assert_eq!(rows.len(), probabilities.len());
            prop_assert!((0.0..=1.0).contains(&agg.confidence));
            prop_assert_eq!(agg.label, Some(Label::from_score(agg.confidence)));
            for (row, &p) in rows.iter().zip(&probabilities) {
                prop_assert_eq!(row.label, Label::from_score(p));
            }
        }

        #[test]
        fn labels_follow_thresholds(p in 0.0f64..=1.0) {
            let expected = if p >= 0.70 {
                Label::Planet
            } else if p >= 0.40 {
                Label::Candidate
            } else {
                Label::FalsePositive
            };
            prop_assert_eq!(Label::from_score(p), expected);
        }
    }
}
