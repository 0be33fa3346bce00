//! Binary classification metrics.

use super::{EvaluationError, ScoredOutcome};
use serde::{Deserialize, Serialize};

/// Confusion matrix for one positive label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tally hard predictions against truth, treating `positive` as the positive class.
    pub fn from_predictions<L: PartialEq>(
        truth: &[L],
        predicted: &[L],
        positive: &L,
    ) -> Result<Self, EvaluationError> {
        if truth.len() != predicted.len() {
            return Err(EvaluationError::LengthMismatch {
                truth: truth.len(),
                predicted: predicted.len(),
            });
        }
        if truth.is_empty() {
            return Err(EvaluationError::NoData);
        }

        let mut cm = ConfusionMatrix::default();
        for (t, p) in truth.iter().zip(predicted) {
            match (p == positive, t == positive) {
                (true, true) => cm.true_positives += 1,
                (true, false) => cm.false_positives += 1,
                (false, false) => cm.true_negatives += 1,
                (false, true) => cm.false_negatives += 1,
            }
        }
        Ok(cm)
    }

    /// Tally scored outcomes, predicting positive when `predicted >= threshold`.
    pub fn at_threshold(data: &[ScoredOutcome], threshold: f64) -> Self {
        let mut cm = ConfusionMatrix::default();
        for d in data {
            match (d.predicted >= threshold, d.actual) {
                (true, true) => cm.true_positives += 1,
                (true, false) => cm.false_positives += 1,
                (false, false) => cm.true_negatives += 1,
                (false, true) => cm.false_negatives += 1,
            }
        }
        cm
    }

    /// Rows are truth (negative, positive), columns are prediction.
    pub fn as_table(&self) -> [[usize; 2]; 2] {
        [
            [self.true_negatives, self.false_positives],
            [self.false_negatives, self.true_positives],
        ]
    }

    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn precision(&self) -> f64 {
        let denom = self.true_positives + self.false_positives;
        if denom == 0 {
            0.0
        } else {
            self.true_positives as f64 / denom as f64
        }
    }

    /// Also the true positive rate.
    pub fn recall(&self) -> f64 {
        let denom = self.true_positives + self.false_negatives;
        if denom == 0 {
            0.0
        } else {
            self.true_positives as f64 / denom as f64
        }
    }

    pub fn false_positive_rate(&self) -> f64 {
        let denom = self.false_positives + self.true_negatives;
        if denom == 0 {
            0.0
        } else {
            self.false_positives as f64 / denom as f64
        }
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.true_positives + self.true_negatives) as f64 / total as f64
        }
    }

    /// The same counts seen from the other class.
    pub fn swapped(&self) -> Self {
        ConfusionMatrix {
            true_positives: self.true_negatives,
            false_positives: self.false_negatives,
            true_negatives: self.true_positives,
            false_negatives: self.false_positives,
        }
    }
}

/// One point of a thresholded ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    pub threshold: f64,
    pub true_positive_rate: f64,
    pub false_positive_rate: f64,
}

fn class_counts(data: &[ScoredOutcome]) -> Result<(usize, usize), EvaluationError> {
    if data.is_empty() {
        return Err(EvaluationError::NoData);
    }
    let positives = data.iter().filter(|d| d.actual).count();
    let negatives = data.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(EvaluationError::SingleClass {
            positives,
            negatives,
        });
    }
    Ok((positives, negatives))
}

/// Area under the ROC curve by the trapezoidal rule.
///
/// Equal scores are stepped over together, so a tie between a positive and
/// a negative counts as half a correct ordering.
pub fn auc_roc(data: &[ScoredOutcome]) -> Result<f64, EvaluationError> {
    let (positives, negatives) = class_counts(data)?;

    let mut sorted: Vec<&ScoredOutcome> = data.iter().collect();
    sorted.sort_by(|a, b| b.predicted.total_cmp(&a.predicted));

    let mut auc = 0.0;
    let mut tp = 0.0;
    let mut fp = 0.0;
    let mut i = 0;
    while i < sorted.len() {
        let (prev_tp, prev_fp) = (tp, fp);
        let score = sorted[i].predicted;
        while i < sorted.len() && sorted[i].predicted == score {
            if sorted[i].actual {
                tp += 1.0;
            } else {
                fp += 1.0;
            }
            i += 1;
        }
        auc += (fp - prev_fp) * (tp + prev_tp) / 2.0;
    }

    Ok(auc / (positives as f64 * negatives as f64))
}

/// TPR/FPR of `predicted >= t` for `t = 0, step, 2·step, …` up to one step past 1.0.
///
/// With `step = 0.05` that is the 22 thresholds `0.0 ..= 1.05`.
pub fn roc_points(data: &[ScoredOutcome], step: f64) -> Result<Vec<RocPoint>, EvaluationError> {
    if !(step > 0.0 && step <= 1.0) {
        return Err(EvaluationError::InvalidStep(step));
    }
    class_counts(data)?;

    let last = (1.0 / step - 1e-9).ceil() as usize + 1;
    Ok((0..=last)
        .map(|i| {
            let threshold = i as f64 * step;
            let cm = ConfusionMatrix::at_threshold(data, threshold);
            RocPoint {
                threshold,
                true_positive_rate: cm.recall(),
                false_positive_rate: cm.false_positive_rate(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn outcome(predicted: f64, actual: bool) -> ScoredOutcome {
        ScoredOutcome { predicted, actual }
    }

    #[test]
    fn confusion_counts_and_rates() {
        let truth = [1u8, 1, 0, 0, 1, 0];
        let pred = [1u8, 0, 0, 1, 1, 0];
        let cm = ConfusionMatrix::from_predictions(&truth, &pred, &1).unwrap();
        assert_eq!(cm.true_positives, 2);
        assert_eq!(cm.false_negatives, 1);
        assert_eq!(cm.false_positives, 1);
        assert_eq!(cm.true_negatives, 2);
        assert_eq!(cm.as_table(), [[2, 1], [1, 2]]);
        assert!(approx_eq(cm.precision(), 2.0 / 3.0, 1e-12));
        assert!(approx_eq(cm.recall(), 2.0 / 3.0, 1e-12));
        assert!(approx_eq(cm.accuracy(), 4.0 / 6.0, 1e-12));
    }

    #[test]
    fn swapped_matches_other_positive_label() {
        let truth = [1u8, 1, 0, 0, 0];
        let pred = [1u8, 0, 0, 0, 1];
        let pos = ConfusionMatrix::from_predictions(&truth, &pred, &1).unwrap();
        let neg = ConfusionMatrix::from_predictions(&truth, &pred, &0).unwrap();
        assert_eq!(pos.swapped(), neg);
    }

    #[test]
    fn confusion_rejects_mismatch_and_empty() {
        assert_eq!(
            ConfusionMatrix::from_predictions(&[1u8], &[1, 0], &1),
            Err(EvaluationError::LengthMismatch {
                truth: 1,
                predicted: 2
            })
        );
        assert_eq!(
            ConfusionMatrix::from_predictions::<u8>(&[], &[], &1),
            Err(EvaluationError::NoData)
        );
    }

    #[test]
    fn zero_denominators_give_zero() {
        let cm = ConfusionMatrix::default();
        assert_eq!(cm.precision(), 0.0);
        assert_eq!(cm.recall(), 0.0);
        assert_eq!(cm.f1(), 0.0);
        assert_eq!(cm.accuracy(), 0.0);
    }

    #[test]
    fn auc_perfect_and_inverted() {
        let perfect = [outcome(0.9, true), outcome(0.8, true), outcome(0.2, false)];
        assert!(approx_eq(auc_roc(&perfect).unwrap(), 1.0, 1e-12));
        let inverted = [outcome(0.1, true), outcome(0.8, false)];
        assert!(approx_eq(auc_roc(&inverted).unwrap(), 0.0, 1e-12));
    }

    #[test]
    fn auc_counts_ties_as_half() {
        let tied = [outcome(0.5, true), outcome(0.5, false)];
        assert!(approx_eq(auc_roc(&tied).unwrap(), 0.5, 1e-12));

        // One of the four positive/negative pairs is misordered.
        let data = [
            outcome(0.9, true),
            outcome(0.7, false),
            outcome(0.6, true),
            outcome(0.1, false),
        ];
        assert!(approx_eq(auc_roc(&data).unwrap(), 0.75, 1e-12));
    }

    #[test]
    fn auc_needs_both_classes() {
        let data = [outcome(0.9, true), outcome(0.3, true)];
        assert_eq!(
            auc_roc(&data),
            Err(EvaluationError::SingleClass {
                positives: 2,
                negatives: 0
            })
        );
        assert_eq!(auc_roc(&[]), Err(EvaluationError::NoData));
    }

    #[test]
    fn roc_points_cover_expected_thresholds() {
        let data = [
            outcome(0.9, true),
            outcome(0.4, true),
            outcome(0.6, false),
            outcome(0.1, false),
        ];
        let points = roc_points(&data, 0.05).unwrap();
        assert_eq!(points.len(), 22);
        assert_eq!(points[0].threshold, 0.0);
        assert!(approx_eq(points[21].threshold, 1.05, 1e-12));
        assert_eq!(points[0].true_positive_rate, 1.0);
        assert_eq!(points[0].false_positive_rate, 1.0);
        assert_eq!(points[21].true_positive_rate, 0.0);
        // t = 0.5: positives {0.9}, negatives {0.6}
        assert_eq!(points[10].true_positive_rate, 0.5);
        assert_eq!(points[10].false_positive_rate, 0.5);
        assert!(points
            .windows(2)
            .all(|w| w[1].true_positive_rate <= w[0].true_positive_rate));
    }

    #[test]
    fn roc_rejects_bad_step() {
        let data = [outcome(0.9, true), outcome(0.1, false)];
        for step in [0.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                roc_points(&data, step),
                Err(EvaluationError::InvalidStep(_))
            ));
        }
    }
}
