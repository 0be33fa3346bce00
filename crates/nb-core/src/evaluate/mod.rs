//! Evaluation of binary and multi-class predictions.
//!
//! # Metrics
//!
//! - **Confusion matrix**: TP/FP/TN/FN for one positive label, with
//!   precision, recall, F1 and accuracy
//! - **Classification report**: per-class precision/recall/F1/support plus
//!   accuracy, macro and support-weighted averages
//! - **AUC-ROC**: area under the ROC curve (0.5 = random, 1.0 = perfect)
//! - **ROC points**: TPR/FPR at evenly spaced probability thresholds

pub mod metrics;
pub mod report;

pub use metrics::{auc_roc, roc_points, ConfusionMatrix, RocPoint};
pub use report::{Averages, ClassMetrics, ClassificationReport};

use serde::{Deserialize, Serialize};

/// A predicted positive-class probability paired with the true outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredOutcome {
    /// Predicted probability of the positive class (0.0 to 1.0).
    pub predicted: f64,
    /// Ground truth: is this sample positive?
    pub actual: bool,
}

impl ScoredOutcome {
    /// Pair positive-class probabilities with truth labels.
    pub fn zip<L: PartialEq>(
        probabilities: &[f64],
        truth: &[L],
        positive: &L,
    ) -> Result<Vec<Self>, EvaluationError> {
        if probabilities.len() != truth.len() {
            return Err(EvaluationError::LengthMismatch {
                truth: truth.len(),
                predicted: probabilities.len(),
            });
        }
        probabilities
            .iter()
            .zip(truth)
            .map(|(&predicted, label)| {
                if !(0.0..=1.0).contains(&predicted) {
                    return Err(EvaluationError::InvalidProbability(predicted));
                }
                Ok(ScoredOutcome {
                    predicted,
                    actual: label == positive,
                })
            })
            .collect()
    }
}

/// Errors from metric computation.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// No observations were provided.
    NoData,
    /// Truth and prediction slices differ in length.
    LengthMismatch { truth: usize, predicted: usize },
    /// ROC metrics need at least one positive and one negative.
    SingleClass { positives: usize, negatives: usize },
    /// Probability outside [0, 1].
    InvalidProbability(f64),
    /// ROC threshold step outside (0, 1].
    InvalidStep(f64),
}

impl std::fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationError::NoData => write!(f, "No observations to evaluate"),
            EvaluationError::LengthMismatch { truth, predicted } => write!(
                f,
                "{} truth labels but {} predictions",
                truth, predicted
            ),
            EvaluationError::SingleClass {
                positives,
                negatives,
            } => write!(
                f,
                "ROC needs both classes ({} positive, {} negative)",
                positives, negatives
            ),
            EvaluationError::InvalidProbability(p) => {
                write!(f, "Invalid probability {} (must be in [0, 1])", p)
            }
            EvaluationError::InvalidStep(s) => {
                write!(f, "Invalid ROC threshold step {} (must be in (0, 1])", s)
            }
        }
    }
}

impl std::error::Error for EvaluationError {}
