//! Per-class classification report.

use super::{ConfusionMatrix, EvaluationError};
use serde::Serialize;
use std::fmt;

/// Precision, recall and F1 for one class, treated as the positive label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics<L> {
    pub label: L,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true samples of this class.
    pub support: usize,
}

/// Averages over classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport<L> {
    /// One entry per label seen in truth or predictions, ascending.
    pub classes: Vec<ClassMetrics<L>>,
    pub accuracy: f64,
    pub macro_avg: Averages,
    /// Averages weighted by class support.
    pub weighted_avg: Averages,
    pub support: usize,
}

impl<L: Clone + Ord> ClassificationReport<L> {
    pub fn from_predictions(truth: &[L], predicted: &[L]) -> Result<Self, EvaluationError> {
        if truth.len() != predicted.len() {
            return Err(EvaluationError::LengthMismatch {
                truth: truth.len(),
                predicted: predicted.len(),
            });
        }
        if truth.is_empty() {
            return Err(EvaluationError::NoData);
        }

        let mut labels: Vec<L> = truth.iter().chain(predicted).cloned().collect();
        labels.sort();
        labels.dedup();

        let classes: Vec<ClassMetrics<L>> = labels
            .into_iter()
            .map(|label| {
                let cm = ConfusionMatrix::from_predictions(truth, predicted, &label)?;
                Ok(ClassMetrics {
                    precision: cm.precision(),
                    recall: cm.recall(),
                    f1: cm.f1(),
                    support: cm.true_positives + cm.false_negatives,
                    label,
                })
            })
            .collect::<Result<_, EvaluationError>>()?;

        let n = truth.len();
        let correct = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
        let k = classes.len() as f64;
        let macro_avg = Averages {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / k,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / k,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / k,
        };
        let weight = |c: &ClassMetrics<L>| c.support as f64 / n as f64;
        let weighted_avg = Averages {
            precision: classes.iter().map(|c| c.precision * weight(c)).sum(),
            recall: classes.iter().map(|c| c.recall * weight(c)).sum(),
            f1: classes.iter().map(|c| c.f1 * weight(c)).sum(),
        };

        Ok(Self {
            classes,
            accuracy: correct as f64 / n as f64,
            macro_avg,
            weighted_avg,
            support: n,
        })
    }
}

impl<L: fmt::Display> fmt::Display for ClassificationReport<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.to_string().len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label.to_string(),
                c.precision,
                c.recall,
                c.f1,
                c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.support
        )?;
        for (name, avg) in [("macro avg", self.macro_avg), ("weighted avg", self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, self.support
            )?;
        }
        Ok(())
    }
}
