//! Multinomial naive Bayes over non-negative count features.
//!
//! Per class `c` and feature `j`:
//!
//! ```text
//! log θ[c][j] = ln((N_cj + α) / (N_c + α·F))
//! jll(x)[c]   = log_prior[c] + Σ_j x_j · log θ[c][j]
//! ```
//!
//! Probabilities come from normalizing the joint log-likelihood with
//! log-sum-exp, so long count vectors never underflow.

use crate::dataset::validate_counts;
use crate::inference::{index_by_label, InferenceError};
use nb_math::dirichlet::smoothed_log_probs;
use nb_math::{argmax, log_scores_to_probs};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Hyperparameters for [`MultinomialNb`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultinomialParams {
    /// Additive (Lidstone) smoothing; 1.0 is Laplace smoothing.
    pub alpha: f64,
    /// Learn class priors from the data; false uses a uniform prior.
    pub fit_prior: bool,
}

impl Default for MultinomialParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fit_prior: true,
        }
    }
}

/// A fitted multinomial naive Bayes classifier.
///
/// Classes are stored in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultinomialNb<L> {
    params: MultinomialParams,
    classes: Vec<L>,
    class_count: Vec<usize>,
    class_log_prior: Vec<f64>,
    feature_count: Vec<Vec<f64>>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl<L: Clone + Eq + Hash + Ord + Debug> MultinomialNb<L> {
    pub fn fit(
        rows: &[Vec<f64>],
        labels: &[L],
        params: MultinomialParams,
    ) -> Result<Self, InferenceError> {
        if !params.alpha.is_finite() || params.alpha < 0.0 {
            return Err(InferenceError::invalid(
                "alpha",
                format!("must be a finite number >= 0, got {}", params.alpha),
            ));
        }
        if rows.len() != labels.len() {
            return Err(InferenceError::invalid(
                "labels",
                format!("{} rows but {} labels", rows.len(), labels.len()),
            ));
        }
        if rows.is_empty() {
            return Err(InferenceError::invalid(
                "labels",
                "cannot fit on an empty training set",
            ));
        }
        let n_features = validate_counts(rows)?;

        let mut grouped: Vec<(L, Vec<usize>)> = index_by_label(labels)
            .iter()
            .map(|(label, positions)| (label.clone(), positions.clone()))
            .collect();
        grouped.sort_by(|a, b| a.0.cmp(&b.0));

        let n = rows.len() as f64;
        let k = grouped.len() as f64;
        let mut classes = Vec::with_capacity(grouped.len());
        let mut class_count = Vec::with_capacity(grouped.len());
        let mut class_log_prior = Vec::with_capacity(grouped.len());
        let mut feature_count = Vec::with_capacity(grouped.len());
        let mut feature_log_prob = Vec::with_capacity(grouped.len());

        for (label, positions) in grouped {
            let mut totals = vec![0.0; n_features];
            for &i in &positions {
                for (total, x) in totals.iter_mut().zip(&rows[i]) {
                    *total += x;
                }
            }

            let log_probs = if n_features == 0 {
                Vec::new()
            } else {
                smoothed_log_probs(&totals, params.alpha).ok_or_else(|| {
                    InferenceError::invalid(
                        "alpha",
                        format!("class {label:?} has no counts; alpha = 0 cannot smooth it"),
                    )
                })?
            };

            class_log_prior.push(if params.fit_prior {
                (positions.len() as f64 / n).ln()
            } else {
                -k.ln()
            });
            class_count.push(positions.len());
            feature_count.push(totals);
            feature_log_prob.push(log_probs);
            classes.push(label);
        }

        debug!(
            samples = rows.len(),
            classes = classes.len(),
            features = n_features,
            alpha = params.alpha,
            "fitted multinomial model"
        );
        Ok(Self {
            params,
            classes,
            class_count,
            class_log_prior,
            feature_count,
            feature_log_prob,
        })
    }

    /// Unnormalized per-class log posterior for each row.
    pub fn joint_log_likelihood(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, InferenceError> {
        let width = validate_counts(rows)?;
        if !rows.is_empty() && width != self.n_features() {
            return Err(InferenceError::invalid(
                "samples",
                format!(
                    "rows have {width} features, model expects {}",
                    self.n_features()
                ),
            ));
        }

        Ok(rows
            .iter()
            .map(|row| {
                self.class_log_prior
                    .iter()
                    .zip(&self.feature_log_prob)
                    .map(|(&log_prior, log_theta)| {
                        // Zero counts contribute nothing, even against a -inf log θ.
                        row.iter()
                            .zip(log_theta)
                            .filter(|&(&x, _)| x > 0.0)
                            .fold(log_prior, |acc, (&x, &lt)| acc + x * lt)
                    })
                    .collect()
            })
            .collect())
    }

    /// Class probabilities per row, columns in [`Self::classes`] order.
    pub fn predict_proba(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, InferenceError> {
        self.joint_log_likelihood(rows)?
            .into_iter()
            .enumerate()
            .map(|(sample, jll)| {
                log_scores_to_probs(&jll)
                    .ok_or(InferenceError::DegenerateNormalization { sample, total: 0.0 })
            })
            .collect()
    }

    /// Most probable class per row.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<L>, InferenceError> {
        self.joint_log_likelihood(rows)?
            .into_iter()
            .enumerate()
            .map(|(sample, jll)| {
                if jll.iter().all(|v| *v == f64::NEG_INFINITY) {
                    return Err(InferenceError::DegenerateNormalization { sample, total: 0.0 });
                }
                argmax(&jll)
                    .map(|best| self.classes[best].clone())
                    .ok_or(InferenceError::DegenerateNormalization { sample, total: 0.0 })
            })
            .collect()
    }
}

impl<L> MultinomialNb<L> {
    pub fn classes(&self) -> &[L] {
        &self.classes
    }

    pub fn params(&self) -> MultinomialParams {
        self.params
    }

    pub fn n_features(&self) -> usize {
        self.feature_count.first().map_or(0, Vec::len)
    }

    pub fn class_count(&self) -> &[usize] {
        &self.class_count
    }

    pub fn class_log_prior(&self) -> &[f64] {
        &self.class_log_prior
    }

    /// Summed feature counts per class.
    pub fn feature_count(&self) -> &[Vec<f64>] {
        &self.feature_count
    }

    pub fn feature_log_prob(&self) -> &[Vec<f64>] {
        &self.feature_log_prob
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn rows() -> Vec<Vec<f64>> {
        vec![
            vec![2.0, 1.0, 0.0],
            vec![3.0, 0.0, 1.0],
            vec![0.0, 2.0, 3.0],
            vec![0.0, 1.0, 4.0],
        ]
    }

    #[test]
    fn fit_learns_smoothed_rates() {
        let model = MultinomialNb::fit(&rows(), &[1u8, 1, 0, 0], MultinomialParams::default())
            .unwrap();
        assert_eq!(model.classes(), &[0, 1]);
        assert_eq!(model.class_count(), &[2, 2]);
        // class 0 totals [0, 3, 7], N_c = 10, F = 3
        let theta: Vec<f64> = model.feature_log_prob()[0].iter().map(|l| l.exp()).collect();
        assert!(approx_eq(theta[0], 1.0 / 13.0, 1e-12));
        assert!(approx_eq(theta[1], 4.0 / 13.0, 1e-12));
        assert!(approx_eq(theta[2], 8.0 / 13.0, 1e-12));
        assert!(approx_eq(model.class_log_prior()[0], 0.5f64.ln(), 1e-12));
    }

    #[test]
    fn predicts_training_rows() {
        let labels = [1u8, 1, 0, 0];
        let model = MultinomialNb::fit(&rows(), &labels, MultinomialParams::default()).unwrap();
        assert_eq!(model.predict(&rows()).unwrap(), labels.to_vec());
    }

    #[test]
    fn proba_rows_sum_to_one() {
        let model = MultinomialNb::fit(&rows(), &[1u8, 1, 0, 0], MultinomialParams::default())
            .unwrap();
        for row in model.predict_proba(&[vec![100.0, 0.0, 50.0], vec![0.0, 0.0, 0.0]]).unwrap() {
            assert!(approx_eq(row.iter().sum::<f64>(), 1.0, 1e-9));
        }
    }

    #[test]
    fn uniform_prior_when_not_fitted() {
        let params = MultinomialParams {
            alpha: 1.0,
            fit_prior: false,
        };
        let model = MultinomialNb::fit(&rows(), &[1u8, 1, 1, 0], params).unwrap();
        for lp in model.class_log_prior() {
            assert!(approx_eq(*lp, 0.5f64.ln(), 1e-12));
        }
    }

    #[test]
    fn zero_alpha_unseen_feature_is_degenerate_only_when_every_class_excludes_it() {
        let params = MultinomialParams {
            alpha: 0.0,
            fit_prior: true,
        };
        let train = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let model = MultinomialNb::fit(&train, &["a", "b"], params).unwrap();
        assert_eq!(model.predict(&[vec![3.0, 0.0]]).unwrap(), vec!["a"]);
        let err = model.predict_proba(&[vec![1.0, 1.0]]).unwrap_err();
        assert_eq!(
            err,
            InferenceError::DegenerateNormalization {
                sample: 0,
                total: 0.0
            }
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        let p = MultinomialParams::default();
        assert!(MultinomialNb::<u8>::fit(&[], &[], p).is_err());
        assert!(MultinomialNb::fit(&rows(), &[1u8, 0], p).is_err());
        assert!(MultinomialNb::fit(&[vec![-1.0]], &[0u8], p).is_err());
        let neg = MultinomialParams {
            alpha: -0.5,
            fit_prior: true,
        };
        assert!(matches!(
            MultinomialNb::fit(&rows(), &[1u8, 1, 0, 0], neg),
            Err(InferenceError::InvalidInput { field: "alpha", .. })
        ));
    }

    #[test]
    fn prediction_width_must_match() {
        let model = MultinomialNb::fit(&rows(), &[1u8, 1, 0, 0], MultinomialParams::default())
            .unwrap();
        assert!(model.predict(&[vec![1.0, 2.0]]).is_err());
    }
}
