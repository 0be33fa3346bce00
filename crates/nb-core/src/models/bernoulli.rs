//! Bernoulli naive Bayes as a fitted model.

use crate::dataset::{Dataset, Sample};
use crate::inference::{
    estimate_likelihood, estimate_prior, index_by_label, predict, InferenceError, LabelIndex,
    Likelihood, Posterior, Prior,
};
use nb_math::argmax;
use serde::Serialize;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// A Bernoulli naive Bayes classifier trained once on a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BernoulliNb<L> {
    smoothing: f64,
    n_features: usize,
    label_index: LabelIndex<L>,
    prior: Prior<L>,
    likelihood: Likelihood<L>,
}

impl<L: Clone + Eq + Hash + Debug> BernoulliNb<L> {
    /// Index labels, then estimate the prior and the smoothed likelihood.
    pub fn fit(dataset: &Dataset<L>, smoothing: f64) -> Result<Self, InferenceError> {
        let label_index = index_by_label(dataset.labels());
        let prior = estimate_prior(&label_index)?;
        let likelihood = estimate_likelihood(dataset.samples(), &label_index, smoothing)?;
        debug!(
            samples = dataset.len(),
            classes = label_index.len(),
            "fitted bernoulli model"
        );
        Ok(Self {
            smoothing,
            n_features: dataset.n_features(),
            label_index,
            prior,
            likelihood,
        })
    }

    /// Posterior class probabilities for each query sample.
    pub fn predict_proba(&self, samples: &[Sample]) -> Result<Vec<Posterior<L>>, InferenceError> {
        predict(samples, &self.prior, &self.likelihood)
    }

    /// Most probable label per sample; ties go to the earliest label.
    pub fn predict(&self, samples: &[Sample]) -> Result<Vec<L>, InferenceError> {
        self.predict_proba(samples)?
            .iter()
            .enumerate()
            .map(|(i, posterior)| {
                let probs: Vec<f64> = posterior.values().copied().collect();
                argmax(&probs)
                    .and_then(|best| posterior.get_index(best))
                    .map(|(label, _)| label.clone())
                    .ok_or(InferenceError::DegenerateNormalization {
                        sample: i,
                        total: f64::NAN,
                    })
            })
            .collect()
    }
}

impl<L> BernoulliNb<L> {
    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn label_index(&self) -> &LabelIndex<L> {
        &self.label_index
    }

    pub fn prior(&self) -> &Prior<L> {
        &self.prior
    }

    pub fn likelihood(&self) -> &Likelihood<L> {
        &self.likelihood
    }

    /// Class labels in first-encounter order.
    pub fn classes(&self) -> impl Iterator<Item = &L> {
        self.prior.labels()
    }
}
