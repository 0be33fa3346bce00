//! Posterior predictor: P(class | sample) under the Bernoulli model.
//!
//! For a query `x` and class `L`:
//!
//! ```text
//! score(L) = prior[L] · Π_j ( likelihood[L][j]      if x_j = 1
//!                             1 − likelihood[L][j]  if x_j = 0 )
//! posterior[L] = score(L) / Σ_L' score(L')
//! ```
//!
//! Scores are plain products, not log sums, so they can overflow when a
//! caller supplies unnormalized prior weights. An overflowed (`+inf`) score
//! maps to a posterior of exactly 1.0 while every finite score is divided
//! by the infinite total and collapses to 0. That keeps the result free of
//! `inf / inf = NaN`, but it discards the relative weight of the other
//! classes and can report more than one certain class; it is kept for
//! compatibility with existing results and should not be relied on.

use super::{InferenceError, LabelMap, Likelihood, Prior};
use crate::dataset::{validate_binary, Sample};
use nb_math::bernoulli::outcome_prob;
use std::fmt::Debug;
use tracing::{trace, warn};

/// Label → P(label | sample) for one query sample.
pub type Posterior<L> = LabelMap<L, f64>;

/// Compute normalized posteriors for each query sample, in input order.
///
/// Errors:
/// - [`InferenceError::InvalidInput`] when prior and likelihood disagree on
///   labels, likelihood vectors differ in length or leave [0, 1], prior
///   weights are negative or NaN, or a query sample is ragged/non-binary.
/// - [`InferenceError::DegenerateNormalization`] when every class scores
///   exactly zero for a sample, or the finite scores overflow when summed.
pub fn predict<L: Clone + PartialEq + Debug>(
    samples: &[Sample],
    prior: &Prior<L>,
    likelihood: &Likelihood<L>,
) -> Result<Vec<Posterior<L>>, InferenceError> {
    let n_features = validate_model(prior, likelihood)?;
    validate_queries(samples, n_features)?;

    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let scores = score_validated(sample, prior, likelihood)?;
            normalize(i, scores)
        })
        .collect()
}

/// Raw (unnormalized) class scores `prior · Π likelihood terms` for one sample.
pub fn unnormalized_scores<L: Clone + PartialEq + Debug>(
    sample: &[u8],
    prior: &Prior<L>,
    likelihood: &Likelihood<L>,
) -> Result<LabelMap<L, f64>, InferenceError> {
    let n_features = validate_model(prior, likelihood)?;
    validate_queries(&[sample.to_vec()], n_features)?;
    score_validated(sample, prior, likelihood)
}

fn score_validated<L: Clone + PartialEq + Debug>(
    sample: &[u8],
    prior: &Prior<L>,
    likelihood: &Likelihood<L>,
) -> Result<LabelMap<L, f64>, InferenceError> {
    let mut entries = Vec::with_capacity(prior.len());
    for (label, &weight) in prior.iter() {
        let probs = likelihood.get(label).ok_or_else(|| missing_label(label))?;
        let score = sample
            .iter()
            .zip(probs)
            .fold(weight, |acc, (&x, &p)| acc * outcome_prob(p, x == 1));
        if score.is_nan() {
            return Err(InferenceError::invalid(
                "prior",
                format!("score for class {label:?} is undefined (infinite weight times zero likelihood)"),
            ));
        }
        entries.push((label.clone(), score));
    }
    Ok(LabelMap::from_distinct(entries))
}

fn normalize<L: Clone + Debug>(
    sample: usize,
    scores: LabelMap<L, f64>,
) -> Result<Posterior<L>, InferenceError> {
    let total: f64 = scores.values().sum();
    let overflowed = scores.values().any(|s| is_positive_overflow(*s));

    if !overflowed && (total == 0.0 || !total.is_finite()) {
        return Err(InferenceError::DegenerateNormalization { sample, total });
    }

    let posterior = scores.map_values(|&score| {
        if is_positive_overflow(score) {
            1.0
        } else {
            score / total
        }
    });

    if overflowed {
        warn!(
            sample,
            "class score overflowed; forcing that class posterior to 1.0"
        );
    }
    trace!(sample, total, "normalized posterior");
    Ok(posterior)
}

#[inline]
fn is_positive_overflow(score: f64) -> bool {
    score.is_infinite() && score.is_sign_positive()
}

fn missing_label<L: Debug>(label: &L) -> InferenceError {
    InferenceError::invalid(
        "likelihood",
        format!("no likelihood vector for class {label:?}"),
    )
}

/// Check that prior and likelihood describe the same classes and return F.
fn validate_model<L: PartialEq + Debug>(
    prior: &Prior<L>,
    likelihood: &Likelihood<L>,
) -> Result<usize, InferenceError> {
    if prior.len() != likelihood.len() {
        return Err(InferenceError::invalid(
            "likelihood",
            format!(
                "prior has {} classes but likelihood has {}",
                prior.len(),
                likelihood.len()
            ),
        ));
    }

    let mut n_features: Option<usize> = None;
    for (label, &weight) in prior.iter() {
        if weight.is_nan() || weight < 0.0 {
            return Err(InferenceError::invalid(
                "prior",
                format!("weight for class {label:?} must be >= 0, got {weight}"),
            ));
        }
        let probs = likelihood.get(label).ok_or_else(|| missing_label(label))?;
        let expected = *n_features.get_or_insert(probs.len());
        if probs.len() != expected {
            return Err(InferenceError::invalid(
                "likelihood",
                format!(
                    "class {label:?} has {} features, expected {expected}",
                    probs.len()
                ),
            ));
        }
        if let Some(bad) = probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(InferenceError::invalid(
                "likelihood",
                format!("class {label:?} has probability {bad} outside [0, 1]"),
            ));
        }
    }
    Ok(n_features.unwrap_or(0))
}

fn validate_queries(samples: &[Sample], n_features: usize) -> Result<(), InferenceError> {
    let width = validate_binary(samples)?;
    if !samples.is_empty() && width != n_features {
        return Err(InferenceError::invalid(
            "samples",
            format!("query samples have {width} features, model expects {n_features}"),
        ));
    }
    Ok(())
}
