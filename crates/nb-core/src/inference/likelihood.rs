//! Likelihood estimator: smoothed P(feature = 1 | class).

use super::{InferenceError, LabelIndex, LabelMap};
use crate::dataset::{validate_binary, Sample};
use nb_math::bernoulli::additive_estimate;
use std::fmt::Debug;
use tracing::debug;

/// Label → F-vector of P(feature_j = 1 | label).
pub type Likelihood<L> = LabelMap<L, Vec<f64>>;

/// Estimate per-class Bernoulli feature probabilities with additive smoothing.
///
/// `likelihood[l][j] = (count_on + s) / (|I| + 2s)` where `I` are the sample
/// positions of class `l` and `count_on` is how many of them have feature
/// `j` set. The `2` reflects the two outcomes of a binary feature.
///
/// `smoothing > 0` keeps every value strictly inside (0, 1); `smoothing = 0`
/// gives raw maximum-likelihood rates. Inputs are validated before any
/// counting: negative or non-finite smoothing, ragged or non-binary samples,
/// index positions outside `samples`, and an empty class with zero
/// smoothing are all [`InferenceError::InvalidInput`].
pub fn estimate_likelihood<L: Clone + Debug>(
    samples: &[Sample],
    index: &LabelIndex<L>,
    smoothing: f64,
) -> Result<Likelihood<L>, InferenceError> {
    if !smoothing.is_finite() || smoothing < 0.0 {
        return Err(InferenceError::invalid(
            "smoothing",
            format!("must be a finite number >= 0, got {smoothing}"),
        ));
    }
    let n_features = validate_binary(samples)?;

    for (label, positions) in index.iter() {
        if let Some(&bad) = positions.iter().find(|&&i| i >= samples.len()) {
            return Err(InferenceError::invalid(
                "label_index",
                format!(
                    "class {label:?} references sample {bad} but only {} samples were given",
                    samples.len()
                ),
            ));
        }
        if positions.is_empty() && smoothing == 0.0 {
            return Err(InferenceError::invalid(
                "label_index",
                format!("class {label:?} has no samples; zero smoothing would divide by zero"),
            ));
        }
    }

    let mut entries = Vec::with_capacity(index.len());
    for (label, positions) in index.iter() {
        let members = positions.len() as f64;
        let mut probs = Vec::with_capacity(n_features);
        for feature in 0..n_features {
            let count_on = positions
                .iter()
                .filter(|&&i| samples[i][feature] == 1)
                .count();
            let p = additive_estimate(count_on as f64, members, smoothing).ok_or_else(|| {
                InferenceError::invalid(
                    "smoothing",
                    format!("no estimate for class {label:?} feature {feature}"),
                )
            })?;
            probs.push(p);
        }
        entries.push((label.clone(), probs));
    }

    debug!(
        classes = entries.len(),
        features = n_features,
        smoothing,
        "estimated feature likelihoods"
    );
    Ok(LabelMap::from_distinct(entries))
}
