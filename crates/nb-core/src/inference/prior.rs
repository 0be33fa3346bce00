//! Prior estimator: class frequencies from a label index.

use super::{InferenceError, LabelIndex, LabelMap};
use tracing::debug;

/// Label → unconditional class probability; values sum to 1.
pub type Prior<L> = LabelMap<L, f64>;

/// Estimate `prior[l] = |index[l]| / N`.
///
/// Fails with [`InferenceError::InvalidInput`] when the index covers no
/// samples, instead of dividing by zero.
pub fn estimate_prior<L: Clone>(index: &LabelIndex<L>) -> Result<Prior<L>, InferenceError> {
    let total = index.sample_count();
    if total == 0 {
        return Err(InferenceError::invalid(
            "labels",
            "cannot estimate a prior from an empty training set",
        ));
    }

    let n = total as f64;
    let prior = index.map_values(|positions| positions.len() as f64 / n);
    debug!(classes = prior.len(), samples = total, "estimated class prior");
    Ok(prior)
}
