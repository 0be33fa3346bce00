//! Bernoulli naive Bayes inference pipeline.
//!
//! The four stages run in strict order:
//!
//! ```text
//! labels ─► index_by_label ─┬─► estimate_prior ──────┐
//!                           └─► estimate_likelihood ─┴─► predict ─► posteriors
//! ```
//!
//! Every stage is a pure function returning an immutable value. Label-keyed
//! results are [`LabelMap`]s that keep first-encounter label order.

pub mod label_index;
pub mod label_map;
pub mod likelihood;
pub mod posterior;
pub mod prior;

pub use label_index::{index_by_label, LabelIndex};
pub use label_map::LabelMap;
pub use likelihood::{estimate_likelihood, Likelihood};
pub use posterior::{predict, unnormalized_scores, Posterior};
pub use prior::{estimate_prior, Prior};

use crate::dataset::DatasetError;
use thiserror::Error;

/// Errors raised by the inference pipeline and the fitted models.
///
/// Numeric overflow of a class score is not an error: the predictor maps an
/// infinite score to a posterior of exactly 1.0.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("invalid input for {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("posterior for sample {sample} cannot be normalized (total score {total})")]
    DegenerateNormalization { sample: usize, total: f64 },
}

impl InferenceError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        InferenceError::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

impl From<DatasetError> for InferenceError {
    fn from(err: DatasetError) -> Self {
        InferenceError::invalid("samples", err.to_string())
    }
}
