//! Training data containers and shape validation.
//!
//! A [`Dataset`] pairs binary samples with labels index-by-index. All shape
//! checks happen on construction so the estimators never discover a ragged
//! row halfway through a reduction.

use thiserror::Error;

/// A fixed-length sequence of binary (0/1) feature values.
pub type Sample = Vec<u8>;

/// Errors raised while validating sample/label data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("{samples} samples but {labels} labels")]
    LengthMismatch { samples: usize, labels: usize },

    #[error("sample {index} has {actual} features, expected {expected}")]
    RaggedSample {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("sample {index} feature {feature} is {value}, expected 0 or 1")]
    NonBinary {
        index: usize,
        feature: usize,
        value: u8,
    },

    #[error("row {index} feature {feature} is {value}, expected a finite count >= 0")]
    InvalidCount {
        index: usize,
        feature: usize,
        value: f64,
    },
}

/// Binary samples with index-aligned labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<L> {
    samples: Vec<Sample>,
    labels: Vec<L>,
    n_features: usize,
}

impl<L> Dataset<L> {
    /// Build a dataset, rejecting mismatched lengths, ragged rows and non-binary values.
    ///
    /// An empty dataset is allowed; estimating a prior from it fails later.
    pub fn new(samples: Vec<Sample>, labels: Vec<L>) -> Result<Self, DatasetError> {
        if samples.len() != labels.len() {
            return Err(DatasetError::LengthMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }
        let n_features = validate_binary(&samples)?;
        Ok(Self {
            samples,
            labels,
            n_features,
        })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Feature count F shared by every sample (0 for an empty dataset).
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Check that every sample has the same length and holds only 0/1.
///
/// Returns the shared feature count (0 when `samples` is empty).
pub fn validate_binary(samples: &[Sample]) -> Result<usize, DatasetError> {
    let expected = samples.first().map_or(0, Vec::len);
    for (index, sample) in samples.iter().enumerate() {
        if sample.len() != expected {
            return Err(DatasetError::RaggedSample {
                index,
                expected,
                actual: sample.len(),
            });
        }
        if let Some((feature, &value)) = sample.iter().enumerate().find(|&(_, &v)| v > 1) {
            return Err(DatasetError::NonBinary {
                index,
                feature,
                value,
            });
        }
    }
    Ok(expected)
}

/// Check that every row has the same length and holds finite, non-negative counts.
pub fn validate_counts(rows: &[Vec<f64>]) -> Result<usize, DatasetError> {
    let expected = rows.first().map_or(0, Vec::len);
    for (index, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(DatasetError::RaggedSample {
                index,
                expected,
                actual: row.len(),
            });
        }
        if let Some((feature, &value)) = row
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(DatasetError::InvalidCount {
                index,
                feature,
                value,
            });
        }
    }
    Ok(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_accepts_toy_data() {
        let ds = Dataset::new(
            vec![vec![0, 1, 1], vec![0, 0, 1], vec![0, 0, 0], vec![1, 1, 0]],
            vec!["Y", "N", "Y", "Y"],
        )
        .unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.n_features(), 3);
        assert_eq!(ds.labels()[1], "N");
    }

    #[test]
    fn dataset_rejects_length_mismatch() {
        let err = Dataset::new(vec![vec![0, 1]], vec!["a", "b"]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::LengthMismatch {
                samples: 1,
                labels: 2
            }
        );
    }

    #[test]
    fn dataset_rejects_ragged_rows() {
        let err = Dataset::new(vec![vec![0, 1], vec![1]], vec!["a", "b"]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::RaggedSample {
                index: 1,
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn dataset_rejects_non_binary() {
        let err = Dataset::new(vec![vec![0, 2]], vec!["a"]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NonBinary {
                index: 0,
                feature: 1,
                value: 2
            }
        ));
    }

    #[test]
    fn empty_dataset_is_allowed() {
        let ds: Dataset<&str> = Dataset::new(vec![], vec![]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.n_features(), 0);
    }

    #[test]
    fn counts_reject_negative_and_nan() {
        assert!(validate_counts(&[vec![1.0, 0.0], vec![2.0, 5.0]]).is_ok());
        assert!(matches!(
            validate_counts(&[vec![1.0, -1.0]]),
            Err(DatasetError::InvalidCount { feature: 1, .. })
        ));
        assert!(validate_counts(&[vec![f64::NAN]]).is_err());
    }
}
