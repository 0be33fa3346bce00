//! Seeded train/test split.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("test fraction must be in (0, 1), got {0}")]
    InvalidFraction(f64),

    #[error("cannot split {n} samples with test fraction {fraction}: one side would be empty")]
    TooFewSamples { n: usize, fraction: f64 },
}

/// Row positions assigned to each side of a split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl Split {
    /// Gather `items` into `(train, test)` by this split's positions.
    pub fn apply<T: Clone>(&self, items: &[T]) -> (Vec<T>, Vec<T>) {
        let pick = |positions: &[usize]| positions.iter().map(|&i| items[i].clone()).collect();
        (pick(&self.train), pick(&self.test))
    }
}

/// Shuffle `0..n` with a seeded RNG and cut off `ceil(n · test_fraction)` test rows.
///
/// The same `(n, test_fraction, seed)` always yields the same split.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<Split, SplitError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(test_fraction));
    }
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(SplitError::TooFewSamples {
            n,
            fraction: test_fraction,
        });
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let train = order.split_off(n_test);
    Ok(Split { train, test: order })
}
