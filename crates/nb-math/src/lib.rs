//! Naive Bayes math utilities.

pub mod math;

pub use math::stable::*;
pub use math::bernoulli;
pub use math::dirichlet;
