//! Fitted naive Bayes models.
//!
//! - [`BernoulliNb`]: binary features, wraps the from-scratch pipeline in
//!   [`crate::inference`].
//! - [`MultinomialNb`]: count features, log-domain with Dirichlet smoothing.

pub mod bernoulli;
pub mod multinomial;

pub use bernoulli::BernoulliNb;
pub use multinomial::{MultinomialNb, MultinomialParams};
