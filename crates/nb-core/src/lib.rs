//! Naive Bayes Core Library
//!
//! This library provides:
//! - The from-scratch Bernoulli naive Bayes pipeline
//!   (label indexer, prior, likelihood, posterior predictor)
//! - Fitted Bernoulli and Multinomial naive Bayes models
//! - Movie-rating loading and the binary recommendation dataset
//! - Train/test splitting and evaluation metrics
//! - Configuration loading, logging and exit codes for the CLI
//!
//! The binary entry point is in `main.rs`.

pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod exit_codes;
pub mod inference;
pub mod logging;
pub mod models;
pub mod output;
pub mod ratings;
pub mod split;

pub use dataset::{Dataset, DatasetError, Sample};
pub use error::{Error, Result};
pub use inference::{
    estimate_likelihood, estimate_prior, index_by_label, predict, InferenceError, LabelIndex,
    LabelMap, Likelihood, Posterior, Prior,
};
pub use models::{BernoulliNb, MultinomialNb, MultinomialParams};
