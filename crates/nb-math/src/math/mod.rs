//! Core math modules.

pub mod stable;
pub mod bernoulli;
pub mod dirichlet;
