//! Configuration loading and validation.
//!
//! This module handles:
//! - The TOML experiment file (`nb.toml`) and its defaults
//! - Config resolution order (CLI > env > XDG > defaults)
//! - Semantic validation (non-negative smoothing, fractions in range)
//! - Provenance: source and SHA-256 of the loaded file

pub mod resolve;
pub mod validate;

pub use resolve::{resolve_config_path, resolve_config_path_with, ConfigSource};
pub use validate::{validate_config, ValidationError};

use crate::models::MultinomialParams;
use crate::ratings::RatingsOptions;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid TOML in config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Semantic validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Experiment settings, every field defaulted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    pub bernoulli: BernoulliConfig,
    pub multinomial: MultinomialParams,
    pub ratings: RatingsConfig,
    pub split: SplitConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BernoulliConfig {
    /// Additive smoothing for the likelihood estimator.
    pub smoothing: f64,
}

impl Default for BernoulliConfig {
    fn default() -> Self {
        Self { smoothing: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingsConfig {
    pub path: PathBuf,
    pub skip_header: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_users: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_movies: Option<usize>,
    /// Ratings strictly above this count as "recommended".
    pub recommend_threshold: f64,
    /// Movie to predict; the most-rated movie when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_movie: Option<u32>,
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("ml-1m/ratings.dat"),
            skip_header: true,
            n_users: None,
            n_movies: None,
            recommend_threshold: 3.0,
            target_movie: None,
        }
    }
}

impl RatingsConfig {
    pub fn options(&self) -> RatingsOptions {
        RatingsOptions {
            skip_header: self.skip_header,
            n_users: self.n_users,
            n_movies: self.n_movies,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Spacing of ROC thresholds.
    pub roc_step: f64,
    /// Rows of predictions echoed in the movie report.
    pub preview_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            roc_step: 0.05,
            preview_rows: 10,
        }
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub config: ExperimentConfig,
    /// Path to the loaded file (None if using defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
    /// SHA-256 of the file content (None if using defaults).
    pub hash: Option<String>,
}

impl ResolvedConfig {
    pub fn defaults() -> Self {
        Self {
            config: ExperimentConfig::default(),
            path: None,
            source: ConfigSource::BuiltinDefault,
            hash: None,
        }
    }
}

/// Parse and validate TOML text.
pub fn parse_config_str(content: &str) -> Result<ExperimentConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load configuration with the standard resolution order.
pub fn load_config(cli_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    match resolve_config_path(cli_path)? {
        Some((path, source)) => load_from(path, source),
        None => Ok(ResolvedConfig::defaults()),
    }
}

/// Load a specific file, recording `source` as its provenance.
pub fn load_from(path: PathBuf, source: ConfigSource) -> Result<ResolvedConfig, ConfigError> {
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
        path: path.clone(),
        source: e,
    })?;
    let hash = compute_hash(&content);
    let config = parse_config_str(&content).map_err(|e| ConfigError::Parse {
        path: path.clone(),
        source: e,
    })?;
    validate_config(&config)?;

    debug!(path = %path.display(), %source, hash = %hash, "loaded config");
    Ok(ResolvedConfig {
        config,
        path: Some(path),
        source,
        hash: Some(hash),
    })
}

fn compute_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
