//! Top-level error type for the nb-core library and CLI.
//!
//! Every module keeps its own error enum; this type unifies them so command
//! handlers can use `?` throughout and `main` can map any failure to a
//! stable [`ExitCode`].
//!
//! # Machine-Facing Output
//!
//! With `--format json`, errors are written to stderr as:
//! ```json
//! {
//!   "code": 11,
//!   "code_name": "ERR_DATA",
//!   "category": "data",
//!   "message": "malformed rating at line 4: expected 4 '::'-separated fields, found 1"
//! }
//! ```

use crate::config::ConfigError;
use crate::dataset::DatasetError;
use crate::evaluate::EvaluationError;
use crate::exit_codes::ExitCode;
use crate::inference::InferenceError;
use crate::ratings::RatingsError;
use crate::split::SplitError;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for nb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration files and command-line arguments.
    Config,
    /// Input data: samples, ratings, splits, metric inputs.
    Data,
    /// Posterior normalization.
    Inference,
    /// File I/O.
    Io,
    /// Serialization and other bugs.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Data => write!(f, "data"),
            ErrorCategory::Inference => write!(f, "inference"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid argument: {0}")]
    Args(String),

    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),

    #[error("ratings error: {0}")]
    Ratings(#[from] RatingsError),

    #[error("split failed: {0}")]
    Split(#[from] SplitError),

    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(ConfigError::Io { .. }) => ErrorCategory::Io,
            Error::Config(_) | Error::Args(_) => ErrorCategory::Config,
            Error::Inference(InferenceError::DegenerateNormalization { .. }) => {
                ErrorCategory::Inference
            }
            Error::Ratings(RatingsError::Io(_)) | Error::Io(_) => ErrorCategory::Io,
            Error::Dataset(_)
            | Error::Inference(_)
            | Error::Ratings(_)
            | Error::Split(_)
            | Error::Evaluation(_) => ErrorCategory::Data,
            Error::Json(_) | Error::Toml(_) => ErrorCategory::Internal,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self.category() {
            ErrorCategory::Config => ExitCode::ArgsError,
            ErrorCategory::Data => ExitCode::DataError,
            ErrorCategory::Inference => ExitCode::InferenceError,
            ErrorCategory::Io => ExitCode::IoError,
            ErrorCategory::Internal => ExitCode::InternalError,
        }
    }

    /// Structured form for JSON error output.
    pub fn report(&self) -> ErrorReport {
        let code = self.exit_code();
        ErrorReport {
            code: code.as_i32(),
            code_name: code.code_name(),
            category: self.category(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub code: i32,
    pub code_name: &'static str,
    pub category: ErrorCategory,
    pub message: String,
}
