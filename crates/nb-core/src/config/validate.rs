//! Semantic validation of experiment configuration.

use super::ExperimentConfig;
use thiserror::Error;

/// A configuration value that parsed but makes no sense.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid value for {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new(
            field,
            format!("must be a finite number >= 0, got {value}"),
        ))
    }
}

/// Check value ranges across every section.
pub fn validate_config(config: &ExperimentConfig) -> Result<(), ValidationError> {
    non_negative("bernoulli.smoothing", config.bernoulli.smoothing)?;
    non_negative("multinomial.alpha", config.multinomial.alpha)?;

    if !config.ratings.recommend_threshold.is_finite() {
        return Err(ValidationError::new(
            "ratings.recommend_threshold",
            "must be finite",
        ));
    }
    if config.ratings.n_users == Some(0) {
        return Err(ValidationError::new("ratings.n_users", "must be at least 1"));
    }
    if config.ratings.n_movies == Some(0) {
        return Err(ValidationError::new("ratings.n_movies", "must be at least 1"));
    }

    let fraction = config.split.test_fraction;
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(ValidationError::new(
            "split.test_fraction",
            format!("must be in (0, 1), got {fraction}"),
        ));
    }

    let step = config.report.roc_step;
    if !(step > 0.0 && step <= 1.0) {
        return Err(ValidationError::new(
            "report.roc_step",
            format!("must be in (0, 1], got {step}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&ExperimentConfig::default()).is_ok());
    }

    #[test]
    fn negative_smoothing_names_its_field() {
        let mut config = ExperimentConfig::default();
        config.bernoulli.smoothing = -1.0;
        let err = validate_config(&config).unwrap_err();
        assert_eq!(err.field, "bernoulli.smoothing");
    }

    #[test]
    fn test_fraction_bounds_are_exclusive() {
        for bad in [0.0, 1.0, f64::NAN] {
            let mut config = ExperimentConfig::default();
            config.split.test_fraction = bad;
            assert_eq!(
                validate_config(&config).unwrap_err().field,
                "split.test_fraction"
            );
        }
    }

    #[test]
    fn roc_step_may_be_one() {
        let mut config = ExperimentConfig::default();
        config.report.roc_step = 1.0;
        assert!(validate_config(&config).is_ok());
        config.report.roc_step = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_sized_matrix_is_rejected() {
        let mut config = ExperimentConfig::default();
        config.ratings.n_movies = Some(0);
        assert_eq!(validate_config(&config).unwrap_err().field, "ratings.n_movies");
    }
}
