//! Beta-Bernoulli smoothing for binary features.
//!
//! A binary feature observed "on" `k` times out of `n` class members is
//! estimated with additive smoothing:
//!
//! `p = (k + s) / (n + 2s)`
//!
//! For `s > 0` this is the posterior mean of the conjugate model
//! - Prior: `p ~ Beta(s, s)`
//! - Likelihood: `x | p ~ Bernoulli(p)`
//! - Posterior: `p | data ~ Beta(s + k, s + n - k)`
//!
//! With `s = 0` it degrades to the raw maximum-likelihood rate `k / n`.

/// Additive-smoothed estimate of P(x = 1) from `k` "on" observations out of `n`.
///
/// Returns None for NaN or negative inputs, `k > n`, or a zero denominator
/// (`n = 0` with `smoothing = 0`).
///
/// # Example
/// ```
/// use nb_math::bernoulli::additive_estimate;
///
/// assert_eq!(additive_estimate(1.0, 3.0, 1.0), Some(0.4));
/// assert_eq!(additive_estimate(3.0, 3.0, 0.0), Some(1.0));
/// assert_eq!(additive_estimate(0.0, 0.0, 0.0), None);
/// ```
pub fn additive_estimate(k: f64, n: f64, smoothing: f64) -> Option<f64> {
    if k.is_nan() || n.is_nan() || smoothing.is_nan() {
        return None;
    }
    if k < 0.0 || n < 0.0 || k > n || smoothing < 0.0 || smoothing.is_infinite() {
        return None;
    }
    let denom = n + 2.0 * smoothing;
    if denom == 0.0 {
        return None;
    }
    Some((k + smoothing) / denom)
}

/// Probability of one observed outcome given P(x = 1) = `p`.
#[inline]
pub fn outcome_prob(p: f64, on: bool) -> f64 {
    if on {
        p
    } else {
        1.0 - p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn additive_estimate_is_beta_posterior_mean() {
        // Beta(s + k, s + n - k) has mean (s + k) / (2s + n).
        for s in [0.5, 1.0, 3.0] {
            let (alpha, beta) = (s + 4.0, s + 5.0);
            let est = additive_estimate(4.0, 9.0, s).unwrap();
            assert!(approx_eq(est, alpha / (alpha + beta), 1e-12));
        }
    }

    #[test]
    fn additive_estimate_toy_values() {
        assert!(approx_eq(additive_estimate(1.0, 3.0, 1.0).unwrap(), 0.4, 1e-12));
        assert!(approx_eq(additive_estimate(2.0, 3.0, 1.0).unwrap(), 0.6, 1e-12));
        assert!(approx_eq(
            additive_estimate(1.0, 1.0, 1.0).unwrap(),
            2.0 / 3.0,
            1e-12
        ));
    }

    #[test]
    fn additive_estimate_zero_smoothing_is_mle() {
        assert_eq!(additive_estimate(0.0, 4.0, 0.0), Some(0.0));
        assert_eq!(additive_estimate(4.0, 4.0, 0.0), Some(1.0));
    }

    #[test]
    fn additive_estimate_rejects_invalid() {
        assert!(additive_estimate(0.0, 0.0, 0.0).is_none());
        assert!(additive_estimate(2.0, 1.0, 1.0).is_none());
        assert!(additive_estimate(1.0, 2.0, -1.0).is_none());
        assert!(additive_estimate(1.0, 2.0, f64::INFINITY).is_none());
        assert!(additive_estimate(f64::NAN, 2.0, 1.0).is_none());
    }

    #[test]
    fn empty_class_with_smoothing_is_one_half() {
        assert_eq!(additive_estimate(0.0, 0.0, 1.0), Some(0.5));
    }

    #[test]
    fn outcome_prob_complements() {
        assert!(approx_eq(outcome_prob(0.4, true), 0.4, 1e-12));
        assert!(approx_eq(outcome_prob(0.4, false), 0.6, 1e-12));
    }
}
