//! Property-based tests for nb-math numerical functions.
//!
//! Uses proptest to verify mathematical properties hold across many random inputs.

use nb_math::bernoulli::additive_estimate;
use nb_math::dirichlet::smoothed_log_probs;
use nb_math::{log_scores_to_probs, log_sum_exp, normalize_log_probs};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-10;

/// Helper to check approximate equality.
fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_infinite() && b.is_infinite() {
        return a.signum() == b.signum();
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

// ============================================================================
// log_sum_exp
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// log_sum_exp is commutative: order doesn't matter.
    #[test]
    fn log_sum_exp_commutative(a in -100.0..100.0f64, b in -100.0..100.0f64) {
        let ab = log_sum_exp(&[a, b]);
        let ba = log_sum_exp(&[b, a]);
        prop_assert!(approx_eq(ab, ba, TOL), "lse([{},{}])={} != lse([{},{}])={}", a, b, ab, b, a, ba);
    }

    /// log_sum_exp numerical stability: no overflow with large values.
    #[test]
    fn log_sum_exp_no_overflow(a in 500.0..700.0f64, b in 500.0..700.0f64) {
        let result = log_sum_exp(&[a, b]);
        prop_assert!(result.is_finite(), "lse([{},{}]) should be finite", a, b);
        prop_assert!(result >= a.max(b) - TOL);
    }
}

// ============================================================================
// Normalization
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Normalized log scores exponentiate to a distribution.
    #[test]
    fn normalized_scores_sum_to_one(scores in prop::collection::vec(-800.0..50.0f64, 1..12)) {
        let probs = log_scores_to_probs(&scores).expect("finite scores normalize");
        let total: f64 = probs.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum={}", total);
        for p in probs {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&p));
        }
    }

    /// Shifting every score by a constant leaves the normalized result unchanged.
    #[test]
    fn normalization_is_shift_invariant(
        scores in prop::collection::vec(-100.0..100.0f64, 1..8),
        shift in -500.0..500.0f64,
    ) {
        let base = normalize_log_probs(&scores).unwrap();
        let shifted: Vec<f64> = scores.iter().map(|s| s + shift).collect();
        let moved = normalize_log_probs(&shifted).unwrap();
        for (a, b) in base.iter().zip(&moved) {
            prop_assert!(approx_eq(*a, *b, 1e-8), "{} vs {}", a, b);
        }
    }
}

// ============================================================================
// Smoothing estimators
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Positive smoothing keeps the estimate strictly inside (0, 1).
    #[test]
    fn additive_estimate_strictly_inside(n in 0u32..500, frac in 0.0..=1.0f64, s in 0.01..10.0f64) {
        let k = (n as f64 * frac).floor();
        let p = additive_estimate(k, n as f64, s).unwrap();
        prop_assert!(p > 0.0 && p < 1.0, "p={} k={} n={} s={}", p, k, n, s);
    }

    /// Additive smoothing is the Beta(s, s) posterior mean.
    #[test]
    fn additive_estimate_is_posterior_mean(n in 0u32..500, frac in 0.0..=1.0f64, s in 0.01..10.0f64) {
        let k = (n as f64 * frac).floor();
        let (alpha, beta) = (s + k, s + n as f64 - k);
        let p = additive_estimate(k, n as f64, s).unwrap();
        prop_assert!(approx_eq(p, alpha / (alpha + beta), TOL));
    }

    /// Smoothed categorical estimates form a distribution.
    #[test]
    fn smoothed_log_probs_sum_to_one(
        counts in prop::collection::vec(0.0..1000.0f64, 1..20),
        alpha in 0.01..5.0f64,
    ) {
        let logs = smoothed_log_probs(&counts, alpha).unwrap();
        let total: f64 = logs.iter().map(|l| l.exp()).sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum={}", total);
    }
}
