//! Dirichlet-categorical smoothing for count features.
//!
//! Multinomial naive Bayes treats the per-class feature totals
//! `n = (n_1..n_K)` as draws from a categorical distribution with a
//! symmetric `Dirichlet(α)` prior. The smoothed estimate of category `i` is
//! the posterior predictive
//!
//! `θ_i = (n_i + α) / (N + K·α)`, with `N = Σ_i n_i`.

/// Log of the additive-smoothed categorical estimate for every category.
///
/// `alpha = 0` is allowed and yields `-inf` for unseen categories. Returns
/// None for empty, negative or NaN counts, negative/NaN `alpha`, or a zero
/// denominator (no counts and `alpha = 0`).
///
/// # Example
/// ```
/// use nb_math::dirichlet::smoothed_log_probs;
///
/// let logs = smoothed_log_probs(&[3.0, 1.0], 1.0).unwrap();
/// assert!((logs[0].exp() - 4.0 / 6.0).abs() < 1e-12);
/// ```
pub fn smoothed_log_probs(counts: &[f64], alpha: f64) -> Option<Vec<f64>> {
    if counts.is_empty() || alpha.is_nan() || alpha < 0.0 || alpha.is_infinite() {
        return None;
    }
    if counts.iter().any(|c| c.is_nan() || *c < 0.0 || c.is_infinite()) {
        return None;
    }
    let total: f64 = counts.iter().sum();
    let denom = total + alpha * counts.len() as f64;
    if denom <= 0.0 {
        return None;
    }
    let log_denom = denom.ln();
    Some(
        counts
            .iter()
            .map(|&n| {
                let num = n + alpha;
                if num == 0.0 {
                    f64::NEG_INFINITY
                } else {
                    num.ln() - log_denom
                }
            })
            .collect(),
    )
}
