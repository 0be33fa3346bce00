//! Numerically stable primitives for log-domain class scoring.

/// Stable log(sum(exp(values))).
///
/// Returns NEG_INFINITY for empty input or all -inf inputs.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NEG_INFINITY;
    }
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let mut sum = 0.0;
    for v in values {
        sum += (*v - max).exp();
    }
    max + sum.ln()
}

/// Normalize unnormalized log scores so that `exp` of the result sums to 1.
///
/// Returns None when the normalizer is not finite: empty input, every score
/// is -inf, or a score is NaN or +inf.
pub fn normalize_log_probs(values: &[f64]) -> Option<Vec<f64>> {
    let total = log_sum_exp(values);
    if !total.is_finite() {
        return None;
    }
    Some(values.iter().map(|v| v - total).collect())
}

/// Convert unnormalized log scores into probabilities summing to 1.
///
/// Same failure cases as [`normalize_log_probs`].
pub fn log_scores_to_probs(values: &[f64]) -> Option<Vec<f64>> {
    normalize_log_probs(values).map(|logs| logs.into_iter().map(f64::exp).collect())
}

/// Index of the largest value, first one wins on ties.
///
/// NaN entries are never selected. Returns None for empty or all-NaN input.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
