//! Exponential Moving Average (EMA).
//!
//! Non-adjusted recursive form: EMA[0] = x[0],
//! EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Output length always equals input length; a one-element input is its own
//! EMA for every period.

/// Compute the EMA of a numeric sequence for an arbitrary smoothing period.
///
/// The input must already be fully numeric — callers filter missing
/// observations out before smoothing, this function never interpolates.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");

    let mut prev = match values.first() {
        Some(&first) => first,
        None => return Vec::new(),
    };

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    out.push(prev);

    for &value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }

    out
}
