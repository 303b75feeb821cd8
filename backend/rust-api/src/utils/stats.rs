//! Numeric primitives shared by the analytics engine.
//!
//! Every helper is total: empty input yields `0.0` (or `None` for `median`),
//! never `NaN` and never a panic.

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

/// Sample variance (divides by `n - 1`); 0 when `n <= 1`.
pub fn variance(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n <= 1 {
        return 0.0;
    }
    let m = mean(xs);
    xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / (n as f64 - 1.0)
}

pub fn stdev(xs: &[f64]) -> f64 {
    variance(xs).sqrt()
}

/// Median after dropping non-finite values; averages the two middle
/// elements for even-length input. `None` if nothing survives the filter.
pub fn median(xs: &[f64]) -> Option<f64> {
    let mut values: Vec<f64> = xs.iter().copied().filter(|x| x.is_finite()).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        Some(values[n / 2])
    } else {
        Some((values[n / 2 - 1] + values[n / 2]) / 2.0)
    }
}

/// Linear-interpolated quantile: `pos = (n - 1) * q`, interpolating between
/// the two neighbouring order statistics. Returns 0 for empty input.
pub fn quantile(xs: &[f64], q: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mut values = xs.to_vec();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pos = (values.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(values.len() - 1);
    let frac = pos - lo as f64;
    values[lo] + (values[hi] - values[lo]) * frac
}

/// Percentage of `part` in `total`, rounded to 1 decimal; 0 when `total` is 0.
pub fn pct_num(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        round1(part * 100.0 / total)
    }
}

/// Round half-up to 1 decimal place.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Round half-up to 2 decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
