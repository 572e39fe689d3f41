//! Descriptive statistics over f32 samples.
//!
//! Reductions route through trueno SIMD vectors where the operation maps
//! onto one; order statistics sort a copy. Empty input yields `None`
//! rather than NaN so callers decide the fallback.

use trueno::Vector;

/// Number of samples.
#[must_use]
pub fn count(values: &[f32]) -> usize {
    values.len()
}

/// Sum of the samples.
#[must_use]
pub fn sum(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let fallback: f32 = values.iter().sum();
    Vector::from_vec(values.to_vec()).sum().unwrap_or(fallback)
}

/// Arithmetic mean, `None` on empty input.
#[must_use]
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let fallback = sum(values) / values.len() as f32;
    Some(Vector::from_vec(values.to_vec()).mean().unwrap_or(fallback))
}

/// Minimum value, `None` on empty input.
#[must_use]
pub fn minimum(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let fallback = values.iter().copied().fold(f32::INFINITY, f32::min);
    Some(Vector::from_vec(values.to_vec()).min().unwrap_or(fallback))
}

/// Maximum value, `None` on empty input.
#[must_use]
pub fn maximum(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let fallback = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    Some(Vector::from_vec(values.to_vec()).max().unwrap_or(fallback))
}

/// Population variance, `None` on empty input.
#[must_use]
pub fn variance(values: &[f32]) -> Option<f32> {
    let m = mean(values)?;
    let sq: Vec<f32> = values.iter().map(|v| (v - m) * (v - m)).collect();
    mean(&sq)
}

/// Population standard deviation, `None` on empty input.
#[must_use]
pub fn stdev(values: &[f32]) -> Option<f32> {
    variance(values).map(f32::sqrt)
}

/// Median, `None` on empty input.
#[must_use]
pub fn median(values: &[f32]) -> Option<f32> {
    quantile(values, 0.5)
}

/// Quantile with linear interpolation between closest ranks.
///
/// `q` is clamped to [0, 1]. Returns `None` on empty input.
#[must_use]
pub fn quantile(values: &[f32], q: f32) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(percentile_sorted(&sorted, q.clamp(0.0, 1.0)))
}

/// Quantile of already-sorted data with linear interpolation.
pub(crate) fn percentile_sorted(sorted: &[f32], q: f32) -> f32 {
    let idx = q * (sorted.len() - 1) as f32;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f32;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}

/// Interquartile range (Q3 - Q1), `None` on empty input.
#[must_use]
pub fn iqr(values: &[f32]) -> Option<f32> {
    Some(quantile(values, 0.75)? - quantile(values, 0.25)?)
}

/// Pearson correlation coefficient of paired samples.
///
/// `None` when lengths differ, fewer than two pairs, or either side is
/// constant.
#[must_use]
pub fn correlation(x: &[f32], y: &[f32]) -> Option<f32> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    let dx: Vec<f32> = x.iter().map(|v| v - mx).collect();
    let dy: Vec<f32> = y.iter().map(|v| v - my).collect();

    let cov = match Vector::from_vec(dx.clone()).mul(&Vector::from_vec(dy.clone())) {
        Ok(prod) => sum(prod.as_slice()),
        Err(_) => dx.iter().zip(&dy).map(|(a, b)| a * b).sum(),
    };
    let sx = sum(&dx.iter().map(|v| v * v).collect::<Vec<_>>()).sqrt();
    let sy = sum(&dy.iter().map(|v| v * v).collect::<Vec<_>>()).sqrt();
    if sx == 0.0 || sy == 0.0 {
        return None;
    }
    Some(cov / (sx * sy))
}

/// Ordinary least-squares fit `y = slope * x + intercept`.
///
/// `None` when lengths differ, fewer than two pairs, or x is constant.
#[must_use]
pub fn linear_fit(x: &[f32], y: &[f32]) -> Option<(f32, f32)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        sxx += (xi - mx) * (xi - mx);
        sxy += (xi - mx) * (yi - my);
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}
