//! Numeric primitives shared by the profiler, projector and synthesizer.
//!
//! Functions take only the non-missing values to consider. A statistic that
//! cannot be evaluated returns a [`StatError`] instead of a NaN, and the
//! caller decides whether to omit it.

use thiserror::Error;

/// Why a single statistic could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatError {
    #[error("no values")]
    Empty,
    #[error("needs at least {needed} values, found {found}")]
    InsufficientData { needed: usize, found: usize },
    #[error("zero variance")]
    ZeroVariance,
    #[error("result is not finite")]
    NonFinite,
}

pub type StatResult<T> = std::result::Result<T, StatError>;

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn mean(values: &[f64]) -> StatResult<f64> {
    if values.is_empty() {
        return Err(StatError::Empty);
    }
    finite(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(values: &[f64]) -> StatResult<f64> {
    let n = values.len();
    if n < 2 {
        return Err(StatError::InsufficientData { needed: 2, found: n });
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    finite((ss / (n - 1) as f64).sqrt())
}

/// Quantile with linear interpolation between the two nearest ranks.
/// `sorted` must be in ascending order.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> StatResult<f64> {
    if sorted.is_empty() {
        return Err(StatError::Empty);
    }
    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    finite(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

pub fn median(values: &[f64]) -> StatResult<f64> {
    quantile_sorted(&sorted_copy(values), 0.5)
}

/// Adjusted Fisher-Pearson sample skewness. Constant data has skew 0.
pub fn skewness(values: &[f64]) -> StatResult<f64> {
    let n = values.len();
    if n < 3 {
        return Err(StatError::InsufficientData { needed: 3, found: n });
    }
    let m = mean(values)?;
    let (m2, m3) = values.iter().fold((0.0, 0.0), |(m2, m3), v| {
        let d = v - m;
        (m2 + d * d, m3 + d * d * d)
    });
    if m2 == 0.0 {
        return Ok(0.0);
    }
    let n = n as f64;
    finite((n * (n - 1.0).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5)))
}

/// Pearson correlation over rows where both sides are present.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> StatResult<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    let n = pairs.len();
    if n < 2 {
        return Err(StatError::InsufficientData { needed: 2, found: n });
    }

    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(StatError::ZeroVariance);
    }

    finite((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Descriptive statistics for one numeric series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Describe {
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Check if a value lies outside the `multiplier * IQR` fences.
    pub fn is_outlier_iqr(&self, value: f64, multiplier: f64) -> bool {
        let iqr = self.iqr();
        value < self.q1 - multiplier * iqr || value > self.q3 + multiplier * iqr
    }
}

/// Compute descriptive statistics; needs at least two values for the
/// sample standard deviation.
pub fn describe(values: &[f64]) -> StatResult<Describe> {
    let sorted = sorted_copy(values);
    Ok(Describe {
        count: values.len(),
        mean: mean(values)?,
        std: std_dev(values)?,
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        max: sorted[sorted.len() - 1],
    })
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn finite(value: f64) -> StatResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatError::NonFinite)
    }
}
