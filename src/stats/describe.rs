//! Descriptive statistics over pre-filtered samples
//!
//! Every function takes a slice of already-present values (missing-value
//! filtering happens upstream) and rejects samples too small to describe.

use std::cmp::Ordering;

use crate::error::{ReportError, Result};

/// Arithmetic mean.
///
/// # Errors
/// `InsufficientData` on an empty sample.
pub fn mean(values: &[f64]) -> Result<f64> {
    require(values, "mean", 1)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; midpoint of the two central values for even-length samples.
///
/// # Errors
/// `InsufficientData` on an empty sample.
pub fn median(values: &[f64]) -> Result<f64> {
    require(values, "median", 1)?;
    let sorted = sorted_copy(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Sample variance with Bessel's correction (n - 1 denominator).
///
/// # Errors
/// `InsufficientData` for fewer than 2 values.
pub fn sample_variance(values: &[f64]) -> Result<f64> {
    require(values, "sample variance", 2)?;
    let m = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>();
    Ok(sum_sq / (values.len() - 1) as f64)
}

/// Sample standard deviation (square root of [`sample_variance`]).
///
/// # Errors
/// `InsufficientData` for fewer than 2 values.
pub fn std_dev(values: &[f64]) -> Result<f64> {
    Ok(sample_variance(values)?.sqrt())
}

/// Smallest value in the sample.
///
/// # Errors
/// `InsufficientData` on an empty sample.
pub fn min(values: &[f64]) -> Result<f64> {
    require(values, "minimum", 1)?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Largest value in the sample.
///
/// # Errors
/// `InsufficientData` on an empty sample.
pub fn max(values: &[f64]) -> Result<f64> {
    require(values, "maximum", 1)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// First quartile, median, and third quartile with linear interpolation
/// between order statistics (the convention R and NumPy default to).
///
/// # Errors
/// `InsufficientData` on an empty sample.
pub fn quartiles(values: &[f64]) -> Result<(f64, f64, f64)> {
    require(values, "quartiles", 1)?;
    let sorted = sorted_copy(values);
    Ok((
        quantile(&sorted, 0.25),
        quantile(&sorted, 0.5),
        quantile(&sorted, 0.75),
    ))
}

fn require(values: &[f64], analysis: &'static str, required: usize) -> Result<()> {
    if values.len() < required {
        return Err(ReportError::InsufficientData {
            analysis,
            required,
            actual: values.len(),
        });
    }
    Ok(())
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Interpolated quantile over an already-sorted sample, 0 <= p <= 1
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    if below == above {
        return sorted[below];
    }
    let fraction = position - below as f64;
    sorted[below] + fraction * (sorted[above] - sorted[below])
}
