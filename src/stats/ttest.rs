//! Welch's unequal-variance t-test with Cohen's d effect size

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::describe;
use crate::error::{ReportError, Result};

/// Both samples need at least this many values for a variance estimate
const MIN_SAMPLE: usize = 2;

/// Two-sample comparison: location difference, Welch test, and effect size.
///
/// Directional quantities (mean difference, t, d) are first sample minus
/// second; the percent difference is relative to the second sample's mean, so
/// the second sample acts as the reference group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupComparison {
    pub n_a: usize,
    pub n_b: usize,
    pub mean_a: f64,
    pub mean_b: f64,
    /// mean_a - mean_b
    pub mean_difference: f64,
    /// 100 * (mean_a - mean_b) / mean_b
    pub percent_difference: f64,
    pub t_statistic: f64,
    /// Welch-Satterthwaite degrees of freedom (fractional in general)
    pub df: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Pooled-standard-deviation effect size
    pub cohens_d: f64,
}

/// Compare two pre-filtered samples with Welch's t-test.
///
/// No equal-variance assumption: the test statistic uses per-sample standard
/// errors and the Welch-Satterthwaite approximation for degrees of freedom.
/// Samples with zero pooled spread resolve without error: identical means
/// give t = 0, p = 1; separated means give an infinite t and p = 0.
///
/// # Errors
/// `InsufficientData` if either sample has fewer than 2 values.
pub fn compare_groups(a: &[f64], b: &[f64]) -> Result<GroupComparison> {
    if a.len() < MIN_SAMPLE || b.len() < MIN_SAMPLE {
        return Err(ReportError::InsufficientData {
            analysis: "Welch t-test",
            required: MIN_SAMPLE,
            actual: a.len().min(b.len()),
        });
    }

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let mean_a = describe::mean(a)?;
    let mean_b = describe::mean(b)?;
    let var_a = describe::sample_variance(a)?;
    let var_b = describe::sample_variance(b)?;

    // Squared standard errors of each mean
    let se_a = var_a / n_a;
    let se_b = var_b / n_b;
    let se_squared = se_a + se_b;

    let (t_statistic, df, p_value) = if se_squared > 0.0 {
        let t = (mean_a - mean_b) / se_squared.sqrt();
        let df = se_squared * se_squared
            / (se_a * se_a / (n_a - 1.0) + se_b * se_b / (n_b - 1.0));
        (t, df, student_t_two_sided(t, df))
    } else if mean_a == mean_b {
        (0.0, n_a + n_b - 2.0, 1.0)
    } else {
        let t = signed_infinity(mean_a - mean_b);
        (t, n_a + n_b - 2.0, 0.0)
    };

    Ok(GroupComparison {
        n_a: a.len(),
        n_b: b.len(),
        mean_a,
        mean_b,
        mean_difference: mean_a - mean_b,
        percent_difference: 100.0 * (mean_a - mean_b) / mean_b,
        t_statistic,
        df,
        p_value,
        cohens_d: pooled_effect_size(mean_a, mean_b, var_a, var_b, n_a, n_b),
    })
}

/// Conventional magnitude label for Cohen's d
pub fn effect_size_label(d: f64) -> &'static str {
    let magnitude = d.abs();
    if magnitude < 0.2 {
        "negligible"
    } else if magnitude < 0.5 {
        "small"
    } else if magnitude < 0.8 {
        "medium"
    } else {
        "large"
    }
}

/// Cohen's d with the pooled standard deviation. Zero pooled spread follows
/// the same convention as the test statistic: 0 for identical means, signed
/// infinity otherwise.
fn pooled_effect_size(
    mean_a: f64,
    mean_b: f64,
    var_a: f64,
    var_b: f64,
    n_a: f64,
    n_b: f64,
) -> f64 {
    let pooled_var = ((n_a - 1.0) * var_a + (n_b - 1.0) * var_b) / (n_a + n_b - 2.0);
    if pooled_var > 0.0 {
        (mean_a - mean_b) / pooled_var.sqrt()
    } else if mean_a == mean_b {
        0.0
    } else {
        signed_infinity(mean_a - mean_b)
    }
}

fn signed_infinity(difference: f64) -> f64 {
    if difference > 0.0 {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

/// Two-sided p-value from Student's t distribution. Degrees of freedom are
/// positive at every call site; a failed construction falls back to p = 1.
pub(super) fn student_t_two_sided(t: f64, df: f64) -> f64 {
    if t.is_infinite() {
        return 0.0;
    }
    StudentsT::new(0.0, 1.0, df)
        .map(|dist| (2.0 * dist.cdf(-t.abs())).clamp(0.0, 1.0))
        .unwrap_or(1.0)
}
