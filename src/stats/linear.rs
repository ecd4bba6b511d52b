//! Ordinary least squares for a single predictor

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use super::ttest::student_t_two_sided;
use crate::error::{ReportError, Result};

/// Three points is the smallest sample with a residual degree of freedom
const MIN_PAIRS: usize = 3;

/// Fitted line `y = intercept + slope * x` with its significance tests.
///
/// The regression F test has (1, n - 2) degrees of freedom; with a single
/// predictor it is equivalent to the two-sided test on Pearson's r, so
/// `p_value` and `pearson_p` agree up to floating-point error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub n: usize,
    pub intercept: f64,
    pub slope: f64,
    pub r_squared: f64,
    pub f_statistic: f64,
    /// Residual degrees of freedom, n - 2
    pub df_residual: usize,
    /// p-value of the F test against the intercept-only model
    pub p_value: f64,
    pub pearson_r: f64,
    /// Two-sided p-value for Pearson's r
    pub pearson_p: f64,
}

impl LinearFit {
    /// Fitted response at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Fit a least-squares line through pre-filtered (x, y) pairs.
///
/// Uses centered sums, so predictor and response magnitudes do not have to
/// be comparable. A perfect fit (zero residual sum of squares) reports
/// R-squared = 1 with an infinite F statistic and p = 0. A constant response
/// carries no linear signal and reports R-squared = 0, F = 0, p = 1.
///
/// # Errors
/// `InsufficientData` for fewer than 3 pairs, or when every predictor value
/// is identical (no slope is estimable).
pub fn fit(pairs: &[(f64, f64)]) -> Result<LinearFit> {
    if pairs.len() < MIN_PAIRS {
        return Err(ReportError::InsufficientData {
            analysis: "linear regression",
            required: MIN_PAIRS,
            actual: pairs.len(),
        });
    }

    // When every x is equal, rounding in the mean can leave the centered sum
    // of squares a few ulps above zero, so degeneracy is checked on the raw
    // values rather than on sxx.
    if pairs.iter().all(|&(x, _)| x == pairs[0].0) {
        return Err(ReportError::InsufficientData {
            analysis: "linear regression: distinct predictor values",
            required: 2,
            actual: 1,
        });
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    // distinct but nearly equal predictors can still underflow sxx to zero
    if sxx == 0.0 {
        return Err(ReportError::InsufficientData {
            analysis: "linear regression: distinct predictor values",
            required: 2,
            actual: 1,
        });
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    let df_residual = pairs.len() - 2;

    if syy == 0.0 {
        return Ok(LinearFit {
            n: pairs.len(),
            intercept,
            slope,
            r_squared: 0.0,
            f_statistic: 0.0,
            df_residual,
            p_value: 1.0,
            pearson_r: 0.0,
            pearson_p: 1.0,
        });
    }

    let r_squared = ((sxy * sxy) / (sxx * syy)).clamp(0.0, 1.0);
    let pearson_r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let df = df_residual as f64;

    let (f_statistic, p_value) = if r_squared < 1.0 {
        let f = (r_squared / (1.0 - r_squared)) * df;
        (f, f_upper_tail(f, df))
    } else {
        (f64::INFINITY, 0.0)
    };

    let pearson_p = if pearson_r.abs() < 1.0 {
        let t = pearson_r * (df / (1.0 - pearson_r * pearson_r)).sqrt();
        student_t_two_sided(t, df)
    } else {
        0.0
    };

    Ok(LinearFit {
        n: pairs.len(),
        intercept,
        slope,
        r_squared,
        f_statistic,
        df_residual,
        p_value,
        pearson_r,
        pearson_p,
    })
}

/// Upper-tail probability of the F distribution with (1, df_residual)
/// degrees of freedom
fn f_upper_tail(f: f64, df_residual: f64) -> f64 {
    FisherSnedecor::new(1.0, df_residual)
        .map(|dist| (1.0 - dist.cdf(f)).clamp(0.0, 1.0))
        .unwrap_or(1.0)
}
