//! Aggregations over the juvenile capture set
//!
//! This layer owns missing-value handling: the selectors here drop absent
//! measurements (and, where relevant, unknown sex) before anything reaches
//! the statistics functions, which expect clean samples.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::observation::{Juvenile, Sex};
use crate::stats::describe;

/// Juvenile captures trapped in one calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// Distribution of the annual counts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountSummary {
    pub mean: f64,
    pub median: f64,
    pub min: usize,
    pub max: usize,
}

impl CountSummary {
    /// # Errors
    /// `InsufficientData` when no years are present.
    pub fn from_counts(counts: &[YearCount]) -> Result<Self> {
        let values: Vec<f64> = counts.iter().map(|c| c.count as f64).collect();
        Ok(CountSummary {
            mean: describe::mean(&values)?,
            median: describe::median(&values)?,
            min: counts.iter().map(|c| c.count).min().unwrap_or(0),
            max: counts.iter().map(|c| c.count).max().unwrap_or(0),
        })
    }
}

/// Weight distribution of one sex within the juvenile set.
///
/// Built from non-missing weights only; `n` is the number of weighed
/// captures, not the number trapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SexSummary {
    pub sex: Sex,
    pub n: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; absent when only one capture was weighed
    pub std_dev: Option<f64>,
}

/// Count juvenile captures per trapping year, ascending, one entry per year
pub fn count_by_year(juveniles: &[Juvenile]) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for juvenile in juveniles {
        *by_year.entry(juvenile.year).or_insert(0) += 1;
    }
    by_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Summarize juvenile weights for each known sex, female row first.
///
/// Unknown-sex captures and missing weights are excluded; a sex with no
/// weighed captures is omitted rather than reported as zeros.
pub fn summarize_by_sex(juveniles: &[Juvenile]) -> Vec<SexSummary> {
    [Sex::Female, Sex::Male]
        .into_iter()
        .filter_map(|sex| {
            let weights = weights_of_sex(juveniles, sex);
            if weights.is_empty() {
                return None;
            }
            Some(SexSummary {
                sex,
                n: weights.len(),
                // a non-empty sample cannot fail these
                mean: describe::mean(&weights).ok()?,
                median: describe::median(&weights).ok()?,
                std_dev: describe::std_dev(&weights).ok(),
            })
        })
        .collect()
}

/// Non-missing weights of one sex, in capture order
pub fn weights_of_sex(juveniles: &[Juvenile], sex: Sex) -> Vec<f64> {
    juveniles
        .iter()
        .filter(|j| j.sex == sex)
        .filter_map(|j| j.weight)
        .collect()
}

/// (weight, hindfoot) pairs where both measurements are present, any sex
pub fn weight_hindfoot_pairs(juveniles: &[Juvenile]) -> Vec<(f64, f64)> {
    juveniles
        .iter()
        .filter_map(|j| Some((j.weight?, j.hindfoot?)))
        .collect()
}
