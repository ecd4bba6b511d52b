//! Report model: every analysis computed once, full precision
//!
//! `ReportValues::build` runs the aggregations and statistical tests over the
//! juvenile set and records each fallible analysis as a `SectionOutcome`. An
//! underpowered section (say, one weighed female) skips only itself; the rest
//! of the report still renders. Rounding happens in the renderers, never here.

use std::io;
use std::path::{Path, PathBuf};

use svg::Document;
use tracing::warn;

use crate::aggregate::{
    count_by_year, summarize_by_sex, weight_hindfoot_pairs, weights_of_sex, CountSummary,
    SexSummary, YearCount,
};
use crate::chart::{self, ChartTheme};
use crate::error::{ReportError, Result};
use crate::observation::{Juvenile, Observation, Sex};
use crate::stats::{compare_groups, fit, GroupComparison, LinearFit};

/// Result of one report section: either its computed values or the reason it
/// was left out
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome<T> {
    Computed(T),
    Skipped { reason: String },
}

impl<T> SectionOutcome<T> {
    pub fn computed(&self) -> Option<&T> {
        match self {
            SectionOutcome::Computed(value) => Some(value),
            SectionOutcome::Skipped { .. } => None,
        }
    }

    pub fn skip_reason(&self) -> Option<&str> {
        match self {
            SectionOutcome::Computed(_) => None,
            SectionOutcome::Skipped { reason } => Some(reason),
        }
    }
}

/// All numbers the renderers draw from
#[derive(Debug, Clone)]
pub struct ReportValues {
    pub total_observations: usize,
    pub juvenile_count: usize,
    pub annual_counts: Vec<YearCount>,
    pub count_summary: CountSummary,
    /// Female row first, absent sexes omitted
    pub sex_summaries: Vec<SexSummary>,
    /// Welch comparison of female against male juvenile weight
    pub weight_comparison: SectionOutcome<GroupComparison>,
    /// OLS of hind foot length on weight
    pub weight_hindfoot: SectionOutcome<LinearFit>,
    /// The (weight, hindfoot) pairs behind the regression, for the scatter
    pub regression_pairs: Vec<(f64, f64)>,
}

impl ReportValues {
    /// Compute every report section from the capture table and its juvenile
    /// subset.
    ///
    /// The comparison passes (female, male), so male is the reference group
    /// for the percent difference. The regression uses all juveniles with
    /// both measurements, whatever their sex.
    ///
    /// # Errors
    /// `InsufficientData` when no juvenile captures exist at all; individual
    /// underpowered analyses become `SectionOutcome::Skipped` instead.
    pub fn build(observations: &[Observation], juveniles: &[Juvenile]) -> Result<Self> {
        if juveniles.is_empty() {
            return Err(ReportError::InsufficientData {
                analysis: "juvenile capture report",
                required: 1,
                actual: 0,
            });
        }

        let annual_counts = count_by_year(juveniles);
        let count_summary = CountSummary::from_counts(&annual_counts)?;
        let sex_summaries = summarize_by_sex(juveniles);

        let female_weights = weights_of_sex(juveniles, Sex::Female);
        let male_weights = weights_of_sex(juveniles, Sex::Male);
        let weight_comparison = section(
            "weight comparison",
            compare_groups(&female_weights, &male_weights),
        )?;

        let regression_pairs = weight_hindfoot_pairs(juveniles);
        let weight_hindfoot = section("weight/hindfoot regression", fit(&regression_pairs))?;

        Ok(ReportValues {
            total_observations: observations.len(),
            juvenile_count: juveniles.len(),
            annual_counts,
            count_summary,
            sex_summaries,
            weight_comparison,
            weight_hindfoot,
            regression_pairs,
        })
    }

    /// First and last trapping years of the juvenile set
    pub fn year_span(&self) -> (i32, i32) {
        let first = self.annual_counts.first().map_or(0, |c| c.year);
        let last = self.annual_counts.last().map_or(0, |c| c.year);
        (first, last)
    }
}

/// Underpowered analyses degrade to a skipped section; anything else is a
/// real failure and propagates
fn section<T>(name: &'static str, result: Result<T>) -> Result<SectionOutcome<T>> {
    match result {
        Ok(value) => Ok(SectionOutcome::Computed(value)),
        Err(err @ ReportError::InsufficientData { .. }) => {
            warn!(section = name, "skipping section: {err}");
            Ok(SectionOutcome::Skipped {
                reason: err.to_string(),
            })
        }
        Err(other) => Err(other),
    }
}

/// File names the figures are saved under, in render order
pub const CHART_FILES: [&str; 3] = [
    "annual_counts.svg",
    "weight_by_sex_site.svg",
    "weight_vs_hindfoot.svg",
];

/// The three report figures as SVG documents
pub struct ReportCharts {
    pub annual_counts: Document,
    pub weight_by_sex_site: Document,
    pub weight_vs_hindfoot: Document,
}

impl ReportCharts {
    pub fn build(juveniles: &[Juvenile], values: &ReportValues, theme: &ChartTheme) -> Self {
        ReportCharts {
            annual_counts: chart::annual_counts(&values.annual_counts, theme),
            weight_by_sex_site: chart::weight_by_sex_site(juveniles, theme),
            weight_vs_hindfoot: chart::weight_vs_hindfoot(
                &values.regression_pairs,
                values.weight_hindfoot.computed(),
                theme,
            ),
        }
    }

    /// Write the figures under `dir` (created if absent), returning the
    /// paths in [`CHART_FILES`] order.
    pub fn save_to(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let documents = [
            &self.annual_counts,
            &self.weight_by_sex_site,
            &self.weight_vs_hindfoot,
        ];
        let mut paths = Vec::with_capacity(documents.len());
        for (name, document) in CHART_FILES.iter().zip(documents) {
            let path = dir.join(name);
            svg::save(&path, document)?;
            paths.push(path);
        }
        Ok(paths)
    }
}

/// Two-decimal rendering used for coefficients, grams, and percentages
pub fn fmt2(value: f64) -> String {
    format!("{value:.2}")
}

/// p-values print with four decimals and a floor below display precision
pub fn fmt_p(p: f64) -> String {
    if p < 0.0001 {
        "< 0.0001".to_string()
    } else {
        format!("{p:.4}")
    }
}

/// Degrees of freedom: integral values print bare, fractional ones with one
/// decimal
pub fn fmt_df(df: f64) -> String {
    if (df - df.round()).abs() < 1e-9 {
        format!("{}", df.round() as i64)
    } else {
        format!("{df:.1}")
    }
}
