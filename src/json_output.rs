//! JSON output format for report values

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;
use crate::report::{ReportValues, SectionOutcome};
use crate::stats::{effect_size_label, GroupComparison, LinearFit};

/// Juvenile captures in one calendar year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAnnualCount {
    pub year: i32,
    pub captures: usize,
}

/// Distribution of the annual capture counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonCountSummary {
    pub mean: f64,
    pub median: f64,
    pub min: usize,
    pub max: usize,
}

/// Weight summary for one sex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSexSummary {
    pub sex: String,
    pub n: usize,
    pub mean_weight_g: f64,
    pub median_weight_g: f64,
    /// Sample standard deviation (absent for a single capture)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev_g: Option<f64>,
}

/// Welch's t-test of female against male juvenile weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonComparison {
    pub n_female: usize,
    pub n_male: usize,
    pub mean_female_g: f64,
    pub mean_male_g: f64,
    /// Female mean minus male mean
    pub mean_difference_g: f64,
    /// Difference relative to the male mean, in percent
    pub percent_difference: f64,
    pub t_statistic: f64,
    pub df: f64,
    pub p_value: f64,
    pub cohens_d: f64,
    pub effect_size: String,
}

/// Least-squares fit of hind foot length on body weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRegression {
    pub n: usize,
    pub intercept_mm: f64,
    pub slope_mm_per_g: f64,
    pub r_squared: f64,
    pub f_statistic: f64,
    pub df_residual: usize,
    pub p_value: f64,
    pub pearson_r: f64,
    pub pearson_p: f64,
}

/// An analysis section that may have been skipped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSection<T> {
    pub computed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<T>,
}

impl<T> JsonSection<T> {
    fn computed(values: T) -> Self {
        Self {
            computed: true,
            reason: None,
            values: Some(values),
        }
    }

    fn skipped(reason: &str) -> Self {
        Self {
            computed: false,
            reason: Some(reason.to_string()),
            values: None,
        }
    }
}

/// Dataset totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub total_observations: usize,
    pub juvenile_captures: usize,
    pub first_year: i32,
    pub last_year: i32,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Significance level the narrative formats use
    pub alpha: f64,
    /// Dataset totals
    pub summary: JsonSummary,
    /// Juvenile captures per year, ascending
    pub annual_counts: Vec<JsonAnnualCount>,
    /// Distribution of the annual counts
    pub count_summary: JsonCountSummary,
    /// Weight summaries per sex
    pub weight_by_sex: Vec<JsonSexSummary>,
    /// Female vs male weight comparison
    pub weight_comparison: JsonSection<JsonComparison>,
    /// Weight vs hind foot regression
    pub weight_hindfoot_fit: JsonSection<JsonRegression>,
}

impl JsonReport {
    /// Build the JSON structure from computed report values
    pub fn new(values: &ReportValues, config: &ReportConfig) -> Self {
        let (first_year, last_year) = values.year_span();

        let annual_counts = values
            .annual_counts
            .iter()
            .map(|c| JsonAnnualCount {
                year: c.year,
                captures: c.count,
            })
            .collect();

        let weight_by_sex = values
            .sex_summaries
            .iter()
            .map(|s| JsonSexSummary {
                sex: s.sex.label().to_string(),
                n: s.n,
                mean_weight_g: s.mean,
                median_weight_g: s.median,
                std_dev_g: s.std_dev,
            })
            .collect();

        let weight_comparison = match &values.weight_comparison {
            SectionOutcome::Computed(c) => JsonSection::computed(comparison_values(c)),
            SectionOutcome::Skipped { reason } => JsonSection::skipped(reason),
        };

        let weight_hindfoot_fit = match &values.weight_hindfoot {
            SectionOutcome::Computed(fit) => JsonSection::computed(regression_values(fit)),
            SectionOutcome::Skipped { reason } => JsonSection::skipped(reason),
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "lepus-report-v1".to_string(),
            alpha: config.alpha,
            summary: JsonSummary {
                total_observations: values.total_observations,
                juvenile_captures: values.juvenile_count,
                first_year,
                last_year,
            },
            annual_counts,
            count_summary: JsonCountSummary {
                mean: values.count_summary.mean,
                median: values.count_summary.median,
                min: values.count_summary.min,
                max: values.count_summary.max,
            },
            weight_by_sex,
            weight_comparison,
            weight_hindfoot_fit,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn comparison_values(c: &GroupComparison) -> JsonComparison {
    JsonComparison {
        n_female: c.n_a,
        n_male: c.n_b,
        mean_female_g: c.mean_a,
        mean_male_g: c.mean_b,
        mean_difference_g: c.mean_difference,
        percent_difference: c.percent_difference,
        t_statistic: c.t_statistic,
        df: c.df,
        p_value: c.p_value,
        cohens_d: c.cohens_d,
        effect_size: effect_size_label(c.cohens_d).to_string(),
    }
}

fn regression_values(fit: &LinearFit) -> JsonRegression {
    JsonRegression {
        n: fit.n,
        intercept_mm: fit.intercept,
        slope_mm_per_g: fit.slope,
        r_squared: fit.r_squared,
        f_statistic: fit.f_statistic,
        df_residual: fit.df_residual,
        p_value: fit.p_value,
        pearson_r: fit.pearson_r,
        pearson_p: fit.pearson_p,
    }
}

/// Render the full report as pretty-printed JSON
pub fn render(values: &ReportValues, config: &ReportConfig) -> anyhow::Result<String> {
    JsonReport::new(values, config).to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{Juvenile, Sex, Site};
    use chrono::NaiveDate;

    fn juvenile(year: i32, sex: Sex, weight: f64, hindfoot: f64) -> Juvenile {
        Juvenile {
            date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            year,
            site: Site::Riparian,
            sex,
            weight: Some(weight),
            hindfoot: Some(hindfoot),
        }
    }

    fn sample_values() -> ReportValues {
        let juveniles = vec![
            juvenile(1999, Sex::Female, 700.0, 130.0),
            juvenile(1999, Sex::Female, 720.0, 131.0),
            juvenile(1999, Sex::Male, 730.0, 133.0),
            juvenile(2000, Sex::Male, 745.0, 136.0),
        ];
        ReportValues::build(&[], &juveniles).unwrap()
    }

    #[test]
    fn test_report_structure() {
        let report = JsonReport::new(&sample_values(), &ReportConfig::default());
        assert_eq!(report.format, "lepus-report-v1");
        assert_eq!(report.summary.juvenile_captures, 4);
        assert_eq!(report.summary.first_year, 1999);
        assert_eq!(report.summary.last_year, 2000);
        assert_eq!(report.annual_counts.len(), 2);
        assert_eq!(report.weight_by_sex.len(), 2);
        assert!(report.weight_comparison.computed);
        assert!(report.weight_hindfoot_fit.computed);
    }

    #[test]
    fn test_json_serialization() {
        let json = render(&sample_values(), &ReportConfig::default()).unwrap();
        assert!(json.contains("\"format\": \"lepus-report-v1\""));
        assert!(json.contains("\"year\": 1999"));
        assert!(json.contains("\"captures\": 3"));
        assert!(json.contains("\"sex\": \"Female\""));
        assert!(json.contains("\"t_statistic\""));
        assert!(json.contains("\"pearson_r\""));
    }

    #[test]
    fn test_skipped_section_omits_values() {
        let juveniles = vec![
            juvenile(1999, Sex::Female, 700.0, 130.0),
            juvenile(1999, Sex::Male, 730.0, 133.0),
            juvenile(2000, Sex::Male, 745.0, 136.0),
        ];
        let values = ReportValues::build(&[], &juveniles).unwrap();
        let json = render(&values, &ReportConfig::default()).unwrap();

        assert!(json.contains("\"computed\": false"));
        assert!(json.contains("\"reason\""));
        assert!(!json.contains("\"t_statistic\""));
    }

    #[test]
    fn test_single_capture_omits_std_dev() {
        let summary = JsonSexSummary {
            sex: "Female".to_string(),
            n: 1,
            mean_weight_g: 700.0,
            median_weight_g: 700.0,
            std_dev_g: None,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("std_dev_g"));
    }

    #[test]
    fn test_alpha_recorded() {
        let config = ReportConfig::with_alpha(0.01);
        let report = JsonReport::new(&sample_values(), &config);
        assert!((report.alpha - 0.01).abs() < 1e-12);
    }
}
