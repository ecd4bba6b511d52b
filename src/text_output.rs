//! Plain-text report: narrative sections plus an aligned summary table

use std::fmt::Write as _;

use crate::config::ReportConfig;
use crate::report::{fmt2, fmt_df, fmt_p, ReportValues, SectionOutcome};
use crate::stats::{effect_size_label, GroupComparison, LinearFit};

/// Render the full report as plain text
pub fn render(values: &ReportValues, config: &ReportConfig) -> String {
    let mut out = String::new();

    heading(&mut out, "Juvenile snowshoe hare report", '=');
    let (first, last) = values.year_span();
    let _ = writeln!(
        out,
        "\nThe capture table holds {} records from the Bonanza Creek Experimental\n\
         Forest trapping grids, {} of them juvenile hares trapped between {} and {}.",
        values.total_observations, values.juvenile_count, first, last
    );

    heading(&mut out, "\nAnnual captures", '-');
    let _ = writeln!(
        out,
        "Juvenile captures per year ranged from {} to {} (mean {}, median {}).\n",
        values.count_summary.min,
        values.count_summary.max,
        fmt2(values.count_summary.mean),
        fmt2(values.count_summary.median),
    );
    let _ = writeln!(out, "  {:<6} {:>8}", "year", "captures");
    for count in &values.annual_counts {
        let _ = writeln!(out, "  {:<6} {:>8}", count.year, count.count);
    }

    heading(&mut out, "\nWeight by sex", '-');
    if values.sex_summaries.is_empty() {
        out.push_str("No weighed juveniles of known sex.\n");
    } else {
        let _ = writeln!(
            out,
            "  {:<8} {:>4} {:>10} {:>12} {:>8}",
            "sex", "n", "mean (g)", "median (g)", "sd (g)"
        );
        for summary in &values.sex_summaries {
            let sd = summary.std_dev.map_or_else(|| "-".to_string(), fmt2);
            let _ = writeln!(
                out,
                "  {:<8} {:>4} {:>10} {:>12} {:>8}",
                summary.sex.label(),
                summary.n,
                fmt2(summary.mean),
                fmt2(summary.median),
                sd
            );
        }
    }
    out.push('\n');
    match &values.weight_comparison {
        SectionOutcome::Computed(comparison) => {
            out.push_str(&comparison_narrative(comparison, config.alpha));
        }
        SectionOutcome::Skipped { reason } => {
            let _ = writeln!(out, "Comparison skipped: {reason}.");
        }
    }

    heading(&mut out, "\nWeight and hind foot length", '-');
    match &values.weight_hindfoot {
        SectionOutcome::Computed(fit) => out.push_str(&regression_narrative(fit)),
        SectionOutcome::Skipped { reason } => {
            let _ = writeln!(out, "Regression skipped: {reason}.");
        }
    }

    out
}

fn heading(out: &mut String, title: &str, underline: char) {
    let _ = writeln!(out, "{title}");
    let width = title.trim_start_matches('\n').chars().count();
    let _ = writeln!(out, "{}", underline.to_string().repeat(width));
}

fn comparison_narrative(comparison: &GroupComparison, alpha: f64) -> String {
    let direction = if comparison.mean_difference < 0.0 {
        "less"
    } else {
        "more"
    };
    let verdict = if comparison.p_value < alpha {
        "statistically significant"
    } else {
        "not statistically significant"
    };

    format!(
        "On average, juvenile females weighed {} g {} than juvenile males\n\
         ({} g vs {} g), a difference of {}% relative to the male mean.\n\
         Welch's t-test: t({}) = {}, p = {}; the difference is {} at\n\
         alpha = {}. Cohen's d = {} ({} effect).\n",
        fmt2(comparison.mean_difference.abs()),
        direction,
        fmt2(comparison.mean_a),
        fmt2(comparison.mean_b),
        fmt2(comparison.percent_difference.abs()),
        fmt_df(comparison.df),
        fmt2(comparison.t_statistic),
        fmt_p(comparison.p_value),
        verdict,
        alpha,
        fmt2(comparison.cohens_d),
        effect_size_label(comparison.cohens_d),
    )
}

fn regression_narrative(fit: &LinearFit) -> String {
    format!(
        "Across all weighed juveniles (n = {}), hind foot length increases by\n\
         {} mm per gram of body mass: hindfoot = {} + {} x weight.\n\
         The linear model explains {}% of the variance (R^2 = {};\n\
         F(1, {}) = {}, p = {}). Pearson's r = {} (p = {}).\n",
        fit.n,
        fmt2(fit.slope),
        fmt2(fit.intercept),
        fmt2(fit.slope),
        fmt2(fit.r_squared * 100.0),
        fmt2(fit.r_squared),
        fit.df_residual,
        fmt2(fit.f_statistic),
        fmt_p(fit.p_value),
        fmt2(fit.pearson_r),
        fmt_p(fit.pearson_p),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{Juvenile, Sex, Site};
    use chrono::NaiveDate;

    fn juvenile(year: i32, sex: Sex, weight: Option<f64>, hindfoot: Option<f64>) -> Juvenile {
        Juvenile {
            date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            year,
            site: Site::Mature,
            sex,
            weight,
            hindfoot,
        }
    }

    fn sample_values() -> ReportValues {
        let mut juveniles = Vec::new();
        for i in 0..5 {
            let w = 700.0 + 10.0 * i as f64;
            juveniles.push(juvenile(1999, Sex::Female, Some(w), Some(0.1 * w + 60.0)));
            juveniles.push(juvenile(2000, Sex::Male, Some(w + 30.0), Some(0.1 * w + 63.0)));
        }
        ReportValues::build(&[], &juveniles).unwrap()
    }

    #[test]
    fn test_text_report_carries_all_sections() {
        let rendered = render(&sample_values(), &ReportConfig::default());

        assert!(rendered.contains("Juvenile snowshoe hare report"));
        assert!(rendered.contains("Annual captures"));
        assert!(rendered.contains("Weight by sex"));
        assert!(rendered.contains("Weight and hind foot length"));
        assert!(rendered.contains("Welch's t-test"));
        assert!(rendered.contains("Pearson's r"));
    }

    #[test]
    fn test_narrative_direction_follows_sign() {
        let values = sample_values();
        let rendered = render(&values, &ReportConfig::default());
        // females lighter than males in the sample
        assert!(rendered.contains("g less than"));
    }

    #[test]
    fn test_skipped_section_prints_reason() {
        let juveniles = vec![
            juvenile(1999, Sex::Female, Some(700.0), Some(130.0)),
            juvenile(1999, Sex::Male, Some(730.0), Some(133.0)),
            juvenile(2000, Sex::Male, Some(745.0), Some(134.5)),
        ];
        let values = ReportValues::build(&[], &juveniles).unwrap();
        let rendered = render(&values, &ReportConfig::default());

        assert!(rendered.contains("Comparison skipped: insufficient data"));
        assert!(rendered.contains("Pearson's r"));
    }

    #[test]
    fn test_counts_table_is_aligned_per_year() {
        let rendered = render(&sample_values(), &ReportConfig::default());
        assert!(rendered.contains("1999"));
        assert!(rendered.contains("2000"));
        assert!(rendered.contains("captures"));
    }

    #[test]
    fn test_alpha_is_echoed_in_verdict() {
        let rendered = render(&sample_values(), &ReportConfig::with_alpha(0.01));
        assert!(rendered.contains("alpha = 0.01"));
    }
}
