//! Markdown report: narrative, pipe tables, and figure references

use std::fmt::Write as _;
use std::path::Path;

use crate::config::ReportConfig;
use crate::report::{fmt2, fmt_df, fmt_p, ReportValues, SectionOutcome, CHART_FILES};
use crate::stats::effect_size_label;

/// Render the report as Markdown. Figure references point into `charts_dir`,
/// which is where the caller saves the SVG files.
pub fn render(values: &ReportValues, config: &ReportConfig, charts_dir: &Path) -> String {
    let mut out = String::new();
    let figure = |index: usize| charts_dir.join(CHART_FILES[index]).display().to_string();

    out.push_str("# Juvenile snowshoe hare report\n\n");
    let (first, last) = values.year_span();
    let _ = writeln!(
        out,
        "The capture table holds {} records from the Bonanza Creek Experimental \
         Forest trapping grids, {} of them juvenile hares trapped between {} and {}.",
        values.total_observations, values.juvenile_count, first, last
    );

    out.push_str("\n## Annual captures\n\n");
    let _ = writeln!(
        out,
        "Juvenile captures per year ranged from {} to {} (mean {}, median {}).",
        values.count_summary.min,
        values.count_summary.max,
        fmt2(values.count_summary.mean),
        fmt2(values.count_summary.median),
    );
    out.push_str("\n| year | captures |\n|-----:|---------:|\n");
    for count in &values.annual_counts {
        let _ = writeln!(out, "| {} | {} |", count.year, count.count);
    }
    let _ = writeln!(out, "\n![Annual juvenile captures]({})", figure(0));

    out.push_str("\n## Weight by sex\n\n");
    if values.sex_summaries.is_empty() {
        out.push_str("No weighed juveniles of known sex.\n");
    } else {
        out.push_str("| sex | n | mean (g) | median (g) | sd (g) |\n");
        out.push_str("|:----|--:|---------:|-----------:|-------:|\n");
        for summary in &values.sex_summaries {
            let sd = summary.std_dev.map_or_else(|| "-".to_string(), fmt2);
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
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
            let direction = if comparison.mean_difference < 0.0 {
                "less"
            } else {
                "more"
            };
            let verdict = if comparison.p_value < config.alpha {
                "statistically significant"
            } else {
                "not statistically significant"
            };
            let _ = writeln!(
                out,
                "On average, juvenile females weighed {} g {} than juvenile males \
                 ({} g vs {} g), a difference of {}% relative to the male mean. \
                 Welch's t-test: t({}) = {}, p = {}; the difference is {} at \
                 alpha = {}. Cohen's d = {} ({} effect).",
                fmt2(comparison.mean_difference.abs()),
                direction,
                fmt2(comparison.mean_a),
                fmt2(comparison.mean_b),
                fmt2(comparison.percent_difference.abs()),
                fmt_df(comparison.df),
                fmt2(comparison.t_statistic),
                fmt_p(comparison.p_value),
                verdict,
                config.alpha,
                fmt2(comparison.cohens_d),
                effect_size_label(comparison.cohens_d),
            );
        }
        SectionOutcome::Skipped { reason } => {
            let _ = writeln!(out, "Comparison skipped: {reason}.");
        }
    }
    let _ = writeln!(out, "\n![Juvenile weight by sex and site]({})", figure(1));

    out.push_str("\n## Weight and hind foot length\n\n");
    match &values.weight_hindfoot {
        SectionOutcome::Computed(fit) => {
            let _ = writeln!(
                out,
                "Across all weighed juveniles (n = {}), hind foot length increases by \
                 {} mm per gram of body mass: hindfoot = {} + {} x weight. \
                 The linear model explains {}% of the variance (R^2 = {}; \
                 F(1, {}) = {}, p = {}). Pearson's r = {} (p = {}).",
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
            );
        }
        SectionOutcome::Skipped { reason } => {
            let _ = writeln!(out, "Regression skipped: {reason}.");
        }
    }
    let _ = writeln!(out, "\n![Weight against hind foot length]({})", figure(2));

    out
}
