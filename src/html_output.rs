//! Standalone HTML report with embedded CSS and inlined SVG figures

use std::fmt::Write as _;

use crate::config::ReportConfig;
use crate::report::{fmt2, fmt_df, fmt_p, ReportCharts, ReportValues, SectionOutcome};
use crate::stats::effect_size_label;

/// Escape HTML special characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate embedded CSS styles
fn generate_styles() -> &'static str {
    r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px auto;
            max-width: 860px;
            padding: 0 16px;
            background-color: #f5f5f5;
            color: #24292f;
        }
        h1, h2 {
            color: #333;
        }
        p {
            line-height: 1.5;
        }
        table {
            border-collapse: collapse;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px 12px;
            text-align: right;
        }
        th:first-child, td:first-child {
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        figure {
            margin: 20px 0;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            padding: 8px;
        }
        figure svg {
            max-width: 100%;
            height: auto;
        }
        .skipped {
            color: #9a6700;
            font-style: italic;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
}

/// Render the complete HTML document, figures inlined
pub fn render(values: &ReportValues, config: &ReportConfig, charts: &ReportCharts) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str(
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str("    <title>Juvenile snowshoe hare report</title>\n");
    html.push_str("    <style>");
    html.push_str(generate_styles());
    html.push_str("</style>\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    html.push_str("    <h1>Juvenile snowshoe hare report</h1>\n");

    let (first, last) = values.year_span();
    let _ = writeln!(
        html,
        "    <p>The capture table holds {} records from the Bonanza Creek \
         Experimental Forest trapping grids, {} of them juvenile hares trapped \
         between {} and {}.</p>",
        values.total_observations, values.juvenile_count, first, last
    );

    html.push_str("    <h2>Annual captures</h2>\n");
    let _ = writeln!(
        html,
        "    <p>Juvenile captures per year ranged from {} to {} (mean {}, median {}).</p>",
        values.count_summary.min,
        values.count_summary.max,
        fmt2(values.count_summary.mean),
        fmt2(values.count_summary.median),
    );
    html.push_str("    <table>\n        <tr><th>year</th><th>captures</th></tr>\n");
    for count in &values.annual_counts {
        let _ = writeln!(
            html,
            "        <tr><td>{}</td><td>{}</td></tr>",
            count.year, count.count
        );
    }
    html.push_str("    </table>\n");
    embed_figure(&mut html, &charts.annual_counts.to_string());

    html.push_str("    <h2>Weight by sex</h2>\n");
    if values.sex_summaries.is_empty() {
        html.push_str("    <p class=\"skipped\">No weighed juveniles of known sex.</p>\n");
    } else {
        html.push_str(
            "    <table>\n        <tr><th>sex</th><th>n</th><th>mean (g)</th>\
             <th>median (g)</th><th>sd (g)</th></tr>\n",
        );
        for summary in &values.sex_summaries {
            let sd = summary.std_dev.map_or_else(|| "-".to_string(), fmt2);
            let _ = writeln!(
                html,
                "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                summary.sex.label(),
                summary.n,
                fmt2(summary.mean),
                fmt2(summary.median),
                sd
            );
        }
        html.push_str("    </table>\n");
    }
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
                html,
                "    <p>On average, juvenile females weighed {} g {} than juvenile \
                 males ({} g vs {} g), a difference of {}% relative to the male mean. \
                 Welch&#39;s t-test: t({}) = {}, p = {}; the difference is {} at \
                 alpha = {}. Cohen&#39;s d = {} ({} effect).</p>",
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
            let _ = writeln!(
                html,
                "    <p class=\"skipped\">Comparison skipped: {}.</p>",
                escape_html(reason)
            );
        }
    }
    embed_figure(&mut html, &charts.weight_by_sex_site.to_string());

    html.push_str("    <h2>Weight and hind foot length</h2>\n");
    match &values.weight_hindfoot {
        SectionOutcome::Computed(fit) => {
            let _ = writeln!(
                html,
                "    <p>Across all weighed juveniles (n = {}), hind foot length \
                 increases by {} mm per gram of body mass: hindfoot = {} + {} &#215; \
                 weight. The linear model explains {}% of the variance (R&#178; = {}; \
                 F(1, {}) = {}, p = {}). Pearson&#39;s r = {} (p = {}).</p>",
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
            let _ = writeln!(
                html,
                "    <p class=\"skipped\">Regression skipped: {}.</p>",
                escape_html(reason)
            );
        }
    }
    embed_figure(&mut html, &charts.weight_vs_hindfoot.to_string());

    html.push_str("    <div class=\"footer\">\n");
    html.push_str("        Generated by lepus - juvenile hare capture reports\n");
    html.push_str("    </div>\n");
    html.push_str("</body>\n");
    html.push_str("</html>\n");

    html
}

fn embed_figure(html: &mut String, rendered_svg: &str) {
    html.push_str("    <figure>\n");
    html.push_str(rendered_svg);
    html.push_str("\n    </figure>\n");
}
