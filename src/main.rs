use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use lepus::cli::{Cli, OutputFormat};
use lepus::config::ReportConfig;
use lepus::observation::Juvenile;
use lepus::report::{ReportCharts, ReportValues};
use lepus::{html_output, json_output, loader, markdown_output, observation, text_output};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for diagnostic output
fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Render the SVG figures into the charts directory
fn save_charts(
    juveniles: &[Juvenile],
    values: &ReportValues,
    config: &ReportConfig,
    dir: &Path,
) -> Result<()> {
    let charts = ReportCharts::build(juveniles, values, &config.theme);
    charts
        .save_to(dir)
        .with_context(|| format!("writing figures to {}", dir.display()))?;
    Ok(())
}

/// Write the rendered report to the output file, or stdout
fn write_report(rendered: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = ReportConfig::with_alpha(args.alpha);
    if let Err(reason) = config.validate() {
        anyhow::bail!("invalid configuration: {reason}");
    }

    let observations = loader::load_captures(&args.data)?;
    let juveniles = observation::juveniles(&observations)?;
    let values = ReportValues::build(&observations, &juveniles)?;

    let rendered = match args.format {
        OutputFormat::Text => {
            save_charts(&juveniles, &values, &config, &args.charts_dir)?;
            text_output::render(&values, &config)
        }
        OutputFormat::Markdown => {
            save_charts(&juveniles, &values, &config, &args.charts_dir)?;
            markdown_output::render(&values, &config, &args.charts_dir)
        }
        OutputFormat::Html => {
            let charts = ReportCharts::build(&juveniles, &values, &config.theme);
            html_output::render(&values, &config, &charts)
        }
        OutputFormat::Json => json_output::render(&values, &config)?,
    };

    write_report(&rendered, args.out.as_deref())?;

    Ok(())
}
