//! CLI argument parsing for lepus

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the capture report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// Markdown document with figure links
    Markdown,
    /// Standalone HTML document with inlined figures
    Html,
    /// JSON values for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "lepus")]
#[command(version)]
#[command(about = "Reproducible reports over snowshoe hare capture records", long_about = None)]
pub struct Cli {
    /// Path to the capture CSV file
    #[arg(value_name = "DATA")]
    pub data: PathBuf,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to FILE instead of stdout
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Directory the SVG figures are written to (text and markdown formats)
    #[arg(long = "charts-dir", value_name = "DIR", default_value = "figures")]
    pub charts_dir: PathBuf,

    /// Significance level for the narrative verdicts
    #[arg(long = "alpha", value_name = "ALPHA", default_value = "0.05")]
    pub alpha: f64,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
