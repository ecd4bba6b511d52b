//! Lepus - reproducible reports over snowshoe hare capture records
//!
//! This library loads the Bonanza Creek capture CSV, restricts it to juvenile
//! hares, computes the annual, per-sex, and weight-vs-hindfoot analyses, and
//! renders the results as text, Markdown, HTML, or JSON with SVG figures.

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod html_output;
pub mod json_output;
pub mod loader;
pub mod markdown_output;
pub mod observation;
pub mod report;
pub mod stats;
pub mod text_output;
