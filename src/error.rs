//! Error taxonomy for the report pipeline
//!
//! Loading and parsing errors are fatal to the run; insufficient-data errors
//! abort only the report section whose computation they block.

use std::path::PathBuf;
use thiserror::Error;

/// Errors for report pipeline operations
#[derive(Error, Debug)]
pub enum ReportError {
    /// The capture file is missing, unreadable, or structurally malformed
    /// (ragged rows, missing required columns).
    #[error("failed to load {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    /// A field failed to convert to its expected type. `row` is 1-based and
    /// counts data rows, excluding the header.
    #[error("row {row}: cannot parse {field} value {value:?}: {reason}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A statistical operation's minimum sample-size precondition was not met.
    #[error("insufficient data for {analysis}: need at least {required} observations, got {actual}")]
    InsufficientData {
        analysis: &'static str,
        required: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
