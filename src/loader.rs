//! CSV ingestion for capture tables
//!
//! Loads a trapping CSV into `Observation` records. Header names are matched
//! case-insensitively (`grid`/`site` and `hindft`/`hindfoot` are accepted as
//! aliases), extra columns are ignored, and empty or `NA` measurement cells
//! become `None`. Everything else that is wrong with the file is an error:
//! a missing required column, a ragged row, a date or number that does not
//! parse. Nothing is silently repaired.

use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use crate::error::{ReportError, Result};
use crate::observation::{Age, Observation, Sex, Site};

/// Column indices resolved from the header row
struct ColumnMap {
    date: usize,
    site: usize,
    age: usize,
    sex: usize,
    weight: usize,
    hindfoot: usize,
}

impl ColumnMap {
    fn resolve(path: &Path, headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| -> Option<usize> {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
        };
        let require = |names: &[&str]| -> Result<usize> {
            find(names).ok_or_else(|| ReportError::Load {
                path: path.to_path_buf(),
                reason: format!("missing required column {:?}", names[0]),
            })
        };

        Ok(ColumnMap {
            date: require(&["date"])?,
            site: require(&["grid", "site"])?,
            age: require(&["age"])?,
            sex: require(&["sex"])?,
            weight: require(&["weight"])?,
            hindfoot: require(&["hindft", "hindfoot"])?,
        })
    }
}

/// Load a capture CSV into observation records, in file order.
///
/// Row numbers in errors are 1-based data rows, not counting the header.
///
/// # Errors
/// `ReportError::Load` if the file cannot be opened, a required column is
/// absent, or a row has the wrong field count. `ReportError::Parse` if a
/// grid code is unrecognized or a measurement is neither numeric nor a
/// missing marker.
pub fn load_captures(path: &Path) -> Result<Vec<Observation>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| ReportError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let headers = reader
        .headers()
        .map_err(|e| ReportError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .clone();
    let columns = ColumnMap::resolve(path, &headers)?;

    let mut observations = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| ReportError::Load {
            path: path.to_path_buf(),
            reason: format!("row {row}: {e}"),
        })?;

        observations.push(Observation {
            row,
            date: field(&record, columns.date).to_string(),
            site: parse_site(field(&record, columns.site), row)?,
            age: Age::from_code(field(&record, columns.age)),
            sex: Sex::from_code(field(&record, columns.sex)),
            weight: parse_measurement(field(&record, columns.weight), "weight", row)?,
            hindfoot: parse_measurement(field(&record, columns.hindfoot), "hindft", row)?,
        });
    }

    debug!(
        path = %path.display(),
        rows = observations.len(),
        "loaded capture table"
    );
    Ok(observations)
}

fn field<'r>(record: &'r StringRecord, index: usize) -> &'r str {
    record.get(index).unwrap_or("")
}

fn parse_site(raw: &str, row: usize) -> Result<Site> {
    Site::from_code(raw).ok_or_else(|| ReportError::Parse {
        row,
        field: "grid",
        value: raw.to_string(),
        reason: "unrecognized trapping grid".to_string(),
    })
}

/// Empty cells and `NA` (any case) mean not recorded. Anything else must be
/// a finite number.
fn parse_measurement(raw: &str, field: &'static str, row: usize) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("na") {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        Ok(_) => Err(ReportError::Parse {
            row,
            field,
            value: raw.to_string(),
            reason: "value is not finite".to_string(),
        }),
        Err(e) => Err(ReportError::Parse {
            row,
            field,
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}
