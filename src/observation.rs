//! Capture records and the juvenile filter/transform stage
//!
//! `Observation` is one trapping row exactly as loaded (date still raw text).
//! `Juvenile` is the derived record for the juvenile sub-population, with the
//! date parsed and the trapping year extracted. Observations are never
//! mutated; every stage produces a new collection.

use chrono::{Datelike, NaiveDate};

use crate::error::{ReportError, Result};

/// Trapping grid within the Bonanza Creek Experimental Forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Site {
    /// `bonbs` - lowland black spruce stand
    BlackSpruce,
    /// `bonmat` - mature lowland forest stand
    Mature,
    /// `bonrip` - riparian zone along the Tanana River
    Riparian,
}

impl Site {
    /// Parse a grid code (case-insensitive). Unknown codes are rejected by
    /// the loader as parse errors; the grid set is closed.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "bonbs" => Some(Site::BlackSpruce),
            "bonmat" => Some(Site::Mature),
            "bonrip" => Some(Site::Riparian),
            _ => None,
        }
    }

    /// Stand name used in chart panels and prose
    pub fn label(&self) -> &'static str {
        match self {
            Site::BlackSpruce => "Black Spruce",
            Site::Mature => "Mature",
            Site::Riparian => "Riparian",
        }
    }

    /// All sites in fixed presentation order
    pub fn all() -> [Site; 3] {
        [Site::BlackSpruce, Site::Mature, Site::Riparian]
    }
}

/// Recorded sex. Unrecorded or ambiguous codes stay `Unknown`; they are never
/// merged into either category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Female,
    Male,
    Unknown,
}

impl Sex {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "f" => Sex::Female,
            "m" => Sex::Male,
            _ => Sex::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Female => "Female",
            Sex::Male => "Male",
            Sex::Unknown => "Unknown",
        }
    }
}

/// Recorded age class. Only `j` maps to `Juvenile`; every other code
/// (including blank) is `Adult` for `a` or `Unknown` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Age {
    Juvenile,
    Adult,
    Unknown,
}

impl Age {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "j" => Age::Juvenile,
            "a" => Age::Adult,
            _ => Age::Unknown,
        }
    }
}

/// One capture record as loaded. The date stays raw text here; parsing
/// happens in the juvenile transform so an unparseable date is reported with
/// its row number.
#[derive(Debug, Clone)]
pub struct Observation {
    /// 1-based data row in the source file, excluding the header
    pub row: usize,
    /// Raw capture date text, month/day/year
    pub date: String,
    pub site: Site,
    pub age: Age,
    pub sex: Sex,
    /// Body mass in grams, if recorded
    pub weight: Option<f64>,
    /// Hind foot length in millimeters, if recorded
    pub hindfoot: Option<f64>,
}

/// Juvenile capture with the date parsed and the trapping year derived
#[derive(Debug, Clone)]
pub struct Juvenile {
    pub date: NaiveDate,
    pub year: i32,
    pub site: Site,
    pub sex: Sex,
    pub weight: Option<f64>,
    pub hindfoot: Option<f64>,
}

/// Derive the juvenile sub-population from the full capture table.
///
/// Keeps `Age::Juvenile` only (unknown age codes are excluded), parses each
/// kept date, and derives the trapping year. Order is preserved and the input
/// is untouched, so the same input always yields the same output.
///
/// # Errors
/// `ReportError::Parse` if a kept record's date matches neither `%m/%d/%Y`
/// nor `%m/%d/%y`. Date failures are surfaced, never silently dropped.
pub fn juveniles(observations: &[Observation]) -> Result<Vec<Juvenile>> {
    let mut derived = Vec::new();

    for obs in observations {
        if obs.age != Age::Juvenile {
            continue;
        }
        let date = parse_capture_date(&obs.date, obs.row)?;
        derived.push(Juvenile {
            date,
            year: date.year(),
            site: obs.site,
            sex: obs.sex,
            weight: obs.weight,
            hindfoot: obs.hindfoot,
        });
    }

    Ok(derived)
}

/// Parse a month/day/year capture date. The width of the year token selects
/// the format: longer years parse as written, one- and two-digit years
/// resolve through chrono's `%y` pivot (69-99 into the 1900s, 00-68 into
/// the 2000s).
fn parse_capture_date(raw: &str, row: usize) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    // chrono's `%Y` also accepts 1-2 digit years, so the year token's width
    // has to pick the format or the `%y` pivot would never apply.
    let format = match trimmed.rsplit('/').next() {
        Some(year) if year.len() <= 2 => "%m/%d/%y",
        _ => "%m/%d/%Y",
    };
    NaiveDate::parse_from_str(trimmed, format).map_err(|_| ReportError::Parse {
        row,
        field: "date",
        value: raw.to_string(),
        reason: "expected month/day/year".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(row: usize, date: &str, age: Age, sex: Sex, weight: Option<f64>) -> Observation {
        Observation {
            row,
            date: date.to_string(),
            site: Site::Riparian,
            age,
            sex,
            weight,
            hindfoot: None,
        }
    }

    #[test]
    fn test_site_codes_case_insensitive() {
        assert_eq!(Site::from_code("bonbs"), Some(Site::BlackSpruce));
        assert_eq!(Site::from_code("BONMAT"), Some(Site::Mature));
        assert_eq!(Site::from_code(" bonrip "), Some(Site::Riparian));
        assert_eq!(Site::from_code("aleza"), None);
    }

    #[test]
    fn test_sex_unknown_preserved_distinct() {
        assert_eq!(Sex::from_code("f"), Sex::Female);
        assert_eq!(Sex::from_code("M"), Sex::Male);
        assert_eq!(Sex::from_code(""), Sex::Unknown);
        assert_eq!(Sex::from_code("f?"), Sex::Unknown);
    }

    #[test]
    fn test_age_codes() {
        assert_eq!(Age::from_code("j"), Age::Juvenile);
        assert_eq!(Age::from_code("J"), Age::Juvenile);
        assert_eq!(Age::from_code("a"), Age::Adult);
        assert_eq!(Age::from_code(""), Age::Unknown);
        assert_eq!(Age::from_code("1 yr"), Age::Unknown);
    }

    #[test]
    fn test_juveniles_keeps_only_juvenile_age() {
        let observations = vec![
            obs(1, "1/14/1999", Age::Juvenile, Sex::Female, Some(700.0)),
            obs(2, "1/15/1999", Age::Adult, Sex::Male, Some(1250.0)),
            obs(3, "1/16/1999", Age::Unknown, Sex::Female, Some(900.0)),
            obs(4, "8/9/2000", Age::Juvenile, Sex::Unknown, None),
        ];

        let juveniles = juveniles(&observations).unwrap();
        assert_eq!(juveniles.len(), 2);
        assert_eq!(juveniles[0].year, 1999);
        assert_eq!(juveniles[1].year, 2000);
        assert_eq!(juveniles[1].sex, Sex::Unknown);
    }

    #[test]
    fn test_juveniles_preserves_input_order() {
        let observations = vec![
            obs(1, "6/6/2000", Age::Juvenile, Sex::Male, Some(740.0)),
            obs(2, "1/14/1999", Age::Juvenile, Sex::Female, Some(700.0)),
        ];

        let juveniles = juveniles(&observations).unwrap();
        assert_eq!(juveniles[0].year, 2000);
        assert_eq!(juveniles[1].year, 1999);
    }

    #[test]
    fn test_two_digit_years_resolve_through_pivot() {
        let observations = vec![
            obs(1, "1/14/99", Age::Juvenile, Sex::Female, None),
            obs(2, "2/3/01", Age::Juvenile, Sex::Male, None),
            obs(3, "6/30/69", Age::Juvenile, Sex::Female, None),
            obs(4, "6/30/68", Age::Juvenile, Sex::Male, None),
        ];

        let juveniles = juveniles(&observations).unwrap();
        assert_eq!(juveniles[0].year, 1999);
        assert_eq!(juveniles[1].year, 2001);
        assert_eq!(juveniles[2].year, 1969);
        assert_eq!(juveniles[3].year, 2068);
    }

    #[test]
    fn test_four_digit_years_parse_as_written() {
        let observations = vec![
            obs(1, "1/14/1999", Age::Juvenile, Sex::Female, None),
            obs(2, "8/9/2068", Age::Juvenile, Sex::Male, None),
        ];

        let juveniles = juveniles(&observations).unwrap();
        assert_eq!(juveniles[0].year, 1999);
        assert_eq!(juveniles[1].year, 2068);
    }

    #[test]
    fn test_unparseable_date_is_surfaced_with_row() {
        let observations = vec![obs(7, "1999-01-14", Age::Juvenile, Sex::Female, None)];

        let err = juveniles(&observations).unwrap_err();
        match err {
            ReportError::Parse { row, field, .. } => {
                assert_eq!(row, 7);
                assert_eq!(field, "date");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_adult_rows_never_trigger_date_parsing() {
        // A malformed date on a non-juvenile row must not fail the transform.
        let observations = vec![
            obs(1, "not a date", Age::Adult, Sex::Male, None),
            obs(2, "1/14/1999", Age::Juvenile, Sex::Female, None),
        ];

        let juveniles = juveniles(&observations).unwrap();
        assert_eq!(juveniles.len(), 1);
    }
}
