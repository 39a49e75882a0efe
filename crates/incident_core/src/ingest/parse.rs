//! Location/date parsing and raw row conversion.

use crate::ingest::IngestError;
use crate::model::record::{Coordinate, DisplayFields, Record};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)\s*,\s*([+-]?\d+(?:\.\d+)?)\s*$")
        .expect("valid location regex")
});
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d{4})-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])\s*$").expect("valid date regex")
});

/// Source row as delivered by the Record Store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub label: String,
    /// Delimited pair, e.g. `"53.3498, -6.2603"`.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub power: Option<f64>,
    /// Calendar date in `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub fields: DisplayFields,
}

/// Parses a `<lat>,<lon>` decimal-degree pair.
///
/// # Errors
/// - `MalformedLocation` when the text is not two comma-separated numbers.
/// - `InvalidCoordinate` when the numbers are outside degree bounds.
pub fn parse_coordinate(value: &str) -> Result<Coordinate, IngestError> {
    let caps = LOCATION_RE
        .captures(value)
        .ok_or_else(|| IngestError::MalformedLocation(value.to_string()))?;
    let lat = caps[1]
        .parse::<f64>()
        .map_err(|_| IngestError::MalformedLocation(value.to_string()))?;
    let lon = caps[2]
        .parse::<f64>()
        .map_err(|_| IngestError::MalformedLocation(value.to_string()))?;
    Ok(Coordinate::new(lat, lon)?)
}

/// Extracts the year from a `YYYY-MM-DD` date.
///
/// Day-of-month is range checked (01-31) but not checked against the month.
pub fn parse_year(value: &str) -> Result<i32, IngestError> {
    let caps = DATE_RE
        .captures(value)
        .ok_or_else(|| IngestError::MalformedDate(value.to_string()))?;
    caps[1]
        .parse::<i32>()
        .map_err(|_| IngestError::MalformedDate(value.to_string()))
}

/// Converts raw rows into records, keeping source order.
///
/// Malformed locations and dates are logged and left undefined; the row is
/// still returned.
pub fn ingest_records(rows: &[RawRecord]) -> Vec<Record> {
    let mut malformed_locations = 0usize;
    let mut malformed_dates = 0usize;

    let records = rows
        .iter()
        .enumerate()
        .map(|(row, raw)| {
            let coordinate = match raw.location.as_deref() {
                Some(text) => match parse_coordinate(text) {
                    Ok(coordinate) => Some(coordinate),
                    Err(err) => {
                        malformed_locations += 1;
                        warn!(
                            "event=ingest_location module=ingest status=dropped row={} error={}",
                            row, err
                        );
                        None
                    }
                },
                None => None,
            };
            let year = match raw.date.as_deref() {
                Some(text) => match parse_year(text) {
                    Ok(year) => Some(year),
                    Err(err) => {
                        malformed_dates += 1;
                        warn!(
                            "event=ingest_date module=ingest status=undefined_year row={} error={}",
                            row, err
                        );
                        None
                    }
                },
                None => None,
            };

            Record {
                label: raw.label.clone(),
                fields: raw.fields.clone(),
                coordinate,
                magnitude: raw.power.filter(|value| value.is_finite()),
                year,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        "event=ingest_records module=ingest status=ok rows={} malformed_locations={} malformed_dates={}",
        rows.len(),
        malformed_locations,
        malformed_dates
    );
    records
}

/// Loads a JSON array of raw rows from disk and ingests it.
///
/// # Errors
/// - Returns `IngestError::Io` when the file cannot be read.
/// - Returns `IngestError::Json` when content is not a raw record array.
pub fn load_records_json(path: impl AsRef<Path>) -> Result<Vec<Record>, IngestError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<RawRecord> = serde_json::from_str(&content)?;
    Ok(ingest_records(&rows))
}
