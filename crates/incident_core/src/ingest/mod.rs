//! Record Store ingestion contract.
//!
//! # Responsibility
//! - Convert loosely typed source rows into engine `Record`s.
//! - Degrade malformed location/date values to `None` instead of failing.
//!
//! # Invariants
//! - A malformed location never drops the record from the output list.
//! - Only I/O and JSON decoding failures surface as `IngestError`.

pub mod parse;

pub use parse::{ingest_records, load_records_json, parse_coordinate, parse_year, RawRecord};

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Ingestion error for file loading and value parsing.
#[derive(Debug)]
pub enum IngestError {
    /// Source file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Source content is not a JSON array of raw records.
    Json(serde_json::Error),
    /// Location text is not a `<lat>,<lon>` pair.
    MalformedLocation(String),
    /// Location parsed but is not a valid coordinate.
    InvalidCoordinate(crate::model::record::CoordinateError),
    /// Date text does not match `YYYY-MM-DD`.
    MalformedDate(String),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read records from `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid record JSON: {err}"),
            Self::MalformedLocation(value) => write!(f, "malformed location: `{value}`"),
            Self::InvalidCoordinate(err) => write!(f, "{err}"),
            Self::MalformedDate(value) => {
                write!(f, "malformed date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::InvalidCoordinate(err) => Some(err),
            Self::MalformedLocation(_) | Self::MalformedDate(_) => None,
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<crate::model::record::CoordinateError> for IngestError {
    fn from(value: crate::model::record::CoordinateError) -> Self {
        Self::InvalidCoordinate(value)
    }
}
