//! Incident record model.
//!
//! # Responsibility
//! - Define the record shape shown as a detail card and a map marker.
//! - Provide the immutable snapshot type passed through one session.
//!
//! # Invariants
//! - `label` is the marker-matching key and is never rewritten by the engine.
//! - Optional fields stay `None` when ingestion could not derive them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Ordered display fields rendered on a detail card.
///
/// `BTreeMap` keeps serialized output stable across calls.
pub type DisplayFields = BTreeMap<String, String>;

/// Shared immutable record table for one data set.
pub type RecordSnapshot = Arc<[Record]>;

/// Validation error for coordinate construction.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateError {
    NonFinite { lat: f64, lon: f64 },
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl Display for CoordinateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite { lat, lon } => {
                write!(f, "coordinate must be finite, got ({lat}, {lon})")
            }
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} is outside [-180, 180]")
            }
        }
    }
}

impl Error for CoordinateError {}

/// WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(value: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(value.lat, value.lon)
    }
}

impl Coordinate {
    /// Creates a validated coordinate.
    ///
    /// # Errors
    /// - Returns an error when either component is NaN or infinite.
    /// - Returns an error when a component is outside degree bounds.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite { lat, lon });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }
}

/// One incident entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable display label; map markers are matched by this value.
    pub label: String,
    /// Free-form card fields (description, address, ...).
    #[serde(default)]
    pub fields: DisplayFields,
    /// Missing when the source location was absent or malformed.
    pub coordinate: Option<Coordinate>,
    /// Incident magnitude ("power"), used by magnitude sorting.
    pub magnitude: Option<f64>,
    /// Year derived from the source date; drives year filtering.
    pub year: Option<i32>,
}

impl Record {
    /// Creates a record with only a label set.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: DisplayFields::new(),
            coordinate: None,
            magnitude: None,
            year: None,
        }
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns whether this record can be placed on the map.
    pub fn is_spatial(&self) -> bool {
        self.coordinate.is_some()
    }
}

/// Freezes a record list into a shareable snapshot.
pub fn snapshot(records: Vec<Record>) -> RecordSnapshot {
    Arc::from(records)
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, CoordinateError, Record};

    #[test]
    fn coordinate_rejects_out_of_range_latitude() {
        let err = Coordinate::new(91.0, 0.0).expect_err("latitude 91 must be rejected");
        assert_eq!(err, CoordinateError::LatitudeOutOfRange(91.0));
    }

    #[test]
    fn coordinate_rejects_nan() {
        assert!(matches!(
            Coordinate::new(f64::NAN, 1.0),
            Err(CoordinateError::NonFinite { .. })
        ));
    }

    #[test]
    fn record_builder_sets_optional_fields() {
        let coordinate = Coordinate::new(53.35, -6.26).expect("valid coordinate");
        let record = Record::new("A")
            .with_coordinate(coordinate)
            .with_magnitude(18.0)
            .with_year(2023)
            .with_field("description", "Minor fire");

        assert!(record.is_spatial());
        assert_eq!(record.magnitude, Some(18.0));
        assert_eq!(record.year, Some(2023));
        assert_eq!(
            record.fields.get("description").map(String::as_str),
            Some("Minor fire")
        );
    }
}
