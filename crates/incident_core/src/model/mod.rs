//! Incident domain model shared by ingestion, projection and view layers.
//!
//! # Responsibility
//! - Define the canonical incident record consumed by the engine.
//! - Keep coordinate validity rules in one place.
//!
//! # Invariants
//! - A `Coordinate` is always finite and inside WGS84 degree bounds.
//! - Records are immutable once placed in a `RecordSnapshot`.

pub mod record;
