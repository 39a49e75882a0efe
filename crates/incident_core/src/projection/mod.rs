//! Projection Builder: filtered, sorted display order over a record snapshot.
//!
//! # Responsibility
//! - Derive the card/marker order from filter and sort criteria.
//! - Expose positions ("indices") as the only record identity seen by views.
//!
//! # Invariants
//! - Records without a coordinate never enter a projection.
//! - Sorting is stable; ties keep snapshot order in both directions.
//! - An index is only meaningful against the projection that produced it.

pub mod builder;

pub use builder::{
    available_years, build_projection, FilterSpec, Projection, ProjectionSpec, SortDirection,
    SortField, SortSpec,
};
