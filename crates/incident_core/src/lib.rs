//! Linked-view selection and projection engine for incident dashboards.
//! Cards and map markers share one selection through this crate.

pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod projection;
pub mod selection;
pub mod service;
pub mod view;

pub use config::{ConfigError, EngineConfig, ViewConfig};
pub use ingest::{ingest_records, load_records_json, IngestError, RawRecord};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{Coordinate, CoordinateError, DisplayFields, Record, RecordSnapshot};
pub use projection::{
    available_years, build_projection, FilterSpec, Projection, ProjectionSpec, SortDirection,
    SortField, SortSpec,
};
pub use selection::{
    InteractionEvent, NoOpReason, Resolution, ResolutionOutcome, SelectionResolver,
    SelectionSource, SelectionState,
};
pub use service::session::DashboardSession;
pub use view::{synchronize, CardStyle, CardView, MapView, MarkerView, ViewState};

/// Minimal health-check API for render adapters.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
