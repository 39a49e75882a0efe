//! Render-adapter bridge for the incident dashboard engine.
//!
//! # Responsibility
//! - Expose JSON-in/JSON-out session calls to a host render layer.
//! - Keep one isolated `DashboardSession` per opaque session handle.
//!
//! # Invariants
//! - Exported functions never panic; failures are reported in envelopes.
//! - Sessions never observe each other's selection or counters.

pub mod api;
mod registry;

pub use api::{
    close_session, core_version, init_logging, open_session, ping, session_apply_spec,
    session_interact, session_view, SessionResponse, ViewResponse,
};
