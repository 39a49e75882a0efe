//! Session API for render adapters.
//!
//! # Responsibility
//! - Decode JSON payloads from the render layer into engine types.
//! - Return serializable envelopes the host can forward as JSON.
//!
//! # Invariants
//! - Functions never panic; errors are carried in `message` with `ok=false`.
//! - A failed call never mutates session state.

use crate::registry::{self, BridgeError};
use incident_core::{
    core_version as core_version_inner, ingest_records, init_logging as init_logging_inner,
    ping as ping_inner, DashboardSession, EngineConfig, InteractionEvent, ProjectionSpec,
    RawRecord, ViewState,
};
use serde::{Deserialize, Serialize};

/// Health-check passthrough.
pub fn ping() -> String {
    ping_inner().to_owned()
}

pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes engine logging once per process.
///
/// Returns an empty string on success and an error message otherwise.
/// Safe to call repeatedly with the same `level + log_dir`.
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.trim()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Envelope for session lifecycle calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    /// Opaque handle for follow-up calls.
    pub session_id: Option<String>,
    pub message: String,
    /// Initial view for a newly opened session.
    pub view: Option<ViewState>,
}

impl SessionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            session_id: None,
            message: message.into(),
            view: None,
        }
    }
}

/// Envelope for calls returning fresh view descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResponse {
    pub ok: bool,
    pub message: String,
    pub view: Option<ViewState>,
}

impl ViewResponse {
    fn from_result(operation: &str, result: Result<ViewState, BridgeError>) -> Self {
        match result {
            Ok(view) => Self {
                ok: true,
                message: format!("{} card(s).", view.cards.len()),
                view: Some(view),
            },
            Err(err) => Self {
                ok: false,
                message: format!("{operation} failed: {err}"),
                view: None,
            },
        }
    }
}

/// One event or all events reported in one update cycle.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventsPayload {
    Cycle(Vec<InteractionEvent>),
    Single(InteractionEvent),
}

/// Opens an isolated session over a JSON array of raw records.
///
/// `config_json` is optional; `None` or blank uses defaults.
pub fn open_session(records_json: String, config_json: Option<String>) -> SessionResponse {
    let rows = match serde_json::from_str::<Vec<RawRecord>>(&records_json) {
        Ok(rows) => rows,
        Err(err) => return SessionResponse::failure(format!("open_session failed: {err}")),
    };
    let config = match config_json.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => match EngineConfig::from_json_str(json) {
            Ok(config) => config,
            Err(err) => return SessionResponse::failure(format!("open_session failed: {err}")),
        },
        _ => EngineConfig::default(),
    };

    let session = DashboardSession::new(ingest_records(&rows), config);
    let view = session.view();
    match registry::insert(session) {
        Ok(id) => SessionResponse {
            ok: true,
            session_id: Some(id.to_string()),
            message: format!("Session opened with {} record(s).", rows.len()),
            view: Some(view),
        },
        Err(err) => SessionResponse::failure(format!("open_session failed: {err}")),
    }
}

/// Returns the current view of one session.
pub fn session_view(session_id: String) -> ViewResponse {
    let result = registry::parse_session_id(&session_id)
        .and_then(|id| registry::with_session(id, |session| session.view()));
    ViewResponse::from_result("session_view", result)
}

/// Resolves a single event object or an array of same-cycle events.
pub fn session_interact(session_id: String, events_json: String) -> ViewResponse {
    let result = registry::parse_session_id(&session_id).and_then(|id| {
        let payload = serde_json::from_str::<EventsPayload>(&events_json)
            .map_err(|err| BridgeError::InvalidPayload(err.to_string()))?;
        registry::with_session(id, |session| match payload {
            EventsPayload::Single(event) => session.handle_event(&event),
            EventsPayload::Cycle(events) => session.handle_cycle(&events),
        })
    });
    ViewResponse::from_result("session_interact", result)
}

/// Replaces filter and sort criteria of one session.
pub fn session_apply_spec(session_id: String, spec_json: String) -> ViewResponse {
    let result = registry::parse_session_id(&session_id).and_then(|id| {
        let spec = serde_json::from_str::<ProjectionSpec>(&spec_json)
            .map_err(|err| BridgeError::InvalidPayload(err.to_string()))?;
        registry::with_session(id, |session| session.apply_spec(spec))
    });
    ViewResponse::from_result("session_apply_spec", result)
}

/// Drops one session and its state.
pub fn close_session(session_id: String) -> SessionResponse {
    match registry::parse_session_id(&session_id).and_then(registry::remove) {
        Ok(()) => SessionResponse {
            ok: true,
            session_id: Some(session_id),
            message: "Session closed.".to_string(),
            view: None,
        },
        Err(err) => SessionResponse::failure(format!("close_session failed: {err}")),
    }
}
