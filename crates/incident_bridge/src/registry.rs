//! Process-wide session table.

use incident_core::DashboardSession;
use log::{info, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;
use uuid::Uuid;

static SESSIONS: Lazy<Mutex<HashMap<Uuid, DashboardSession>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    InvalidSessionId(String),
    SessionNotFound(Uuid),
    InvalidPayload(String),
    RegistryUnavailable,
}

impl Display for BridgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSessionId(value) => write!(f, "invalid session id: `{value}`"),
            Self::SessionNotFound(id) => write!(f, "session not found: {id}"),
            Self::InvalidPayload(message) => write!(f, "invalid payload: {message}"),
            Self::RegistryUnavailable => write!(f, "session registry is unavailable"),
        }
    }
}

impl Error for BridgeError {}

pub fn parse_session_id(value: &str) -> Result<Uuid, BridgeError> {
    Uuid::parse_str(value.trim()).map_err(|_| BridgeError::InvalidSessionId(value.to_string()))
}

pub fn insert(session: DashboardSession) -> Result<Uuid, BridgeError> {
    let id = Uuid::new_v4();
    let mut sessions = SESSIONS
        .lock()
        .map_err(|_| BridgeError::RegistryUnavailable)?;
    sessions.insert(id, session);
    info!(
        "event=session_register module=bridge status=ok active_sessions={}",
        sessions.len()
    );
    Ok(id)
}

/// Runs `f` against one session while holding the registry lock.
pub fn with_session<T>(
    id: Uuid,
    f: impl FnOnce(&mut DashboardSession) -> T,
) -> Result<T, BridgeError> {
    let mut sessions = SESSIONS
        .lock()
        .map_err(|_| BridgeError::RegistryUnavailable)?;
    let session = sessions
        .get_mut(&id)
        .ok_or(BridgeError::SessionNotFound(id))?;
    Ok(f(session))
}

pub fn remove(id: Uuid) -> Result<(), BridgeError> {
    let mut sessions = SESSIONS
        .lock()
        .map_err(|_| BridgeError::RegistryUnavailable)?;
    if sessions.remove(&id).is_none() {
        warn!("event=session_close module=bridge status=not_found");
        return Err(BridgeError::SessionNotFound(id));
    }
    info!(
        "event=session_close module=bridge status=ok active_sessions={}",
        sessions.len()
    );
    Ok(())
}
