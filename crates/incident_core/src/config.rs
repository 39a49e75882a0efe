//! Engine configuration.
//!
//! # Responsibility
//! - Hold render-facing constants (colors, fallback center, zoom).
//! - Load and validate configuration supplied by the host as JSON.
//!
//! # Invariants
//! - Every field has a default; a partial JSON object is valid input.
//! - A validated config always distinguishes highlight from default color.

use crate::model::record::Coordinate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_MARKER_COLOR: &str = "blue";
pub const HIGHLIGHT_MARKER_COLOR: &str = "red";
/// Dublin city centre; used when a projection is empty.
pub const FALLBACK_CENTER: Coordinate = Coordinate {
    lat: 53.3498,
    lon: -6.2603,
};
pub const DEFAULT_ZOOM: u8 = 10;
const MAX_ZOOM: u8 = 22;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid config JSON: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Render-facing view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub default_color: String,
    pub highlight_color: String,
    pub fallback_center: Coordinate,
    pub zoom: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_MARKER_COLOR.to_string(),
            highlight_color: HIGHLIGHT_MARKER_COLOR.to_string(),
            fallback_center: FALLBACK_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub view: ViewConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON config object.
    pub fn from_json_str(value: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let view = &self.view;
        if view.default_color.trim().is_empty() || view.highlight_color.trim().is_empty() {
            return Err(ConfigError::Invalid("marker colors cannot be empty".to_string()));
        }
        if view.default_color.trim() == view.highlight_color.trim() {
            return Err(ConfigError::Invalid(format!(
                "highlight color `{}` must differ from default color",
                view.highlight_color
            )));
        }
        Coordinate::new(view.fallback_center.lat, view.fallback_center.lon)
            .map_err(|err| ConfigError::Invalid(format!("fallback_center: {err}")))?;
        if view.zoom > MAX_ZOOM {
            return Err(ConfigError::Invalid(format!(
                "zoom {} exceeds maximum {MAX_ZOOM}",
                view.zoom
            )));
        }
        Ok(())
    }
}
