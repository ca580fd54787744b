//! Error types for Framecast
//!
//! All modules use `FramecastResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Framecast operations
pub type FramecastResult<T> = Result<T, FramecastError>;

/// All errors that can occur in Framecast
#[derive(Error, Debug)]
pub enum FramecastError {
    // Session errors; lookup misses are `Option`, never an error
    #[error("Session limit reached ({max} concurrent sessions)")]
    SessionLimit { max: usize },

    // Engine errors
    #[error("Engine failed to initialize: {0}")]
    EngineInit(String),

    #[error("Engine runtime failure: {0}")]
    EngineRuntime(String),

    // Outbound channel errors
    #[error("Outbound channel error: {0}")]
    Outbound(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Snapshot errors
    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(PathBuf),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FramecastError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// True when the failure should end only the affected session,
    /// leaving the rest of the sweep untouched.
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::EngineInit(_) | Self::EngineRuntime(_))
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::SessionLimit { .. } => {
                Some("Wait for an existing session to end, or raise session.max_sessions")
            }
            Self::ConfigInvalid { .. } => Some("Run: framecast config init --force"),
            _ => None,
        }
    }
}
