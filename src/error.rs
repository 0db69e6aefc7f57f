//! Error taxonomy
//!
//! Only `ControllerError` and `ConfigError` ever reach a caller. Remote failures
//! are absorbed by the heuristic fallback; capture failures end the turn with
//! an apology.

use std::time::Duration;
use thiserror::Error;
use crate::types::InteractionState;

/// Why a remote evaluation did not produce a result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    #[error("remote evaluation timed out after {0:?}")]
    Timeout(Duration),

    #[error("remote evaluation failed with HTTP status {0}")]
    HttpError(u16),

    #[error("remote reply could not be parsed: {0}")]
    ParseError(String),

    #[error("remote request failed: {0}")]
    Network(String),

    #[error("remote evaluation is not configured")]
    NotConfigured,
}

/// Why no statement came out of a capture
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("no speech detected")]
    NoSpeech,

    #[error("capture device failed: {0}")]
    Device(String),

    #[error("capture is not supported on this device")]
    Unsupported,

    #[error("capture cancelled")]
    Cancelled,
}

/// Rejected requests against the interaction state machine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("cannot start a capture while {0}")]
    Busy(InteractionState),

    #[error("event {event} is not valid while {from}")]
    InvalidTransition {
        from: InteractionState,
        event: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
