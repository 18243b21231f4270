//! Library error types.
//!
//! The engine and the storage layer return [`FocusError`]; the command layer
//! wraps it in `anyhow::Error` together with the user-facing [`Message`] text.
//!
//! [`Message`]: crate::libs::messages::Message

use crate::libs::interval::IntervalType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FocusError {
    /// A zero-length interval would break `0 < remaining <= total`.
    #[error("duration for {interval} interval must be greater than zero")]
    InvalidDuration { interval: IntervalType },

    #[error("long break interval must be at least 1 focus interval")]
    InvalidLongBreakInterval,

    #[error("unknown counter store backend: {0}")]
    UnknownStoreBackend(String),

    #[error("focus session {0} not found")]
    SessionNotFound(i64),

    #[error("focus interval {0} not found")]
    IntervalNotFound(i64),

    #[error("unknown interval type: {0}")]
    UnknownIntervalType(String),

    #[error("unknown session status: {0}")]
    UnknownSessionStatus(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FocusResult<T> = std::result::Result<T, FocusError>;
