//! Focus session and interval records.
//!
//! A session spans one sitting at the timer; each countdown interval run inside
//! it is recorded as a [`FocusInterval`]. Both are persisted by the database
//! layer and only read by the statistics functions.

use crate::libs::error::FocusError;
use crate::libs::interval::IntervalType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_progress" => Ok(SessionStatus::InProgress),
            "completed" => Ok(SessionStatus::Completed),
            other => Err(FocusError::UnknownSessionStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: i64,
    pub started_at: DateTime<Utc>,
    /// `None` while the session is still open.
    pub ended_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
}

impl FocusSession {
    /// Open session starting at `started_at`, not yet stored.
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            started_at,
            ended_at: None,
            status: SessionStatus::InProgress,
        }
    }

    /// Closed session, mostly useful for building fixtures.
    pub fn closed(id: i64, started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> Self {
        Self {
            id,
            started_at,
            ended_at: Some(ended_at),
            status: SessionStatus::Completed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusInterval {
    pub id: i64,
    pub session_id: i64,
    pub interval_type: IntervalType,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}
