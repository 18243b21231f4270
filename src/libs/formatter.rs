//! Time formatting utilities for user-friendly display.
//!
//! Two formats are used throughout the application:
//!
//! - **Clock** (`MM:SS`): remaining time of the running countdown. Minutes are
//!   not wrapped into hours, so a 90 minute interval shows as `90:00`.
//! - **Duration** (`HH:MM`): accumulated focus time in stats and session tables.
//!   Negative durations are treated as zero.
//!
//! ```rust
//! use tomato::libs::formatter::{format_clock, format_duration};
//! use chrono::Duration;
//!
//! assert_eq!(format_clock(25 * 60), "25:00");
//! assert_eq!(format_clock(61), "01:01");
//! assert_eq!(format_duration(&Duration::minutes(90)), "01:30");
//! assert_eq!(format_duration(&Duration::hours(-1)), "00:00");
//! ```

use crate::libs::session::FocusSession;
use crate::libs::stats::session_duration_seconds;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One row of a session table, with every value pre-formatted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedSession {
    /// Sequential number in the listing, starting from 1.
    pub id: i32,
    /// Local start time, `HH:MM`.
    pub start: String,
    /// Local end time, `HH:MM`, or `-` while the session is open.
    pub end: String,
    /// Elapsed time, `HH:MM`.
    pub duration: String,
    pub status: String,
}

impl FormattedSession {
    /// Table rows for `sessions`; open sessions count up to `now`.
    pub fn from_sessions<Tz: TimeZone>(sessions: &[FocusSession], now: &DateTime<Tz>) -> Vec<Self> {
        sessions
            .iter()
            .enumerate()
            .map(|(index, session)| FormattedSession {
                id: index as i32 + 1,
                start: format_time(&session.started_at),
                end: session.ended_at.as_ref().map(format_time).unwrap_or_else(|| "-".to_string()),
                duration: format_seconds(session_duration_seconds(session, now)),
                status: session.status.to_string(),
            })
            .collect()
    }
}

/// Formats a number of seconds as `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Formats a `chrono::Duration` as `HH:MM`, clamping negatives to zero.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Same as [`format_duration`] for a plain number of seconds.
pub fn format_seconds(seconds: i64) -> String {
    format_duration(&Duration::seconds(seconds))
}

/// Local wall-clock time of a UTC timestamp, `HH:MM`.
pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

/// Text progress bar, e.g. `[######----]` for 0.6 at width 10.
pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
