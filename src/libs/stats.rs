//! Focus time statistics derived from session records.
//!
//! All functions are pure and take the current instant explicitly, so results
//! are deterministic and tests can pin `now`. "Today" is the calendar date of
//! `now` in `now`'s own timezone: the CLI passes `Local::now()` to get the
//! user's local day, a server would pass the user's zone.
//!
//! An open session (no `ended_at`) counts up to `now` and is recomputed on every
//! call. If the clock moved backwards and an open session appears to start in
//! the future, its duration is clamped to zero.

use crate::libs::session::FocusSession;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

/// Elapsed seconds of a single session, never negative.
pub fn session_duration_seconds<Tz: TimeZone>(session: &FocusSession, now: &DateTime<Tz>) -> i64 {
    let end = session.ended_at.unwrap_or_else(|| now.with_timezone(&Utc));
    (end - session.started_at).num_seconds().max(0)
}

/// Sum of all session durations regardless of date.
pub fn total_focus_seconds<Tz: TimeZone>(sessions: &[FocusSession], now: &DateTime<Tz>) -> i64 {
    sessions.iter().map(|s| session_duration_seconds(s, now)).sum()
}

/// Sessions whose start falls on `now`'s calendar date.
pub fn todays_sessions<'a, Tz: TimeZone>(sessions: &'a [FocusSession], now: &DateTime<Tz>) -> Vec<&'a FocusSession> {
    let today = now.date_naive();
    let tz = now.timezone();
    sessions
        .iter()
        .filter(|s| s.started_at.with_timezone(&tz).date_naive() == today)
        .collect()
}

/// Sum of durations of the sessions started today.
pub fn todays_focus_seconds<Tz: TimeZone>(sessions: &[FocusSession], now: &DateTime<Tz>) -> i64 {
    todays_sessions(sessions, now)
        .into_iter()
        .map(|s| session_duration_seconds(s, now))
        .sum()
}

/// Focus seconds per start date (in `now`'s timezone), sorted by date.
pub fn daily_totals<Tz: TimeZone>(sessions: &[FocusSession], now: &DateTime<Tz>) -> BTreeMap<NaiveDate, i64> {
    let tz = now.timezone();
    let mut totals = BTreeMap::new();
    for session in sessions {
        let date = session.started_at.with_timezone(&tz).date_naive();
        *totals.entry(date).or_insert(0) += session_duration_seconds(session, now);
    }
    totals
}

/// Figures shown by the `stats` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusSummary {
    pub today_seconds: i64,
    pub total_seconds: i64,
    pub today_sessions: usize,
    pub total_sessions: usize,
    pub has_open_session: bool,
}

impl FocusSummary {
    pub fn from_sessions<Tz: TimeZone>(sessions: &[FocusSession], now: &DateTime<Tz>) -> Self {
        Self {
            today_seconds: todays_focus_seconds(sessions, now),
            total_seconds: total_focus_seconds(sessions, now),
            today_sessions: todays_sessions(sessions, now).len(),
            total_sessions: sessions.len(),
            has_open_session: sessions.iter().any(FocusSession::is_open),
        }
    }

    /// Average seconds per day over the days that have any sessions.
    pub fn average_per_day<Tz: TimeZone>(sessions: &[FocusSession], now: &DateTime<Tz>) -> i64 {
        let totals = daily_totals(sessions, now);
        if totals.is_empty() {
            return 0;
        }
        totals.values().sum::<i64>() / totals.len() as i64
    }
}
