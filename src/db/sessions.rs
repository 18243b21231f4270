//! Focus session records.
//!
//! A session is opened when the timer command starts and closed when it ends.
//! Timestamps are stored as UTC with whole-second precision.

use crate::db::db::Db;
use crate::libs::error::{FocusError, FocusResult};
use crate::libs::session::{FocusSession, SessionStatus};
use chrono::{DateTime, Duration, NaiveDate, SubsecRound, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_SESSION: &str = "INSERT INTO focus_sessions (started_at, status) VALUES (?1, ?2)";
const UPDATE_END: &str = "UPDATE focus_sessions SET ended_at = ?1, status = ?2 WHERE id = ?3";
const SELECT_BY_ID: &str = "SELECT id, started_at, ended_at, status FROM focus_sessions WHERE id = ?1";
const SELECT_ALL: &str = "SELECT id, started_at, ended_at, status FROM focus_sessions ORDER BY started_at";
const SELECT_OPEN: &str = "SELECT id, started_at, ended_at, status FROM focus_sessions WHERE ended_at IS NULL ORDER BY started_at";
const SELECT_BETWEEN: &str = "SELECT id, started_at, ended_at, status FROM focus_sessions
    WHERE julianday(started_at) >= julianday(?1) AND julianday(started_at) < julianday(?2)
    ORDER BY started_at";

pub struct Sessions {
    conn: Connection,
}

impl Sessions {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    /// Opens a new in-progress session.
    pub fn start(&mut self, started_at: DateTime<Utc>) -> FocusResult<FocusSession> {
        let started_at = started_at.trunc_subsecs(0);
        self.conn
            .execute(INSERT_SESSION, params![started_at, SessionStatus::InProgress.as_str()])?;

        Ok(FocusSession {
            id: self.conn.last_insert_rowid(),
            ..FocusSession::new(started_at)
        })
    }

    /// Closes session `id` and marks it completed.
    pub fn end(&mut self, id: i64, ended_at: DateTime<Utc>) -> FocusResult<FocusSession> {
        let ended_at = ended_at.trunc_subsecs(0);
        let updated = self
            .conn
            .execute(UPDATE_END, params![ended_at, SessionStatus::Completed.as_str(), id])?;
        if updated == 0 {
            return Err(FocusError::SessionNotFound(id));
        }
        self.get(id)?.ok_or(FocusError::SessionNotFound(id))
    }

    pub fn get(&self, id: i64) -> FocusResult<Option<FocusSession>> {
        let row = self.conn.query_row(SELECT_BY_ID, [id], raw_session).optional()?;
        row.map(RawSession::into_session).transpose()
    }

    pub fn all(&self) -> FocusResult<Vec<FocusSession>> {
        self.query(SELECT_ALL, params![])
    }

    /// Sessions that were started but never ended.
    pub fn open(&self) -> FocusResult<Vec<FocusSession>> {
        self.query(SELECT_OPEN, params![])
    }

    /// Sessions started on `date` as seen in timezone `tz`.
    pub fn for_date<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> FocusResult<Vec<FocusSession>> {
        let start = day_start(date, tz);
        let end = day_start(date + Duration::days(1), tz);
        self.query(SELECT_BETWEEN, params![start, end])
    }

    fn query(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> FocusResult<Vec<FocusSession>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, raw_session)?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?.into_session()?);
        }
        Ok(sessions)
    }
}

/// UTC instant of local midnight; a midnight skipped by DST falls back to UTC midnight.
fn day_start<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

struct RawSession {
    id: i64,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    status: String,
}

impl RawSession {
    fn into_session(self) -> FocusResult<FocusSession> {
        Ok(FocusSession {
            id: self.id,
            started_at: self.started_at,
            ended_at: self.ended_at,
            status: self.status.parse()?,
        })
    }
}

fn raw_session(row: &Row<'_>) -> rusqlite::Result<RawSession> {
    Ok(RawSession {
        id: row.get(0)?,
        started_at: row.get(1)?,
        ended_at: row.get(2)?,
        status: row.get(3)?,
    })
}
