use crate::db::db::Db;
use crate::libs::error::{FocusError, FocusResult};
use crate::libs::interval::IntervalType;
use crate::libs::session::FocusInterval;
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_INTERVAL: &str = "INSERT INTO focus_intervals (session_id, interval_type, started_at) VALUES (?1, ?2, ?3)";
const UPDATE_END: &str = "UPDATE focus_intervals SET ended_at = ?1 WHERE id = ?2";
const SELECT_BY_ID: &str = "SELECT id, session_id, interval_type, started_at, ended_at FROM focus_intervals WHERE id = ?1";
const SELECT_FOR_SESSION: &str = "SELECT id, session_id, interval_type, started_at, ended_at FROM focus_intervals
    WHERE session_id = ?1 ORDER BY started_at, id";
const SESSION_EXISTS: &str = "SELECT 1 FROM focus_sessions WHERE id = ?1";

pub struct Intervals {
    conn: Connection,
}

impl Intervals {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Self { conn: db.conn }
    }

    /// Records the start of an interval inside session `session_id`.
    pub fn start(&mut self, session_id: i64, interval_type: IntervalType, started_at: DateTime<Utc>) -> FocusResult<FocusInterval> {
        let exists = self.conn.query_row(SESSION_EXISTS, [session_id], |_| Ok(())).optional()?;
        if exists.is_none() {
            return Err(FocusError::SessionNotFound(session_id));
        }

        let started_at = started_at.trunc_subsecs(0);
        self.conn
            .execute(INSERT_INTERVAL, params![session_id, interval_type.as_str(), started_at])?;

        Ok(FocusInterval {
            id: self.conn.last_insert_rowid(),
            session_id,
            interval_type,
            started_at,
            ended_at: None,
        })
    }

    pub fn end(&mut self, id: i64, ended_at: DateTime<Utc>) -> FocusResult<FocusInterval> {
        let updated = self.conn.execute(UPDATE_END, params![ended_at.trunc_subsecs(0), id])?;
        if updated == 0 {
            return Err(FocusError::IntervalNotFound(id));
        }
        self.get(id)?.ok_or(FocusError::IntervalNotFound(id))
    }

    pub fn get(&self, id: i64) -> FocusResult<Option<FocusInterval>> {
        let row = self.conn.query_row(SELECT_BY_ID, [id], raw_interval).optional()?;
        row.map(RawInterval::into_interval).transpose()
    }

    pub fn for_session(&self, session_id: i64) -> FocusResult<Vec<FocusInterval>> {
        let mut stmt = self.conn.prepare(SELECT_FOR_SESSION)?;
        let rows = stmt.query_map([session_id], raw_interval)?;

        let mut intervals = Vec::new();
        for row in rows {
            intervals.push(row?.into_interval()?);
        }
        Ok(intervals)
    }
}

struct RawInterval {
    id: i64,
    session_id: i64,
    interval_type: String,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl RawInterval {
    fn into_interval(self) -> FocusResult<FocusInterval> {
        Ok(FocusInterval {
            id: self.id,
            session_id: self.session_id,
            interval_type: self.interval_type.parse()?,
            started_at: self.started_at,
            ended_at: self.ended_at,
        })
    }
}

fn raw_interval(row: &Row<'_>) -> rusqlite::Result<RawInterval> {
    Ok(RawInterval {
        id: row.get(0)?,
        session_id: row.get(1)?,
        interval_type: row.get(2)?,
        started_at: row.get(3)?,
        ended_at: row.get(4)?,
    })
}
