//! SQLite-backed [`CounterStore`].

use crate::db::db::Db;
use crate::libs::counter::CounterStore;
use crate::libs::error::FocusResult;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_VALUE: &str = "SELECT value FROM counters WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO counters (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

pub struct SqliteCounterStore {
    conn: Connection,
}

impl SqliteCounterStore {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self::with_db(Db::new()?))
    }

    pub fn with_db(db: Db) -> Self {
        Self { conn: db.conn }
    }
}

impl CounterStore for SqliteCounterStore {
    fn load(&self, key: &str) -> FocusResult<Option<u32>> {
        let value = self
            .conn
            .query_row(SELECT_VALUE, [key], |row| row.get::<_, u32>(0))
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, value: u32) -> FocusResult<()> {
        self.conn.execute(UPSERT_VALUE, params![key, value])?;
        Ok(())
    }
}
