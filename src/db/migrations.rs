//! Database schema migrations.
//!
//! Migrations are a static, version-ordered table. Each `up` step runs inside
//! one shared transaction and the applied versions are recorded in
//! `schema_migrations`, so opening the database again only applies what is
//! missing.
//!
//! ```rust
//! use tomato::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert!(get_db_version(&conn)? > 0);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::msg_debug;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use tracing::{error, info};

const CREATE_SCHEMA_MIGRATIONS: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER NOT NULL PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

type Up = fn(&Transaction) -> rusqlite::Result<()>;

struct Migration {
    version: u32,
    name: &'static str,
    up: Up,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_focus_tables",
        up: create_focus_tables,
    },
    Migration {
        version: 2,
        name: "create_counters",
        up: create_counters,
    },
];

/// Focus sessions and the intervals run inside them.
fn create_focus_tables(tx: &Transaction) -> rusqlite::Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS focus_sessions (
            id INTEGER NOT NULL PRIMARY KEY,
            started_at TIMESTAMP NOT NULL,
            ended_at TIMESTAMP,
            status TEXT NOT NULL DEFAULT 'in_progress'
        );
        CREATE TABLE IF NOT EXISTS focus_intervals (
            id INTEGER NOT NULL PRIMARY KEY,
            session_id INTEGER NOT NULL REFERENCES focus_sessions(id) ON DELETE CASCADE,
            interval_type TEXT NOT NULL,
            started_at TIMESTAMP NOT NULL,
            ended_at TIMESTAMP
        );
        CREATE INDEX IF NOT EXISTS idx_focus_sessions_started_at ON focus_sessions(started_at);
        CREATE INDEX IF NOT EXISTS idx_focus_intervals_session_id ON focus_intervals(session_id);",
    )
}

/// Key/value counters backing the completed interval count.
fn create_counters(tx: &Transaction) -> rusqlite::Result<()> {
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS counters (
            key TEXT NOT NULL PRIMARY KEY,
            value INTEGER NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        );",
    )
}

/// One row of the migration log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: u32,
    pub name: String,
    pub applied_at: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MigrationManager;

impl MigrationManager {
    pub fn new() -> Self {
        Self
    }

    /// Highest version known to this build.
    pub fn latest_version(&self) -> u32 {
        MIGRATIONS.last().map_or(0, |m| m.version)
    }

    /// Highest applied version; 0 for a database that was never migrated.
    pub fn current_version(&self, conn: &Connection) -> Result<u32> {
        if !has_migration_log(conn)? {
            return Ok(0);
        }
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    /// Applies every pending migration in a single transaction.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(CREATE_SCHEMA_MIGRATIONS, [])?;
        let current = self.current_version(conn)?;

        let tx = conn.transaction()?;
        let mut applied = 0;
        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            if let Err(e) = (migration.up)(&tx) {
                error!(version = migration.version, name = migration.name, error = %e, "migration failed");
                return Err(e.into());
            }
            tx.execute(
                "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            info!(version = migration.version, name = migration.name, "migration applied");
            applied += 1;
        }
        tx.commit()?;

        if applied == 0 {
            msg_debug!("Database schema is current");
        }
        Ok(())
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        if !has_migration_log(conn)? {
            return Ok(false);
        }
        let found = conn
            .query_row("SELECT 1 FROM schema_migrations WHERE version = ?1", [version], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    /// Applied migrations, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<AppliedMigration>> {
        if !has_migration_log(conn)? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM schema_migrations ORDER BY version")?;
        let rows = stmt.query_map([], |row| {
            Ok(AppliedMigration {
                version: row.get(0)?,
                name: row.get(1)?,
                applied_at: row.get(2)?,
            })
        })?;

        let mut history = Vec::new();
        for row in rows {
            history.push(row?);
        }
        Ok(history)
    }
}

fn has_migration_log(conn: &Connection) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations'",
            [],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(manager.current_version(conn)? < manager.latest_version())
}
