//! SQLite persistence for focus sessions, intervals and counters.
//!
//! ```rust
//! use tomato::db::{db::Db, sessions::Sessions};
//! use chrono::Utc;
//!
//! let mut sessions = Sessions::with_db(Db::in_memory()?);
//! let session = sessions.start(Utc::now())?;
//! sessions.end(session.id, Utc::now())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection handle; opening it applies pending migrations.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Focus session records.
pub mod sessions;

/// Countdown intervals recorded inside a session.
pub mod intervals;

/// Key/value counters for the completed interval count.
pub mod counters;
