//! Persistent key/value storage for the completed focus interval counter.
//!
//! The countdown engine only needs two capabilities, `load` and `save`, so the
//! backend is pluggable:
//!
//! - [`MemoryCounterStore`]: process-local map, shared between clones (tests)
//! - [`JsonCounterStore`]: a small JSON object file in the data directory
//! - [`SqliteCounterStore`](crate::db::counters::SqliteCounterStore): the `counters` table
//!
//! Stores report failures as `Err`; the engine decides how to recover from
//! them (fall back to zero on read, log and continue on write).

use crate::libs::data_storage::DataStorage;
use crate::libs::error::FocusResult;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Key under which the completed focus interval count is persisted.
pub const COMPLETED_INTERVALS_KEY: &str = "focus-timer-completed-intervals";

/// File name of the JSON counter store inside the data directory.
pub const COUNTER_FILE_NAME: &str = "counters.json";

/// Durable integer key/value capability used by the countdown engine.
///
/// Single writer is assumed; implementations need no conflict resolution.
pub trait CounterStore: Send {
    /// Returns the stored value, or `None` when the key was never written.
    fn load(&self, key: &str) -> FocusResult<Option<u32>>;

    fn save(&mut self, key: &str, value: u32) -> FocusResult<()>;
}

/// In-memory store. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCounterStore {
    values: Arc<Mutex<HashMap<String, u32>>>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a single value.
    pub fn with_value(key: &str, value: u32) -> Self {
        let store = Self::new();
        store.values.lock().insert(key.to_string(), value);
        store
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        self.values.lock().get(key).copied()
    }
}

impl CounterStore for MemoryCounterStore {
    fn load(&self, key: &str) -> FocusResult<Option<u32>> {
        Ok(self.get(key))
    }

    fn save(&mut self, key: &str, value: u32) -> FocusResult<()> {
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// JSON object file, `{ "key": value, ... }`, rewritten on every save.
#[derive(Debug, Clone)]
pub struct JsonCounterStore {
    path: PathBuf,
}

impl JsonCounterStore {
    /// Store backed by `counters.json` in the application data directory.
    pub fn new() -> anyhow::Result<Self> {
        let path = DataStorage::new().get_path(COUNTER_FILE_NAME)?;
        Ok(Self { path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> FocusResult<BTreeMap<String, u32>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl CounterStore for JsonCounterStore {
    fn load(&self, key: &str) -> FocusResult<Option<u32>> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn save(&mut self, key: &str, value: u32) -> FocusResult<()> {
        // A corrupted file is replaced rather than blocking every future save
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}
