//! Configuration management for the tomato application.
//!
//! Settings live in `config.json` in the platform data directory resolved by
//! [`DataStorage`]. A missing file is not an error: the application runs with
//! the classic Pomodoro defaults (25 / 5 / 15 minutes, long break every fourth
//! focus interval, counter kept in SQLite).
//!
//! ```rust,no_run
//! use tomato::libs::config::Config;
//!
//! let config = Config::read()?;
//! let durations = config.timer_or_default().durations()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::counter::{CounterStore, JsonCounterStore, MemoryCounterStore};
use crate::libs::error::{FocusError, FocusResult};
use crate::libs::interval::{Durations, LONG_BREAK_INTERVAL};
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::str::FromStr;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Where the completed focus interval counter is persisted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// `counters` table of the application database.
    #[default]
    Sqlite,
    /// `counters.json` in the data directory.
    Json,
    /// Process memory only; the counter is lost on exit.
    Memory,
}

impl StoreBackend {
    pub const ALL: [StoreBackend; 3] = [StoreBackend::Sqlite, StoreBackend::Json, StoreBackend::Memory];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Json => "json",
            StoreBackend::Memory => "memory",
        }
    }

    /// Opens the counter store for this backend.
    pub fn open(&self) -> Result<Box<dyn CounterStore>> {
        Ok(match self {
            StoreBackend::Sqlite => Box::new(crate::db::counters::SqliteCounterStore::new()?),
            StoreBackend::Json => Box::new(JsonCounterStore::new()?),
            StoreBackend::Memory => Box::new(MemoryCounterStore::new()),
        })
    }

    /// Opens the counter store, falling back to an in-memory one when the
    /// backend cannot be opened. The countdown then starts from 0.
    pub fn open_or_memory(&self) -> Box<dyn CounterStore> {
        self.open().unwrap_or_else(|e| {
            msg_warning!(Message::CounterStoreUnavailable {
                backend: self.to_string(),
                error: e.to_string(),
            });
            Box::new(MemoryCounterStore::new())
        })
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "json" => Ok(StoreBackend::Json),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(FocusError::UnknownStoreBackend(other.to_string())),
        }
    }
}

/// Timer settings. Durations are in minutes here and converted to seconds
/// when the [`Durations`] table is built.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimerConfig {
    pub focus_duration: u32,
    pub short_break_duration: u32,
    pub long_break_duration: u32,
    /// Every N-th completed focus interval is followed by a long break.
    pub long_break_interval: u32,
    #[serde(default)]
    pub store: StoreBackend,
}

impl Default for TimerConfig {
    fn default() -> Self {
        TimerConfig {
            focus_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            long_break_interval: LONG_BREAK_INTERVAL,
            store: StoreBackend::Sqlite,
        }
    }
}

impl TimerConfig {
    /// Validated duration table; zero durations or cadence are rejected.
    pub fn durations(&self) -> FocusResult<Durations> {
        Durations::new(
            self.focus_duration.saturating_mul(60),
            self.short_break_duration.saturating_mul(60),
            self.long_break_duration.saturating_mul(60),
            self.long_break_interval,
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,
}

impl Config {
    /// Loads `config.json`, or the default configuration when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn timer_or_default(&self) -> TimerConfig {
        self.timer.clone().unwrap_or_default()
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.timer_or_default();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleTimer);

        let focus_duration = Input::with_theme(&theme)
            .with_prompt(Message::PromptFocusDuration.to_string())
            .default(default.focus_duration)
            .validate_with(positive)
            .interact_text()?;
        let short_break_duration = Input::with_theme(&theme)
            .with_prompt(Message::PromptShortBreakDuration.to_string())
            .default(default.short_break_duration)
            .validate_with(positive)
            .interact_text()?;
        let long_break_duration = Input::with_theme(&theme)
            .with_prompt(Message::PromptLongBreakDuration.to_string())
            .default(default.long_break_duration)
            .validate_with(positive)
            .interact_text()?;
        let long_break_interval = Input::with_theme(&theme)
            .with_prompt(Message::PromptLongBreakInterval.to_string())
            .default(default.long_break_interval)
            .validate_with(positive)
            .interact_text()?;

        let backends: Vec<&str> = StoreBackend::ALL.iter().map(StoreBackend::as_str).collect();
        let current = StoreBackend::ALL.iter().position(|b| *b == default.store).unwrap_or(0);
        let selected = Select::with_theme(&theme)
            .with_prompt(Message::PromptStoreBackend.to_string())
            .items(&backends)
            .default(current)
            .interact()?;

        config.timer = Some(TimerConfig {
            focus_duration,
            short_break_duration,
            long_break_duration,
            long_break_interval,
            store: StoreBackend::ALL[selected],
        });

        Ok(config)
    }
}

fn positive(value: &u32) -> std::result::Result<(), String> {
    if *value == 0 {
        Err(Message::ValueMustBePositive.to_string())
    } else {
        Ok(())
    }
}
