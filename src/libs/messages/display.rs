//! Display implementation for application messages.
//!
//! Single source of truth for user-facing text; the `msg_*!` macros only
//! decide where the text goes.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults will be used".to_string(),
            Message::ConfigModuleTimer => "Timer settings".to_string(),
            Message::ConfigCurrent => "Current timer settings".to_string(),
            Message::InvalidTimerConfig(reason) => format!("Invalid timer configuration: {}", reason),
            Message::ValueMustBePositive => "Value must be greater than zero".to_string(),
            Message::PromptFocusDuration => "Focus interval (minutes)".to_string(),
            Message::PromptShortBreakDuration => "Short break (minutes)".to_string(),
            Message::PromptLongBreakDuration => "Long break (minutes)".to_string(),
            Message::PromptLongBreakInterval => "Long break after every N focus intervals".to_string(),
            Message::PromptStoreBackend => "Where to keep the completed interval counter".to_string(),

            // === TIMER MESSAGES ===
            Message::IntervalStarted { interval, clock } => format!("Starting {} ({})", interval, clock),
            Message::IntervalCompleted { from, to } => format!("{} finished, next up: {}", capitalize(from), to),
            Message::IntervalProgress { emoji, interval, clock, bar } => format!("{} {:<12} {} {}", emoji, interval, clock, bar),
            Message::TimerPaused(clock) => format!("Timer paused with {} left", clock),
            Message::TimerInterrupted => "Timer interrupted".to_string(),
            Message::CyclesFinished(count) => format!("Finished {} interval(s)", count),
            Message::CompletedFocusIntervals(count) => format!("Completed focus intervals: {}", count),
            Message::NextLongBreakIn(count) => format!("Long break after {} more focus interval(s)", count),
            Message::NextInterval(interval) => format!("Next interval: {}", interval),
            Message::CounterReset => "Completed focus intervals reset to 0".to_string(),
            Message::CounterStoreUnavailable { backend, error } => {
                format!("Counter store '{}' unavailable ({}), counting in memory for this run", backend, error)
            }
            Message::StatusHeader => "🍅 Focus timer status".to_string(),

            // === SESSION MESSAGES ===
            Message::SessionStarted(id) => format!("Focus session #{} started", id),
            Message::SessionEnded { id, duration } => format!("Focus session #{} ended after {}", id, duration),
            Message::SessionRecordFailed(error) => format!("Failed to record focus session: {}", error),
            Message::SessionsHeader(date) => format!("Focus sessions for {}", date),
            Message::NoSessionsForDate(date) => format!("No focus sessions found for {}", date),

            // === STATS MESSAGES ===
            Message::StatsHeader => "📊 Focus statistics".to_string(),
            Message::TodayFocusTime(duration) => format!("Today's focus time: {}", duration),
            Message::TotalFocusTime(duration) => format!("Total focus time: {}", duration),
            Message::AverageFocusTime(duration) => format!("Average per active day: {}", duration),
            Message::TodaySessions(count) => format!("Sessions today: {}", count),
            Message::TotalSessions(count) => format!("Sessions overall: {}", count),
            Message::OpenSessionNotice => "A session is still open; its time counts up to now".to_string(),

            // === SIGNAL MESSAGES ===
            Message::FailedToCreateSigintHandler => "Failed to install Ctrl+C handler".to_string(),
            Message::ReceivedInterrupt => "Received Ctrl+C, pausing timer".to_string(),

            // === GENERIC ===
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),
        };
        write!(f, "{}", s)
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
