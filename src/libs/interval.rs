//! Interval types, the fixed duration table and the interval policy.
//!
//! The policy is a pure function: after a Focus interval the next interval is
//! a break, and every `long_break_every`-th completed focus interval earns a
//! long break instead of a short one. Breaks always lead back to Focus.
//!
//! ```rust
//! use tomato::libs::interval::{next_interval, IntervalType, LONG_BREAK_INTERVAL};
//!
//! // Fourth completed focus interval -> long break
//! assert_eq!(next_interval(IntervalType::Focus, 3, LONG_BREAK_INTERVAL), IntervalType::LongBreak);
//! assert_eq!(next_interval(IntervalType::Focus, 1, LONG_BREAK_INTERVAL), IntervalType::ShortBreak);
//! assert_eq!(next_interval(IntervalType::LongBreak, 4, LONG_BREAK_INTERVAL), IntervalType::Focus);
//! ```

use crate::libs::error::{FocusError, FocusResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Focus intervals completed before a long break replaces the short one.
pub const LONG_BREAK_INTERVAL: u32 = 4;

pub const FOCUS_DURATION: u32 = 25 * 60;
pub const SHORT_BREAK_DURATION: u32 = 5 * 60;
pub const LONG_BREAK_DURATION: u32 = 15 * 60;

/// Kind of interval the countdown is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalType {
    #[serde(rename = "focus")]
    Focus,
    #[serde(rename = "break")]
    ShortBreak,
    #[serde(rename = "long_break")]
    LongBreak,
}

impl IntervalType {
    /// Storage name, shared with the `focus_intervals.interval_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalType::Focus => "focus",
            IntervalType::ShortBreak => "break",
            IntervalType::LongBreak => "long_break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, IntervalType::Focus)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            IntervalType::Focus => "🍅",
            IntervalType::ShortBreak => "☕",
            IntervalType::LongBreak => "🌴",
        }
    }
}

impl fmt::Display for IntervalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntervalType::Focus => "focus",
            IntervalType::ShortBreak => "short break",
            IntervalType::LongBreak => "long break",
        };
        f.write_str(label)
    }
}

impl FromStr for IntervalType {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "focus" => Ok(IntervalType::Focus),
            "break" | "short_break" => Ok(IntervalType::ShortBreak),
            "long_break" => Ok(IntervalType::LongBreak),
            other => Err(FocusError::UnknownIntervalType(other.to_string())),
        }
    }
}

/// Returns the interval that follows `current`.
///
/// `completed_focus_intervals` is the count *before* the interval that is just
/// finishing; when `current` is Focus the count is bumped by one before the
/// cadence check. A `long_break_every` of zero never happens in practice
/// ([`Durations::new`] rejects it) and is treated as "no long breaks".
pub fn next_interval(current: IntervalType, completed_focus_intervals: u32, long_break_every: u32) -> IntervalType {
    match current {
        IntervalType::Focus => {
            let new_count = completed_focus_intervals.saturating_add(1);
            if long_break_every != 0 && new_count % long_break_every == 0 {
                IntervalType::LongBreak
            } else {
                IntervalType::ShortBreak
            }
        }
        IntervalType::ShortBreak | IntervalType::LongBreak => IntervalType::Focus,
    }
}

/// Fixed duration table, in seconds, plus the long-break cadence.
///
/// Values are validated once at construction and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durations {
    focus: u32,
    short_break: u32,
    long_break: u32,
    long_break_every: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus: FOCUS_DURATION,
            short_break: SHORT_BREAK_DURATION,
            long_break: LONG_BREAK_DURATION,
            long_break_every: LONG_BREAK_INTERVAL,
        }
    }
}

impl Durations {
    pub fn new(focus: u32, short_break: u32, long_break: u32, long_break_every: u32) -> FocusResult<Self> {
        for (interval, seconds) in [
            (IntervalType::Focus, focus),
            (IntervalType::ShortBreak, short_break),
            (IntervalType::LongBreak, long_break),
        ] {
            if seconds == 0 {
                return Err(FocusError::InvalidDuration { interval });
            }
        }
        if long_break_every == 0 {
            return Err(FocusError::InvalidLongBreakInterval);
        }

        Ok(Self {
            focus,
            short_break,
            long_break,
            long_break_every,
        })
    }

    pub fn duration_for(&self, interval: IntervalType) -> u32 {
        match interval {
            IntervalType::Focus => self.focus,
            IntervalType::ShortBreak => self.short_break,
            IntervalType::LongBreak => self.long_break,
        }
    }

    pub fn long_break_every(&self) -> u32 {
        self.long_break_every
    }

    pub fn next_interval(&self, current: IntervalType, completed_focus_intervals: u32) -> IntervalType {
        next_interval(current, completed_focus_intervals, self.long_break_every)
    }
}
