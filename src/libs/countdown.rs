//! Countdown engine for focus and break intervals.
//!
//! [`Countdown`] owns the live [`CountdownState`] and is mutated only through
//! [`start`](Countdown::start), [`pause`](Countdown::pause),
//! [`tick`](Countdown::tick) and [`reset`](Countdown::reset). It performs no
//! scheduling of its own: something external calls `tick` once per second
//! while the countdown is running (see [`FocusTimer`](crate::libs::timer::FocusTimer)).
//!
//! When an interval reaches zero the engine stops, asks the interval policy
//! for the next interval and loads its duration. It never resumes on its own;
//! the caller has to `start` again.
//!
//! ```rust
//! use tomato::libs::countdown::{Countdown, Tick};
//! use tomato::libs::counter::MemoryCounterStore;
//! use tomato::libs::interval::{Durations, IntervalType};
//!
//! let durations = Durations::new(2, 1, 3, 4).unwrap();
//! let mut countdown = Countdown::new(durations, Box::new(MemoryCounterStore::new()));
//!
//! countdown.start();
//! assert_eq!(countdown.tick(), Tick::Counting(1));
//! assert!(matches!(countdown.tick(), Tick::Completed(_)));
//! assert_eq!(countdown.state().interval_type, IntervalType::ShortBreak);
//! assert!(!countdown.state().is_running);
//! ```

use crate::libs::counter::{CounterStore, COMPLETED_INTERVALS_KEY};
use crate::libs::interval::{Durations, IntervalType};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Read-only view of the engine, suitable for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountdownState {
    pub remaining_seconds: u32,
    /// Duration the current interval started with.
    pub total_seconds: u32,
    pub interval_type: IntervalType,
    pub is_running: bool,
    pub completed_focus_intervals: u32,
}

impl CountdownState {
    /// Share of the current interval already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        f64::from(elapsed) / f64::from(self.total_seconds)
    }

    /// Remaining time as `MM:SS`.
    pub fn format_clock(&self) -> String {
        crate::libs::formatter::format_clock(self.remaining_seconds)
    }
}

/// Outcome of an interval reaching zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub from: IntervalType,
    pub to: IntervalType,
    /// Counter value after the transition.
    pub completed_focus_intervals: u32,
}

/// Result of a single [`Countdown::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not running, nothing changed.
    Idle,
    /// Still counting; carries the new remaining seconds.
    Counting(u32),
    /// The interval finished and the next one is loaded (not running).
    Completed(Transition),
}

pub struct Countdown {
    state: CountdownState,
    durations: Durations,
    store: Box<dyn CounterStore>,
}

impl Countdown {
    /// Creates a stopped Focus countdown and restores the completed interval
    /// counter from `store`. A failed read falls back to zero.
    pub fn new(durations: Durations, store: Box<dyn CounterStore>) -> Self {
        let completed_focus_intervals = match store.load(COMPLETED_INTERVALS_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                warn!(error = %e, "failed to restore completed focus intervals, starting from 0");
                0
            }
        };
        let focus = durations.duration_for(IntervalType::Focus);

        Self {
            state: CountdownState {
                remaining_seconds: focus,
                total_seconds: focus,
                interval_type: IntervalType::Focus,
                is_running: false,
                completed_focus_intervals,
            },
            durations,
            store,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Focus intervals left until the next long break, counting the current one.
    pub fn intervals_until_long_break(&self) -> u32 {
        let every = self.durations.long_break_every();
        every - self.state.completed_focus_intervals % every
    }

    pub fn start(&mut self) {
        if !self.state.is_running {
            debug!(interval = %self.state.interval_type, remaining = self.state.remaining_seconds, "countdown started");
        }
        self.state.is_running = true;
    }

    pub fn pause(&mut self) {
        if self.state.is_running {
            debug!(interval = %self.state.interval_type, remaining = self.state.remaining_seconds, "countdown paused");
        }
        self.state.is_running = false;
    }

    /// Flips between running and paused; returns the new running flag.
    pub fn toggle(&mut self) -> bool {
        if self.state.is_running {
            self.pause();
        } else {
            self.start();
        }
        self.state.is_running
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        if !self.state.is_running {
            return Tick::Idle;
        }
        if self.state.remaining_seconds == 0 {
            // Completion always stops the countdown, so this is not reachable
            warn!("tick on a running countdown with no time left, ignoring");
            return Tick::Idle;
        }

        self.state.remaining_seconds -= 1;
        if self.state.remaining_seconds > 0 {
            return Tick::Counting(self.state.remaining_seconds);
        }

        Tick::Completed(self.complete_interval())
    }

    fn complete_interval(&mut self) -> Transition {
        self.state.is_running = false;

        let from = self.state.interval_type;
        let to = self.durations.next_interval(from, self.state.completed_focus_intervals);

        if from == IntervalType::Focus {
            self.state.completed_focus_intervals = self.state.completed_focus_intervals.saturating_add(1);
            self.persist_counter();
        }

        let duration = self.durations.duration_for(to);
        self.state.interval_type = to;
        self.state.remaining_seconds = duration;
        self.state.total_seconds = duration;

        info!(
            from = %from,
            to = %to,
            completed = self.state.completed_focus_intervals,
            "interval completed"
        );

        Transition {
            from,
            to,
            completed_focus_intervals: self.state.completed_focus_intervals,
        }
    }

    /// Stops the countdown and returns to a fresh Focus interval with the
    /// counter cleared, both in memory and in the store.
    pub fn reset(&mut self) {
        let focus = self.durations.duration_for(IntervalType::Focus);
        self.state = CountdownState {
            remaining_seconds: focus,
            total_seconds: focus,
            interval_type: IntervalType::Focus,
            is_running: false,
            completed_focus_intervals: 0,
        };
        self.persist_counter();
        debug!("countdown reset");
    }

    fn persist_counter(&mut self) {
        let value = self.state.completed_focus_intervals;
        if let Err(e) = self.store.save(COMPLETED_INTERVALS_KEY, value) {
            // In-memory state stays authoritative for this session
            warn!(error = %e, value, "failed to persist completed focus intervals");
        }
    }
}
