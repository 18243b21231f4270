//! Focus timer controller.
//!
//! [`FocusTimer`] binds a [`Countdown`] to a [`Scheduler`] and owns the single
//! tick source that drives it:
//!
//! - `start` installs a tick source, cancelling any previous one first
//! - `pause` and `reset` retire the source under the countdown lock before
//!   touching the countdown, so a tick still in flight on another thread
//!   neither changes the state nor emits an event after they return
//! - a tick that completes an interval finishes its own source; the next
//!   interval waits for another `start`
//!
//! State changes are published as [`TimerEvent`]s on a broadcast channel.

use crate::libs::countdown::{Countdown, CountdownState, Tick, Transition};
use crate::libs::scheduler::{Scheduler, TickSource, TickTask};
use parking_lot::Mutex;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::debug;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    Started(CountdownState),
    Paused(CountdownState),
    Tick(CountdownState),
    Completed { transition: Transition, state: CountdownState },
    Reset(CountdownState),
}

pub struct FocusTimer {
    countdown: Arc<Mutex<Countdown>>,
    scheduler: Arc<dyn Scheduler>,
    ticker: Mutex<Option<Box<dyn TickSource>>>,
    /// Bumped under the countdown lock whenever a source is retired; a task
    /// from an older generation ends without ticking.
    generation: Arc<AtomicU64>,
    tick_period: Duration,
    events: broadcast::Sender<TimerEvent>,
}

impl FocusTimer {
    pub fn new(countdown: Countdown, scheduler: Arc<dyn Scheduler>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            countdown: Arc::new(Mutex::new(countdown)),
            scheduler,
            ticker: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
            tick_period: Duration::from_secs(1),
            events,
        }
    }

    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> CountdownState {
        self.countdown.lock().state()
    }

    pub fn intervals_until_long_break(&self) -> u32 {
        self.countdown.lock().intervals_until_long_break()
    }

    /// Whether a tick source is installed and still running.
    pub fn has_active_ticker(&self) -> bool {
        self.ticker.lock().as_ref().is_some_and(|source| source.is_active())
    }

    pub fn start(&self) {
        if self.snapshot().is_running && self.has_active_ticker() {
            return;
        }

        let state = {
            let mut countdown = self.countdown.lock();
            countdown.start();
            countdown.state()
        };
        self.spawn_ticker();
        self.emit(TimerEvent::Started(state));
    }

    pub fn pause(&self) {
        self.cancel_ticker();
        let state = {
            let mut countdown = self.countdown.lock();
            countdown.pause();
            countdown.state()
        };
        self.emit(TimerEvent::Paused(state));
    }

    /// Start when paused, pause when running. Returns the new running flag.
    pub fn toggle(&self) -> bool {
        if self.snapshot().is_running {
            self.pause();
            false
        } else {
            self.start();
            true
        }
    }

    pub fn reset(&self) {
        self.cancel_ticker();
        let state = {
            let mut countdown = self.countdown.lock();
            countdown.reset();
            countdown.state()
        };
        self.emit(TimerEvent::Reset(state));
    }

    fn spawn_ticker(&self) {
        let mut ticker = self.ticker.lock();
        if let Some(mut previous) = ticker.take() {
            self.retire_generation();
            previous.cancel();
        }

        let countdown = self.countdown.clone();
        let events = self.events.clone();
        let generation = self.generation.clone();
        let own_generation = generation.load(Ordering::SeqCst);
        let task: TickTask = Box::new(move || {
            // Events go out under the lock so none can follow a retire
            let mut countdown = countdown.lock();
            if generation.load(Ordering::SeqCst) != own_generation {
                return ControlFlow::Break(());
            }
            match countdown.tick() {
                Tick::Idle => ControlFlow::Break(()),
                Tick::Counting(_) => {
                    let _ = events.send(TimerEvent::Tick(countdown.state()));
                    ControlFlow::Continue(())
                }
                Tick::Completed(transition) => {
                    let state = countdown.state();
                    let _ = events.send(TimerEvent::Completed { transition, state });
                    ControlFlow::Break(())
                }
            }
        });

        *ticker = Some(self.scheduler.schedule_periodic(self.tick_period, task));
    }

    fn cancel_ticker(&self) {
        if let Some(mut source) = self.ticker.lock().take() {
            self.retire_generation();
            source.cancel();
            debug!("tick source cancelled");
        }
    }

    fn retire_generation(&self) {
        let _countdown = self.countdown.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn emit(&self, event: TimerEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl Drop for FocusTimer {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
