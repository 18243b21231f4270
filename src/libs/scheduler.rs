//! Periodic tick sources.
//!
//! The countdown engine does no scheduling itself. A [`Scheduler`] installs a
//! periodic task and hands back a [`TickSource`], the cancel token for it. The
//! task returns [`ControlFlow::Break`] to end its own source, which is how a
//! completed interval stops ticking without outside help.
//!
//! - [`TokioScheduler`]: one tokio task per source, driven by `tokio::time::interval`
//! - [`ManualScheduler`]: sources fire only when [`ManualScheduler::advance`] is
//!   called, so tests drive ticks without wall-clock delays

use parking_lot::Mutex;
use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Work run on every period; `Break` finishes the source.
pub type TickTask = Box<dyn FnMut() -> ControlFlow<()> + Send + 'static>;

/// Cancel token of an installed periodic task.
pub trait TickSource: Send {
    /// Stops the source from firing again. A call of the task already in
    /// progress on another thread may still finish after this returns.
    fn cancel(&mut self);

    fn is_active(&self) -> bool;
}

pub trait Scheduler: Send + Sync {
    fn schedule_periodic(&self, period: Duration, task: TickTask) -> Box<dyn TickSource>;
}

/// Scheduler spawning each source onto a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Uses the runtime of the calling context.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            handle: Handle::try_current()?,
        })
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_periodic(&self, period: Duration, mut task: TickTask) -> Box<dyn TickSource> {
        let handle = self.handle.spawn(async move {
            // First tick one full period after install, not immediately
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if task().is_break() {
                    trace!("tick source finished");
                    break;
                }
            }
        });
        debug!(period_ms = period.as_millis() as u64, "tick source installed");

        Box::new(TokioTickSource { handle })
    }
}

struct TokioTickSource {
    handle: JoinHandle<()>,
}

impl TickSource for TokioTickSource {
    fn cancel(&mut self) {
        self.handle.abort();
    }

    fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for TokioTickSource {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Default)]
struct ManualState {
    next_id: u64,
    installed: u64,
    tasks: Vec<(u64, TickTask)>,
    cancelled: HashSet<u64>,
    firing: bool,
}

/// Deterministic scheduler: tasks run only from [`advance`](Self::advance).
///
/// The period is ignored; one `advance(1)` is one period for every source.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires every active source `periods` times.
    pub fn advance(&self, periods: u32) {
        for _ in 0..periods {
            self.fire();
        }
    }

    fn fire(&self) {
        // Tasks run without the lock held so they may touch the scheduler
        let tasks = {
            let mut state = self.state.lock();
            state.firing = true;
            std::mem::take(&mut state.tasks)
        };
        let mut survivors = Vec::with_capacity(tasks.len());
        for (id, mut task) in tasks {
            if self.state.lock().cancelled.contains(&id) {
                continue;
            }
            if task().is_continue() {
                survivors.push((id, task));
            }
        }

        let mut state = self.state.lock();
        let added = std::mem::take(&mut state.tasks);
        let cancelled = std::mem::take(&mut state.cancelled);
        state.firing = false;
        let mut merged: Vec<(u64, TickTask)> = survivors.into_iter().filter(|(id, _)| !cancelled.contains(id)).collect();
        merged.extend(added);
        state.tasks = merged;
    }

    /// Sources currently installed and not finished or cancelled.
    pub fn active_sources(&self) -> usize {
        self.state.lock().tasks.len()
    }

    /// Cancelled sources not yet dropped by a pending [`advance`](Self::advance).
    pub fn pending_cancellations(&self) -> usize {
        self.state.lock().cancelled.len()
    }

    /// Sources ever installed.
    pub fn installed_sources(&self) -> u64 {
        self.state.lock().installed
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_periodic(&self, _period: Duration, task: TickTask) -> Box<dyn TickSource> {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.installed += 1;
        state.tasks.push((id, task));

        Box::new(ManualTickSource {
            id,
            state: self.state.clone(),
        })
    }
}

struct ManualTickSource {
    id: u64,
    state: Arc<Mutex<ManualState>>,
}

impl TickSource for ManualTickSource {
    fn cancel(&mut self) {
        let mut state = self.state.lock();
        let installed = state.tasks.len();
        state.tasks.retain(|(id, _)| *id != self.id);
        // Absent while firing means the task is taken out by `fire`, which
        // drops it on seeing the id
        if state.tasks.len() == installed && state.firing {
            state.cancelled.insert(self.id);
        }
    }

    fn is_active(&self) -> bool {
        let state = self.state.lock();
        !state.cancelled.contains(&self.id) && state.tasks.iter().any(|(id, _)| *id == self.id)
    }
}
