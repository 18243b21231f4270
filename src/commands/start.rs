//! Runs the focus timer in the foreground.
//!
//! Every run opens a focus session in the database and records each interval
//! inside it. The timer stops after `--cycles` intervals or on Ctrl+C; in both
//! cases the session is closed and the completed interval counter keeps its
//! value for the next run.

use crate::db::intervals::Intervals;
use crate::db::sessions::Sessions;
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::config::Config;
use crate::libs::countdown::{Countdown, CountdownState};
use crate::libs::formatter::{format_seconds, progress_bar};
use crate::libs::interval::IntervalType;
use crate::libs::messages::macros::is_debug_mode;
use crate::libs::messages::Message;
use crate::libs::scheduler::TokioScheduler;
use crate::libs::session::FocusSession;
use crate::libs::stats::session_duration_seconds;
use crate::libs::timer::{FocusTimer, TimerEvent};
use crate::{msg_debug, msg_error, msg_error_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::{broadcast::error::RecvError, oneshot};
use tracing::debug;

const PROGRESS_BAR_WIDTH: usize = 30;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Number of intervals (focus and breaks) to run before exiting
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    cycles: u32,

    /// Do not record the run as a focus session
    #[arg(long)]
    no_record: bool,
}

pub async fn cmd(args: StartArgs) -> Result<()> {
    let clock = SystemClock;
    let timer_config = Config::read()?.timer_or_default();
    let durations = timer_config
        .durations()
        .map_err(|e| msg_error_anyhow!(Message::InvalidTimerConfig(e.to_string())))?;

    let countdown = Countdown::new(durations, timer_config.store.open_or_memory());
    let timer = FocusTimer::new(countdown, Arc::new(TokioScheduler::new()?));
    let mut events = timer.subscribe();

    let mut recorder = if args.no_record { None } else { SessionRecorder::open(&clock) };
    let mut shutdown_rx = spawn_interrupt_listener();

    let mut finished = 0;
    'cycles: while finished < args.cycles {
        let state = timer.snapshot();
        if let Some(recorder) = recorder.as_mut() {
            recorder.begin_interval(state.interval_type, &clock);
        }
        msg_info!(Message::IntervalStarted {
            interval: state.interval_type.to_string(),
            clock: state.format_clock(),
        });
        timer.start();

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Ok(TimerEvent::Tick(state)) => render_progress(&state),
                    Ok(TimerEvent::Completed { transition, .. }) => {
                        end_progress_line();
                        if let Some(recorder) = recorder.as_mut() {
                            recorder.end_interval(&clock);
                        }
                        msg_success!(Message::IntervalCompleted {
                            from: transition.from.to_string(),
                            to: transition.to.to_string(),
                        });
                        finished += 1;
                        continue 'cycles;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => debug!(skipped, "timer events dropped"),
                    Err(RecvError::Closed) => break 'cycles,
                },
                _ = &mut shutdown_rx => {
                    end_progress_line();
                    msg_warning!(Message::ReceivedInterrupt);
                    timer.pause();
                    msg_info!(Message::TimerPaused(timer.snapshot().format_clock()));
                    if let Some(recorder) = recorder.as_mut() {
                        recorder.end_interval(&clock);
                    }
                    msg_warning!(Message::TimerInterrupted);
                    break 'cycles;
                }
            }
        }
    }

    if finished == args.cycles {
        msg_success!(Message::CyclesFinished(finished));
    }
    if let Some(recorder) = recorder {
        recorder.finish(&clock);
    }

    let state = timer.snapshot();
    msg_info!(Message::CompletedFocusIntervals(state.completed_focus_intervals));
    Ok(())
}

/// Resolves once on Ctrl+C. If the handler cannot be installed the receiver
/// never resolves and the timer simply runs to the end.
fn spawn_interrupt_listener() -> oneshot::Receiver<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                msg_error!(Message::FailedToCreateSigintHandler);
                debug!(error = %e, "ctrl_c listener failed");
                std::future::pending::<()>().await;
                drop(shutdown_tx);
            }
        }
    });
    shutdown_rx
}

fn render_progress(state: &CountdownState) {
    let line = Message::IntervalProgress {
        emoji: state.interval_type.emoji().to_string(),
        interval: state.interval_type.to_string(),
        clock: state.format_clock(),
        bar: progress_bar(state.progress(), PROGRESS_BAR_WIDTH),
    };
    if is_debug_mode() {
        msg_debug!(line);
    } else {
        print!("\r{}", line);
        let _ = std::io::stdout().flush();
    }
}

fn end_progress_line() {
    if !is_debug_mode() {
        println!();
    }
}

/// Writes the session and its intervals to the database.
///
/// Recording is best effort: failures are reported and the timer keeps going.
struct SessionRecorder {
    sessions: Sessions,
    intervals: Intervals,
    session: FocusSession,
    current_interval: Option<i64>,
}

impl SessionRecorder {
    fn open(clock: &dyn Clock) -> Option<Self> {
        match Self::try_open(clock) {
            Ok(recorder) => {
                msg_info!(Message::SessionStarted(recorder.session.id));
                Some(recorder)
            }
            Err(e) => {
                msg_warning!(Message::SessionRecordFailed(e.to_string()));
                None
            }
        }
    }

    fn try_open(clock: &dyn Clock) -> Result<Self> {
        let mut sessions = Sessions::new()?;
        let intervals = Intervals::new()?;
        let session = sessions.start(clock.now())?;
        Ok(Self {
            sessions,
            intervals,
            session,
            current_interval: None,
        })
    }

    fn begin_interval(&mut self, interval_type: IntervalType, clock: &dyn Clock) {
        match self.intervals.start(self.session.id, interval_type, clock.now()) {
            Ok(interval) => self.current_interval = Some(interval.id),
            Err(e) => msg_warning!(Message::SessionRecordFailed(e.to_string())),
        }
    }

    fn end_interval(&mut self, clock: &dyn Clock) {
        if let Some(id) = self.current_interval.take() {
            if let Err(e) = self.intervals.end(id, clock.now()) {
                msg_warning!(Message::SessionRecordFailed(e.to_string()));
            }
        }
    }

    fn finish(mut self, clock: &dyn Clock) {
        self.end_interval(clock);
        let now = clock.now();
        match self.sessions.end(self.session.id, now) {
            Ok(session) => msg_info!(Message::SessionEnded {
                id: session.id,
                duration: format_seconds(session_duration_seconds(&session, &now)),
            }),
            Err(e) => msg_warning!(Message::SessionRecordFailed(e.to_string())),
        }
    }
}
