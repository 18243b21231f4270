#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::ops::ControlFlow;
    use std::sync::Arc;
    use std::time::Duration;
    use tomato::libs::countdown::Countdown;
    use tomato::libs::counter::{MemoryCounterStore, COMPLETED_INTERVALS_KEY};
    use tomato::libs::interval::{Durations, IntervalType};
    use tomato::libs::scheduler::{ManualScheduler, Scheduler, TickSource, TickTask};
    use tomato::libs::timer::{FocusTimer, TimerEvent};

    fn timer_with(completed: u32) -> (FocusTimer, ManualScheduler, MemoryCounterStore) {
        let store = MemoryCounterStore::with_value(COMPLETED_INTERVALS_KEY, completed);
        let countdown = Countdown::new(Durations::new(3, 2, 4, 4).unwrap(), Box::new(store.clone()));
        let scheduler = ManualScheduler::new();
        let timer = FocusTimer::new(countdown, Arc::new(scheduler.clone()));
        (timer, scheduler, store)
    }

    #[test]
    fn test_start_installs_single_source() {
        let (timer, scheduler, _store) = timer_with(0);

        timer.start();
        timer.start();
        timer.start();

        assert_eq!(scheduler.active_sources(), 1);
        assert_eq!(scheduler.installed_sources(), 1);
        assert!(timer.has_active_ticker());
    }

    #[test]
    fn test_each_period_ticks_once() {
        let (timer, scheduler, _store) = timer_with(0);
        timer.start();
        timer.start();

        scheduler.advance(1);
        assert_eq!(timer.snapshot().remaining_seconds, 2);

        scheduler.advance(1);
        assert_eq!(timer.snapshot().remaining_seconds, 1);
    }

    #[test]
    fn test_pause_stops_ticks_immediately() {
        let (timer, scheduler, _store) = timer_with(0);
        timer.start();
        scheduler.advance(1);

        timer.pause();
        scheduler.advance(5);

        let state = timer.snapshot();
        assert!(!state.is_running);
        assert_eq!(state.remaining_seconds, 2);
        assert_eq!(scheduler.active_sources(), 0);
        assert!(!timer.has_active_ticker());
    }

    #[test]
    fn test_resume_after_pause_keeps_one_source() {
        let (timer, scheduler, _store) = timer_with(0);
        timer.start();
        timer.pause();
        timer.start();

        assert_eq!(scheduler.active_sources(), 1);
        scheduler.advance(1);
        assert_eq!(timer.snapshot().remaining_seconds, 2);
    }

    #[test]
    fn test_reset_stops_ticks_and_clears_counter() {
        let (timer, scheduler, store) = timer_with(2);
        timer.start();
        scheduler.advance(1);

        timer.reset();
        scheduler.advance(3);

        let state = timer.snapshot();
        assert_eq!(state.interval_type, IntervalType::Focus);
        assert_eq!(state.remaining_seconds, 3);
        assert_eq!(state.completed_focus_intervals, 0);
        assert!(!state.is_running);
        assert_eq!(scheduler.active_sources(), 0);
        assert_eq!(store.get(COMPLETED_INTERVALS_KEY), Some(0));
    }

    #[test]
    fn test_completion_finishes_source() {
        let (timer, scheduler, store) = timer_with(3);
        timer.start();

        scheduler.advance(3);
        let state = timer.snapshot();
        assert_eq!(state.interval_type, IntervalType::LongBreak);
        assert_eq!(state.completed_focus_intervals, 4);
        assert!(!state.is_running);
        assert_eq!(scheduler.active_sources(), 0);
        assert!(!timer.has_active_ticker());
        assert_eq!(store.get(COMPLETED_INTERVALS_KEY), Some(4));

        // No auto-resume
        scheduler.advance(2);
        assert_eq!(timer.snapshot().remaining_seconds, 4);
    }

    #[test]
    fn test_start_after_completion_runs_next_interval() {
        let (timer, scheduler, _store) = timer_with(0);
        timer.start();
        scheduler.advance(3);
        assert_eq!(timer.snapshot().interval_type, IntervalType::ShortBreak);

        timer.start();
        assert_eq!(scheduler.active_sources(), 1);
        assert_eq!(scheduler.installed_sources(), 2);

        scheduler.advance(2);
        let state = timer.snapshot();
        assert_eq!(state.interval_type, IntervalType::Focus);
        assert_eq!(state.completed_focus_intervals, 1);
    }

    #[test]
    fn test_toggle() {
        let (timer, scheduler, _store) = timer_with(0);

        assert!(timer.toggle());
        assert_eq!(scheduler.active_sources(), 1);
        assert!(!timer.toggle());
        assert_eq!(scheduler.active_sources(), 0);
    }

    #[test]
    fn test_events_published() {
        let (timer, scheduler, _store) = timer_with(0);
        let mut events = timer.subscribe();

        timer.start();
        scheduler.advance(3);

        assert!(matches!(events.try_recv(), Ok(TimerEvent::Started(state)) if state.is_running));
        assert!(matches!(events.try_recv(), Ok(TimerEvent::Tick(state)) if state.remaining_seconds == 2));
        assert!(matches!(events.try_recv(), Ok(TimerEvent::Tick(state)) if state.remaining_seconds == 1));
        match events.try_recv() {
            Ok(TimerEvent::Completed { transition, state }) => {
                assert_eq!(transition.from, IntervalType::Focus);
                assert_eq!(transition.to, IntervalType::ShortBreak);
                assert_eq!(state.interval_type, IntervalType::ShortBreak);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_drop_cancels_source() {
        let (timer, scheduler, _store) = timer_with(0);
        timer.start();
        assert_eq!(scheduler.active_sources(), 1);

        drop(timer);
        assert_eq!(scheduler.active_sources(), 0);
    }

    #[test]
    fn test_intervals_until_long_break() {
        let (timer, _scheduler, _store) = timer_with(1);
        assert_eq!(timer.intervals_until_long_break(), 3);
    }

    /// Scheduler whose sources ignore `cancel`, standing in for a tick that
    /// is already running on another thread when the timer retires it.
    #[derive(Clone, Default)]
    struct LingeringScheduler {
        tasks: Arc<Mutex<Vec<TickTask>>>,
    }

    struct LingeringSource;

    impl TickSource for LingeringSource {
        fn cancel(&mut self) {}

        fn is_active(&self) -> bool {
            true
        }
    }

    impl Scheduler for LingeringScheduler {
        fn schedule_periodic(&self, _period: Duration, task: TickTask) -> Box<dyn TickSource> {
            self.tasks.lock().push(task);
            Box::new(LingeringSource)
        }
    }

    #[test]
    fn test_late_tick_after_reset_is_ignored() {
        let countdown = Countdown::new(Durations::new(1, 2, 4, 4).unwrap(), Box::new(MemoryCounterStore::new()));
        let scheduler = LingeringScheduler::default();
        let timer = FocusTimer::new(countdown, Arc::new(scheduler.clone()));

        timer.start();
        let mut events = timer.subscribe();
        timer.reset();

        let mut late = scheduler.tasks.lock().pop().unwrap();
        assert!(late().is_break());

        let state = timer.snapshot();
        assert_eq!(state.interval_type, IntervalType::Focus);
        assert_eq!(state.remaining_seconds, 1);
        assert_eq!(state.completed_focus_intervals, 0);
        assert!(matches!(events.try_recv(), Ok(TimerEvent::Reset(_))));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_late_tick_after_restart_is_ignored() {
        let countdown = Countdown::new(Durations::new(3, 2, 4, 4).unwrap(), Box::new(MemoryCounterStore::new()));
        let scheduler = LingeringScheduler::default();
        let timer = FocusTimer::new(countdown, Arc::new(scheduler.clone()));

        timer.start();
        timer.pause();
        timer.start();

        let mut tasks = std::mem::take(&mut *scheduler.tasks.lock());
        assert_eq!(tasks.len(), 2);
        assert!(tasks[0]().is_break());
        assert_eq!(timer.snapshot().remaining_seconds, 3);
        assert!(tasks[1]().is_continue());
        assert_eq!(timer.snapshot().remaining_seconds, 2);
    }

    #[test]
    fn test_cancelled_sources_are_forgotten() {
        let (timer, scheduler, _store) = timer_with(0);
        for _ in 0..5 {
            timer.start();
            scheduler.advance(1);
            timer.pause();
        }
        timer.reset();

        assert_eq!(scheduler.active_sources(), 0);
        assert_eq!(scheduler.pending_cancellations(), 0);
    }

    #[test]
    fn test_cancel_during_advance_skips_source() {
        let scheduler = ManualScheduler::new();
        let victim: Arc<Mutex<Option<Box<dyn TickSource>>>> = Arc::new(Mutex::new(None));
        let victim_runs = Arc::new(Mutex::new(0));

        let target = victim.clone();
        let _canceller = scheduler.schedule_periodic(
            Duration::from_secs(1),
            Box::new(move || {
                if let Some(source) = target.lock().as_mut() {
                    source.cancel();
                }
                ControlFlow::Continue(())
            }),
        );
        let runs = victim_runs.clone();
        let source = scheduler.schedule_periodic(
            Duration::from_secs(1),
            Box::new(move || {
                *runs.lock() += 1;
                ControlFlow::Continue(())
            }),
        );
        *victim.lock() = Some(source);

        scheduler.advance(3);

        assert_eq!(*victim_runs.lock(), 0);
        assert_eq!(scheduler.active_sources(), 1);
        assert_eq!(scheduler.pending_cancellations(), 0);
        assert!(!victim.lock().as_ref().unwrap().is_active());
    }
}
