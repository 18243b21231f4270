/// Every user-facing message of the application.
///
/// Text lives in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleTimer,
    ConfigCurrent,
    InvalidTimerConfig(String),
    ValueMustBePositive,
    PromptFocusDuration,
    PromptShortBreakDuration,
    PromptLongBreakDuration,
    PromptLongBreakInterval,
    PromptStoreBackend,

    // === TIMER MESSAGES ===
    IntervalStarted {
        interval: String,
        clock: String,
    },
    IntervalCompleted {
        from: String,
        to: String,
    },
    IntervalProgress {
        emoji: String,
        interval: String,
        clock: String,
        bar: String,
    },
    TimerPaused(String), // remaining clock
    TimerInterrupted,
    CyclesFinished(u32),
    CompletedFocusIntervals(u32),
    NextLongBreakIn(u32),
    NextInterval(String),
    CounterReset,
    CounterStoreUnavailable {
        backend: String,
        error: String,
    },
    StatusHeader,

    // === SESSION MESSAGES ===
    SessionStarted(i64),
    SessionEnded {
        id: i64,
        duration: String,
    },
    SessionRecordFailed(String),
    SessionsHeader(String), // date
    NoSessionsForDate(String),

    // === STATS MESSAGES ===
    StatsHeader,
    TodayFocusTime(String),
    TotalFocusTime(String),
    AverageFocusTime(String),
    TodaySessions(usize),
    TotalSessions(usize),
    OpenSessionNotice,

    // === SIGNAL MESSAGES ===
    FailedToCreateSigintHandler,
    ReceivedInterrupt,

    // === GENERIC ===
    InvalidDate(String),
}
