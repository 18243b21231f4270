//! Shows where the interval cycle stands without starting the timer.

use crate::db::sessions::Sessions;
use crate::libs::config::Config;
use crate::libs::countdown::Countdown;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_error_anyhow, msg_info, msg_print, msg_warning};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let timer_config = Config::read()?.timer_or_default();
    let durations = timer_config
        .durations()
        .map_err(|e| msg_error_anyhow!(Message::InvalidTimerConfig(e.to_string())))?;
    let countdown = Countdown::new(durations, timer_config.store.open_or_memory());
    let state = countdown.state();

    msg_print!(Message::StatusHeader, true);
    msg_info!(Message::CompletedFocusIntervals(state.completed_focus_intervals));
    msg_info!(Message::NextLongBreakIn(countdown.intervals_until_long_break()));
    msg_info!(Message::NextInterval(format!("{} ({})", state.interval_type, state.format_clock())));

    let open_sessions = Sessions::new().ok().and_then(|sessions| sessions.open().ok());
    if open_sessions.is_some_and(|open| !open.is_empty()) {
        msg_warning!(Message::OpenSessionNotice);
    }

    msg_print!(Message::ConfigCurrent, true);
    View::timer_config(&timer_config)?;

    Ok(())
}
