use crate::libs::config::Config;
use crate::libs::countdown::Countdown;
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

/// Zeroes the persisted completed focus interval counter.
pub fn cmd() -> Result<()> {
    let timer_config = Config::read()?.timer_or_default();
    // Invalid durations fall back to the defaults here
    let durations = timer_config.durations().unwrap_or_default();
    let mut countdown = Countdown::new(durations, timer_config.store.open_or_memory());
    countdown.reset();

    msg_success!(Message::CounterReset);
    Ok(())
}
