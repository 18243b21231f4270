//! Focus time statistics over all recorded sessions.

use crate::db::sessions::Sessions;
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::formatter::format_seconds;
use crate::libs::messages::Message;
use crate::libs::stats::{daily_totals, FocusSummary};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let sessions = Sessions::new()?.all()?;
    let now = SystemClock.local_now();
    let summary = FocusSummary::from_sessions(&sessions, &now);

    msg_print!(Message::StatsHeader, true);
    msg_print!(Message::TodayFocusTime(format_seconds(summary.today_seconds)));
    msg_print!(Message::TodaySessions(summary.today_sessions));
    msg_print!(Message::TotalFocusTime(format_seconds(summary.total_seconds)));
    msg_print!(Message::TotalSessions(summary.total_sessions));
    msg_print!(Message::AverageFocusTime(format_seconds(FocusSummary::average_per_day(&sessions, &now))));

    if summary.has_open_session {
        msg_info!(Message::OpenSessionNotice);
    }

    let totals = daily_totals(&sessions, &now);
    if !totals.is_empty() {
        println!();
        View::daily_totals(&totals)?;
    }

    Ok(())
}
