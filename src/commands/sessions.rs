//! Lists the focus sessions of one day.

use crate::commands::parse_date;
use crate::db::sessions::Sessions;
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::formatter::{format_seconds, FormattedSession};
use crate::libs::messages::Message;
use crate::libs::stats::total_focus_seconds;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct SessionsArgs {
    #[arg(long, short, default_value = "today", help = "Date to list sessions for (YYYY-MM-DD or 'today')")]
    date: String,
}

pub fn cmd(args: SessionsArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let sessions = Sessions::new()?.for_date(date, &Local)?;
    let title = date.format("%B %-d, %Y").to_string();

    if sessions.is_empty() {
        msg_info!(Message::NoSessionsForDate(title));
        return Ok(());
    }

    let now = SystemClock.local_now();
    msg_print!(Message::SessionsHeader(title), true);
    View::sessions(
        &FormattedSession::from_sessions(&sessions, &now),
        &format_seconds(total_focus_seconds(&sessions, &now)),
    )?;

    Ok(())
}
