use super::config::TimerConfig;
use super::formatter::{format_seconds, FormattedSession};
use anyhow::Result;
use chrono::NaiveDate;
use prettytable::{format, row, Table};
use std::collections::BTreeMap;

pub struct View {}

impl View {
    pub fn sessions(sessions: &[FormattedSession], total_duration: &str) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.set_titles(row!["#", "START", "END", "DURATION", "STATUS"]);
        for session in sessions {
            table.add_row(row![session.id, session.start, session.end, session.duration, session.status]);
        }
        table.add_row(row!["", "", "TOTAL", total_duration, ""]);
        table.printstd();

        Ok(())
    }

    pub fn daily_totals(totals: &BTreeMap<NaiveDate, i64>) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.set_titles(row!["DATE", "FOCUS TIME"]);
        for (date, seconds) in totals {
            table.add_row(row![date.format("%Y-%m-%d"), format_seconds(*seconds)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn timer_config(config: &TimerConfig) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.add_row(row!["Focus", format!("{} min", config.focus_duration)]);
        table.add_row(row!["Short break", format!("{} min", config.short_break_duration)]);
        table.add_row(row!["Long break", format!("{} min", config.long_break_duration)]);
        table.add_row(row!["Long break every", config.long_break_interval]);
        table.add_row(row!["Counter store", config.store]);
        table.printstd();

        Ok(())
    }
}
