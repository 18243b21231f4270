pub mod init;
pub mod reset;
pub mod sessions;
pub mod start;
pub mod stats;
pub mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure interval durations and counter storage")]
    Init(init::InitArgs),
    #[command(about = "Run the focus timer")]
    Start(start::StartArgs),
    #[command(about = "Show the next interval and completed focus intervals")]
    Status,
    #[command(about = "Show today's and total focus time")]
    Stats,
    #[command(about = "Display focus sessions for a given date")]
    Sessions(sessions::SessionsArgs),
    #[command(about = "Reset the completed focus interval counter")]
    Reset,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Start(args) => start::cmd(args).await,
            Commands::Status => status::cmd(),
            Commands::Stats => stats::cmd(),
            Commands::Sessions(args) => sessions::cmd(args),
            Commands::Reset => reset::cmd(),
        }
    }
}

/// Parses `today` or a `YYYY-MM-DD` date.
pub(crate) fn parse_date(value: &str) -> Result<chrono::NaiveDate> {
    use crate::libs::messages::Message;

    if value.eq_ignore_ascii_case("today") {
        return Ok(chrono::Local::now().date_naive());
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| crate::msg_error_anyhow!(Message::InvalidDate(value.to_string())))
}
