//! # Tomato - Pomodoro focus interval timer
//!
//! A command-line focus timer that cycles through focus intervals and short or
//! long breaks, remembers how many focus intervals were completed, and keeps a
//! log of focus sessions for daily statistics.
//!
//! ## Features
//!
//! - **Countdown Engine**: Focus / short break / long break state machine
//! - **Interval Policy**: Long break after every N-th focus interval
//! - **Persistent Counter**: Completed intervals survive restarts (SQLite, JSON or memory)
//! - **Session Log**: Focus sessions and intervals recorded in SQLite
//! - **Statistics**: Today's and total focus time
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tomato::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
