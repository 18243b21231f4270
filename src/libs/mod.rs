//! Core engine and shared utilities.
//!
//! The interval policy, countdown engine, scheduler and controller have no
//! knowledge of the CLI; commands compose them with the database layer.

pub mod clock;
pub mod config;
pub mod countdown;
pub mod counter;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod interval;
pub mod messages;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod timer;
pub mod view;
