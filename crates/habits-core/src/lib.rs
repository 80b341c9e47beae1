//! habits core library
//!
//! This crate provides the core functionality for `habits`, a local-first
//! daily habit tracker.
//!
//! # Architecture
//!
//! - **Ledger**: in-memory habits and per-day progress, with day rollover
//! - **Storage**: string key-value store (SQLite on disk) holding JSON
//!
//! The ledger is loaded once per session and written back after every
//! change.
//!
//! # Quick Start
//!
//! ```text
//! let mut tracker = Tracker::open()?;
//!
//! // Add and complete a habit
//! let habit = tracker.add_habit("Stretch").unwrap();
//! tracker.toggle_habit(&habit.id);
//!
//! // Last 7 days, one entry per day
//! let week = tracker.build_range(7);
//! ```
//!
//! # Modules
//!
//! - `tracker`: Session controller (main entry point)
//! - `ledger`: Rollover, progress sync and range reconstruction
//! - `models`: Habit and ProgressDay records
//! - `storage`: Key-value persistence
//! - `stats`: Completion percentages and chart periods
//! - `reminder`: Interval reminder preference
//! - `clock`: Source of today's date
//! - `config`: Application configuration

pub mod clock;
pub mod config;
pub mod ledger;
pub mod models;
pub mod reminder;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use clock::{Clock, FixedClock, LocalClock};
pub use config::Config;
pub use ledger::{build_range, Ledger};
pub use models::{Habit, ProgressDay};
pub use reminder::{ReminderSettings, REMINDER_INTERVAL};
pub use stats::{average_completion, completion_percent, Period, ProgressSummary};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use tracker::Tracker;
