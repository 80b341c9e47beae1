pub mod config;
pub mod habit;
pub mod progress;
pub mod reminder;
pub mod status;
