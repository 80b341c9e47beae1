//! Interval reminder preference
//!
//! Only the on/off preference and the repeat interval live here. Delivering
//! notifications is left to the host platform.

use std::time::Duration;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// How often an enabled reminder repeats
pub const REMINDER_INTERVAL: Duration = Duration::from_secs(4 * 60 * 60);

/// Persisted reminder preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    #[serde(default)]
    pub enabled: bool,
}

impl ReminderSettings {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// When the next reminder should fire, counting from `from`
    pub fn next_reminder<Tz: TimeZone>(&self, from: DateTime<Tz>) -> Option<DateTime<Tz>> {
        if !self.enabled {
            return None;
        }
        let interval = chrono::Duration::from_std(REMINDER_INTERVAL).ok()?;
        from.checked_add_signed(interval)
    }
}
