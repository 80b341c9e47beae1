//! Data models for habits
//!
//! Defines the two persisted record types: `Habit` and `ProgressDay`.
//! Field names serialize in camelCase so stored JSON matches the
//! `habits` / `progress` key layout.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A habit the user tracks once per day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Opaque unique identifier, stable for the habit's lifetime
    pub id: String,
    /// Display title (never blank after trimming)
    pub title: String,
    /// Whether the habit has been done today
    #[serde(alias = "completedToday", default)]
    pub completed: bool,
    /// Date the habit was last marked done
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<NaiveDate>,
}

impl Habit {
    /// Create a new, not-yet-completed habit with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title)
    }

    /// Create a habit with a specific ID (for loading from storage)
    pub fn with_id(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            completed: false,
            last_completed_date: None,
        }
    }

    /// Flip the completed flag, stamping `on` as the completion date
    pub fn toggle(&mut self, on: NaiveDate) {
        self.completed = !self.completed;
        self.last_completed_date = if self.completed { Some(on) } else { None };
    }

    /// Clear today's completion
    pub fn reset(&mut self) {
        self.completed = false;
    }
}

/// Completion counts for a single calendar day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgressDay {
    /// Calendar date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Number of habits completed on `date`
    pub completed: u32,
    /// Number of habits that existed when the record was written
    pub total: u32,
}

impl ProgressDay {
    /// Derive a record for `date` from the live habit list
    pub fn snapshot(date: NaiveDate, habits: &[Habit]) -> Self {
        Self {
            date,
            completed: count_completed(habits),
            total: habits.len() as u32,
        }
    }

    /// Placeholder record for a day with no stored history
    pub fn empty(date: NaiveDate, total: u32) -> Self {
        Self {
            date,
            completed: 0,
            total,
        }
    }
}

/// Number of habits currently marked done
pub fn count_completed(habits: &[Habit]) -> u32 {
    habits.iter().filter(|h| h.completed).count() as u32
}
