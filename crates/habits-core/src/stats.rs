//! Completion statistics over progress windows

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::Ledger;
use crate::models::ProgressDay;

/// Chart period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// Number of days the period's window covers
    pub fn days(self) -> usize {
        match self {
            Period::Daily => 1,
            Period::Weekly => 7,
            Period::Monthly => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" | "today" => Ok(Period::Daily),
            "weekly" | "week" | "7" => Ok(Period::Weekly),
            "monthly" | "month" | "30" => Ok(Period::Monthly),
            other => Err(format!(
                "unknown period '{}', expected daily, weekly or monthly",
                other
            )),
        }
    }
}

/// Rounded percentage of `completed` out of `total`; 0 when `total` is 0
pub fn completion_percent(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(completed) / f64::from(total) * 100.0).round() as u32
}

/// Pooled completion rate across a window of days
///
/// Sums completions and totals separately so days with more habits
/// weigh more.
pub fn average_completion(days: &[ProgressDay]) -> u32 {
    let completed: u64 = days.iter().map(|d| u64::from(d.completed)).sum();
    let total: u64 = days.iter().map(|d| u64::from(d.total)).sum();
    (completed as f64 / total.max(1) as f64 * 100.0).round() as u32
}

/// Today's status plus a trailing window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub today: NaiveDate,
    pub completed_today: u32,
    pub total_habits: u32,
    pub percent_today: u32,
    pub period: Period,
    pub days: Vec<ProgressDay>,
    pub average_percent: u32,
}

impl ProgressSummary {
    /// Summarize the ledger for `period`
    pub fn for_period(ledger: &Ledger, period: Period, today: NaiveDate) -> Self {
        Self::for_days(ledger, period.days(), today, period)
    }

    /// Summarize the ledger over an arbitrary number of trailing days
    pub fn for_days(ledger: &Ledger, days: usize, today: NaiveDate, period: Period) -> Self {
        let completed_today = ledger.completed_count();
        let total_habits = ledger.total();
        let days = ledger.build_range(days, today);
        let average_percent = average_completion(&days);

        Self {
            today,
            completed_today,
            total_habits,
            percent_today: completion_percent(completed_today, total_habits),
            period,
            days,
            average_percent,
        }
    }
}
