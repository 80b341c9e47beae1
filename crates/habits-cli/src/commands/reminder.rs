//! Reminder command handlers

use anyhow::Result;
use chrono::Local;

use habits_core::{Tracker, REMINDER_INTERVAL};

use crate::output::{Output, OutputFormat};

/// Turn the interval reminder on or off
pub fn set(tracker: &mut Tracker, enabled: bool, output: &Output) -> Result<()> {
    tracker.set_reminder(enabled);
    output.success(if enabled {
        "Reminder enabled"
    } else {
        "Reminder disabled"
    });
    Ok(())
}

/// Show the reminder setting
pub fn show(tracker: &Tracker, output: &Output) -> Result<()> {
    let reminder = tracker.reminder();
    let next = reminder.next_reminder(Local::now());
    let hours = REMINDER_INTERVAL.as_secs() / 3600;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "enabled": reminder.enabled,
                    "interval_hours": hours,
                    "next": next.map(|t| t.to_rfc3339()),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", if reminder.enabled { "on" } else { "off" });
        }
        OutputFormat::Human => {
            println!(
                "Reminder: {}",
                if reminder.enabled { "enabled" } else { "disabled" }
            );
            println!("Interval: every {} hours", hours);
            if let Some(next) = next {
                println!("Next:     {}", next.format("%Y-%m-%d %H:%M"));
            }
        }
    }

    Ok(())
}
