//! Status command handler

use anyhow::Result;

use habits_core::{completion_percent, Config, Tracker};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(tracker: &Tracker, config: &Config, output: &Output) -> Result<()> {
    let ledger = tracker.ledger();
    let completed = ledger.completed_count();
    let total = ledger.total();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "today": tracker.today(),
                    "last_date": ledger.last_date(),
                    "habits": total,
                    "completed_today": completed,
                    "days_recorded": ledger.progress().len(),
                    "reminder_enabled": tracker.reminder().enabled,
                    "rollover_on_mutation": config.rollover_on_mutation,
                    "database": config.database_path(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}/{}", completed, total);
        }
        OutputFormat::Human => {
            println!("Habits Status");
            println!("=============");
            println!();
            println!("Today:");
            println!("  Date:      {}", tracker.today().format("%Y-%m-%d"));
            println!(
                "  Completed: {} / {} ({}%)",
                completed,
                total,
                completion_percent(completed, total)
            );
            println!();
            println!("History:");
            println!("  Days recorded: {}", ledger.progress().len());
            println!("  Ledger day:    {}", ledger.last_date().format("%Y-%m-%d"));
            println!();
            println!(
                "Reminder: {}",
                if tracker.reminder().enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Database: {}", config.database_path().display());
        }
    }

    Ok(())
}
