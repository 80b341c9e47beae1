//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use habits_core::{completion_percent, Habit, ProgressDay, ProgressSummary};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single habit
    pub fn print_habit(&self, habit: &Habit) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", habit.id);
                println!("Title:     {}", habit.title);
                println!("Done:      {}", if habit.completed { "yes" } else { "no" });
                if let Some(date) = habit.last_completed_date {
                    println!("Last done: {}", date.format("%Y-%m-%d"));
                }
            }
            OutputFormat::Json => print_json(habit),
            OutputFormat::Quiet => {
                println!("{}", habit.id);
            }
        }
    }

    /// Print the habit list with today's tally
    pub fn print_habits(&self, habits: &[Habit]) {
        match self.format {
            OutputFormat::Human => {
                if habits.is_empty() {
                    println!("No habits yet. Add one with `habits add <title>`.");
                    return;
                }
                for habit in habits {
                    println!(
                        "[{}] {} | {}",
                        if habit.completed { "x" } else { " " },
                        short_id(&habit.id),
                        truncate(&habit.title, 50)
                    );
                }
                let done = habits.iter().filter(|h| h.completed).count() as u32;
                let total = habits.len() as u32;
                println!(
                    "\n{} / {} habits completed ({}%)",
                    done,
                    total,
                    completion_percent(done, total)
                );
            }
            OutputFormat::Json => print_json(&habits),
            OutputFormat::Quiet => {
                for habit in habits {
                    println!("{}", habit.id);
                }
            }
        }
    }

    /// Print a progress summary with one bar per day
    pub fn print_summary(&self, summary: &ProgressSummary) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "Today: {} / {} habits completed ({}%)",
                    summary.completed_today, summary.total_habits, summary.percent_today
                );
                println!();

                let mut last_month = String::new();
                for day in &summary.days {
                    let month = day.date.format("%b").to_string();
                    if month != last_month {
                        println!("{}", month);
                        last_month = month;
                    }
                    println!("{}", format_day(day));
                }

                println!();
                println!("Average completion: {}%", summary.average_percent);
            }
            OutputFormat::Json => print_json(summary),
            OutputFormat::Quiet => {
                println!("{}", summary.average_percent);
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Pretty-print any serializable value as JSON
fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode output: {}", e),
    }
}

/// One chart row: day of month, segment bar, counts
fn format_day(day: &ProgressDay) -> String {
    let segments = day.total.max(1) as usize;
    let filled = (day.completed as usize).min(segments);
    format!(
        "{:>3} {}{} {}/{}",
        day.date.format("%d"),
        "█".repeat(filled),
        "░".repeat(segments - filled),
        day.completed,
        day.total
    )
}

/// First 8 characters of an id, the usual prefix length for lookups
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
