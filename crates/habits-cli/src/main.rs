//! habits CLI
//!
//! Command-line interface for habits - daily habit tracking.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use habits_core::{Config, Period, Tracker};

mod commands;
mod logging;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "habits")]
#[command(about = "habits - Local-first daily habit tracker")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new habit
    Add {
        /// Habit title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// List habits and today's completion (default)
    #[command(alias = "ls")]
    List,
    /// Mark a habit done or not done for today
    #[command(alias = "done")]
    Toggle {
        /// Habit ID (full ID or prefix)
        id: String,
    },
    /// Rename a habit
    Edit {
        /// Habit ID (full ID or prefix)
        id: String,
        /// New title (prompts if omitted)
        title: Option<String>,
    },
    /// Delete a habit
    #[command(alias = "rm")]
    Delete {
        /// Habit ID (full ID or prefix)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show completion history
    Progress {
        /// Window to show: daily, weekly or monthly
        #[arg(short, long, default_value_t = Period::Weekly)]
        period: Period,
        /// Custom window length in days
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
        days: Option<u16>,
    },
    /// Show or change the interval reminder
    Reminder {
        #[command(subcommand)]
        command: Option<ReminderCommands>,
    },
    /// Show status (today's tally, storage location)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum ReminderCommands {
    /// Enable the reminder
    On,
    /// Disable the reminder
    Off,
    /// Show the reminder setting
    Status,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, rollover_on_mutation, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
    /// Print the config file path
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands don't need the tracker
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let mut tracker = Tracker::open_with_config(&config)?;

    match cli.command.unwrap_or(Commands::List) {
        Commands::Add { title } => commands::habit::add(&mut tracker, title.join(" "), &output),
        Commands::List => commands::habit::list(&tracker, &output),
        Commands::Toggle { id } => commands::habit::toggle(&mut tracker, id, &output),
        Commands::Edit { id, title } => commands::habit::edit(&mut tracker, id, title, &output),
        Commands::Delete { id, yes } => commands::habit::delete(&mut tracker, id, yes, &output),
        Commands::Progress { period, days } => {
            commands::progress::show(&tracker, period, days, &output)
        }
        Commands::Reminder { command } => handle_reminder_command(command, &mut tracker, &output),
        Commands::Status => commands::status::show(&tracker, &config, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_reminder_command(
    command: Option<ReminderCommands>,
    tracker: &mut Tracker,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ReminderCommands::On) => commands::reminder::set(tracker, true, output),
        Some(ReminderCommands::Off) => commands::reminder::set(tracker, false, output),
        Some(ReminderCommands::Status) | None => commands::reminder::show(tracker, output),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
        Some(ConfigCommands::Path) => {
            let path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_joins_words() {
        let cli = Cli::parse_from(["habits", "add", "Drink", "water"]);
        match cli.command {
            Some(Commands::Add { title }) => assert_eq!(title.join(" "), "Drink water"),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_progress_period() {
        let cli = Cli::parse_from(["habits", "progress", "--period", "monthly"]);
        match cli.command {
            Some(Commands::Progress { period, days }) => {
                assert_eq!(period, Period::Monthly);
                assert!(days.is_none());
            }
            _ => panic!("expected progress"),
        }

        let cli = Cli::parse_from(["habits", "progress"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Progress {
                period: Period::Weekly,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_progress_rejects_zero_days() {
        assert!(Cli::try_parse_from(["habits", "progress", "--days", "0"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["habits", "--json", "status"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Status)));
    }
}
