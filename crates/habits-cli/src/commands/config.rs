//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use habits_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "rollover_on_mutation": config.rollover_on_mutation,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:             {}", config.data_dir.display());
            println!("  rollover_on_mutation: {}", config.rollover_on_mutation);
            println!(
                "  log_file:             {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

/// Apply one `key = value` assignment to `config`
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            config.data_dir = value.into();
        }
        "rollover_on_mutation" => {
            config.rollover_on_mutation = value
                .parse()
                .context("Invalid value for rollover_on_mutation. Use 'true' or 'false'.")?;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, rollover_on_mutation, log_file",
                key
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(temp_dir: &TempDir) -> PathBuf {
        let path = temp_dir.path().join("config.toml");
        let config = Config {
            data_dir: temp_dir.path().join("data"),
            ..Config::default()
        };
        config.save_to_path(&path).unwrap();
        path
    }

    #[test]
    fn test_set_saves_to_config_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = config_in(&temp_dir);
        let output = Output::new(OutputFormat::Quiet);

        set(
            "log_file".to_string(),
            "/tmp/habits.log".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let reloaded = Config::load_from_path(&path).unwrap();
        assert_eq!(reloaded.log_file, Some(PathBuf::from("/tmp/habits.log")));
        assert_eq!(reloaded.data_dir, temp_dir.path().join("data"));
    }

    #[test]
    fn test_set_unknown_key_leaves_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = config_in(&temp_dir);
        let before = std::fs::read_to_string(&path).unwrap();
        let output = Output::new(OutputFormat::Quiet);

        assert!(set("sync_url".to_string(), "ws://x".to_string(), Some(&path), &output).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "data_dir", "/tmp/habits-data").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/habits-data"));

        apply(&mut config, "rollover_on_mutation", "true").unwrap();
        assert!(config.rollover_on_mutation);

        apply(&mut config, "log_file", "/tmp/habits.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/habits.log")));

        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::default();
        assert!(apply(&mut config, "rollover_on_mutation", "sometimes").is_err());
        assert!(apply(&mut config, "sync_url", "ws://x").is_err());
    }
}
