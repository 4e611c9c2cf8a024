//! Command implementations for stretch925.
//!
//! Each command returns the text to print; `main` does the printing.

mod completions;

use std::path::Path;

pub use completions::completions;

use crate::cli::args::{ConfigCommands, OutputFormat, RunArgs};
use crate::config::Config;
use crate::error::Stretch925Error;
use crate::features::stretch::ScoreTally;
use crate::output::{format_config, format_exercises, format_score};
use crate::tui;

/// Execute the run command
///
/// # Errors
///
/// Returns an error if the effective settings are invalid or the terminal fails.
pub fn run(config: &Config, args: &RunArgs) -> Result<String, Stretch925Error> {
    let config = apply_run_overrides(config.clone(), args);
    config.session_settings().map_err(|e| match e {
        Stretch925Error::Config(msg) => Stretch925Error::InvalidArgument(msg),
        other => other,
    })?;
    tui::run(&config)?;
    Ok(String::new())
}

/// Layer `run` flags over the loaded configuration.
#[must_use]
pub fn apply_run_overrides(mut config: Config, args: &RunArgs) -> Config {
    if let Some(sessions) = args.sessions {
        config.timer.session_count = sessions;
    }
    if let Some(work) = args.work {
        config.timer.work_seconds = work;
    }
    if let Some(rest) = args.rest {
        config.timer.break_seconds = rest;
    }
    if let Some(stretch) = args.stretch {
        config.stretch.stretch_seconds = stretch;
    }
    if let Some(exercise) = args.exercise {
        config.stretch.exercise = exercise;
    }
    if let Some(score_log) = &args.score_log {
        config.stretch.score_log = Some(score_log.clone());
    }
    config
}

/// Execute config subcommands
///
/// # Errors
///
/// Returns an error if the config file cannot be written or output formatting fails.
pub fn config(
    config: &Config,
    path: &Path,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, Stretch925Error> {
    match cmd {
        ConfigCommands::Show => format_config(config, path, format),
        ConfigCommands::Path => Ok(path.display().to_string()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(Stretch925Error::Config(format!(
                    "{} already exists.\nUse --force to overwrite it.",
                    path.display()
                )));
            }
            Config::default().save_to_path(path)?;
            tracing::info!(path = %path.display(), "wrote default config");
            Ok(format!("Wrote default config to {}", path.display()))
        }
    }
}

/// Execute exercises command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn exercises(config: &Config, format: OutputFormat) -> Result<String, Stretch925Error> {
    format_exercises(config.stretch.exercise, format)
}

/// Execute score command
///
/// # Errors
///
/// Returns an error if the score log cannot be read or parsed.
pub fn score(path: &Path, format: OutputFormat) -> Result<String, Stretch925Error> {
    let tally = ScoreTally::load(path)?;
    format_score(&tally, path, format)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::features::stretch::Exercise;
    use tempfile::TempDir;

    #[test]
    fn test_apply_run_overrides() {
        let args = RunArgs {
            sessions: Some(2),
            work: Some(600),
            rest: None,
            stretch: Some(30),
            exercise: Some(Exercise::Side),
            score_log: Some(PathBuf::from("scores.txt")),
        };

        let config = apply_run_overrides(Config::default(), &args);

        assert_eq!(config.timer.session_count, 2);
        assert_eq!(config.timer.work_seconds, 600);
        assert_eq!(config.timer.break_seconds, 300);
        assert_eq!(config.stretch.stretch_seconds, 30);
        assert_eq!(config.stretch.exercise, Exercise::Side);
        assert_eq!(config.stretch.score_log, Some(PathBuf::from("scores.txt")));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = apply_run_overrides(Config::default(), &RunArgs::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_init_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        let defaults = Config::default();

        let msg = config(
            &defaults,
            &path,
            ConfigCommands::Init { force: false },
            OutputFormat::Pretty,
        )
        .unwrap();
        assert!(msg.starts_with("Wrote default config"));
        assert!(path.exists());

        let err = config(
            &defaults,
            &path,
            ConfigCommands::Init { force: false },
            OutputFormat::Pretty,
        )
        .unwrap_err();
        assert!(err.to_string().contains("--force"));

        assert!(config(
            &defaults,
            &path,
            ConfigCommands::Init { force: true },
            OutputFormat::Pretty,
        )
        .is_ok());
    }

    #[test]
    fn test_run_rejects_zero_work_before_terminal() {
        let args = RunArgs {
            work: Some(0),
            ..RunArgs::default()
        };
        let err = run(&Config::default(), &args).unwrap_err();
        assert!(matches!(err, Stretch925Error::InvalidArgument(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_path() {
        let path = Path::new("/tmp/stretch925/config.yaml");
        let out = config(
            &Config::default(),
            path,
            ConfigCommands::Path,
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(out, "/tmp/stretch925/config.yaml");
    }
}
