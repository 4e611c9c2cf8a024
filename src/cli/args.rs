use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::session::parse_duration_secs;
use crate::features::stretch::Exercise;

#[derive(Parser)]
#[command(name = "stretch925")]
#[command(about = "A Pomodoro timer with guided stretch breaks")]
#[command(long_about = "stretch925 - Take a break. Have a stretch.

Runs Pomodoro work/break cycles in your terminal. During a break you can
opt into a short guided stretch tracked by a pose estimator.

QUICK START:
  stretch925                      Start the timer with your saved settings
  stretch925 run --sessions 2     Two work intervals this cycle
  stretch925 run --work 50m       Longer work intervals
  stretch925 exercises            List the stretches

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  stretch925 <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` config value.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to the config file
    #[arg(short, long, global = true, env = "STRETCH925_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the timer (default)
    ///
    /// Opens the full-screen timer. Flags override the config file for
    /// this run only.
    ///
    /// # Keys
    ///
    ///   s          Start a work interval
    ///   e          End the work interval early
    ///   n          Skip the running countdown
    ///   b          Begin the stretch flow during a break
    ///   Enter      Ready: start stretching
    ///   1-5        Set the session count (before starting)
    ///   q / Esc    Quit
    ///
    /// # Examples
    ///
    ///   stretch925 run
    ///   stretch925 run --sessions 3 --work 45m --break 10m
    ///   stretch925 run --exercise neck --score-log ./tmp.txt
    #[command(alias = "r")]
    Run(RunArgs),

    /// Show or initialize the configuration
    Config(ConfigArgs),

    /// List the guided stretches
    #[command(alias = "ex")]
    Exercises,

    /// Tally a stretch score log
    ///
    /// Reads `person_id:score` lines written by the pose tracker, keeps each
    /// person's best score, and reports the total and points earned.
    Score {
        /// Path to the score log
        path: PathBuf,
    },

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   stretch925 completions zsh > ~/.zsh/completions/_stretch925
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `run`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Work intervals per cycle (1-5)
    #[arg(long, short = 's', value_parser = clap::value_parser!(u8).range(1..=5))]
    pub sessions: Option<u8>,

    /// Work interval length (e.g., 25m, 1h, 90s)
    #[arg(long, short = 'w', value_parser = parse_duration_arg)]
    pub work: Option<u32>,

    /// Break length (e.g., 5m, 300s)
    #[arg(long = "break", short = 'b', value_parser = parse_duration_arg)]
    pub rest: Option<u32>,

    /// Stretch length (e.g., 60s, 2m)
    #[arg(long, value_parser = parse_duration_arg)]
    pub stretch: Option<u32>,

    /// Stretch highlighted on the camera screen
    #[arg(long, short = 'x', value_enum)]
    pub exercise: Option<Exercise>,

    /// Score log written by the pose tracker
    #[arg(long)]
    pub score_log: Option<PathBuf>,
}

/// Arguments for `config`.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file if none exists
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Parse a duration flag into seconds.
fn parse_duration_arg(s: &str) -> Result<u32, String> {
    parse_duration_secs(s).ok_or_else(|| {
        format!("invalid duration '{s}' (use forms like 25m, 1h30m, 90s, or bare minutes)")
    })
}
