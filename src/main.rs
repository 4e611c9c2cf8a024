use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use stretch925::cli::args::{Cli, Commands, RunArgs};
use stretch925::cli::commands;
use stretch925::config::{Config, Paths};
use stretch925::error::Stretch925Error;
use stretch925::logging;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        let code = e
            .downcast_ref::<Stretch925Error>()
            .map_or(1, Stretch925Error::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file.clone());
    let config = Config::load_from_path(&config_path)?;
    config.general.color.apply();

    // Logging is best effort; the timer still works without it.
    let _guard = match logging::init(&paths.logs, cli.verbose) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}: logging disabled: {e}", "warning".yellow().bold());
            None
        }
    };
    tracing::debug!(config = %config_path.display(), "loaded configuration");

    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        None => commands::run(&config, &RunArgs::default())?,
        Some(Commands::Run(args)) => commands::run(&config, &args)?,
        Some(Commands::Config(args)) => {
            commands::config(&config, &config_path, args.command, format)?
        }
        Some(Commands::Exercises) => commands::exercises(&config, format)?,
        Some(Commands::Score { path }) => commands::score(&path, format)
            .with_context(|| format!("could not tally {}", path.display()))?,
        Some(Commands::Completions { shell }) => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
