//! Output formatting for stretch925.
//!
//! This module provides formatters for displaying configuration, the
//! stretch catalog, and score tallies in various formats.

mod json;
mod pretty;

use std::path::Path;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::Stretch925Error;
use crate::features::stretch::{Exercise, ScoreTally};

pub use json::*;
pub use pretty::*;

/// Format the effective configuration based on output format
///
/// # Errors
///
/// Returns `Stretch925Error::Json` if JSON serialization fails.
pub fn format_config(
    config: &Config,
    path: &Path,
    format: OutputFormat,
) -> Result<String, Stretch925Error> {
    match format {
        OutputFormat::Pretty => Ok(format_config_pretty(config, path)),
        OutputFormat::Json => format_config_json(config, path),
    }
}

/// Format the stretch catalog based on output format
///
/// # Errors
///
/// Returns `Stretch925Error::Json` if JSON serialization fails.
pub fn format_exercises(
    highlight: Exercise,
    format: OutputFormat,
) -> Result<String, Stretch925Error> {
    match format {
        OutputFormat::Pretty => Ok(format_exercises_pretty(highlight)),
        OutputFormat::Json => format_exercises_json(),
    }
}

/// Format a score tally based on output format
///
/// # Errors
///
/// Returns `Stretch925Error::Json` if JSON serialization fails.
pub fn format_score(
    tally: &ScoreTally,
    path: &Path,
    format: OutputFormat,
) -> Result<String, Stretch925Error> {
    match format {
        OutputFormat::Pretty => Ok(format_score_pretty(tally, path)),
        OutputFormat::Json => format_score_json(tally, path),
    }
}
