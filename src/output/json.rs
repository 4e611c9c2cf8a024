//! JSON output formatting for stretch925.

use std::path::Path;

use serde::Serialize;
use serde_json::json;

use crate::config::Config;
use crate::error::Stretch925Error;
use crate::features::stretch::{Exercise, ScoreTally};

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// Returns `Stretch925Error::Json` if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Stretch925Error> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format the effective configuration as JSON
///
/// # Errors
///
/// Returns `Stretch925Error::Json` if serialization fails.
pub fn format_config_json(config: &Config, path: &Path) -> Result<String, Stretch925Error> {
    let output = json!({
        "path": path,
        "config": config,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the stretch catalog as JSON
///
/// # Errors
///
/// Returns `Stretch925Error::Json` if serialization fails.
pub fn format_exercises_json() -> Result<String, Stretch925Error> {
    let items: Vec<_> = Exercise::ALL
        .iter()
        .map(|exercise| {
            json!({
                "id": exercise,
                "name": exercise.display_name(),
                "instruction": exercise.instruction(),
                "analysis_node": exercise.analysis_node(),
            })
        })
        .collect();

    let output = json!({
        "count": items.len(),
        "items": items,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a score tally as JSON
///
/// # Errors
///
/// Returns `Stretch925Error::Json` if serialization fails.
pub fn format_score_json(tally: &ScoreTally, path: &Path) -> Result<String, Stretch925Error> {
    let output = json!({
        "path": path,
        "people": tally.best_by_person.len(),
        "best_by_person": tally.best_by_person,
        "total": tally.total(),
        "points": tally.points(),
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
