use std::path::Path;

use chrono::Duration;
use colored::Colorize;

use crate::config::Config;
use crate::features::session::{format_duration, ExhaustedBreakPolicy};
use crate::features::stretch::{Exercise, ScoreTally};

/// Format the effective configuration as pretty output
pub fn format_config_pretty(config: &Config, path: &Path) -> String {
    let mut output = vec![
        "Configuration".bold().to_string(),
        "─".repeat(40),
        format!("File:            {}", path.display().to_string().dimmed()),
        String::new(),
        "Timer".bold().to_string(),
        format!(
            "  Work:          {}",
            format_duration(Duration::seconds(i64::from(config.timer.work_seconds)))
        ),
        format!(
            "  Break:         {}",
            format_duration(Duration::seconds(i64::from(config.timer.break_seconds)))
        ),
        format!("  Sessions:      {}", config.timer.session_count),
        format!(
            "  After cycle:   {}",
            match config.timer.exhausted_break {
                ExhaustedBreakPolicy::ReturnToIdle => "return to idle",
                ExhaustedBreakPolicy::RestartWork => "restart work",
            }
        ),
        String::new(),
        "Stretch".bold().to_string(),
        format!(
            "  Length:        {}",
            format_duration(Duration::seconds(i64::from(config.stretch.stretch_seconds)))
        ),
        format!("  Exercise:      {}", config.stretch.exercise.to_string().cyan()),
    ];

    output.push(format!(
        "  Score log:     {}",
        config
            .stretch
            .score_log
            .as_ref()
            .map_or_else(|| "none".dimmed().to_string(), |p| p.display().to_string())
    ));

    output.join("\n")
}

/// Format the stretch catalog as pretty output
pub fn format_exercises_pretty(highlight: Exercise) -> String {
    let mut output = format!("Stretches ({})\n", Exercise::ALL.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for exercise in Exercise::ALL {
        let marker = if exercise == highlight {
            "▸".green()
        } else {
            " ".normal()
        };
        output.push_str(&format!(
            "{} {:<6} {}\n",
            marker,
            exercise.display_name().bold(),
            exercise.instruction().dimmed()
        ));
    }

    output
}

/// Format a score tally as pretty output
pub fn format_score_pretty(tally: &ScoreTally, path: &Path) -> String {
    if tally.is_empty() {
        return format!(
            "No scores recorded in {}\n  Did the tracker run?",
            path.display()
        );
    }

    let mut output = vec![
        "Stretch Score".bold().to_string(),
        "─".repeat(40),
    ];

    for (person, best) in &tally.best_by_person {
        output.push(format!("  Person {person:<4} best {best}"));
    }

    output.push(String::new());
    output.push(format!(
        "{} {}",
        "Total:".bold(),
        tally.total().to_string().green()
    ));
    output.push(format!("You have earned {} points!", tally.points()));

    output.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_exercises_pretty_lists_all() {
        colored::control::set_override(false);
        let result = format_exercises_pretty(Exercise::Neck);

        assert!(result.starts_with("Stretches (3)"));
        assert!(result.contains("Y-W"));
        assert!(result.contains("▸ Neck"));
        assert!(result.contains("Side"));
    }

    #[test]
    fn test_format_score_pretty() {
        colored::control::set_override(false);
        let tally = ScoreTally::parse("0:120\n").unwrap();
        let result = format_score_pretty(&tally, Path::new("tmp.txt"));

        assert!(result.contains("Person 0"));
        assert!(result.contains("Total: 120"));
        assert!(result.contains("You have earned 12 points!"));
    }

    #[test]
    fn test_format_score_pretty_empty() {
        let result = format_score_pretty(&ScoreTally::default(), Path::new("tmp.txt"));
        assert!(result.starts_with("No scores recorded in tmp.txt"));
    }

    #[test]
    fn test_format_config_pretty() {
        colored::control::set_override(false);
        let result = format_config_pretty(&Config::default(), Path::new("/x/config.yaml"));

        assert!(result.contains("/x/config.yaml"));
        assert!(result.contains("Work:          25 minutes"));
        assert!(result.contains("Break:         5 minutes"));
        assert!(result.contains("Length:        1 minute"));
        assert!(result.contains("Score log:     none"));
    }
}
