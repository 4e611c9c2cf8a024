//! Stretch score tallies.
//!
//! The pose tracker appends one `person_id:score` line per detected person
//! per frame to a score log. A tally keeps each person's best score and
//! sums them. The timer consumes the log once it has read it, so the next
//! stretch starts from an empty file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Stretch925Error;

/// Score points per earned point.
pub const SCORE_PER_POINT: u64 = 10;

/// Aggregated scores from one stretch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTally {
    /// Best score per person seen by the tracker
    pub best_by_person: BTreeMap<u32, u64>,
}

impl ScoreTally {
    /// Parse score log contents.
    ///
    /// A last line with no trailing newline is still being written by the
    /// tracker and is skipped. A last line that is terminated counts like
    /// any other. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Stretch925Error::Parse` naming the first malformed line.
    pub fn parse(contents: &str) -> Result<Self, Stretch925Error> {
        let complete = match contents.rfind('\n') {
            Some(end) => &contents[..end],
            None => "",
        };

        let mut tally = Self::default();
        for (index, line) in complete.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (person, score) = parse_line(line).ok_or_else(|| {
                Stretch925Error::Parse(format!(
                    "Score log line {}: expected 'id:score', got '{line}'",
                    index + 1
                ))
            })?;
            tally.record(person, score);
        }

        debug!(people = tally.best_by_person.len(), total = tally.total(), "score log parsed");
        Ok(tally)
    }

    /// Read and parse a score log file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Stretch925Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Read a score log and remove it, so the next stretch is tallied on
    /// its own.
    ///
    /// A log that cannot be removed is logged and left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. The file is
    /// kept in that case.
    pub fn take(path: &Path) -> Result<Self, Stretch925Error> {
        let tally = Self::load(path)?;
        if let Err(e) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "could not remove score log");
        }
        Ok(tally)
    }

    /// Record one score, keeping the person's best.
    pub fn record(&mut self, person: u32, score: u64) {
        let best = self.best_by_person.entry(person).or_insert(0);
        *best = (*best).max(score);
    }

    /// Sum of every person's best score.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.best_by_person.values().sum()
    }

    /// Points earned for the total.
    #[must_use]
    pub fn points(&self) -> u64 {
        self.total() / SCORE_PER_POINT
    }

    /// Whether no scores were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best_by_person.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(u32, u64)> {
    let (person, score) = line.split_once(':')?;
    Some((person.trim().parse().ok()?, score.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_keeps_best_score_per_person() {
        let tally = ScoreTally::parse("0:40\n1:30\n0:120\n1:10\n").unwrap();

        assert_eq!(tally.best_by_person.get(&0), Some(&120));
        assert_eq!(tally.best_by_person.get(&1), Some(&30));
        assert_eq!(tally.total(), 150);
        assert_eq!(tally.points(), 15);
    }

    #[test]
    fn test_skips_unterminated_last_line() {
        let tally = ScoreTally::parse("0:50\n0:9").unwrap();
        assert_eq!(tally.total(), 50);

        let tally = ScoreTally::parse("0:9").unwrap();
        assert!(tally.is_empty());
    }

    #[test]
    fn test_counts_terminated_last_line() {
        let tally = ScoreTally::parse("0:5\n0:90\n").unwrap();
        assert_eq!(tally.total(), 90);
    }

    #[test]
    fn test_ignores_blank_lines() {
        let tally = ScoreTally::parse("\n0:5\n\n").unwrap();
        assert_eq!(tally.total(), 5);
    }

    #[test]
    fn test_malformed_line_names_line_number() {
        let err = ScoreTally::parse("0:5\nbad\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        assert!(ScoreTally::parse("x:5\n").is_err());
        assert!(ScoreTally::parse("1:-3\n").is_err());
    }

    #[test]
    fn test_empty_log() {
        let tally = ScoreTally::parse("").unwrap();
        assert!(tally.is_empty());
        assert_eq!(tally.points(), 0);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "2:70").unwrap();
        writeln!(file, "3:80").unwrap();

        let tally = ScoreTally::load(file.path()).unwrap();
        assert_eq!(tally.total(), 150);
    }

    #[test]
    fn test_take_removes_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tmp.txt");
        fs::write(&path, "0:120\n").unwrap();

        let tally = ScoreTally::take(&path).unwrap();

        assert_eq!(tally.total(), 120);
        assert!(!path.exists());
    }

    #[test]
    fn test_take_keeps_unparsable_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tmp.txt");
        fs::write(&path, "garbage\n").unwrap();

        assert!(ScoreTally::take(&path).is_err());
        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScoreTally::load(Path::new("/nonexistent/score.log")).unwrap_err();
        assert!(matches!(err, Stretch925Error::Io(_)));
    }
}
