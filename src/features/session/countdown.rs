//! Countdowns and the repeating timer handle that drives them.
//!
//! Also provides duration parsing/formatting shared by the CLI and the
//! terminal front end.

use std::time::Duration as StdDuration;

use chrono::Duration;

/// Period between countdown ticks.
pub const TICK_PERIOD: StdDuration = StdDuration::from_secs(1);

/// A per-second countdown.
///
/// A countdown only holds remaining time. Whether it is running is decided by
/// whoever holds the [`TimerHandle`] for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    /// Full duration in seconds
    total_seconds: u32,
    /// Seconds left
    remaining_seconds: u32,
}

impl Countdown {
    /// Create a full countdown of the given length.
    #[must_use]
    pub const fn new(seconds: u32) -> Self {
        Self {
            total_seconds: seconds,
            remaining_seconds: seconds,
        }
    }

    /// Remove one second.
    ///
    /// Returns true if the countdown is at zero after the tick.
    pub fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        self.remaining_seconds == 0
    }

    /// Jump straight to zero.
    pub fn force_zero(&mut self) {
        self.remaining_seconds = 0;
    }

    /// Refill to the full duration.
    pub fn reset(&mut self) {
        self.remaining_seconds = self.total_seconds;
    }

    /// Seconds left.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Full duration in seconds.
    #[must_use]
    pub const fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Remaining time as a Duration.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        Duration::seconds(i64::from(self.remaining_seconds))
    }

    /// Progress as a fraction (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        1.0 - (f64::from(self.remaining_seconds) / f64::from(self.total_seconds))
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_duration_mmss(self.remaining())
    }
}

/// A repeating one-second timer.
///
/// The handle remembers when it last fired. Each call to [`due_ticks`]
/// reports how many whole periods have passed since then and moves its
/// anchor forward, so a slow caller never loses or double-counts a tick.
/// Once canceled the handle reports nothing, ever.
///
/// [`due_ticks`]: TimerHandle::due_ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerHandle {
    anchor: Option<StdDuration>,
    period_ms: u64,
}

impl TimerHandle {
    /// Start a timer at the given clock reading.
    #[must_use]
    pub fn start(now: StdDuration) -> Self {
        Self::with_period(now, TICK_PERIOD)
    }

    /// Start a timer with a custom period.
    #[must_use]
    pub fn with_period(now: StdDuration, period: StdDuration) -> Self {
        let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX).max(1);
        Self {
            anchor: Some(now),
            period_ms,
        }
    }

    /// Number of periods elapsed since the last firing.
    pub fn due_ticks(&mut self, now: StdDuration) -> u64 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        let Some(elapsed) = now.checked_sub(anchor) else {
            return 0;
        };

        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let due = elapsed_ms / self.period_ms;
        self.anchor = Some(anchor + StdDuration::from_millis(due * self.period_ms));
        due
    }

    /// Count one period as fired without waiting for the clock.
    ///
    /// The anchor may move past the current reading; [`due_ticks`] then
    /// reports nothing until the clock catches up.
    ///
    /// [`due_ticks`]: TimerHandle::due_ticks
    pub fn consume_period(&mut self) {
        if let Some(anchor) = self.anchor {
            self.anchor = Some(anchor + StdDuration::from_millis(self.period_ms));
        }
    }

    /// Stop the timer. Canceling twice is harmless.
    pub fn cancel(&mut self) {
        self.anchor = None;
    }

    /// Whether the timer can still fire.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_seconds = d.num_seconds();
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        return format!(
            "{} second{}",
            total_seconds,
            if total_seconds == 1 { "" } else { "s" }
        );
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let seconds = total_seconds % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if minutes > 0 {
        parts.push(format!(
            "{} minute{}",
            minutes,
            if minutes == 1 { "" } else { "s" }
        ));
    }
    if seconds > 0 {
        parts.push(format!(
            "{} second{}",
            seconds,
            if seconds == 1 { "" } else { "s" }
        ));
    }
    parts.join(", ")
}

/// Parse a duration string like "25m", "1h30m", "90s".
///
/// A bare number is read as minutes.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<i64>() {
        return (minutes > 0).then(|| Duration::minutes(minutes));
    }

    let mut total_seconds: i64 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if current_num.is_empty() {
            return None;
        } else {
            let num: i64 = current_num.parse().ok()?;
            current_num.clear();

            match c {
                'h' => total_seconds += num * 3600,
                'm' => total_seconds += num * 60,
                's' => total_seconds += num,
                _ => return None,
            }
        }
    }

    // Trailing number without unit counts as minutes
    if !current_num.is_empty() {
        let num: i64 = current_num.parse().ok()?;
        total_seconds += num * 60;
    }

    (total_seconds > 0).then(|| Duration::seconds(total_seconds))
}

/// Parse a duration string into whole seconds that fit a countdown.
#[must_use]
pub fn parse_duration_secs(s: &str) -> Option<u32> {
    parse_duration(s).and_then(|d| u32::try_from(d.num_seconds()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_new() {
        let countdown = Countdown::new(1500);
        assert_eq!(countdown.remaining_seconds(), 1500);
        assert_eq!(countdown.remaining().num_minutes(), 25);
        assert_eq!(countdown.format_remaining(), "25:00");
    }

    #[test]
    fn test_countdown_tick_to_zero() {
        let mut countdown = Countdown::new(60);

        for _ in 0..59 {
            assert!(!countdown.tick());
        }

        assert!(countdown.tick());
        assert_eq!(countdown.remaining_seconds(), 0);
        // Saturates instead of wrapping
        assert!(countdown.tick());
        assert_eq!(countdown.remaining_seconds(), 0);
    }

    #[test]
    fn test_countdown_force_zero_and_reset() {
        let mut countdown = Countdown::new(300);
        countdown.tick();
        countdown.force_zero();
        assert_eq!(countdown.remaining_seconds(), 0);

        countdown.reset();
        assert_eq!(countdown.remaining_seconds(), 300);
    }

    #[test]
    fn test_countdown_progress() {
        let mut countdown = Countdown::new(100);
        assert_eq!(countdown.progress(), 0.0);

        for _ in 0..50 {
            countdown.tick();
        }

        assert!((countdown.progress() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_timer_handle_counts_whole_periods() {
        let mut handle = TimerHandle::start(StdDuration::ZERO);

        assert_eq!(handle.due_ticks(StdDuration::from_millis(999)), 0);
        assert_eq!(handle.due_ticks(StdDuration::from_millis(1000)), 1);
        assert_eq!(handle.due_ticks(StdDuration::from_millis(3500)), 2);
        // The half period left over is carried to the next reading
        assert_eq!(handle.due_ticks(StdDuration::from_millis(4000)), 1);
    }

    #[test]
    fn test_timer_handle_cancel_is_idempotent() {
        let mut handle = TimerHandle::start(StdDuration::ZERO);
        handle.cancel();
        handle.cancel();

        assert!(!handle.is_live());
        assert_eq!(handle.due_ticks(StdDuration::from_secs(60)), 0);
    }

    #[test]
    fn test_consumed_period_is_not_reported_again() {
        let mut handle = TimerHandle::start(StdDuration::ZERO);
        handle.consume_period();

        assert_eq!(handle.due_ticks(StdDuration::from_millis(1500)), 0);
        assert_eq!(handle.due_ticks(StdDuration::from_millis(2000)), 1);
    }

    #[test]
    fn test_timer_handle_ignores_earlier_readings() {
        let mut handle = TimerHandle::start(StdDuration::from_secs(10));
        assert_eq!(handle.due_ticks(StdDuration::from_secs(5)), 0);
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration("25"), Some(Duration::minutes(25)));
        assert_eq!(parse_duration("25m"), Some(Duration::minutes(25)));
    }

    #[test]
    fn test_parse_duration_compound() {
        assert_eq!(parse_duration("1h"), Some(Duration::hours(1)));
        assert_eq!(parse_duration("2h30m"), Some(Duration::minutes(150)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::seconds(90)));
        assert_eq!(parse_duration("90s"), Some(Duration::seconds(90)));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("0").is_none());
        assert!(parse_duration("5x").is_none());
    }

    #[test]
    fn test_parse_duration_secs() {
        assert_eq!(parse_duration_secs("25m"), Some(1500));
        assert_eq!(parse_duration_secs("60s"), Some(60));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::minutes(25)), "25 minutes");
        assert_eq!(format_duration(Duration::minutes(1)), "1 minute");
        assert_eq!(format_duration(Duration::seconds(60)), "1 minute");
        assert_eq!(format_duration(Duration::seconds(45)), "45 seconds");
        assert_eq!(format_duration(Duration::minutes(90)), "1 hour, 30 minutes");
        assert_eq!(format_duration(Duration::seconds(90)), "1 minute, 30 seconds");
    }

    #[test]
    fn test_format_duration_mmss() {
        assert_eq!(format_duration_mmss(Duration::minutes(25)), "25:00");
        assert_eq!(format_duration_mmss(Duration::seconds(65)), "01:05");
        assert_eq!(format_duration_mmss(Duration::seconds(0)), "00:00");
    }

}
