//! Session phases, countdown kinds, and transitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Stretch925Error;

/// The single authoritative state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Nothing running; waiting for the user to start
    Idle,
    /// A work interval is counting down
    Working,
    /// A break interval is counting down
    OnBreak,
    /// The break continues while the stretches are introduced
    StretchIntro,
    /// The camera-tracked stretch is counting down; break time is frozen
    StretchActive,
    /// Stretch finished; the break continues until it runs out
    StretchDone,
}

impl Phase {
    /// The countdown that is live in this phase, if any.
    #[must_use]
    pub const fn live_interval(self) -> Option<Interval> {
        match self {
            Self::Idle => None,
            Self::Working => Some(Interval::Work),
            Self::OnBreak | Self::StretchIntro | Self::StretchDone => Some(Interval::Break),
            Self::StretchActive => Some(Interval::Stretch),
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Working => "Focus",
            Self::OnBreak => "Break Time",
            Self::StretchIntro => "The Stretches",
            Self::StretchActive => "Stretching",
            Self::StretchDone => "Well Done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One of the three countdowns a session owns.
///
/// Also names the target of a skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// The work countdown
    Work,
    /// The break countdown
    Break,
    /// The stretch countdown
    Stretch,
}

impl Interval {
    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
            Self::Stretch => "stretch",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Stretch925Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" | "focus" | "w" => Ok(Self::Work),
            "break" | "b" => Ok(Self::Break),
            "stretch" | "s" => Ok(Self::Stretch),
            other => Err(Stretch925Error::Parse(format!(
                "Unknown interval '{other}' (expected work, break, or stretch)"
            ))),
        }
    }
}

/// What caused a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cause {
    /// The user started a work interval
    Start,
    /// The user ended the work interval early
    Stop,
    /// A countdown ran out on its own
    Expired,
    /// The user skipped the rest of a countdown
    Skipped,
    /// The user opted into the stretch flow
    EnterStretch,
    /// The user is ready for the camera
    Ready,
}

/// A phase change, reported to observers and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Phase before the change
    pub from: Phase,
    /// Phase after the change
    pub to: Phase,
    /// Why it happened
    pub cause: Cause,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?} ({:?})", self.from, self.to, self.cause)
    }
}
