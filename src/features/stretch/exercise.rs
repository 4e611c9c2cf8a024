//! The guided stretch catalog.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Stretch925Error;

/// A stretch the pose tracker knows how to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Exercise {
    /// Y-W raises for the upper back and shoulders
    #[default]
    Arm,
    /// Neck tilts
    Neck,
    /// Standing side bends
    Side,
}

impl Exercise {
    /// Every stretch, in the order they are presented.
    pub const ALL: [Self; 3] = [Self::Arm, Self::Neck, Self::Side];

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Arm => "Y-W",
            Self::Neck => "Neck",
            Self::Side => "Side",
        }
    }

    /// One-line instruction shown on the intro screen.
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Arm => "Raise your arms into a Y, then pull elbows down into a W",
            Self::Neck => "Tilt your head slowly toward each shoulder",
            Self::Side => "Reach one arm overhead and bend to the opposite side",
        }
    }

    /// Name of the pose-analysis node that scores this stretch.
    #[must_use]
    pub const fn analysis_node(self) -> &'static str {
        match self {
            Self::Arm => "yw",
            Self::Neck => "ms",
            Self::Side => "lat",
        }
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Exercise {
    type Err = Stretch925Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arm" | "arms" | "y-w" | "yw" => Ok(Self::Arm),
            "neck" | "ms" => Ok(Self::Neck),
            "side" | "lat" => Ok(Self::Side),
            other => Err(Stretch925Error::Parse(format!(
                "Unknown stretch '{other}' (expected arm, neck, or side)"
            ))),
        }
    }
}
