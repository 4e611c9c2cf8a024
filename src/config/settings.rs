//! Configuration settings for stretch925.
//!
//! Settings are loaded from `~/.stretch925/config.yaml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::Stretch925Error;
use crate::features::session::{ExhaustedBreakPolicy, SessionSettings};
use crate::features::stretch::Exercise;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Work/break timer settings.
    pub timer: TimerConfig,
    /// Stretch break settings.
    pub stretch: StretchConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to `colored` output.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Work/break timer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Work interval length in seconds.
    #[serde(default = "default_work_seconds")]
    pub work_seconds: u32,
    /// Break length in seconds.
    #[serde(default = "default_break_seconds")]
    pub break_seconds: u32,
    /// Work intervals per cycle (1-5).
    #[serde(default = "default_session_count")]
    pub session_count: u8,
    /// What happens when the last break of a cycle ends.
    #[serde(default)]
    pub exhausted_break: ExhaustedBreakPolicy,
}

/// Stretch break settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StretchConfig {
    /// Stretch length in seconds.
    #[serde(default = "default_stretch_seconds")]
    pub stretch_seconds: u32,
    /// Stretch highlighted on the camera screen.
    #[serde(default)]
    pub exercise: Exercise,
    /// Score log written by the pose tracker.
    #[serde(default)]
    pub score_log: Option<PathBuf>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_work_seconds() -> u32 {
    1500
}

const fn default_break_seconds() -> u32 {
    300
}

const fn default_session_count() -> u8 {
    4
}

const fn default_stretch_seconds() -> u32 {
    60
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: default_work_seconds(),
            break_seconds: default_break_seconds(),
            session_count: default_session_count(),
            exhausted_break: ExhaustedBreakPolicy::default(),
        }
    }
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            stretch_seconds: default_stretch_seconds(),
            exercise: Exercise::default(),
            score_log: None,
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, Stretch925Error> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            Stretch925Error::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            Stretch925Error::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), Stretch925Error> {
        let contents = serde_yaml::to_string(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents).map_err(|e| {
            Stretch925Error::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Controller settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a duration is zero or the session count is out of range.
    pub fn session_settings(&self) -> Result<SessionSettings, Stretch925Error> {
        let settings = SessionSettings {
            work_seconds: self.timer.work_seconds,
            break_seconds: self.timer.break_seconds,
            stretch_seconds: self.stretch.stretch_seconds,
            session_count: self.timer.session_count,
            exhausted_break: self.timer.exhausted_break,
        };
        settings.validate()?;
        Ok(settings)
    }
}
