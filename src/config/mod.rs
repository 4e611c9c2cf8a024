//! Configuration management for stretch925.
//!
//! This module handles loading and saving configuration from `~/.stretch925/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, StretchConfig, TimerConfig};
