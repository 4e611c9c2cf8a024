//! Command-line interface for stretch925.

pub mod args;
pub mod commands;
