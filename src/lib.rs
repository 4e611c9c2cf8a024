//! stretch925 - A Pomodoro timer with guided stretch breaks
//!
//! This crate provides the session state machine that sequences work
//! intervals, breaks and the stretch flow, plus the terminal front end
//! that drives it.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::Stretch925Error;
pub use features::session::SessionController;
