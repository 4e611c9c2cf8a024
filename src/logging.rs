//! Log setup.
//!
//! The timer owns the terminal, so logs go to `~/.stretch925/logs/` rather
//! than stderr. `RUST_LOG` overrides the default filter.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Stretch925Error;

/// Log file name inside the logs directory.
pub const LOG_FILE: &str = "stretch925.log";

/// Default filter directive for the given verbosity.
#[must_use]
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "stretch925=debug"
    } else {
        "stretch925=info"
    }
}

/// Initialize the global tracing subscriber, writing to `log_dir`.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes buffered log lines.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a subscriber
/// is already installed.
pub fn init(log_dir: &Path, verbose: bool) -> Result<WorkerGuard, Stretch925Error> {
    std::fs::create_dir_all(log_dir)?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| Stretch925Error::Config(format!("Failed to initialize logging: {e}")))?;

    Ok(guard)
}
