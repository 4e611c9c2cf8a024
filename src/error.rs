//! Error types for stretch925.

use thiserror::Error;

/// Errors that can occur while running stretch925.
///
/// Rejected controller actions are not errors; see
/// [`Rejection`](crate::features::session::Rejection).
#[derive(Error, Debug)]
pub enum Stretch925Error {
    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A command-line argument was invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The terminal could not be set up, drawn, or restored.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Stretch925Error {
    /// Exit code for this error when returned from the binary.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}
