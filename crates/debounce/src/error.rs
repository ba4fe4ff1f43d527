//! Construction errors

use thiserror::Error;

/// Errors raised while building a debouncer
///
/// A debouncer that was constructed successfully never fails afterwards.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The quiescence window cannot be negative
    #[error("debounce delay must be non-negative, got {0}ms")]
    NegativeDelay(i64),

    /// The configuration could not be decoded (missing or non-numeric delay)
    #[error("invalid debounce configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Timers need a tokio runtime to run on
    #[error("debouncer must be created from within a tokio runtime")]
    NoRuntime,
}
