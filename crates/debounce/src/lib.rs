//! Debouncing primitive for Lull
//!
//! This crate provides a cancellable, leak-free debouncer:
//! - Single pending invocation per instance (replace-and-cancel-previous)
//! - Configurable quiescence window
//! - Explicit disposal, plus disposal on drop
//! - Optional outcome channel for observing action results

pub mod config;
pub mod debouncer;
pub mod error;
mod slot;

// Re-exports
pub use config::DebounceConfig;
pub use debouncer::{Debouncer, WeakDebouncer};
pub use error::ConfigError;

/// Result type for debouncer construction
pub type Result<T> = std::result::Result<T, ConfigError>;
