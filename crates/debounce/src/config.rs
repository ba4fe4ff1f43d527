//! Debouncer configuration

use crate::error::ConfigError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default quiescence window, in milliseconds
pub const DEFAULT_DELAY_MS: i64 = 1000;

/// Debouncer configuration
///
/// Stored as a signed integer so that configuration files carrying a negative
/// value are rejected with a clear error instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiescence window in milliseconds
    pub delay_ms: i64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl DebounceConfig {
    pub fn from_millis(delay_ms: i64) -> Self {
        Self { delay_ms }
    }

    /// Parse a standalone `delay_ms = N` TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants
    pub fn validate(&self) -> Result<()> {
        if self.delay_ms < 0 {
            return Err(ConfigError::NegativeDelay(self.delay_ms));
        }
        Ok(())
    }

    /// Validated quiescence window
    pub fn delay(&self) -> Result<Duration> {
        self.validate()?;
        Ok(Duration::from_millis(self.delay_ms as u64))
    }
}
